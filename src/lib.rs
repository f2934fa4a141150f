pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig, Command};

pub use adapters::gemini::GeminiClient;
pub use crate::config::AppConfig;
pub use crate::core::{
    composer::ArticleComposer,
    dispatcher::{send_blog_notification, NotificationDispatcher},
    front_matter::{build_front_matter, normalize},
};
pub use utils::error::{BlogError, Result};
