pub mod composer;
pub mod dispatcher;
pub mod front_matter;

pub use crate::domain::model::{Article, ArticleRequest, Audience, BlogPost, NotificationRequest};
pub use crate::domain::ports::{Storage, TextGenerator};
pub use crate::utils::error::Result;
