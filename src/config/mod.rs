#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::{AppConfig, BlogConfig, GeminiConfig, OneSignalConfig};

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli_args {
    use super::AppConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "blog-autopilot")]
    #[command(about = "Draft blog posts with Gemini and announce them through OneSignal")]
    pub struct CliConfig {
        #[arg(long, global = true, help = "Path to a TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, global = true, help = "Override the Gemini model")]
        pub model: Option<String>,

        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON lines")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Generate an article and write it as a Jekyll post
        Article {
            #[arg(long)]
            title: String,
            #[arg(long)]
            focus_keyword: String,
            #[arg(long)]
            permalink: String,
            #[arg(long)]
            semantic_keywords: String,
            #[arg(long, help = "Directory for the post file (defaults to blog.posts_dir)")]
            output_dir: Option<String>,
            #[arg(long, help = "Also print a featured-image prompt")]
            image_prompt: bool,
        },
        /// Print a featured-image prompt for a title
        ImagePrompt {
            #[arg(long)]
            title: String,
        },
        /// Announce a published post to all subscribers
        Notify {
            #[arg(long)]
            title: String,
            #[arg(long)]
            focus_keyword: String,
            #[arg(long)]
            permalink: String,
            #[arg(long)]
            image_url: Option<String>,
        },
        /// Send an arbitrary notification
        Send {
            #[arg(long)]
            title: String,
            #[arg(long)]
            message: String,
            #[arg(long)]
            url: Option<String>,
            #[arg(long)]
            image_url: Option<String>,
            #[arg(long = "segment")]
            segments: Vec<String>,
            #[arg(long = "player-id")]
            player_ids: Vec<String>,
        },
    }

    impl CliConfig {
        /// Loads the file (if any), applies flag overrides and validates the result.
        pub fn app_config(&self) -> Result<AppConfig> {
            let mut config = AppConfig::load(self.config.as_deref())?;
            if let Some(model) = &self.model {
                config.gemini.model = model.clone();
            }
            config.validate()?;
            Ok(config)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_send_with_repeated_audience_flags() {
            let cli = CliConfig::parse_from([
                "blog-autopilot",
                "send",
                "--title",
                "Hi",
                "--message",
                "There",
                "--segment",
                "Subscribers",
                "--segment",
                "Active Users",
                "--player-id",
                "p1",
            ]);
            match cli.command {
                Command::Send {
                    segments,
                    player_ids,
                    url,
                    ..
                } => {
                    assert_eq!(segments, vec!["Subscribers", "Active Users"]);
                    assert_eq!(player_ids, vec!["p1"]);
                    assert!(url.is_none());
                }
                other => panic!("Unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_article_requires_semantic_keywords() {
            let base = [
                "blog-autopilot",
                "article",
                "--title",
                "Rust",
                "--focus-keyword",
                "rust",
                "--permalink",
                "rust",
            ];
            let err = CliConfig::try_parse_from(base).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

            let cli = CliConfig::try_parse_from(base.into_iter().chain(["--semantic-keywords", "cargo, crates"]))
                .unwrap();
            match cli.command {
                Command::Article { semantic_keywords, .. } => assert_eq!(semantic_keywords, "cargo, crates"),
                other => panic!("Unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = CliConfig::parse_from([
                "blog-autopilot",
                "image-prompt",
                "--title",
                "Rust",
                "--verbose",
                "--model",
                "gemini-2.5-pro",
            ]);
            assert!(cli.verbose);
            assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
            assert!(matches!(cli.command, Command::ImagePrompt { .. }));
        }

        #[test]
        fn test_model_override_is_applied() {
            let cli = CliConfig::parse_from([
                "blog-autopilot",
                "--model",
                "custom-model",
                "image-prompt",
                "--title",
                "Rust",
            ]);
            let config = cli.app_config().unwrap();
            assert_eq!(config.gemini.model, "custom-model");
        }
    }
}
