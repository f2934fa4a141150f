use crate::core::front_matter::DEFAULT_AUTHOR;
use crate::utils::error::{BlogError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const ONESIGNAL_APP_ID_VAR: &str = "ONESIGNAL_APP_ID";
pub const ONESIGNAL_REST_API_KEY_VAR: &str = "ONESIGNAL_REST_API_KEY";

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub onesignal: OneSignalConfig,
    pub blog: BlogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OneSignalConfig {
    pub app_id: Option<String>,
    pub rest_api_key: Option<String>,
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for OneSignalConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            rest_api_key: None,
            endpoint: "https://onesignal.com/api/v1/notifications".to_string(),
            timeout_seconds: None,
        }
    }
}

/// Both OneSignal secrets, known to be present.
#[derive(Clone)]
pub struct OneSignalCredentials {
    pub app_id: String,
    pub rest_api_key: String,
}

// The REST key never reaches logs.
impl fmt::Debug for OneSignalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneSignalCredentials")
            .field("app_id", &self.app_id)
            .field("rest_api_key", &"<redacted>")
            .finish()
    }
}

impl OneSignalConfig {
    pub fn credentials(&self) -> Result<OneSignalCredentials> {
        let app_id = validate_required_field("onesignal.app_id", &self.app_id)?;
        let rest_api_key = validate_required_field("onesignal.rest_api_key", &self.rest_api_key)?;
        Ok(OneSignalCredentials {
            app_id: app_id.clone(),
            rest_api_key: rest_api_key.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub site_url: String,
    pub author: String,
    pub posts_dir: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            site_url: "https://langchain-tutorials.github.io".to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            posts_dir: "_posts".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults plus credentials from the environment.
    pub fn from_env() -> Self {
        Self::default().with_env_fallbacks()
    }

    /// Reads `path` when given, then fills unset credentials from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_fallbacks())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BlogError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| BlogError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        Ok(config.without_unresolved_secrets())
    }

    /// Replaces `${VAR}` with the variable's value. Unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn without_unresolved_secrets(mut self) -> Self {
        self.gemini.api_key = resolved(self.gemini.api_key);
        self.onesignal.app_id = resolved(self.onesignal.app_id);
        self.onesignal.rest_api_key = resolved(self.onesignal.rest_api_key);
        self
    }

    fn with_env_fallbacks(mut self) -> Self {
        if self.gemini.api_key.is_none() {
            self.gemini.api_key = env_value(GEMINI_API_KEY_VAR);
        }
        if self.onesignal.app_id.is_none() {
            self.onesignal.app_id = env_value(ONESIGNAL_APP_ID_VAR);
        }
        if self.onesignal.rest_api_key.is_none() {
            self.onesignal.rest_api_key = env_value(ONESIGNAL_REST_API_KEY_VAR);
        }
        self
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("gemini.base_url", &self.gemini.base_url)?;
        validate_non_empty_string("gemini.model", &self.gemini.model)?;
        validate_url("onesignal.endpoint", &self.onesignal.endpoint)?;
        validate_url("blog.site_url", &self.blog.site_url)?;
        validate_non_empty_string("blog.author", &self.blog.author)?;
        validate_non_empty_string("blog.posts_dir", &self.blog.posts_dir)?;
        Ok(())
    }
}

fn env_value(name: &str) -> Option<String> {
    resolved(std::env::var(name).ok())
}

// Blank values and placeholders whose variable was unset count as missing.
fn resolved(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !ENV_PLACEHOLDER.is_match(v)
    })
}
