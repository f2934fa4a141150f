use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Service returned HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Service returned no usable text: {message}")]
    EmptyResponse { message: String },
}

impl BlogError {
    /// Short hint printed next to the error by the CLI.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BlogError::ApiError(_) => "Check network connectivity and the configured endpoint",
            BlogError::IoError(_) => "Check that the output directory exists and is writable",
            BlogError::SerializationError(_) => "The service response was not valid JSON",
            BlogError::ConfigError { .. } | BlogError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again"
            }
            BlogError::MissingConfigError { .. } => {
                "Set the value in the config file or the matching environment variable"
            }
            BlogError::ServiceError { status, .. } if *status == 401 || *status == 403 => {
                "Check the API key"
            }
            BlogError::ServiceError { .. } => "Inspect the response body for details",
            BlogError::EmptyResponse { .. } => "Retry the request; the model may have been filtered",
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
