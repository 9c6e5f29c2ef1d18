use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Preference store error: {message}")]
    StoreError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl FeedError {
    /// Short operator-facing summary, without wire-level details.
    pub fn user_friendly_message(&self) -> String {
        match self {
            FeedError::ApiError(_) => "Could not reach the feed endpoint".to_string(),
            FeedError::IoError(_) => "A file operation failed".to_string(),
            FeedError::SerializationError(_) => "The feed returned a malformed document".to_string(),
            FeedError::ConfigError { message } => format!("Configuration problem: {}", message),
            FeedError::InvalidConfigValueError { field, .. } => {
                format!("Configuration value for '{}' is invalid", field)
            }
            FeedError::MissingConfigError { field } => {
                format!("Configuration value for '{}' is missing", field)
            }
            FeedError::StoreError { .. } => "Display preferences could not be accessed".to_string(),
            FeedError::ProcessingError { message } => format!("Processing failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FeedError::ApiError(_) => {
                "Check the feed URL and network connectivity; the poller retries on the next cycle"
            }
            FeedError::IoError(_) => "Check file permissions and that the path exists",
            FeedError::SerializationError(_) => {
                "Verify the endpoint serves the dashboard JSON document"
            }
            FeedError::ConfigError { .. }
            | FeedError::InvalidConfigValueError { .. }
            | FeedError::MissingConfigError { .. } => {
                "Fix the flagged configuration value and restart"
            }
            FeedError::StoreError { .. } => {
                "Delete or fix the preferences file; defaults are used in the meantime"
            }
            FeedError::ProcessingError { .. } => "Inspect the log for the failing payload",
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
