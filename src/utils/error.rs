use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Telegram API call '{method}' failed: {description}")]
    TelegramApiError {
        method: String,
        description: String,
        code: Option<u16>,
        retry_after: Option<u64>,
    },

    #[error("Upstream service responded with status {status}")]
    UpstreamStatusError { status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::HttpError(_) | BotError::UpstreamStatusError { .. } => ErrorCategory::Network,
            BotError::IoError(_) => ErrorCategory::Configuration,
            BotError::SerializationError(_) => ErrorCategory::Data,
            BotError::ConfigValidationError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BotError::TelegramApiError { .. } => ErrorCategory::Transport,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        // flood control and server-side failures clear up on their own
        if let BotError::TelegramApiError {
            code: Some(code), ..
        } = self
        {
            if *code == 429 || *code >= 500 {
                return ErrorSeverity::Medium;
            }
        }

        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Transport => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Transient failures worth another attempt on the next poll cycle.
    pub fn is_retryable(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::Low | ErrorSeverity::Medium)
    }

    /// Wait requested by the Bot API before the next call, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            BotError::TelegramApiError {
                retry_after: Some(secs),
                ..
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BotError::HttpError(_) | BotError::UpstreamStatusError { .. } => {
                "Check network connectivity and the upstream service status"
            }
            BotError::IoError(_) => "Check that the file exists and is readable",
            BotError::SerializationError(_) => {
                "The remote service returned an unexpected payload; check the endpoint URL"
            }
            BotError::ConfigValidationError { .. } | BotError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and restart the bot"
            }
            BotError::MissingConfigError { .. } => {
                "Provide the value via command-line flag, environment variable or config file"
            }
            BotError::TelegramApiError { .. } => {
                "Verify the bot token and that the bot is not running elsewhere"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            BotError::ConfigValidationError { field, message } => {
                format!("Setting '{}' could not be loaded: {}", field, message)
            }
            BotError::TelegramApiError { description, .. } => {
                format!("Telegram rejected the request: {}", description)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
