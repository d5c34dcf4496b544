use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Store error: {0}")]
    StoreError(#[from] rusqlite::Error),

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::SerializationError(_) => ErrorCategory::Input,
            Self::StoreError(_) | Self::StoreUnavailable { .. } => ErrorCategory::Storage,
            Self::ConfigError { .. } | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::IoError(_) | Self::CsvError(_) | Self::TaskError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration | ErrorCategory::System => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ValidationError { field, .. } => {
                format!("Fix the '{}' field in the payload and submit again", field)
            }
            Self::SerializationError(_) => {
                "Make sure the payload is a single well-formed JSON object".to_string()
            }
            Self::StoreError(_) | Self::StoreUnavailable { .. } => {
                "Check that the database path is writable and not locked by another process"
                    .to_string()
            }
            Self::ConfigError { .. } | Self::TomlError(_) => {
                "Check the configuration file, or run `init-config` to write a fresh one"
                    .to_string()
            }
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::CsvError(_) | Self::TaskError(_) => "Retry the command".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, reason } => {
                format!("Package rejected: {} ({})", reason, field)
            }
            Self::StoreError(e) => format!("Could not reach the package store: {}", e),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_input_errors() {
        let err = IntakeError::validation("senderCity", "must not be empty");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("senderCity"));
    }

    #[test]
    fn store_errors_are_critical() {
        let err = IntakeError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
