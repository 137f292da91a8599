use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntertainerError {
    #[error("{} does not exist", .path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EntertainerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ResourceNotFound { .. } => ErrorCategory::Input,
            Self::IoError(_) => ErrorCategory::System,
            Self::SerializationError(_) => ErrorCategory::Output,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ResourceNotFound { path } => format!(
                "Check that the customer data file {} exists or pass --customer-data-file",
                path.display()
            ),
            Self::IoError(_) => {
                "Check file permissions and available disk space, then retry".to_string()
            }
            Self::SerializationError(_) => {
                "Customer names or ids could not be encoded; inspect the input data".to_string()
            }
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the configuration file syntax and field names".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            Self::ProcessingError { .. } => {
                "Create a new decider for each run; a record source can only be read once"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ResourceNotFound { path } => {
                format!("Customer data file not found: {}", path.display())
            }
            Self::IoError(e) => format!("A file operation failed: {}", e),
            Self::SerializationError(e) => format!("Could not write the result file: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            Self::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' has an invalid value '{}': {}", field, value, reason),
            Self::ProcessingError { message } => format!("Processing failed: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, EntertainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_high_severity_input_error() {
        let err = EntertainerError::ResourceNotFound {
            path: PathBuf::from("missing.txt"),
        };

        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.to_string(), "missing.txt does not exist");
        assert!(err.user_friendly_message().contains("missing.txt"));
    }

    #[test]
    fn test_io_error_converts_and_is_critical() {
        let err: EntertainerError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();

        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
