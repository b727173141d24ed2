use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Quote not found: {id}")]
    NotFound { id: String },

    #[error("Quote id already exists: {id}")]
    DuplicateId { id: String },

    #[error("Could not allocate a unique quote id after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Storage,
    Conflict,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            QuoteError::ValidationError { .. } | QuoteError::NotFound { .. } => {
                ErrorCategory::Input
            }
            QuoteError::IoError(_)
            | QuoteError::CsvError(_)
            | QuoteError::SerializationError(_)
            | QuoteError::ZipError(_) => ErrorCategory::Storage,
            QuoteError::DuplicateId { .. } | QuoteError::AllocationExhausted { .. } => {
                ErrorCategory::Conflict
            }
            QuoteError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Conflict => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            QuoteError::ConfigValidationError { .. } | QuoteError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command-line overrides".to_string()
            }
            QuoteError::ValidationError { .. } => {
                "Fix the highlighted field and submit the quote again".to_string()
            }
            QuoteError::NotFound { .. } => {
                "Run `quote-desk list` to see the existing quote ids".to_string()
            }
            QuoteError::DuplicateId { .. } | QuoteError::AllocationExhausted { .. } => {
                "Another writer is allocating ids; retry the operation".to_string()
            }
            QuoteError::IoError(_) | QuoteError::ZipError(_) => {
                "Check that the data directory exists and is writable".to_string()
            }
            QuoteError::CsvError(_) | QuoteError::SerializationError(_) => {
                "The stored data may be corrupted; restore it from an export".to_string()
            }
            QuoteError::ProcessingError { .. } => {
                "Check the input file format (JSON array or CSV with headers)".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::NotFound { id } => format!("Quote {} does not exist", id),
            QuoteError::ValidationError { message } => message.clone(),
            QuoteError::AllocationExhausted { .. } => {
                "Could not reserve a new quote number".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_input_error() {
        let err = QuoteError::NotFound {
            id: "2026-001".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.user_friendly_message(), "Quote 2026-001 does not exist");
    }

    #[test]
    fn test_duplicate_id_is_retryable_conflict() {
        let err = QuoteError::DuplicateId {
            id: "2026-002".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "Quote id already exists: 2026-002");
    }

    #[test]
    fn test_io_error_converts_and_is_critical() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: QuoteError = io.into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
