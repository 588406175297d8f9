use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] sqlx::Error),

    #[error("Storage failure: {message}")]
    StorageFailure { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    NotFound,
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

impl ComplianceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ComplianceError::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ComplianceError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ComplianceError::ValidationError { .. } | ComplianceError::CsvError(_) => {
                ErrorCategory::Input
            }
            ComplianceError::NotFound { .. } => ErrorCategory::NotFound,
            ComplianceError::StorageError(_) | ComplianceError::StorageFailure { .. } => {
                ErrorCategory::Storage
            }
            ComplianceError::MissingConfigError { .. }
            | ComplianceError::InvalidConfigValueError { .. }
            | ComplianceError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ComplianceError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Storage errors may clear up on their own; everything else needs a fix by the caller.
    pub fn is_storage(&self) -> bool {
        self.category() == ErrorCategory::Storage
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Correct the request data and try again",
            ErrorCategory::NotFound => "Check the identifier, or compute the missing data first",
            ErrorCategory::Storage => "Check that the database is reachable and writable",
            ErrorCategory::Configuration => {
                "Review the command line flags or the TOML configuration file"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    /// Message safe to hand to API clients. Storage details stay in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ComplianceError::ValidationError { message } => message.clone(),
            ComplianceError::NotFound { entity, .. } => format!("{} not found", entity),
            ComplianceError::StorageError(_) | ComplianceError::StorageFailure { .. } => {
                "The data store is currently unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
