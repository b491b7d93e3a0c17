use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Business rule violation: {message}")]
    Business { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Notification error: {message}")]
    Notification { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn business(message: impl Into<String>) -> Self {
        Self::Business {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Business { .. } => "business",
            Self::Validation { .. } => "validation",
            Self::Conflict { .. } => "conflict",
            Self::Storage { .. } => "storage",
            Self::Notification { .. } => "notification",
            Self::Configuration { .. } => "configuration",
            Self::Internal { .. } => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User not found with ID: 42");
        assert_eq!(error.to_string(), "Not found: User not found with ID: 42");
    }

    #[test]
    fn test_business_error() {
        let error = DomainError::business("User with ID 1 cannot be deleted.");
        assert_eq!(
            error.to_string(),
            "Business rule violation: User with ID 1 cannot be deleted."
        );
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Account number 'A1' already in use");
        assert_eq!(error.to_string(), "Conflict: Account number 'A1' already in use");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(DomainError::not_found("").kind(), "not_found");
        assert_eq!(DomainError::business("").kind(), "business");
        assert_eq!(DomainError::storage("").kind(), "storage");
        assert_eq!(DomainError::notification("").kind(), "notification");
    }
}
