//! User validation utilities

use thiserror::Error;

use super::entity::{UserCandidate, UserId};

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID must be a positive number, got {0}")]
    NonPositiveId(i64),

    #[error("User to create must not be null.")]
    MissingCandidate,

    #[error("User with ID {id} cannot be {operation}.")]
    UnchangeableUser { id: UserId, operation: &'static str },
}

/// Validate a raw user ID
pub fn validate_user_id(id: i64) -> Result<(), UserValidationError> {
    if id < 1 {
        return Err(UserValidationError::NonPositiveId(id));
    }

    Ok(())
}

/// Validate a user candidate before creation.
///
/// Only presence is checked; field rules hook in here.
pub fn validate_user_for_creation(
    candidate: Option<UserCandidate>,
) -> Result<UserCandidate, UserValidationError> {
    candidate.ok_or(UserValidationError::MissingCandidate)
}

/// Reject mutations of the reserved system user
///
/// `operation` is the past participle naming the rejected change,
/// e.g. "updated" or "deleted".
pub fn validate_changeable_id(
    id: UserId,
    operation: &'static str,
) -> Result<(), UserValidationError> {
    if id.is_reserved() {
        return Err(UserValidationError::UnchangeableUser { id, operation });
    }

    Ok(())
}
