//! User domain
//!
//! Domain types and traits for the user lifecycle: the user entity, its
//! validation rules and the repository trait stores implement.

mod entity;
mod repository;
mod validation;

pub use entity::{Account, Card, User, UserCandidate, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_changeable_id, validate_user_for_creation, validate_user_id, UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;
