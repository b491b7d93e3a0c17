//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserCandidate, UserId};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for user storage
///
/// Listing methods return users ordered by id ascending. Account and card
/// numbers are unique across users; implementations report a clash as
/// `DomainError::Conflict`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Get a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Case-insensitive substring search on the user name
    async fn find_by_name_containing(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<Page<User>, DomainError>;

    /// Find the user owning an account number
    async fn find_by_account_number(&self, number: &str) -> Result<Option<User>, DomainError>;

    /// Find the user owning a card number
    async fn find_by_card_number(&self, number: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user; the store assigns the ID
    async fn insert(&self, candidate: UserCandidate) -> Result<User, DomainError>;

    /// Overwrite the stored user with `user.id()` in one atomic step.
    /// `DomainError::NotFound` when that user no longer exists; never inserts.
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user
    async fn delete(&self, user: &User) -> Result<(), DomainError>;
}
