//! User lifecycle service: business rules and notification around the store

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::{
    validate_changeable_id, validate_user_for_creation, User, UserCandidate, UserId,
    UserRepository,
};
use crate::domain::{DomainError, NotificationGateway, UserNotification};
use crate::infrastructure::observability::{record_notification, record_user_operation};

/// User service for lifecycle management
///
/// Writes persist first and notify second. A failed notification is logged and
/// counted but never fails the operation that triggered it.
#[derive(Debug)]
pub struct UserService<R: UserRepository, N: NotificationGateway> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R: UserRepository, N: NotificationGateway> UserService<R, N> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// List every user
    pub async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        self.repository.find_all().await
    }

    /// Get a user by ID
    pub async fn find_by_id(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    /// Search users whose name contains `name`, ignoring case
    pub async fn find_by_name(
        &self,
        name: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<User>, DomainError> {
        let request = PageRequest::new(page, size)?;
        self.repository.find_by_name_containing(name, request).await
    }

    pub async fn find_by_account_number(&self, number: &str) -> Result<Option<User>, DomainError> {
        self.repository.find_by_account_number(number).await
    }

    pub async fn find_by_card_number(&self, number: &str) -> Result<Option<User>, DomainError> {
        self.repository.find_by_card_number(number).await
    }

    /// Create a new user
    pub async fn create(&self, candidate: Option<UserCandidate>) -> Result<User, DomainError> {
        let result = self.create_inner(candidate).await;
        record_user_operation("create", &result);
        result
    }

    /// Replace a user's mutable fields
    pub async fn update(&self, id: UserId, candidate: UserCandidate) -> Result<User, DomainError> {
        let result = self.update_inner(id, candidate).await;
        record_user_operation("update", &result);
        result
    }

    /// Delete a user
    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let result = self.delete_inner(id).await;
        record_user_operation("delete", &result);
        result
    }

    async fn create_inner(&self, candidate: Option<UserCandidate>) -> Result<User, DomainError> {
        let candidate =
            validate_user_for_creation(candidate).map_err(|e| DomainError::business(e.to_string()))?;

        let user = self.repository.insert(candidate).await?;
        info!(user_id = %user.id(), "User created");

        self.notify(&user, UserNotification::Welcome).await;

        Ok(user)
    }

    async fn update_inner(&self, id: UserId, candidate: UserCandidate) -> Result<User, DomainError> {
        validate_changeable_id(id, "updated").map_err(|e| DomainError::business(e.to_string()))?;

        let mut user = self.find_by_id(id).await?;
        user.replace_with(candidate);

        let user = self.repository.update(&user).await?;
        info!(user_id = %user.id(), "User updated");

        self.notify(&user, UserNotification::AccountUpdated).await;

        Ok(user)
    }

    async fn delete_inner(&self, id: UserId) -> Result<(), DomainError> {
        validate_changeable_id(id, "deleted").map_err(|e| DomainError::business(e.to_string()))?;

        let user = self.find_by_id(id).await?;

        self.repository.delete(&user).await?;
        info!(user_id = %user.id(), "User deleted");

        self.notify(&user, UserNotification::AccountDeleted).await;

        Ok(())
    }

    async fn notify(&self, user: &User, notification: UserNotification) {
        let result = self
            .notifier
            .send(user.email(), notification.subject(), notification.body())
            .await;

        record_notification(notification.subject(), result.is_ok());

        if let Err(e) = result {
            warn!(
                user_id = %user.id(),
                to = %user.email(),
                subject = notification.subject(),
                error = %e,
                "Notification failed"
            );
        }
    }
}

fn user_not_found(id: UserId) -> DomainError {
    DomainError::not_found(format!("User not found with ID: {}", id))
}
