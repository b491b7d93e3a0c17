//! Application state for shared services

use std::sync::Arc;

use crate::domain::pagination::Page;
use crate::domain::{DomainError, NotificationGateway, User, UserCandidate, UserId, UserRepository};
use crate::infrastructure::user::UserService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

/// Trait for user lifecycle operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: UserId) -> Result<User, DomainError>;
    async fn find_by_name(&self, name: &str, page: u32, size: u32)
        -> Result<Page<User>, DomainError>;
    async fn find_by_account_number(&self, number: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_card_number(&self, number: &str) -> Result<Option<User>, DomainError>;
    async fn create(&self, candidate: Option<UserCandidate>) -> Result<User, DomainError>;
    async fn update(&self, id: UserId, candidate: UserCandidate) -> Result<User, DomainError>;
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, N> UserServiceTrait for UserService<R, N>
where
    R: UserRepository + 'static,
    N: NotificationGateway + 'static,
{
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        UserService::find_all(self).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, DomainError> {
        UserService::find_by_id(self, id).await
    }

    async fn find_by_name(
        &self,
        name: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<User>, DomainError> {
        UserService::find_by_name(self, name, page, size).await
    }

    async fn find_by_account_number(&self, number: &str) -> Result<Option<User>, DomainError> {
        UserService::find_by_account_number(self, number).await
    }

    async fn find_by_card_number(&self, number: &str) -> Result<Option<User>, DomainError> {
        UserService::find_by_card_number(self, number).await
    }

    async fn create(&self, candidate: Option<UserCandidate>) -> Result<User, DomainError> {
        UserService::create(self, candidate).await
    }

    async fn update(&self, id: UserId, candidate: UserCandidate) -> Result<User, DomainError> {
        UserService::update(self, id, candidate).await
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}
