//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::{User, UserCandidate, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug)]
struct Users {
    /// Keyed by id so iteration is already in id order
    by_id: BTreeMap<UserId, User>,
    next_id: i64,
}

impl Users {
    fn check_unique(
        &self,
        exclude: Option<UserId>,
        account_number: Option<&str>,
        card_number: Option<&str>,
    ) -> Result<(), DomainError> {
        for user in self.by_id.values() {
            if Some(user.id()) == exclude {
                continue;
            }

            if let Some(number) = account_number {
                if user.account_number() == Some(number) {
                    return Err(DomainError::conflict(format!(
                        "Account number '{}' already in use",
                        number
                    )));
                }
            }

            if let Some(number) = card_number {
                if user.card_number() == Some(number) {
                    return Err(DomainError::conflict(format!(
                        "Card number '{}' already in use",
                        number
                    )));
                }
            }
        }

        Ok(())
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<Users>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Create a repository with initial users. New IDs continue after the
    /// highest seeded ID.
    pub fn with_users(users: Vec<User>) -> Self {
        let by_id: BTreeMap<UserId, User> = users.into_iter().map(|u| (u.id(), u)).collect();
        let next_id = by_id.keys().next_back().map_or(1, |id| id.value() + 1);

        Self {
            users: RwLock::new(Users { by_id, next_id }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.by_id.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.by_id.get(id).cloned())
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<Page<User>, DomainError> {
        let needle = name.to_lowercase();
        let users = self.users.read().await;

        let matches: Vec<User> = users
            .by_id
            .values()
            .filter(|u| u.name().to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(Page::from_ordered(matches, page))
    }

    async fn find_by_account_number(&self, number: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .by_id
            .values()
            .find(|u| u.account_number() == Some(number))
            .cloned())
    }

    async fn find_by_card_number(&self, number: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .by_id
            .values()
            .find(|u| u.card_number() == Some(number))
            .cloned())
    }

    async fn insert(&self, candidate: UserCandidate) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        users.check_unique(
            None,
            candidate.account.as_ref().map(|a| a.number.as_str()),
            candidate.card.as_ref().map(|c| c.number.as_str()),
        )?;

        let id = UserId::new(users.next_id).map_err(|e| DomainError::internal(e.to_string()))?;
        let user = User::new(id, candidate);

        users.next_id += 1;
        users.by_id.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.by_id.contains_key(&user.id()) {
            return Err(DomainError::not_found(format!(
                "User not found with ID: {}",
                user.id()
            )));
        }

        users.check_unique(Some(user.id()), user.account_number(), user.card_number())?;
        users.by_id.insert(user.id(), user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users.by_id.remove(&user.id());
        Ok(())
    }
}
