//! Notification domain
//!
//! Messages sent to users when their account changes, and the gateway trait
//! that delivers them.

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Lifecycle events that trigger a message to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserNotification {
    Welcome,
    AccountUpdated,
    AccountDeleted,
}

impl UserNotification {
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome!",
            Self::AccountUpdated => "Account Update",
            Self::AccountDeleted => "Account Deleted",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Self::Welcome => "Your account has been created successfully.",
            Self::AccountUpdated => "Your account details have been updated.",
            Self::AccountDeleted => "Your account has been deleted from the system.",
        }
    }
}

/// Outbound message transport. Delivery is fire-and-forget: `Ok` means the
/// message was handed off, not that it arrived.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError>;
}
