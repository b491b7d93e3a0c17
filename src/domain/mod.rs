//! Domain layer - Core business logic and entities

pub mod error;
pub mod notification;
pub mod pagination;
pub mod user;

pub use error::DomainError;
pub use notification::{NotificationGateway, UserNotification};
pub use pagination::{Page, PageRequest};
pub use user::{Account, Card, User, UserCandidate, UserId, UserRepository};
