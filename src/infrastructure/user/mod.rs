//! User infrastructure module
//!
//! Store implementations for users (in-memory and PostgreSQL) and the user
//! lifecycle service that applies business rules and sends notifications.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;
