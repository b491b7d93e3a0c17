//! PostgreSQL user repository implementation

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::{Account, Card, User, UserCandidate, UserId, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str =
    "id, name, email, account_number, account_agency, card_number, features, news";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                name TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT '',
                account_number TEXT UNIQUE,
                account_agency TEXT,
                card_number TEXT UNIQUE,
                features TEXT[] NOT NULL DEFAULT '{}',
                news BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }

    /// Insert the reserved system user unless it already exists, then move the
    /// identity sequence past every existing ID
    pub async fn seed_reserved_user(&self, name: &str, email: &str) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(UserId::RESERVED.value())
        .bind(name)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to seed reserved user: {}", e)))?;

        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('users', 'id'), (SELECT MAX(id) FROM users))",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to advance user ID sequence: {}", e)))?;

        Ok(())
    }

    /// Round-trip a trivial query to confirm the database answers
    pub async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by {}: {}", column, e)))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<Page<User>, DomainError> {
        let pattern = like_pattern(name);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        let query = format!(
            "SELECT {} FROM users WHERE name ILIKE $1 ORDER BY id LIMIT $2 OFFSET $3",
            USER_COLUMNS
        );

        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let rows = sqlx::query(&query)
            .bind(&pattern)
            .bind(i64::from(page.size()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to search users: {}", e)))?;

        let content = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, page, total.max(0) as u64))
    }

    async fn find_by_account_number(&self, number: &str) -> Result<Option<User>, DomainError> {
        self.find_one("account_number", number).await
    }

    async fn find_by_card_number(&self, number: &str) -> Result<Option<User>, DomainError> {
        self.find_one("card_number", number).await
    }

    async fn insert(&self, candidate: UserCandidate) -> Result<User, DomainError> {
        let features: Vec<String> = candidate.features.iter().cloned().collect();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, account_number, account_agency, card_number,
                               features, news)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(candidate.account.as_ref().map(|a| a.number.as_str()))
        .bind(candidate.account.as_ref().map(|a| a.agency.as_str()))
        .bind(candidate.card.as_ref().map(|c| c.number.as_str()))
        .bind(features)
        .bind(candidate.news)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create"))?;

        let id = UserId::new(id)
            .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

        Ok(User::new(id, candidate))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let features: Vec<String> = user.features().iter().cloned().collect();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, account_number = $4, account_agency = $5,
                card_number = $6, features = $7, news = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id().value())
        .bind(user.name())
        .bind(user.email())
        .bind(user.account_number())
        .bind(user.account().map(|a| a.agency.as_str()))
        .bind(user.card_number())
        .bind(features)
        .bind(user.news())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))?;

        ensure_row_updated(result.rows_affected(), user.id())?;

        Ok(user.clone())
    }

    async fn delete(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id().value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(())
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: i64 = row.get("id");
    let account_number: Option<String> = row.get("account_number");
    let account_agency: Option<String> = row.get("account_agency");
    let card_number: Option<String> = row.get("card_number");
    let features: Vec<String> = row.get("features");

    let user_id = UserId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

    let candidate = UserCandidate {
        name: row.get("name"),
        email: row.get("email"),
        account: account_number.map(|number| Account {
            number,
            agency: account_agency.unwrap_or_default(),
        }),
        card: card_number.map(|number| Card { number }),
        features: features.into_iter().collect::<BTreeSet<_>>(),
        news: row.get("news"),
    };

    Ok(User::new(user_id, candidate))
}

/// Build an ILIKE pattern matching `text` anywhere, with LIKE wildcards in
/// the input taken literally
fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped.push('%');
    escaped
}

/// An UPDATE that touched no row means the user was deleted after it was read
fn ensure_row_updated(rows_affected: u64, id: UserId) -> Result<(), DomainError> {
    if rows_affected == 0 {
        return Err(DomainError::not_found(format!("User not found with ID: {}", id)));
    }

    Ok(())
}

fn map_write_error(err: sqlx::Error, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();

            return if constraint.contains("account_number") {
                DomainError::conflict("Account number already in use")
            } else if constraint.contains("card_number") {
                DomainError::conflict("Card number already in use")
            } else {
                DomainError::conflict(format!("Failed to {} user: {}", action, db_err.message()))
            };
        }
    }

    DomainError::storage(format!("Failed to {} user: {}", action, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_text() {
        assert_eq!(like_pattern("an"), "%an%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }

    #[test]
    fn test_non_database_error_is_storage() {
        let err = map_write_error(sqlx::Error::RowNotFound, "update");
        assert!(matches!(err, DomainError::Storage { .. }));
        assert!(err.to_string().contains("Failed to update user"));
    }

    #[test]
    fn test_update_of_vanished_row_is_not_found() {
        let id = UserId::new(7).unwrap();

        let err = ensure_row_updated(0, id).unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("User not found with ID: 7"));
        assert!(ensure_row_updated(1, id).is_ok());
    }
}
