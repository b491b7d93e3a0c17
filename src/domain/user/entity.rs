//! User entity and related types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::validation::{validate_user_id, UserValidationError};

/// User identifier assigned by the store, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// The system user. It can be read but never updated or deleted.
    pub const RESERVED: UserId = UserId(1);

    /// Create a new UserId after validation
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        validate_user_id(id)?;
        Ok(Self(id))
    }

    /// Get the inner value
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Check whether this is the reserved system user
    pub fn is_reserved(&self) -> bool {
        *self == Self::RESERVED
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bank account attached to a user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Account {
    pub number: String,
    #[serde(default)]
    pub agency: String,
}

impl Account {
    pub fn new(number: impl Into<String>, agency: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            agency: agency.into(),
        }
    }
}

/// Payment card attached to a user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Card {
    pub number: String,
}

impl Card {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }
}

/// Incoming user data for create and update.
///
/// Missing fields take their default value, so an update with a sparse
/// candidate clears whatever the candidate leaves out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCandidate {
    pub name: String,
    pub email: String,
    pub account: Option<Account>,
    pub card: Option<Card>,
    pub features: BTreeSet<String>,
    pub news: bool,
}

impl UserCandidate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.insert(feature.into());
        self
    }

    pub fn with_news(mut self, news: bool) -> Self {
        self.news = news;
        self
    }
}

/// Persisted user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    account: Option<Account>,
    card: Option<Card>,
    features: BTreeSet<String>,
    news: bool,
}

impl User {
    /// Build a persisted user from a store-assigned id and its data
    pub fn new(id: UserId, candidate: UserCandidate) -> Self {
        Self {
            id,
            name: candidate.name,
            email: candidate.email,
            account: candidate.account,
            card: candidate.card,
            features: candidate.features,
            news: candidate.news,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    pub fn features(&self) -> &BTreeSet<String> {
        &self.features
    }

    pub fn news(&self) -> bool {
        self.news
    }

    pub fn account_number(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.number.as_str())
    }

    pub fn card_number(&self) -> Option<&str> {
        self.card.as_ref().map(|c| c.number.as_str())
    }

    /// Overwrite every mutable field except email with the candidate's values.
    /// No merging: empty candidate fields clear the stored ones.
    pub fn replace_with(&mut self, candidate: UserCandidate) {
        self.name = candidate.name;
        self.account = candidate.account;
        self.card = candidate.card;
        self.features = candidate.features;
        self.news = candidate.news;
    }

    /// Data view of this user without the id
    pub fn to_candidate(&self) -> UserCandidate {
        UserCandidate {
            name: self.name.clone(),
            email: self.email.clone(),
            account: self.account.clone(),
            card: self.card.clone(),
            features: self.features.clone(),
            news: self.news,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> UserCandidate {
        UserCandidate::new("Ana", "ana@x.com")
            .with_account(Account::new("A1", "0001"))
            .with_card(Card::new("C1"))
            .with_feature("pix")
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new(42).unwrap();
        assert_eq!(id.value(), 42);
        assert!(!id.is_reserved());
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new(0).is_err());
        assert!(UserId::new(-3).is_err());
    }

    #[test]
    fn test_reserved_id() {
        assert!(UserId::new(1).unwrap().is_reserved());
        assert_eq!(UserId::RESERVED.value(), 1);
    }

    #[test]
    fn test_user_id_serde() {
        let id = UserId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let parsed: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<UserId>("0").is_err());
    }

    #[test]
    fn test_user_creation() {
        let user = User::new(UserId::new(2).unwrap(), ana());

        assert_eq!(user.name(), "Ana");
        assert_eq!(user.email(), "ana@x.com");
        assert_eq!(user.account_number(), Some("A1"));
        assert_eq!(user.card_number(), Some("C1"));
        assert!(user.features().contains("pix"));
        assert!(!user.news());
    }

    #[test]
    fn test_replace_with_is_wholesale() {
        let mut user = User::new(UserId::new(2).unwrap(), ana().with_news(true));

        user.replace_with(UserCandidate::new("Ana Maria", "other@x.com"));

        assert_eq!(user.id().value(), 2);
        assert_eq!(user.name(), "Ana Maria");
        assert_eq!(user.email(), "ana@x.com");
        assert!(user.account().is_none());
        assert!(user.card().is_none());
        assert!(user.features().is_empty());
        assert!(!user.news());
    }

    #[test]
    fn test_candidate_missing_fields_default() {
        let candidate: UserCandidate = serde_json::from_str(r#"{"name": "Bruno"}"#).unwrap();

        assert_eq!(candidate.name, "Bruno");
        assert!(candidate.email.is_empty());
        assert!(candidate.account.is_none());
        assert!(candidate.features.is_empty());
        assert!(!candidate.news);
    }

    #[test]
    fn test_to_candidate_round_trip() {
        let user = User::new(UserId::new(5).unwrap(), ana());
        assert_eq!(user.to_candidate(), ana());
    }
}
