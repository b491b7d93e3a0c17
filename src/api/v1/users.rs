//! User endpoint handlers

use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::pagination::Page;
use crate::domain::{Account, Card, User, UserCandidate, UserId};

/// User as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    pub features: BTreeSet<String>,
    pub news: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            account: user.account().cloned(),
            card: user.card().cloned(),
            features: user.features().clone(),
            news: user.news(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

/// Query string of the name search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    10
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    let value: i64 = raw.parse().map_err(|_| {
        ApiError::bad_request(format!("Invalid user ID: '{}'", raw)).with_param("id")
    })?;

    UserId::new(value).map_err(|e| ApiError::bad_request(e.to_string()).with_param("id"))
}

/// GET /v1/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!("Listing all users");

    let users = state.user_service.find_all().await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// GET /v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    debug!(user_id = %id, "Getting user");

    let user = state.user_service.find_by_id(id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /v1/users/search?name=&page=&size=
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Page<UserResponse>>, ApiError> {
    debug!(
        name = %params.name,
        page = params.page,
        size = params.size,
        "Searching users by name"
    );

    let page = state
        .user_service
        .find_by_name(&params.name, params.page, params.size)
        .await?;

    Ok(Json(page.map(UserResponse::from)))
}

/// GET /v1/users/accounts/{number}
pub async fn get_user_by_account(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(account_number = %number, "Getting user by account number");

    let user = state
        .user_service
        .find_by_account_number(&number)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("User not found with account number: {}", number))
        })?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /v1/users/cards/{number}
pub async fn get_user_by_card(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(card_number = %number, "Getting user by card number");

    let user = state
        .user_service
        .find_by_card_number(&number)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found with card number: {}", number)))?;

    Ok(Json(UserResponse::from(user)))
}

/// POST /v1/users
///
/// A `null` body reaches the service as a missing candidate and is rejected there.
pub async fn create_user(
    State(state): State<AppState>,
    Json(candidate): Json<Option<UserCandidate>>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Creating user");

    let user = state.user_service.create(candidate).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PUT /v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(candidate): Json<UserCandidate>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    debug!(user_id = %id, "Updating user");

    let user = state.user_service.update(id, candidate).await?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_user_id(&id)?;
    debug!(user_id = %id, "Deleting user");

    state.user_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
