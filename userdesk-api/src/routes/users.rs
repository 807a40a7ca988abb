/// User endpoints
///
/// # Endpoints
///
/// - `POST /users` - Create a user
/// - `GET /users/:id` - Fetch a user by id
///
/// Each handler acquires one pooled connection, runs at most one statement on it and
/// lets the guard return it to the pool when the handler returns, whether
/// the statement succeeded or not. Database failures become
/// `ApiError::Database` at the call site.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{NumericPath, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use userdesk_shared::{
    models::user::{CreateUser, User},
    narrowing::{id_from_number, narrow_id},
};
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Create user response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub message: String,
    pub user_id: u64,
}

/// User as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: u64,
    pub username: String,
    pub email: String,
}

impl TryFrom<User> for UserResponse {
    type Error = ApiError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: narrow_id(user.user_id)?,
            username: user.username,
            email: user.email,
        })
    }
}

/// Create a user
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "username": "ada", "email": "ada@example.com" }
/// ```
///
/// Response (201):
/// ```json
/// { "message": "User created successfully", "user_id": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: body missing, malformed or failing validation
/// - `500 Internal Server Error`: `"Database error"` with the driver message
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<CreateUserResponse>)> {
    let mut conn = state.db.acquire().await?;

    let user_id = User::create(
        &mut conn,
        &CreateUser {
            username: req.username,
            email: req.email,
        },
    )
    .await?;

    tracing::info!(user_id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully".to_string(),
            user_id: narrow_id(user_id)?,
        }),
    ))
}

/// Fetch a user by id
///
/// ```text
/// GET /users/42
/// ```
///
/// Response (200):
/// ```json
/// { "user_id": 42, "username": "ada", "email": "ada@example.com" }
/// ```
///
/// Any number is a valid key. Negative, fractional or oversized keys cannot
/// match a row, so they skip the SELECT and answer 404 once the connection
/// has been acquired.
///
/// # Errors
///
/// - `400 Bad Request`: id is not a number
/// - `404 Not Found`: `"User not found"`
/// - `500 Internal Server Error`: `"Database error"` with the driver message
pub async fn get_user(
    State(state): State<AppState>,
    NumericPath(key): NumericPath,
) -> ApiResult<Json<UserResponse>> {
    let mut conn = state.db.acquire().await?;

    let user = match id_from_number(key) {
        Some(user_id) => User::find_by_id(&mut conn, user_id).await?,
        None => None,
    };
    let user = user.ok_or(ApiError::UserNotFound)?;

    Ok(Json(UserResponse::try_from(user)?))
}
