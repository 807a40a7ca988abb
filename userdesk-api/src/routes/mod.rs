/// API route handlers
///
/// - `root`: greeting and health endpoints
/// - `users`: create and fetch users

pub mod root;
pub mod users;

use crate::error::ApiError;

/// Fallback for unmatched routes and unsupported methods
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
