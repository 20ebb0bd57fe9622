//! Handlers for requests no route accepts.

use crate::error::ApiError;

/// Unknown path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

/// Known path, wrong method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
