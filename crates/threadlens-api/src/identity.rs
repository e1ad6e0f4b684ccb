use axum::http::{header::AUTHORIZATION, HeaderMap};
use threadlens_auth::Identity;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Pull the bearer token out of the Authorization header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the caller's identity or reject the request.
///
/// Verification happens per request; nothing is cached between calls.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> ApiResult<Identity> {
    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    Ok(state.verifier.verify_token(token).await?)
}
