use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use std::sync::Arc;
use threadlens_auth::Identity;

use crate::{error::ApiResult, identity::authenticate, state::AppState};

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Validate a bearer token and record the login.
///
/// A successful validation upserts the user record so `created_at` is set
/// on first login and `updated_at` refreshed on every later one.
pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ValidateResponse>> {
    let identity = authenticate(&state, &headers).await?;

    state
        .store
        .upsert_user(&identity.uid, identity.display_name.as_deref())
        .await?;

    Ok(Json(ValidateResponse {
        valid: true,
        user: identity_to_response(identity),
    }))
}

fn identity_to_response(identity: Identity) -> UserResponse {
    UserResponse {
        uid: identity.uid,
        email: identity.email,
        display_name: identity.display_name,
    }
}
