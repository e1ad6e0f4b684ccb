use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use threadlens_persist::ConversationRecord;

use crate::{
    error::{ApiError, ApiResult},
    identity::authenticate,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SaveConversationRequest {
    pub post_url: String,
    #[serde(default)]
    pub ai_messages: Vec<String>,
    #[serde(default)]
    pub user_messages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveConversationResponse {
    pub conversation_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListConversationsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct ListConversationsResponse {
    pub conversations: Vec<ConversationResponse>,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub post_url: String,
    pub ai_messages: Vec<String>,
    pub user_messages: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Save a conversation for the authenticated user.
///
/// Append-only: every call creates a new record. There is no atomicity
/// with the login-time user upsert; a failed insert leaves no partial
/// conversation behind.
pub async fn save_conversation(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SaveConversationRequest>,
) -> ApiResult<(StatusCode, Json<SaveConversationResponse>)> {
    let identity = authenticate(&state, &headers).await?;

    if req.post_url.trim().is_empty() {
        return Err(ApiError::BadRequest("post_url must not be empty".to_string()));
    }

    let conversation_id = state
        .store
        .insert_conversation(
            &identity.uid,
            &req.post_url,
            req.ai_messages,
            req.user_messages,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveConversationResponse { conversation_id }),
    ))
}

/// List the authenticated user's conversations, most recent first
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListConversationsQuery>,
) -> ApiResult<Json<ListConversationsResponse>> {
    let identity = authenticate(&state, &headers).await?;

    let limit = query.limit.clamp(1, 50);
    let conversations = state.store.list_conversations(&identity.uid, limit).await?;

    Ok(Json(ListConversationsResponse {
        conversations: conversations
            .into_iter()
            .map(conversation_to_response)
            .collect(),
    }))
}

fn conversation_to_response(record: ConversationRecord) -> ConversationResponse {
    ConversationResponse {
        id: record.id,
        post_url: record.post_url,
        ai_messages: record.ai_messages,
        user_messages: record.user_messages,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
