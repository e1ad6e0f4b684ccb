use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use threadlens_types::{AnalysisResult, ChatTurn, Thread, ValidationError};

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    pub thread_data: Thread,
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    pub user_message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}

/// Continue a conversation about a thread.
///
/// The first exchange also carries a full analysis in the response; later
/// exchanges return only the reply.
pub async fn chat_about_thread(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequestBody>,
) -> ApiResult<Json<ChatResponseBody>> {
    req.thread_data.validate()?;
    if req.user_message.trim().is_empty() {
        return Err(ValidationError::EmptyUserMessage.into());
    }

    let reply = state
        .conversation
        .chat(&req.thread_data, &req.messages, &req.user_message)
        .await?;

    Ok(Json(ChatResponseBody {
        message: reply.message,
        analysis: reply.analysis,
    }))
}
