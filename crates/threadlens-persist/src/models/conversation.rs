use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database-agnostic conversation model. Append-only: one record per save
/// call, never updated in place and never deleted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: String,
    pub uid: String,
    pub post_url: String,
    pub ai_messages: Vec<String>,
    pub user_messages: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
