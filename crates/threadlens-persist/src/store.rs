use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ConversationRecord, UserRecord};

/// Trait for the document-store operations the API depends on.
///
/// Implementations provide database-specific behavior; handlers only ever
/// see `Arc<dyn ConversationStore>`. Calls are independent: there is no
/// cross-call atomicity between a user upsert and a conversation insert.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Insert or refresh the user record for a verified identity.
    /// `created_at` is set on first insert only; `updated_at` on every call.
    async fn upsert_user(&self, uid: &str, display_name: Option<&str>) -> Result<()>;

    /// Look up a user by identity
    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>>;

    /// Append a new conversation record; returns its id
    async fn insert_conversation(
        &self,
        uid: &str,
        post_url: &str,
        ai_messages: Vec<String>,
        user_messages: Vec<String>,
    ) -> Result<String>;

    /// Most-recent-first conversations for an identity
    async fn list_conversations(&self, uid: &str, limit: i64) -> Result<Vec<ConversationRecord>>;
}
