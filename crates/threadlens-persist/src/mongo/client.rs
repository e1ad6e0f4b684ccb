use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Client;

use crate::error::{PersistError, Result};
use crate::models::{ConversationRecord, UserRecord};
use crate::mongo::repositories::{ConversationRepository, UserRepository};
use crate::store::ConversationStore;

pub struct MongoStore {
    users: UserRepository,
    conversations: ConversationRepository,
}

impl MongoStore {
    /// Connect to MongoDB, verify the connection, and prepare indexes
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let users = UserRepository::new(&client, database);
        let conversations = ConversationRepository::new(&client, database);

        let store = Self {
            users,
            conversations,
        };

        // Index creation failure is not fatal; queries still work unindexed
        if let Err(e) = store.ensure_indexes().await {
            tracing::warn!(error = %e, "failed to create MongoDB indexes");
        }

        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<()> {
        self.users.ensure_indexes().await?;
        self.conversations.ensure_indexes().await?;
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for MongoStore {
    async fn upsert_user(&self, uid: &str, display_name: Option<&str>) -> Result<()> {
        self.users.upsert_user(uid, display_name).await
    }

    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>> {
        let user = self.users.get_user(uid).await?;
        Ok(user.map(|u| u.into()))
    }

    async fn insert_conversation(
        &self,
        uid: &str,
        post_url: &str,
        ai_messages: Vec<String>,
        user_messages: Vec<String>,
    ) -> Result<String> {
        self.conversations
            .insert_conversation(
                uid.to_string(),
                post_url.to_string(),
                ai_messages,
                user_messages,
            )
            .await
    }

    async fn list_conversations(&self, uid: &str, limit: i64) -> Result<Vec<ConversationRecord>> {
        let conversations = self.conversations.list_conversations(uid, limit).await?;
        Ok(conversations.into_iter().map(|c| c.into()).collect())
    }
}
