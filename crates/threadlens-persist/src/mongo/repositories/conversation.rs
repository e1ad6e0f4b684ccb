use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection, IndexModel};

use crate::error::Result;
use crate::mongo::models::MongoConversation;

#[derive(Clone)]
pub struct ConversationRepository {
    collection: Collection<MongoConversation>,
}

impl ConversationRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("conversations");
        Self { collection }
    }

    /// Append a conversation record; returns the new id as hex
    pub async fn insert_conversation(
        &self,
        uid: String,
        post_url: String,
        ai_messages: Vec<String>,
        user_messages: Vec<String>,
    ) -> Result<String> {
        let now = Utc::now();
        let conversation = MongoConversation {
            id: ObjectId::new(),
            uid,
            post_url,
            ai_messages,
            user_messages,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&conversation).await?;
        Ok(conversation.id.to_hex())
    }

    /// Most-recent-first conversations for a user
    pub async fn list_conversations(
        &self,
        uid: &str,
        limit: i64,
    ) -> Result<Vec<MongoConversation>> {
        let filter = doc! { "uid": uid };
        let conversations = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(conversations)
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        for keys in [
            doc! { "uid": 1 },
            doc! { "post_url": 1 },
            doc! { "created_at": 1 },
        ] {
            let index = IndexModel::builder().keys(keys).build();
            self.collection.create_index(index).await?;
        }
        Ok(())
    }
}
