use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::{ConversationRecord, UserRecord};

/// MongoDB-specific user model (uses ObjectId and BSON dates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoUser {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub supabase_uid: String,
    pub display_name: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// MongoDB-specific conversation model (uses ObjectId and BSON dates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConversation {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub uid: String,
    pub post_url: String,
    pub ai_messages: Vec<String>,
    pub user_messages: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

// Conversions to the database-agnostic models

impl From<MongoUser> for UserRecord {
    fn from(user: MongoUser) -> Self {
        Self {
            id: user.id.to_hex(),
            supabase_uid: user.supabase_uid,
            display_name: user.display_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<MongoConversation> for ConversationRecord {
    fn from(conversation: MongoConversation) -> Self {
        Self {
            id: conversation.id.to_hex(),
            uid: conversation.uid,
            post_url: conversation.post_url,
            ai_messages: conversation.ai_messages,
            user_messages: conversation.user_messages,
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}
