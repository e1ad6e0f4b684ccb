use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

use crate::error::Result;
use crate::mongo::models::MongoUser;

#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<MongoUser>,
}

impl UserRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("users");
        Self { collection }
    }

    /// Insert or refresh the record for `uid`. `created_at` is written only
    /// on first insert; `updated_at` on every call.
    pub async fn upsert_user(&self, uid: &str, display_name: Option<&str>) -> Result<()> {
        let now = bson::DateTime::now();
        let filter = doc! { "supabase_uid": uid };
        let update = doc! {
            "$set": {
                "supabase_uid": uid,
                "display_name": display_name,
                "updated_at": now,
            },
            "$setOnInsert": { "created_at": now },
        };

        self.collection
            .update_one(filter, update)
            .upsert(true)
            .await?;
        Ok(())
    }

    /// Get user by identity
    pub async fn get_user(&self, uid: &str) -> Result<Option<MongoUser>> {
        let filter = doc! { "supabase_uid": uid };
        Ok(self.collection.find_one(filter).await?)
    }

    /// Unique index on the identity key
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "supabase_uid": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}
