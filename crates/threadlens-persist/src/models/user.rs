use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database-agnostic user model. One record per verified identity,
/// upserted on every login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub supabase_uid: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
