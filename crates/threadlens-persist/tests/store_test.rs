//! Contract tests for the `ConversationStore` operations, run against an
//! in-memory double. The Mongo implementation is exercised against a live
//! database in deployment, not here.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use threadlens_persist::error::Result;
use threadlens_persist::{ConversationRecord, ConversationStore, UserRecord};

#[derive(Default)]
struct MemoryStore {
    users: Mutex<HashMap<String, UserRecord>>,
    conversations: Mutex<Vec<ConversationRecord>>,
    // monotonic counter standing in for wall-clock time between calls
    ticks: Mutex<i64>,
}

impl MemoryStore {
    fn tick(&self) -> DateTime<Utc> {
        let mut ticks = self.ticks.lock().unwrap();
        *ticks += 1;
        Utc::now() + Duration::milliseconds(*ticks)
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn upsert_user(&self, uid: &str, display_name: Option<&str>) -> Result<()> {
        let now = self.tick();
        let mut users = self.users.lock().unwrap();
        match users.get_mut(uid) {
            Some(user) => {
                user.display_name = display_name.map(String::from);
                user.updated_at = now;
            }
            None => {
                let next_id = users.len() + 1;
                users.insert(
                    uid.to_string(),
                    UserRecord {
                        id: format!("user-{}", next_id),
                        supabase_uid: uid.to_string(),
                        display_name: display_name.map(String::from),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        Ok(())
    }

    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().get(uid).cloned())
    }

    async fn insert_conversation(
        &self,
        uid: &str,
        post_url: &str,
        ai_messages: Vec<String>,
        user_messages: Vec<String>,
    ) -> Result<String> {
        let now = self.tick();
        let mut conversations = self.conversations.lock().unwrap();
        let id = format!("conv-{}", conversations.len() + 1);
        conversations.push(ConversationRecord {
            id: id.clone(),
            uid: uid.to_string(),
            post_url: post_url.to_string(),
            ai_messages,
            user_messages,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn list_conversations(&self, uid: &str, limit: i64) -> Result<Vec<ConversationRecord>> {
        let mut matching: Vec<ConversationRecord> = self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.uid == uid)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit.max(0) as usize);
        Ok(matching)
    }
}

#[tokio::test]
async fn two_saves_list_most_recent_first() {
    let store = MemoryStore::default();

    store
        .insert_conversation("u1", "https://reddit.com/r/rust/1", vec![], vec![])
        .await
        .unwrap();
    store
        .insert_conversation("u1", "https://reddit.com/r/rust/2", vec![], vec![])
        .await
        .unwrap();

    let conversations = store.list_conversations("u1", 10).await.unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].post_url, "https://reddit.com/r/rust/2");
    assert_eq!(conversations[1].post_url, "https://reddit.com/r/rust/1");
}

#[tokio::test]
async fn listing_is_scoped_to_the_identity() {
    let store = MemoryStore::default();

    store
        .insert_conversation("u1", "https://x.com/a", vec![], vec![])
        .await
        .unwrap();
    store
        .insert_conversation("u2", "https://x.com/b", vec![], vec![])
        .await
        .unwrap();

    let conversations = store.list_conversations("u1", 10).await.unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].uid, "u1");
}

#[tokio::test]
async fn list_respects_the_limit() {
    let store = MemoryStore::default();
    for i in 0..5 {
        store
            .insert_conversation("u1", &format!("https://x.com/{i}"), vec![], vec![])
            .await
            .unwrap();
    }

    let conversations = store.list_conversations("u1", 3).await.unwrap();
    assert_eq!(conversations.len(), 3);
    assert_eq!(conversations[0].post_url, "https://x.com/4");
}

#[tokio::test]
async fn upsert_refreshes_without_duplicating() {
    let store = MemoryStore::default();

    store.upsert_user("u1", Some("Alice")).await.unwrap();
    let first = store.get_user("u1").await.unwrap().unwrap();

    store.upsert_user("u1", Some("Alice Renamed")).await.unwrap();
    let second = store.get_user("u1").await.unwrap().unwrap();

    assert_eq!(store.users.lock().unwrap().len(), 1);
    assert_eq!(second.display_name.as_deref(), Some("Alice Renamed"));
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn messages_round_trip_through_a_save() {
    let store = MemoryStore::default();

    let id = store
        .insert_conversation(
            "u1",
            "https://reddit.com/r/learnprogramming/42",
            vec!["Here's my analysis".to_string()],
            vec!["What is this about?".to_string()],
        )
        .await
        .unwrap();

    let conversations = store.list_conversations("u1", 1).await.unwrap();
    assert_eq!(conversations[0].id, id);
    assert_eq!(conversations[0].ai_messages, vec!["Here's my analysis"]);
    assert_eq!(conversations[0].user_messages, vec!["What is this about?"]);
}
