use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;
use threadlens_llm::{ChatClient, ChatRequest, ChatResponse};
use threadlens_types::Thread;

/// One canned provider outcome
pub enum Outcome {
    Text(String),
    Empty,
    Failure(String),
}

/// Scripted stand-in for the provider. Pops one outcome per call and
/// records every request it sees for later assertions.
pub struct ScriptedClient {
    outcomes: Mutex<VecDeque<Outcome>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Outcome::Text(text.into())])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Outcome::Text(text)) => Ok(ChatResponse::from_text(text)),
            Some(Outcome::Empty) => Ok(ChatResponse {
                content: None,
                usage: None,
                finish_reason: Some("stop".to_string()),
                raw: serde_json::Value::Null,
            }),
            Some(Outcome::Failure(reason)) => Err(anyhow!(reason)),
            None => Err(anyhow!("scripted client ran out of outcomes")),
        }
    }
}

pub fn sample_thread() -> Thread {
    serde_json::from_value(json!({
        "platform": "reddit",
        "post": {
            "title": "Which language first?",
            "text": "Python or JS first?",
            "author": "learner42",
            "upvotes": 12
        },
        "replies": [
            {"text": "Start with Python", "author": "pyfan", "upvotes": 30},
            {"text": "JS is more practical", "upvotes": 8}
        ]
    }))
    .unwrap()
}

/// The JSON shape the analysis prompt documents, filled in for the
/// Python-vs-JS sample thread.
pub fn sample_analysis_json() -> String {
    json!({
        "post_type": "Question",
        "thread_summary": "The author asks whether to learn Python or JS first. Replies lean toward Python for beginners, with JS favored for practicality.",
        "key_replies": [
            {
                "emoji": "🏆",
                "name": "Helpful",
                "replies": [
                    {"author": "", "text": "Start with Python", "explanation": "Gives a clear recommendation for a first language"}
                ]
            }
        ]
    })
    .to_string()
}
