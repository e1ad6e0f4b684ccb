use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platforms a thread can be captured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    X,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reddit => "reddit",
            Self::X => "x",
        }
    }
}

/// The post a thread is rooted at, as captured by the extension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Post body. Must be non-empty (see [`Thread::validate`]).
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A single reply within a thread. Insertion order is meaningful and
/// preserved all the way into the prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<i64>,

    #[serde(default = "default_top_level", rename = "isTopLevel")]
    pub is_top_level: bool,
}

fn default_top_level() -> bool {
    true
}

/// A captured discussion thread: a post plus its ordered replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub platform: Platform,
    pub post: Post,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("post body must not be empty")]
    EmptyPostBody,

    #[error("user message must not be empty")]
    EmptyUserMessage,
}

impl Thread {
    /// Boundary validation. Called once where a thread enters the system;
    /// the engines assume threads are already valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.post.text.trim().is_empty() {
            return Err(ValidationError::EmptyPostBody);
        }
        Ok(())
    }
}
