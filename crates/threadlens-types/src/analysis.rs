use serde::{Deserialize, Serialize};

/// The closed set of post classifications the analysis prompt enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostType {
    Question,
    #[serde(rename = "Opinion/Discussion")]
    OpinionDiscussion,
    #[serde(rename = "Funny/Entertainment")]
    FunnyEntertainment,
    #[serde(rename = "News/Info")]
    NewsInfo,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "Question",
            Self::OpinionDiscussion => "Opinion/Discussion",
            Self::FunnyEntertainment => "Funny/Entertainment",
            Self::NewsInfo => "News/Info",
        }
    }
}

/// Structured summary of a thread as returned by the analysis engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub post_type: PostType,
    pub thread_summary: String,
    #[serde(default)]
    pub key_replies: Vec<ReplyCategory>,
}

/// An emoji-labeled bucket of notable replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyCategory {
    pub emoji: String,
    pub name: String,
    pub replies: Vec<CategorizedReply>,
}

/// A reply picked out by the analysis. `author` is always the empty
/// string: replies are never attributed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedReply {
    #[serde(default)]
    pub author: String,
    pub text: String,
    pub explanation: String,
}
