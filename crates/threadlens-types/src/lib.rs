pub mod analysis;
pub mod chat;
pub mod thread;

pub use analysis::{AnalysisResult, CategorizedReply, PostType, ReplyCategory};
pub use chat::{ChatTurn, Role};
pub use thread::{Platform, Post, Reply, Thread, ValidationError};
