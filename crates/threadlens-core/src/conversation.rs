use std::sync::Arc;

use anyhow::Result;
use threadlens_llm::{ChatClient, ChatOptions, ChatRequest, Message};
use threadlens_types::{AnalysisResult, ChatTurn, Role, Thread};

use crate::analysis::AnalysisEngine;
use crate::format::format_thread;
use crate::prompts;

/// Substring an assistant turn carries once an analysis has been delivered
const ANALYSIS_MARKER: &str = "analysis";

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub message: String,
    pub analysis: Option<AnalysisResult>,
}

/// Continues a conversation about a thread.
///
/// Unlike [`AnalysisEngine`], provider failures on the chat call itself are
/// converted into an apologetic in-band reply instead of an error. Callers
/// of chat never see transport failures; callers of analyze do.
#[derive(Clone)]
pub struct ConversationEngine {
    client: Arc<dyn ChatClient>,
    analysis: AnalysisEngine,
    config: ChatConfig,
}

impl ConversationEngine {
    pub fn new(client: Arc<dyn ChatClient>, analysis: AnalysisEngine, config: ChatConfig) -> Self {
        Self {
            client,
            analysis,
            config,
        }
    }

    /// Answer `user_message` in the context of `thread` and the prior turns.
    ///
    /// On the first exchange (no prior analysis marker and at most one prior
    /// turn) an analysis of the thread is produced alongside the reply.
    pub async fn chat(
        &self,
        thread: &Thread,
        prior_turns: &[ChatTurn],
        user_message: &str,
    ) -> Result<ChatReply> {
        let system = prompts::build_chat_system_prompt(&format_thread(thread));

        let mut messages = Vec::with_capacity(prior_turns.len() + 2);
        messages.push(Message::system(system));
        for turn in prior_turns {
            messages.push(to_message(turn));
        }
        messages.push(Message::human(user_message));

        let request = ChatRequest::new(self.config.model.clone(), messages).with_options(
            ChatOptions::new()
                .temperature(self.config.temperature)
                .max_tokens(self.config.max_tokens),
        );

        let message = match self.client.chat(request).await {
            Ok(response) => match response.content {
                Some(content) if !content.trim().is_empty() => content,
                _ => {
                    tracing::warn!("provider returned an empty chat reply");
                    "Sorry, I couldn't come up with a response. Please try again.".to_string()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "chat completion failed; replying in-band");
                format!("Sorry, I encountered an error: {}", e)
            }
        };

        // First exchange: no analysis delivered yet, so produce one. The
        // analysis call keeps analyze() semantics: transport errors propagate.
        let analysis = if !has_prior_analysis(prior_turns) && prior_turns.len() <= 1 {
            Some(self.analysis.analyze(thread).await?)
        } else {
            None
        };

        Ok(ChatReply { message, analysis })
    }
}

fn to_message(turn: &ChatTurn) -> Message {
    match turn.role {
        Role::User => Message::human(turn.content.clone()),
        Role::Assistant => Message::ai(turn.content.clone()),
        Role::System => Message::system(turn.content.clone()),
    }
}

/// True once any assistant turn signals that an analysis was delivered
fn has_prior_analysis(turns: &[ChatTurn]) -> bool {
    turns.iter().any(|turn| {
        turn.role == Role::Assistant && turn.content.to_lowercase().contains(ANALYSIS_MARKER)
    })
}
