use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use threadlens_llm::{ChatClient, ChatOptions, ChatRequest, Message};
use threadlens_types::{AnalysisResult, PostType, Thread};

use crate::format::format_thread;
use crate::prompts;

/// Summary text of the fallback returned when the provider's output is not JSON
pub const PARSE_FAILURE_SUMMARY: &str =
    "Analysis failed: the AI response could not be parsed. Please try again.";

/// Summary text of the fallback returned when the JSON misses required fields
pub const SCHEMA_FAILURE_SUMMARY: &str =
    "Analysis failed: the AI response was missing expected fields. Please try again.";

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1500,
        }
    }
}

/// Turns a captured thread into a typed, schema-valid summary.
///
/// Malformed provider output is recovered locally with a deterministic
/// fallback; transport failures propagate to the caller untouched.
#[derive(Clone)]
pub struct AnalysisEngine {
    client: Arc<dyn ChatClient>,
    config: AnalysisConfig,
}

impl AnalysisEngine {
    pub fn new(client: Arc<dyn ChatClient>, config: AnalysisConfig) -> Self {
        Self { client, config }
    }

    /// Analyze a thread. Precondition: the thread passed boundary
    /// validation; this is not re-checked here.
    pub async fn analyze(&self, thread: &Thread) -> Result<AnalysisResult> {
        let prompt = prompts::build_analysis_prompt(&format_thread(thread));

        let request = ChatRequest::new(
            self.config.model.clone(),
            vec![
                Message::system(prompts::ANALYSIS_SYSTEM_PROMPT),
                Message::human(prompt),
            ],
        )
        .with_options(
            ChatOptions::new()
                .temperature(self.config.temperature)
                .max_tokens(self.config.max_tokens),
        );

        // Transport/auth/quota failures propagate; a single attempt, no retry
        let response = self.client.chat(request).await?;

        let content = match response.content {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                tracing::warn!("provider returned an empty analysis payload");
                return Ok(parse_failure_fallback());
            }
        };

        Ok(parse_analysis(&content))
    }
}

/// Parse and validate the provider's payload, recovering malformed output
/// into a deterministic fallback.
fn parse_analysis(content: &str) -> AnalysisResult {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "analysis response was not valid JSON");
            return parse_failure_fallback();
        }
    };

    match serde_json::from_value::<AnalysisResult>(value.clone()) {
        Ok(result) => normalize(result),
        Err(schema_err) => {
            // One bounded coercion for known shape drift, then give up
            if let Some(coerced) = coerce_summary_list(value) {
                if let Ok(result) = serde_json::from_value::<AnalysisResult>(coerced) {
                    tracing::debug!("analysis summary arrived as a list; coerced to text");
                    return normalize(result);
                }
            }
            tracing::warn!(error = %schema_err, "analysis JSON did not match the expected schema");
            schema_failure_fallback()
        }
    }
}

/// Historical shape drift: some provider revisions return `thread_summary`
/// as a list of sentences instead of a single string. Join it and retry
/// validation exactly once.
fn coerce_summary_list(mut value: Value) -> Option<Value> {
    let summary = value.get_mut("thread_summary")?;
    let parts = summary.as_array()?;

    let joined = parts
        .iter()
        .map(|part| part.as_str())
        .collect::<Option<Vec<_>>>()?
        .join(" ");

    *summary = Value::String(joined);
    Some(value)
}

/// The provider is instructed to leave authors empty; enforce it regardless
/// of what actually came back.
fn normalize(mut result: AnalysisResult) -> AnalysisResult {
    for category in &mut result.key_replies {
        for reply in &mut category.replies {
            reply.author.clear();
        }
    }
    result
}

fn parse_failure_fallback() -> AnalysisResult {
    fallback(PARSE_FAILURE_SUMMARY)
}

fn schema_failure_fallback() -> AnalysisResult {
    fallback(SCHEMA_FAILURE_SUMMARY)
}

fn fallback(summary: &str) -> AnalysisResult {
    AnalysisResult {
        post_type: PostType::Question,
        thread_summary: summary.to_string(),
        key_replies: Vec::new(),
    }
}
