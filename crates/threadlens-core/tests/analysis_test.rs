mod common;

use std::sync::Arc;

use common::{sample_analysis_json, sample_thread, Outcome, ScriptedClient};
use serde_json::json;
use threadlens_core::analysis::{PARSE_FAILURE_SUMMARY, SCHEMA_FAILURE_SUMMARY};
use threadlens_core::{AnalysisConfig, AnalysisEngine};
use threadlens_types::PostType;

fn engine(client: Arc<ScriptedClient>) -> AnalysisEngine {
    AnalysisEngine::new(client, AnalysisConfig::default())
}

#[tokio::test]
async fn parses_a_well_formed_response() {
    let client = Arc::new(ScriptedClient::replying(sample_analysis_json()));
    let result = engine(client.clone())
        .analyze(&sample_thread())
        .await
        .unwrap();

    assert_eq!(result.post_type, PostType::Question);
    assert!(!result.key_replies.is_empty());
    assert!(result
        .key_replies
        .iter()
        .flat_map(|c| &c.replies)
        .all(|r| r.author.is_empty()));
}

#[tokio::test]
async fn clears_authors_the_provider_filled_in_anyway() {
    let payload = json!({
        "post_type": "Question",
        "thread_summary": "Summary.",
        "key_replies": [{
            "emoji": "🏆",
            "name": "Helpful",
            "replies": [{"author": "pyfan", "text": "Start with Python", "explanation": "direct"}]
        }]
    })
    .to_string();

    let client = Arc::new(ScriptedClient::replying(payload));
    let result = engine(client).analyze(&sample_thread()).await.unwrap();

    assert_eq!(result.key_replies[0].replies[0].author, "");
}

#[tokio::test]
async fn non_json_response_falls_back_without_retry() {
    let client = Arc::new(ScriptedClient::replying("I'd rather chat than emit JSON"));
    let result = engine(client.clone())
        .analyze(&sample_thread())
        .await
        .unwrap();

    assert_eq!(result.post_type, PostType::Question);
    assert_eq!(result.thread_summary, PARSE_FAILURE_SUMMARY);
    assert!(result.key_replies.is_empty());
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn schema_mismatch_falls_back_with_a_distinct_message() {
    let payload = json!({"post_type": "Question", "key_replies": []}).to_string();
    let client = Arc::new(ScriptedClient::replying(payload));
    let result = engine(client).analyze(&sample_thread()).await.unwrap();

    assert_eq!(result.post_type, PostType::Question);
    assert_eq!(result.thread_summary, SCHEMA_FAILURE_SUMMARY);
    assert_ne!(PARSE_FAILURE_SUMMARY, SCHEMA_FAILURE_SUMMARY);
}

#[tokio::test]
async fn unknown_post_type_falls_back() {
    let payload = json!({
        "post_type": "Rant",
        "thread_summary": "Summary.",
        "key_replies": []
    })
    .to_string();

    let client = Arc::new(ScriptedClient::replying(payload));
    let result = engine(client).analyze(&sample_thread()).await.unwrap();
    assert_eq!(result.thread_summary, SCHEMA_FAILURE_SUMMARY);
}

#[tokio::test]
async fn summary_delivered_as_a_list_is_coerced() {
    let payload = json!({
        "post_type": "News/Info",
        "thread_summary": ["The post reports a release.", "Reactions are mixed."],
        "key_replies": []
    })
    .to_string();

    let client = Arc::new(ScriptedClient::replying(payload));
    let result = engine(client).analyze(&sample_thread()).await.unwrap();

    assert_eq!(result.post_type, PostType::NewsInfo);
    assert_eq!(
        result.thread_summary,
        "The post reports a release. Reactions are mixed."
    );
}

#[tokio::test]
async fn empty_payload_falls_back() {
    let client = Arc::new(ScriptedClient::new(vec![Outcome::Empty]));
    let result = engine(client).analyze(&sample_thread()).await.unwrap();
    assert_eq!(result.thread_summary, PARSE_FAILURE_SUMMARY);
}

#[tokio::test]
async fn transport_failures_propagate() {
    let client = Arc::new(ScriptedClient::new(vec![Outcome::Failure(
        "connection reset by peer".to_string(),
    )]));

    let err = engine(client)
        .analyze(&sample_thread())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn request_carries_the_full_prompt_and_fixed_options() {
    let client = Arc::new(ScriptedClient::replying(sample_analysis_json()));
    engine(client.clone())
        .analyze(&sample_thread())
        .await
        .unwrap();

    let requests = client.requests.lock().unwrap();
    let request = &requests[0];

    assert_eq!(request.options.temperature, Some(0.7));
    assert_eq!(request.options.max_tokens, Some(1500));
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role(), "system");
    assert!(request.messages[0].content().contains("valid JSON"));

    let prompt = request.messages[1].content();
    assert!(prompt.contains("Python or JS first?"));
    assert!(prompt.contains("1. Start with Python"));
    assert!(prompt.contains("\"Opinion/Discussion\""));
    assert!(prompt.contains("🏆 \"Helpful\""));
    assert!(prompt.contains("author"));
}
