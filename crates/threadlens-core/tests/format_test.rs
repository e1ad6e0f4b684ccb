mod common;

use common::sample_thread;
use threadlens_core::format_thread;
use threadlens_types::Thread;

#[test]
fn output_is_deterministic() {
    let thread = sample_thread();
    assert_eq!(format_thread(&thread), format_thread(&thread));
}

#[test]
fn contains_platform_title_and_post() {
    let text = format_thread(&sample_thread());

    assert!(text.starts_with("Platform: REDDIT\n"));
    assert!(text.contains("Title: Which language first?"));
    assert!(text.contains("Post: Python or JS first?"));
    assert!(text.contains("Author: learner42"));
    assert!(text.contains("Upvotes: 12"));
}

#[test]
fn replies_appear_once_numbered_in_order() {
    let text = format_thread(&sample_thread());

    assert!(text.contains("Replies (2):"));
    assert_eq!(text.matches("Start with Python").count(), 1);
    assert_eq!(text.matches("JS is more practical").count(), 1);

    let first = text.find("1. Start with Python").unwrap();
    let second = text.find("2. JS is more practical").unwrap();
    assert!(first < second);
}

#[test]
fn missing_title_uses_placeholder() {
    let thread: Thread = serde_json::from_str(
        r#"{"platform":"x","post":{"text":"hot take"},"replies":[]}"#,
    )
    .unwrap();

    let text = format_thread(&thread);
    assert!(text.starts_with("Platform: X\n"));
    assert!(text.contains("Title: No title"));
    assert!(text.contains("Replies (0):"));
}

#[test]
fn zero_scores_and_empty_authors_are_omitted() {
    let thread: Thread = serde_json::from_str(
        r#"{"platform":"reddit",
            "post":{"text":"body","author":"","upvotes":0},
            "replies":[{"text":"first","author":"","upvotes":0}]}"#,
    )
    .unwrap();

    let text = format_thread(&thread);
    assert!(!text.contains("Author:"));
    assert!(!text.contains("Upvotes: 0"));
    assert!(!text.contains("0 upvotes"));
}

#[test]
fn reply_author_and_score_lines_follow_the_reply() {
    let text = format_thread(&sample_thread());
    let reply_pos = text.find("1. Start with Python").unwrap();
    let author_pos = text.find("   - pyfan").unwrap();
    let score_pos = text.find("   - 30 upvotes").unwrap();
    assert!(reply_pos < author_pos && author_pos < score_pos);
}
