use threadlens_types::Thread;

/// Render a thread into the canonical text block every prompt embeds.
///
/// Deterministic and total: same thread, byte-identical output. No
/// truncation; the provider's judgment depends on seeing full content.
pub fn format_thread(thread: &Thread) -> String {
    let mut lines = Vec::new();

    // Platform and post info
    lines.push(format!(
        "Platform: {}",
        thread.platform.as_str().to_uppercase()
    ));
    let title = thread
        .post
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or("No title");
    lines.push(format!("Title: {}", title));
    lines.push(format!("Post: {}", thread.post.text));
    if let Some(author) = thread.post.author.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("Author: {}", author));
    }
    if let Some(upvotes) = thread.post.upvotes.filter(|v| *v != 0) {
        lines.push(format!("Upvotes: {}", upvotes));
    }
    lines.push(String::new());

    // Replies, numbered 1-based in capture order
    lines.push(format!("Replies ({}):", thread.replies.len()));
    for (i, reply) in thread.replies.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, reply.text));
        if let Some(author) = reply.author.as_deref().filter(|a| !a.is_empty()) {
            lines.push(format!("   - {}", author));
        }
        if let Some(upvotes) = reply.upvotes.filter(|v| *v != 0) {
            lines.push(format!("   - {} upvotes", upvotes));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
