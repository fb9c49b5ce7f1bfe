//! Prompt assembly for thread questions.

/// Join thread message texts into one context block, keeping their order.
#[must_use]
pub fn build_context(messages: &[String]) -> String {
    messages.join("\n")
}

/// Combine the thread context and the user's question into a single prompt.
#[must_use]
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Here's a Slack thread:\n{context}\n\nUser question: {question}\n\nProvide a helpful answer based on the context."
    )
}
