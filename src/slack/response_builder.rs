//! User-facing texts and interaction response bodies.

use serde_json::{Map, Value, json};

use crate::slack::modal_builder::QUESTION_BLOCK_ID;

/// Sent right after a submission, before any background work starts.
pub const PROCESSING_NOTICE: &str =
    "✅ We received your question! AI is thinking... You'll get a response soon.";

/// Generic failure notice; most platform errors mean the bot is not in the channel.
pub const DEFAULT_ERROR_NOTICE: &str = "⚠️ There was an error processing your request. \
    Please make sure that @Ask AI bot is invited in this channel before trying again. \
    You can easily invite the bot by writing `/invite @Ask AI` in this channel.";

pub const MODEL_ERROR_NOTICE: &str = "⚠️ We could not talk to ChatGPT. Please try again later.";

/// Delivered in place of an answer when the model call fails.
pub const FALLBACK_ANSWER: &str =
    "There was an error generating the response. Please try again later.";

pub const NOT_IN_CHANNEL_FORM_ERROR: &str =
    "⚠️ The app may not be in this channel. Please invite it before using this feature.";

pub const EMPTY_QUESTION_FORM_ERROR: &str = "Please enter a question.";

/// Prefix the answer with a mention of the requesting user.
#[must_use]
pub fn format_answer(user_id: &str, answer: &str) -> String {
    format!("🤖 <@{user_id}>, here's your AI response:\n{answer}")
}

/// Field errors keyed on the question block.
#[must_use]
pub fn question_field_error(message: &str) -> Map<String, Value> {
    let mut errors = Map::new();
    errors.insert(
        QUESTION_BLOCK_ID.to_string(),
        Value::String(message.to_string()),
    );
    errors
}

#[must_use]
pub fn status_ok_body() -> Value {
    json!({ "status": "ok" })
}

#[must_use]
pub fn modal_clear_body() -> Value {
    json!({ "response_action": "clear" })
}

#[must_use]
pub fn modal_errors_body(errors: &Map<String, Value>) -> Value {
    json!({ "response_action": "errors", "errors": errors })
}
