//! Collaborator seams used by the request pipeline.
//!
//! Production implementations live in [`crate::slack::SlackClient`] and
//! [`crate::ai::LlmClient`]; tests substitute in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SlackError;

/// The chat-platform operations the pipeline relies on.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Return the text of every message in a thread, parent first, in platform order.
    async fn fetch_thread_messages(
        &self,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<Vec<String>, SlackError>;

    /// Post a message in a thread that only `user_id` can see.
    async fn post_ephemeral(
        &self,
        channel_id: &str,
        user_id: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<(), SlackError>;

    /// Open a modal bound to a single-use trigger id.
    async fn open_modal(&self, trigger_id: &str, view: &Value) -> Result<(), SlackError>;
}

/// A single request/response completion call.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate_completion(&self, prompt: &str) -> Result<String, SlackError>;
}
