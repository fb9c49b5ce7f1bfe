use serde_json::{Value, json};
use tracing::{error, info};

use crate::clients::ChatPlatform;
use crate::core::models::CorrelationState;
use crate::errors::AskError;

pub const ASK_MODAL_CALLBACK_ID: &str = "ask_ai_modal";
pub const QUESTION_BLOCK_ID: &str = "user_question";
pub const QUESTION_ACTION_ID: &str = "question_input";
pub const DEFAULT_QUESTION: &str = "Summarize this thread";

/// Build the Block Kit modal that asks for a question about a thread.
///
/// The single `plain_text_input` is prefilled with [`DEFAULT_QUESTION`].
/// `private_metadata` carries the encoded correlation state so the submission
/// can find its way back to the thread.
#[must_use]
pub fn build_ask_modal(private_metadata: &str) -> Value {
    json!({
        "type": "modal",
        "callback_id": ASK_MODAL_CALLBACK_ID,
        "title": { "type": "plain_text", "text": "Ask AI about this thread" },
        "submit": { "type": "plain_text", "text": "Ask AI" },
        "close": { "type": "plain_text", "text": "Cancel" },
        "private_metadata": private_metadata,
        "blocks": [
            {
                "type": "input",
                "block_id": QUESTION_BLOCK_ID,
                "label": { "type": "plain_text", "text": "What do you want to ask?" },
                "element": {
                    "type": "plain_text_input",
                    "action_id": QUESTION_ACTION_ID,
                    "initial_value": DEFAULT_QUESTION
                }
            }
        ]
    })
}

/// Open the question modal for `trigger_id`.
///
/// Must run inside the inbound request: trigger ids are single-use and expire
/// within seconds.
///
/// # Errors
///
/// Returns [`AskError::Presentation`] if the state cannot be encoded or the
/// platform rejects the call (expired trigger, missing scope, ...).
pub async fn present(
    chat: &dyn ChatPlatform,
    trigger_id: &str,
    state: &CorrelationState,
) -> Result<(), AskError> {
    let metadata = state.serialize().map_err(AskError::Presentation)?;
    let view = build_ask_modal(&metadata);

    match chat.open_modal(trigger_id, &view).await {
        Ok(()) => {
            info!(channel_id = %state.channel_id, "Opened ask modal");
            Ok(())
        }
        Err(e) => {
            error!("Failed to open modal: {}", e);
            Err(AskError::Presentation(e))
        }
    }
}
