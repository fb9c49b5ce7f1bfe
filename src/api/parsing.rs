use serde_json::Value;

use crate::core::models::{
    CorrelationState, InteractionPayload, ModalSubmission, ShortcutInvocation,
};
use crate::errors::SlackError;
use crate::slack::modal_builder::{ASK_MODAL_CALLBACK_ID, QUESTION_ACTION_ID, QUESTION_BLOCK_ID};

/// Extract and decode the JSON `payload` field of a form-encoded body.
///
/// # Errors
///
/// Returns a parse error if the field is missing or is not valid JSON.
pub fn parse_interactive_payload(form_body: &[u8]) -> Result<Value, SlackError> {
    let raw = url::form_urlencoded::parse(form_body)
        .find(|(key, _)| key == "payload")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| SlackError::ParseError("Missing payload field".to_string()))?;

    serde_json::from_str(&raw)
        .map_err(|e| SlackError::ParseError(format!("Invalid JSON payload: {e}")))
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

fn required_str(root: &Value, path: &[&str]) -> Result<String, SlackError> {
    v_str(root, path)
        .map(str::to_string)
        .ok_or_else(|| SlackError::ParseError(format!("{} missing", path.join("."))))
}

/// Classify a decoded interaction payload.
///
/// # Errors
///
/// Returns a parse error when a handled kind lacks a required field or
/// carries undecodable correlation state.
pub fn parse_interaction(payload: &Value) -> Result<InteractionPayload, SlackError> {
    let payload_type = v_str(payload, &["type"])
        .ok_or_else(|| SlackError::ParseError("type missing".to_string()))?;

    match payload_type {
        "message_action" => Ok(InteractionPayload::Shortcut(ShortcutInvocation {
            trigger_id: required_str(payload, &["trigger_id"])?,
            source_message_ts: required_str(payload, &["message", "ts"])?,
            channel_id: required_str(payload, &["channel", "id"])?,
        })),
        "view_submission" => {
            let Some(view) = payload.get("view") else {
                return Err(SlackError::ParseError("view missing".to_string()));
            };

            // Submissions from other apps' modals routed to the same URL are not ours.
            if let Some(callback_id) = v_str(view, &["callback_id"])
                && callback_id != ASK_MODAL_CALLBACK_ID
            {
                return Ok(InteractionPayload::Unsupported(format!(
                    "view_submission:{callback_id}"
                )));
            }

            let metadata = required_str(view, &["private_metadata"])?;
            let correlation_state = CorrelationState::deserialize(&metadata)?;
            // A cleared input arrives as null; the router rejects it as blank.
            let user_input = v_str(
                view,
                &[
                    "state",
                    "values",
                    QUESTION_BLOCK_ID,
                    QUESTION_ACTION_ID,
                    "value",
                ],
            )
            .unwrap_or_default()
            .to_string();
            let user_id = required_str(payload, &["user", "id"])?;

            Ok(InteractionPayload::ModalSubmission(ModalSubmission {
                correlation_state,
                user_input,
                user_id,
            }))
        }
        other => Ok(InteractionPayload::Unsupported(other.to_string())),
    }
}
