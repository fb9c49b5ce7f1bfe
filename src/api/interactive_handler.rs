//! Handler for Slack interactive components.
//!
//! This module processes interactive payloads including:
//! - `message_action` - the "Ask AI" message shortcut, answered with a modal
//! - `view_submission` - the modal's question, handed to a background worker
//!
//! Every other interaction kind is acknowledged and ignored.

use tracing::{error, info, warn};

use super::parsing::{parse_interaction, parse_interactive_payload};
use crate::core::models::{
    CorrelationState, InteractionPayload, ModalSubmission, RouterOutcome, ShortcutInvocation,
};
use crate::errors::{AskError, SlackError};
use crate::slack::SlackBot;
use crate::slack::modal_builder::present;
use crate::slack::response_builder::{
    EMPTY_QUESTION_FORM_ERROR, NOT_IN_CHANNEL_FORM_ERROR, question_field_error,
};
use crate::worker::dispatcher::dispatch;

/// Route an authenticated form body to the matching handler.
///
/// # Errors
///
/// Returns [`AskError::MalformedPayload`] when the body cannot be decoded, and
/// passes through collaborator failures that are not platform-reported API
/// errors. Platform API errors become an inline form error instead.
pub async fn route(bot: &SlackBot, form_body: &[u8]) -> Result<RouterOutcome, AskError> {
    let payload = parse_interactive_payload(form_body).map_err(malformed)?;
    let interaction = parse_interaction(&payload).map_err(malformed)?;

    match interaction {
        InteractionPayload::Shortcut(shortcut) => handle_shortcut(bot, &shortcut).await,
        InteractionPayload::ModalSubmission(submission) => {
            handle_submission(bot, &submission).await
        }
        InteractionPayload::Unsupported(kind) => {
            info!("Unhandled interactive type: {}", kind);
            Ok(RouterOutcome::Acknowledged)
        }
    }
}

fn malformed(e: SlackError) -> AskError {
    AskError::MalformedPayload(e.to_string())
}

async fn handle_shortcut(
    bot: &SlackBot,
    shortcut: &ShortcutInvocation,
) -> Result<RouterOutcome, AskError> {
    let state = CorrelationState::new(&shortcut.channel_id, &shortcut.source_message_ts);

    match present(bot.chat(), &shortcut.trigger_id, &state).await {
        Ok(()) => Ok(RouterOutcome::Acknowledged),
        Err(e) => inline_form_error(e),
    }
}

async fn handle_submission(
    bot: &SlackBot,
    submission: &ModalSubmission,
) -> Result<RouterOutcome, AskError> {
    if submission.user_input.trim().is_empty() {
        return Ok(RouterOutcome::FormErrors(question_field_error(
            EMPTY_QUESTION_FORM_ERROR,
        )));
    }

    match dispatch(
        bot,
        &submission.correlation_state,
        &submission.user_input,
        &submission.user_id,
    )
    .await
    {
        Ok(ack) => Ok(ack),
        Err(e) => inline_form_error(e),
    }
}

/// Platform-reported errors are shown on the modal's question field; anything
/// else propagates as a server error.
fn inline_form_error(err: AskError) -> Result<RouterOutcome, AskError> {
    let api_error = match &err {
        AskError::Presentation(e) | AskError::Delivery(e) => e.is_api_error(),
        _ => false,
    };

    if api_error {
        warn!("Slack API error occurred: {}", err);
        Ok(RouterOutcome::FormErrors(question_field_error(
            NOT_IN_CHANNEL_FORM_ERROR,
        )))
    } else {
        error!("Interaction handling failed: {}", err);
        Err(err)
    }
}
