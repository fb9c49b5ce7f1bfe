use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use super::ai_worker::process_ai_request;
use crate::core::models::{AiRequest, CorrelationState, RouterOutcome};
use crate::errors::AskError;
use crate::slack::SlackBot;
use crate::slack::response_builder::PROCESSING_NOTICE;

/// Acknowledge a question and hand it to a detached background worker.
///
/// The "processing" notice is posted before the worker is spawned, so the user
/// always sees it ahead of the answer. The worker is never joined.
///
/// # Errors
///
/// Returns [`AskError::Delivery`] if the processing notice cannot be posted;
/// no worker is spawned in that case.
pub async fn dispatch(
    bot: &SlackBot,
    state: &CorrelationState,
    question: &str,
    user_id: &str,
) -> Result<RouterOutcome, AskError> {
    let correlation_id = Uuid::new_v4().to_string();
    info!(
        correlation_id = %correlation_id,
        channel_id = %state.channel_id,
        "view_submission received"
    );

    bot.chat()
        .post_ephemeral(&state.channel_id, user_id, &state.message_ts, PROCESSING_NOTICE)
        .await
        .map_err(|e| {
            error!(correlation_id = %correlation_id, "Failed to post processing notice: {}", e);
            AskError::Delivery(e)
        })?;

    let request = AiRequest {
        correlation_id: correlation_id.clone(),
        channel_id: state.channel_id.clone(),
        message_ts: state.message_ts.clone(),
        user_id: user_id.to_string(),
        question: question.to_string(),
    };

    let worker_bot = bot.clone();
    let span = info_span!("ai_worker", correlation_id = %correlation_id);
    tokio::spawn(
        async move {
            let result = process_ai_request(&worker_bot, request).await;
            if !result.is_success() {
                warn!(outcome = result.outcome(), "AI worker ended without an answer");
            }
        }
        .instrument(span),
    );

    Ok(RouterOutcome::ClearModal)
}
