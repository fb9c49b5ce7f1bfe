//! Background worker that answers one question about one thread.
//!
//! Stages run in a fixed order, `FetchingContext -> GeneratingAnswer ->
//! Delivering -> Done`, each attempted once. A context failure ends the run
//! early; a model failure is reported and a fallback answer is still delivered.

use tracing::{error, info, warn};

use crate::ai::prompt_builder::{build_context, build_prompt};
use crate::core::models::{AiRequest, AiResult};
use crate::errors::AskError;
use crate::slack::SlackBot;
use crate::slack::response_builder::{
    DEFAULT_ERROR_NOTICE, FALLBACK_ANSWER, MODEL_ERROR_NOTICE, format_answer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStage {
    FetchingContext,
    GeneratingAnswer,
    Delivering,
    Done,
}

/// Run one request to its terminal outcome.
///
/// Never returns an error: every collaborator failure is turned into an
/// ephemeral notice for the requesting user and reflected in the result.
pub async fn process_ai_request(bot: &SlackBot, request: AiRequest) -> AiResult {
    enter(WorkerStage::FetchingContext, &request);
    let messages = match bot
        .chat()
        .fetch_thread_messages(&request.channel_id, &request.message_ts)
        .await
    {
        Ok(messages) => messages,
        Err(e) => {
            error!("Failed to fetch thread messages: {}", e);
            notify_error(bot, &request, DEFAULT_ERROR_NOTICE).await;
            return finish(
                &request,
                AiResult::Failure {
                    error: AskError::ContextFetch(e),
                    user_message: DEFAULT_ERROR_NOTICE,
                },
            );
        }
    };

    enter(WorkerStage::GeneratingAnswer, &request);
    let prompt = build_prompt(&build_context(&messages), &request.question);
    let (answer, model_failure) = match bot.llm().generate_completion(&prompt).await {
        Ok(text) => (text, None),
        Err(e) => {
            error!("OpenAI API call failed: {}", e);
            notify_error(bot, &request, MODEL_ERROR_NOTICE).await;
            (FALLBACK_ANSWER.to_string(), Some(e))
        }
    };

    enter(WorkerStage::Delivering, &request);
    let text = format_answer(&request.user_id, &answer);
    let delivered = bot
        .chat()
        .post_ephemeral(
            &request.channel_id,
            &request.user_id,
            &request.message_ts,
            &text,
        )
        .await;

    let result = match (delivered, model_failure) {
        (Err(e), _) => {
            error!("Failed to post AI response: {}", e);
            notify_error(bot, &request, DEFAULT_ERROR_NOTICE).await;
            AiResult::Failure {
                error: AskError::Delivery(e),
                user_message: DEFAULT_ERROR_NOTICE,
            }
        }
        (Ok(()), Some(e)) => AiResult::Failure {
            error: AskError::ModelInvocation(e),
            user_message: MODEL_ERROR_NOTICE,
        },
        (Ok(()), None) => AiResult::Success(answer),
    };

    finish(&request, result)
}

fn enter(stage: WorkerStage, request: &AiRequest) {
    info!(
        correlation_id = %request.correlation_id,
        stage = ?stage,
        "AI worker stage"
    );
}

fn finish(request: &AiRequest, result: AiResult) -> AiResult {
    info!(
        correlation_id = %request.correlation_id,
        stage = ?WorkerStage::Done,
        outcome = result.outcome(),
        "AI worker finished"
    );
    result
}

/// Best-effort ephemeral error notice; a failure here is only logged.
async fn notify_error(bot: &SlackBot, request: &AiRequest, text: &str) {
    if let Err(e) = bot
        .chat()
        .post_ephemeral(
            &request.channel_id,
            &request.user_id,
            &request.message_ts,
            text,
        )
        .await
    {
        warn!("Failed to post error message: {}", e);
    }
}
