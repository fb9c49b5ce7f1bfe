mod common;

use std::sync::Arc;

use askai::AskError;
use askai::core::models::{AiRequest, AiResult};
use askai::slack::response_builder::{
    DEFAULT_ERROR_NOTICE, FALLBACK_ANSWER, MODEL_ERROR_NOTICE, format_answer,
};
use askai::worker::process_ai_request;
use common::{ChatCall, FakeChat, FakeModel, bot};

fn request() -> AiRequest {
    AiRequest {
        correlation_id: "corr-1".into(),
        channel_id: "C222".into(),
        message_ts: "1700000000.000100".into(),
        user_id: "U111".into(),
        question: "Summarize this thread".into(),
    }
}

#[tokio::test]
async fn happy_path_delivers_answer_in_thread() {
    let chat = Arc::new(FakeChat::with_thread(&["hello", "we ship friday", "ok"]));
    let model = Arc::new(FakeModel::answering("They ship Friday."));

    let result = process_ai_request(&bot(&chat, &model), request()).await;

    assert!(matches!(result, AiResult::Success(ref a) if a == "They ship Friday."));
    assert_eq!(result.outcome(), "success");

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("hello\nwe ship friday\nok"));
    assert!(prompts[0].contains("User question: Summarize this thread"));

    assert_eq!(
        chat.calls(),
        vec![
            ChatCall::FetchThread {
                channel_id: "C222".into(),
                thread_ts: "1700000000.000100".into(),
            },
            ChatCall::Ephemeral {
                channel_id: "C222".into(),
                user_id: "U111".into(),
                thread_ts: "1700000000.000100".into(),
                text: format_answer("U111", "They ship Friday."),
            },
        ]
    );
    assert!(chat.ephemeral_texts()[0].starts_with("🤖 <@U111>"));
}

#[tokio::test]
async fn context_fetch_failure_sends_one_invite_hint_and_skips_model() {
    let chat = Arc::new(FakeChat {
        fail_fetch: Some("not_in_channel".into()),
        ..Default::default()
    });
    let model = Arc::new(FakeModel::answering("unused"));

    let result = process_ai_request(&bot(&chat, &model), request()).await;

    assert!(matches!(
        result,
        AiResult::Failure {
            error: AskError::ContextFetch(_),
            ..
        }
    ));
    assert_eq!(result.outcome(), "context_fetch_failure");
    assert!(model.prompts().is_empty());

    let texts = chat.ephemeral_texts();
    assert_eq!(texts, vec![DEFAULT_ERROR_NOTICE.to_string()]);
    assert!(texts[0].contains("/invite"));
}

#[tokio::test]
async fn model_failure_sends_notice_then_fallback_answer() {
    let chat = Arc::new(FakeChat::with_thread(&["a", "b"]));
    let model = Arc::new(FakeModel::failing());

    let result = process_ai_request(&bot(&chat, &model), request()).await;

    assert!(matches!(
        result,
        AiResult::Failure {
            error: AskError::ModelInvocation(_),
            user_message: MODEL_ERROR_NOTICE,
        }
    ));
    assert_eq!(result.outcome(), "model_invocation_failure");
    assert_eq!(model.prompts().len(), 1);

    let texts = chat.ephemeral_texts();
    assert_eq!(
        texts,
        vec![
            MODEL_ERROR_NOTICE.to_string(),
            format_answer("U111", FALLBACK_ANSWER),
        ]
    );
    assert_ne!(texts[0], texts[1]);
}

#[tokio::test]
async fn delivery_failure_falls_back_to_generic_notice() {
    let chat = Arc::new(FakeChat {
        thread: vec!["a".into()],
        fail_ephemeral_at: Some((0, "channel_not_found".into())),
        ..Default::default()
    });
    let model = Arc::new(FakeModel::answering("answer"));

    let result = process_ai_request(&bot(&chat, &model), request()).await;

    assert!(matches!(
        result,
        AiResult::Failure {
            error: AskError::Delivery(_),
            user_message: DEFAULT_ERROR_NOTICE,
        }
    ));
    assert_eq!(result.outcome(), "delivery_failure");
    assert_eq!(
        chat.ephemeral_texts(),
        vec![format_answer("U111", "answer"), DEFAULT_ERROR_NOTICE.to_string()]
    );
}

#[tokio::test]
async fn empty_thread_still_asks_the_model() {
    let chat = Arc::new(FakeChat::default());
    let model = Arc::new(FakeModel::answering("Nothing to summarize."));

    let result = process_ai_request(&bot(&chat, &model), request()).await;

    assert!(result.is_success());
    assert!(model.prompts()[0].starts_with("Here's a Slack thread:\n\n"));
}
