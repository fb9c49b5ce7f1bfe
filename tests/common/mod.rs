#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use askai::SlackError;
use askai::api::signature::compute_signature;
use askai::clients::{ChatPlatform, LanguageModel};
use askai::core::config::AppConfig;
use askai::core::models::CorrelationState;
use askai::slack::SlackBot;
use async_trait::async_trait;
use serde_json::{Value, json};

pub const SECRET: &str = "test-signing-secret";

#[derive(Debug, Clone, PartialEq)]
pub enum ChatCall {
    FetchThread {
        channel_id: String,
        thread_ts: String,
    },
    Ephemeral {
        channel_id: String,
        user_id: String,
        thread_ts: String,
        text: String,
    },
    OpenModal {
        trigger_id: String,
        view: Value,
    },
}

/// In-memory chat platform that records every call.
#[derive(Default)]
pub struct FakeChat {
    pub calls: Mutex<Vec<ChatCall>>,
    pub thread: Vec<String>,
    pub fail_fetch: Option<String>,
    pub fail_modal: Option<String>,
    /// Fail the n-th ephemeral post (0-based) with this API error code.
    pub fail_ephemeral_at: Option<(usize, String)>,
}

impl FakeChat {
    pub fn with_thread(messages: &[&str]) -> Self {
        Self {
            thread: messages.iter().map(|m| (*m).to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ephemeral_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ChatCall::Ephemeral { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn ephemeral_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, ChatCall::Ephemeral { .. }))
            .count()
    }
}

#[async_trait]
impl ChatPlatform for FakeChat {
    async fn fetch_thread_messages(
        &self,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<Vec<String>, SlackError> {
        self.calls.lock().unwrap().push(ChatCall::FetchThread {
            channel_id: channel_id.to_string(),
            thread_ts: thread_ts.to_string(),
        });
        match &self.fail_fetch {
            Some(code) => Err(SlackError::ApiError(code.clone())),
            None => Ok(self.thread.clone()),
        }
    }

    async fn post_ephemeral(
        &self,
        channel_id: &str,
        user_id: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<(), SlackError> {
        let index = self.ephemeral_count();
        self.calls.lock().unwrap().push(ChatCall::Ephemeral {
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            thread_ts: thread_ts.to_string(),
            text: text.to_string(),
        });
        match &self.fail_ephemeral_at {
            Some((n, code)) if *n == index => Err(SlackError::ApiError(code.clone())),
            _ => Ok(()),
        }
    }

    async fn open_modal(&self, trigger_id: &str, view: &Value) -> Result<(), SlackError> {
        self.calls.lock().unwrap().push(ChatCall::OpenModal {
            trigger_id: trigger_id.to_string(),
            view: view.clone(),
        });
        match &self.fail_modal {
            Some(code) => Err(SlackError::ApiError(code.clone())),
            None => Ok(()),
        }
    }
}

/// Language model that echoes a canned answer or fails.
#[derive(Default)]
pub struct FakeModel {
    pub prompts: Mutex<Vec<String>>,
    pub answer: String,
    pub fail: bool,
}

impl FakeModel {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn generate_completion(&self, prompt: &str) -> Result<String, SlackError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            Err(SlackError::OpenAIError("status 503".to_string()))
        } else {
            Ok(self.answer.clone())
        }
    }
}

pub fn bot(chat: &Arc<FakeChat>, model: &Arc<FakeModel>) -> SlackBot {
    SlackBot::with_clients(chat.clone(), model.clone())
}

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "SLACK_SIGNING_SECRET" => Some(SECRET.to_string()),
        "SLACK_BOT_TOKEN" => Some("xoxb-test".to_string()),
        "OPENAI_API_KEY" => Some("sk-test".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn form_body(payload: &Value) -> Vec<u8> {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("payload", &payload.to_string())
        .finish()
        .into_bytes()
}

pub fn shortcut_payload() -> Value {
    json!({
        "type": "message_action",
        "callback_id": "ask_ai",
        "trigger_id": "13345224609.738474920.8088930838d88f008e0",
        "user": { "id": "U111" },
        "channel": { "id": "C222", "name": "general" },
        "message": { "type": "message", "ts": "1700000000.000100", "text": "root message" }
    })
}

pub fn submission_payload(question: &str) -> Value {
    let metadata = CorrelationState::new("C222", "1700000000.000100")
        .serialize()
        .unwrap();
    json!({
        "type": "view_submission",
        "user": { "id": "U111" },
        "view": {
            "callback_id": "ask_ai_modal",
            "private_metadata": metadata,
            "state": {
                "values": {
                    "user_question": {
                        "question_input": { "type": "plain_text_input", "value": question }
                    }
                }
            }
        }
    })
}

pub fn sign(body: &[u8], timestamp: i64) -> (String, String) {
    let ts = timestamp.to_string();
    let sig = compute_signature(&ts, body, SECRET);
    (ts, sig)
}

/// Wait until the fake has seen `count` ephemeral posts, or give up after 2s.
pub async fn wait_for_ephemerals(chat: &FakeChat, count: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while chat.ephemeral_count() < count {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {count} ephemeral messages, saw {:?}",
            chat.ephemeral_texts()
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
