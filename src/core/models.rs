use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{AskError, SlackError};

/// Current encoding version of [`CorrelationState`].
pub const CORRELATION_STATE_VERSION: u32 = 1;

/// Thread coordinates carried through a modal's `private_metadata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationState {
    pub channel_id: String,
    pub message_ts: String,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CorrelationStateWire {
    #[serde(default = "legacy_version")]
    v: u32,
    channel_id: String,
    message_ts: String,
}

fn legacy_version() -> u32 {
    CORRELATION_STATE_VERSION
}

impl CorrelationState {
    #[must_use]
    pub fn new(channel_id: impl Into<String>, message_ts: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_ts: message_ts.into(),
        }
    }

    /// Encode as the opaque string attached to the modal.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn serialize(&self) -> Result<String, SlackError> {
        let wire = CorrelationStateWire {
            v: CORRELATION_STATE_VERSION,
            channel_id: self.channel_id.clone(),
            message_ts: self.message_ts.clone(),
        };
        serde_json::to_string(&wire)
            .map_err(|e| SlackError::ParseError(format!("Failed to encode correlation state: {e}")))
    }

    /// Decode the string returned verbatim on modal submission.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid JSON, unknown fields, or an unsupported version.
    pub fn deserialize(raw: &str) -> Result<Self, SlackError> {
        let wire: CorrelationStateWire = serde_json::from_str(raw)
            .map_err(|e| SlackError::ParseError(format!("Invalid correlation state: {e}")))?;
        if wire.v != CORRELATION_STATE_VERSION {
            return Err(SlackError::ParseError(format!(
                "Unsupported correlation state version {}",
                wire.v
            )));
        }
        Ok(Self {
            channel_id: wire.channel_id,
            message_ts: wire.message_ts,
        })
    }
}

/// A user picked the message shortcut on some message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutInvocation {
    pub trigger_id: String,
    pub source_message_ts: String,
    pub channel_id: String,
}

/// A user submitted the question modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSubmission {
    pub correlation_state: CorrelationState,
    pub user_input: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionPayload {
    Shortcut(ShortcutInvocation),
    ModalSubmission(ModalSubmission),
    /// Any interaction kind this service does not handle.
    Unsupported(String),
}

/// Everything one AI worker needs; consumed by exactly one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiRequest {
    pub correlation_id: String,
    pub channel_id: String,
    pub message_ts: String,
    pub user_id: String,
    pub question: String,
}

/// Terminal outcome of a worker run.
#[derive(Debug)]
pub enum AiResult {
    Success(String),
    Failure {
        error: AskError,
        user_message: &'static str,
    },
}

impl AiResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, AiResult::Success(_))
    }

    /// Short label for the terminal outcome, used in logs.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        match self {
            AiResult::Success(_) => "success",
            AiResult::Failure { error, .. } => match error {
                AskError::ContextFetch(_) => "context_fetch_failure",
                AskError::ModelInvocation(_) => "model_invocation_failure",
                AskError::Delivery(_) => "delivery_failure",
                AskError::AuthenticationFailure
                | AskError::MalformedPayload(_)
                | AskError::Presentation(_) => "failure",
            },
        }
    }
}

/// What the router tells the HTTP layer to answer.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterOutcome {
    /// Plain `{"status":"ok"}`.
    Acknowledged,
    /// Close the submitted modal.
    ClearModal,
    /// Keep the modal open and show field-scoped errors (`block_id -> message`).
    FormErrors(Map<String, Value>),
}
