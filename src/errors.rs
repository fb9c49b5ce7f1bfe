use slack_morphism::errors::SlackClientError;
use thiserror::Error;

/// Failures reported by the chat-platform and language-model collaborators.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to parse Slack payload: {0}")]
    ParseError(String),

    /// The platform answered but reported an error code (e.g. `not_in_channel`).
    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl SlackError {
    /// True when the platform itself rejected the call, as opposed to a transport failure.
    #[must_use]
    pub fn is_api_error(&self) -> bool {
        matches!(self, SlackError::ApiError(_))
    }
}

impl From<SlackClientError> for SlackError {
    fn from(error: SlackClientError) -> Self {
        match error {
            SlackClientError::ApiError(api_err) => SlackError::ApiError(api_err.code),
            other => SlackError::HttpError(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        SlackError::HttpError(error.to_string())
    }
}

/// Pipeline-level failures, one per stage of a webhook's life.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("Request authentication failed")]
    AuthenticationFailure,

    #[error("Malformed interaction payload: {0}")]
    MalformedPayload(String),

    #[error("Modal could not be presented: {0}")]
    Presentation(#[source] SlackError),

    #[error("Thread context could not be fetched: {0}")]
    ContextFetch(#[source] SlackError),

    #[error("Language model invocation failed: {0}")]
    ModelInvocation(#[source] SlackError),

    #[error("Answer delivery failed: {0}")]
    Delivery(#[source] SlackError),
}
