//! Slack API client module
//!
//! Encapsulates the Slack Web API calls the pipeline needs. Every call is
//! attempted exactly once; failures are returned to the caller to translate
//! into a user-facing notice.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{
    SlackApiChatPostEphemeralRequest, SlackApiConversationsRepliesRequest,
};
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackTs, SlackUserId,
};
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::ChatPlatform;
use crate::errors::SlackError;

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a SlackError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

const VIEWS_OPEN_URL: &str = "https://slack.com/api/views.open";

/// Slack API client bound to a bot token.
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    fn connector() -> Result<&'static SlackHyperClient, SlackError> {
        SLACK_CLIENT.as_ref().ok_or_else(|| {
            SlackError::GeneralError("Slack HTTP connector not initialized".to_string())
        })
    }

    /// # Errors
    ///
    /// Returns an error if the Slack API call fails.
    pub async fn conversation_replies(
        &self,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<Vec<String>, SlackError> {
        let session = Self::connector()?.open_session(&self.token);
        let request = SlackApiConversationsRepliesRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackTs(thread_ts.to_string()),
        );

        let response = session.conversations_replies(&request).await?;
        debug!(
            channel_id,
            thread_ts,
            count = response.messages.len(),
            "Fetched thread replies"
        );

        Ok(response
            .messages
            .into_iter()
            .map(|msg| msg.content.text.unwrap_or_default())
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if the Slack API call fails.
    pub async fn post_ephemeral_in_thread(
        &self,
        channel_id: &str,
        user_id: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<(), SlackError> {
        let session = Self::connector()?.open_session(&self.token);
        let request = SlackApiChatPostEphemeralRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackUserId(user_id.to_string()),
            SlackMessageContent::new().with_text(text.to_string()),
        )
        .with_thread_ts(SlackTs(thread_ts.to_string()));

        session.chat_post_ephemeral(&request).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the Slack API request or response parsing fails.
    pub async fn open_modal(&self, trigger_id: &str, view: &Value) -> Result<(), SlackError> {
        let payload = json!({
            "trigger_id": trigger_id,
            "view": view
        });

        let resp = HTTP_CLIENT
            .post(VIEWS_OPEN_URL)
            .bearer_auth(&self.token.token_value.0)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("Failed to open modal: {e}")))?;

        if !resp.status().is_success() {
            return Err(SlackError::HttpError(format!(
                "views.open HTTP {}",
                resp.status()
            )));
        }

        let body: Value = resp.json().await?;
        check_ok(&body)
    }
}

/// Interpret Slack's `{"ok": bool, "error": "code"}` envelope.
fn check_ok(body: &Value) -> Result<(), SlackError> {
    if body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        Ok(())
    } else {
        Err(SlackError::ApiError(
            body.get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
        ))
    }
}

#[async_trait]
impl ChatPlatform for SlackClient {
    async fn fetch_thread_messages(
        &self,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<Vec<String>, SlackError> {
        self.conversation_replies(channel_id, thread_ts).await
    }

    async fn post_ephemeral(
        &self,
        channel_id: &str,
        user_id: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<(), SlackError> {
        self.post_ephemeral_in_thread(channel_id, user_id, thread_ts, text)
            .await
    }

    async fn open_modal(&self, trigger_id: &str, view: &Value) -> Result<(), SlackError> {
        SlackClient::open_modal(self, trigger_id, view).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_passes() {
        assert!(check_ok(&json!({"ok": true})).is_ok());
    }

    #[test]
    fn error_envelope_surfaces_platform_code() {
        let err = check_ok(&json!({"ok": false, "error": "expired_trigger_id"})).unwrap_err();
        assert!(err.is_api_error());
        assert!(err.to_string().contains("expired_trigger_id"));
    }

    #[test]
    fn missing_ok_is_treated_as_failure() {
        let err = check_ok(&json!({})).unwrap_err();
        assert!(matches!(err, SlackError::ApiError(ref code) if code == "unknown"));
    }
}
