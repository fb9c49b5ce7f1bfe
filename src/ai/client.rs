//! LLM (`OpenAI`) API client module
//!
//! A single request/response call against the Responses API.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;

use crate::clients::LanguageModel;
use crate::errors::SlackError;

const RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// LLM API client for answering questions about a thread
pub struct LlmClient {
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    http: Client,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_key: String, org_id: Option<String>, model_name: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            api_key,
            org_id,
            model_name,
            http,
        }
    }

    /// Wrap a finished prompt as a single user turn.
    #[must_use]
    pub fn build_messages(prompt: &str) -> Vec<ChatCompletionMessage> {
        vec![ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(prompt.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }]
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap, SlackError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| SlackError::HttpError(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        let content_type_value = "application/json"
            .parse()
            .map_err(|e| SlackError::HttpError(format!("Invalid Content-Type header: {e}")))?;
        headers.insert("Content-Type", content_type_value);

        if let Some(org) = &self.org_id {
            let org_value = org.parse().map_err(|e| {
                SlackError::HttpError(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert("OpenAI-Organization", org_value);
        }

        Ok(headers)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP request to `OpenAI` fails or the response
    /// cannot be parsed into the expected shape.
    pub async fn generate(&self, prompt: &str) -> Result<String, SlackError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{}", prompt);

        info!(
            model = %self.model_name,
            estimated_input_tokens = estimate_tokens(prompt),
            "Requesting completion"
        );

        let messages = Self::build_messages(prompt);
        let request_body = json!({
            "model": self.model_name,
            "input": build_responses_input_from_prompt(&messages),
        });

        let response = self
            .http
            .post(RESPONSES_URL)
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SlackError::OpenAIError(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SlackError::OpenAIError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        extract_output_text(&response_json)
            .ok_or_else(|| SlackError::OpenAIError("No text in response".to_string()))
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn generate_completion(&self, prompt: &str) -> Result<String, SlackError> {
        self.generate(prompt).await
    }
}

/// Pull the generated text out of a Responses API body.
///
/// Prefers the top-level `output_text` convenience field, falling back to
/// concatenating every `output_text` content part.
pub(crate) fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let mut collected: Vec<String> = Vec::new();
    let items = response_json
        .get("output")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for item in items {
        let Some(parts) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for p in parts {
            let is_output_text = p
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| t == "output_text");
            if !is_output_text {
                continue;
            }
            if let Some(s) = p.get("text").and_then(Value::as_str) {
                collected.push(s.to_string());
            } else if let Some(s) = p
                .get("text")
                .and_then(|t| t.get("value"))
                .and_then(Value::as_str)
            {
                collected.push(s.to_string());
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}

pub(crate) fn build_responses_input_from_prompt(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .map(|m| {
            let role_str = match m.role {
                MessageRole::system => "system",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
                MessageRole::assistant => "assistant",
            };

            let parts: Vec<Value> = match &m.content {
                Content::Text(t) => vec![json!({
                    "type": "input_text",
                    "text": t
                })],
                // Thread questions are text-only.
                Content::ImageUrl(_) => Vec::new(),
            };

            json!({
                "role": role_str,
                "content": parts
            })
        })
        .collect()
}
