use std::sync::Arc;

use crate::ai::LlmClient;
use crate::clients::{ChatPlatform, LanguageModel};
use crate::core::config::AppConfig;
use crate::slack::client::SlackClient;

/// Collaborator handles shared by every request and background task.
///
/// Built once at startup and cloned by reference count; nothing inside is
/// mutated afterwards.
#[derive(Clone)]
pub struct SlackBot {
    chat: Arc<dyn ChatPlatform>,
    llm: Arc<dyn LanguageModel>,
}

impl SlackBot {
    /// Construct a `SlackBot` backed by the real Slack and `OpenAI` clients.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let slack_client = SlackClient::new(config.slack_bot_token.clone());
        let llm_client = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
        );

        Self::with_clients(Arc::new(slack_client), Arc::new(llm_client))
    }

    #[must_use]
    pub fn with_clients(chat: Arc<dyn ChatPlatform>, llm: Arc<dyn LanguageModel>) -> Self {
        Self { chat, llm }
    }

    #[must_use]
    pub fn chat(&self) -> &dyn ChatPlatform {
        self.chat.as_ref()
    }

    #[must_use]
    pub fn llm(&self) -> &dyn LanguageModel {
        self.llm.as_ref()
    }
}
