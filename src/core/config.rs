use std::env;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_signing_secret: String,
    pub slack_bot_token: String,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing or empty required variable, or an
    /// unparsable `PORT`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, String> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => Ok(v),
                Some(_) => Err(format!("{key}: environment variable is empty")),
                None => Err(format!("{key}: environment variable not found")),
            }
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match optional("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("PORT: {e}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            slack_signing_secret: required("SLACK_SIGNING_SECRET")?,
            slack_bot_token: required("SLACK_BOT_TOKEN")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_org_id: optional("OPENAI_ORG_ID"),
            openai_model: optional("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            port,
        })
    }
}
