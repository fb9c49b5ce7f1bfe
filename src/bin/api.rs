use askai::core::config::AppConfig;
use askai::slack::SlackBot;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    askai::setup_logging();

    // Refuse to serve with partial configuration.
    let config = AppConfig::from_env().map_err(|e| {
        error!("Missing required environment variables: {}", e);
        anyhow::anyhow!("Config error: {e}")
    })?;

    info!(model = %config.openai_model, port = config.port, "Starting Ask AI webhook");

    let bot = SlackBot::new(&config);
    askai::api::serve(config, bot).await
}
