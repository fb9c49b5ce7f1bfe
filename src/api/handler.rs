//! Webhook endpoint - thin HTTP layer that authenticates and delegates.
//!
//! This module handles:
//! - Request validation (headers, raw body, signature freshness)
//! - Interactive components (delegated to `interactive_handler` module)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::Router;
use tracing::{error, info, warn};

use super::helpers::ApiResponse;
use super::{interactive_handler, signature};
use crate::core::config::AppConfig;
use crate::errors::AskError;
use crate::slack::SlackBot;

pub const ACTIONS_PATH: &str = "/slack/actions";
pub const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";
pub const SIGNATURE_HEADER: &str = "X-Slack-Signature";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bot: SlackBot,
}

/// Build the webhook router. Only `POST /slack/actions` is served.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ACTIONS_PATH, post(handle_actions))
        .with_state(state)
}

/// Bind `0.0.0.0:{config.port}` and serve until the process exits.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(config: AppConfig, bot: SlackBot) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState {
        config: Arc::new(config),
        bot,
    };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Slack actions webhook listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[tracing::instrument(name = "slack.actions", skip_all)]
async fn handle_actions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResponse {
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);
    let sig = header_str(&headers, SIGNATURE_HEADER);
    let now = chrono::Utc::now().timestamp();

    if !signature::verify_slack_signature(
        timestamp,
        sig,
        &body,
        &state.config.slack_signing_secret,
        now,
    ) {
        warn!("Rejected request: Slack signature verification failed");
        return AskError::AuthenticationFailure.into();
    }

    info!("Slack signature verified successfully");

    match interactive_handler::route(&state.bot, &body).await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            error!("Unexpected error occurred: {}", e);
            e.into()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
