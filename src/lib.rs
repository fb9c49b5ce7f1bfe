//! Ask AI - a Slack message shortcut that answers questions about a thread.
//!
//! A user picks the "Ask AI" shortcut on a message, types a question into a
//! modal, and receives an ephemeral answer in that thread generated by an
//! `OpenAI` model from the thread's messages.
//!
//! # Architecture
//!
//! A single webhook endpoint receives every interaction:
//! 1. The request signature and timestamp are verified against the signing secret
//! 2. A `message_action` opens the question modal, carrying the thread
//!    coordinates in its private metadata
//! 3. A `view_submission` posts a "processing" notice, spawns a detached
//!    worker, and closes the modal
//! 4. The worker fetches the thread, asks the model, and posts the answer
//!
//! The system uses:
//! - axum for the webhook endpoint
//! - slack-morphism and reqwest for Slack API interactions
//! - the `OpenAI` Responses API for answers
//! - Tokio for async runtime and background tasks
//!
//! # Example
//!
//! ```no_run
//! use askai::core::config::AppConfig;
//! use askai::slack::SlackBot;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     askai::setup_logging();
//!
//!     let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;
//!     let bot = SlackBot::new(&config);
//!     askai::api::serve(config, bot).await
//! }
//! ```

pub mod ai;
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod slack;
pub mod worker;

pub use errors::{AskError, SlackError};

/// Configure structured logging with JSON format.
///
/// Verbosity follows `RUST_LOG`, defaulting to `info`. Call once at startup.
///
/// # Example
///
/// ```
/// askai::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
