//! Webhook intake: authentication, parsing and routing

pub mod handler;
pub mod helpers;
pub mod interactive_handler;
pub mod parsing;
pub mod signature;

// Re-export the main entry points for convenience
pub use handler::{AppState, router, serve};
