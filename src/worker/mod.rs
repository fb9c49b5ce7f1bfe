//! Submission dispatch and the detached AI worker

pub mod ai_worker;
pub mod dispatcher;

// Re-export the main entry points for convenience
pub use ai_worker::{WorkerStage, process_ai_request};
pub use dispatcher::dispatch;
