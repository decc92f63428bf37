//! Webhook Lambda handler and request processing

pub mod handler;
pub mod helpers;

// Re-export the main handler for convenience
pub use handler::{WebhookApp, function_handler as handler, process_request};
