/// Summabot - A Telegram bot that summarizes text and web pages using ChatGPT.
///
/// This crate implements a single webhook Lambda for the bot:
/// 1. The API layer verifies and decodes Telegram webhook updates
/// 2. The command router applies per-user sessions and daily quotas
/// 3. The summarizer calls the model once for short texts, or runs a
///    map-reduce pass over sentence-bounded chunks for long ones
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - In-memory per-user state (`dashmap`) that lives as long as the container
/// - The Telegram Bot API over `reqwest` with `tokio-retry`
/// - The `OpenAI` Responses API for generation
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use summabot::ai::{LlmClient, Summarizer};
/// use summabot::core::config::SummarizerSettings;
/// use summabot::core::models::Mode;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Set up structured logging
///     summabot::setup_logging();
///
///     let llm = LlmClient::new(
///         "dummy_openai_key".to_string(),
///         None,
///         "gpt-4o-mini".to_string(),
///         std::time::Duration::from_secs(20),
///     )?;
///     let summarizer = Summarizer::new(Arc::new(llm), SummarizerSettings::default());
///
///     let summary = summarizer
///         .summarize("Rust 1.0 shipped in May 2015. It focused on stability.", Mode::Short)
///         .await?;
///     println!("Summary: {}", summary);
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod bot;
pub mod core;
pub mod errors;
pub mod telegram;
pub mod utils;

pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at process start.
/// Calling it again is a no-op.
///
/// # Example
///
/// ```
/// summabot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
