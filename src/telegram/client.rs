//! Telegram Bot API client module
//!
//! Encapsulates all outbound Telegram calls with retry logic and error handling.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tokio_retry::{RetryIf, strategy::ExponentialBackoff};
use tracing::{info, warn};

use super::keyboards::InlineKeyboard;
use crate::core::models::ChatId;
use crate::errors::BotError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram rejects message texts longer than this many characters.
pub const MESSAGE_TEXT_LIMIT: usize = 4096;

/// Per-attempt deadline. With the retry schedule below one call stays well
/// inside Telegram's webhook timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Outbound messaging, fire-and-forget from the router's point of view.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), BotError>;

    /// # Errors
    ///
    /// Returns an error if the message could not be edited.
    async fn edit_message(&self, chat_id: ChatId, message_id: i64, text: &str)
    -> Result<(), BotError>;

    /// Stop the client-side spinner on a pressed button.
    ///
    /// # Errors
    ///
    /// Returns an error if the acknowledgement failed.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), BotError>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// One failed Bot API attempt. Only transient failures are retried.
#[derive(Debug)]
struct CallFailure {
    error: BotError,
    retryable: bool,
}

impl CallFailure {
    fn transport(error: reqwest::Error) -> Self {
        Self {
            error: error.into(),
            retryable: true,
        }
    }

    fn rejected(status: StatusCode, error: BotError) -> Self {
        Self {
            error,
            retryable: is_transient_status(status),
        }
    }
}

/// Server errors and rate limiting may succeed on a later attempt. Anything
/// else (blocked bot, missing chat, unchanged message) fails the same way again.
fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Delays between attempts: about 100ms, 200ms, 400ms, each capped at 2s.
fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(3)
}

pub struct TelegramClient {
    http: Client,
    token: String,
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(token: String) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BotError::HttpError(format!("Failed to build Telegram HTTP client: {e}")))?;
        Ok(Self { http, token })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{TELEGRAM_API_BASE}/bot{}/{method}", self.token)
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, BotError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, CallFailure>> + Send,
        T: Send,
    {
        RetryIf::spawn(retry_strategy(), operation, |failure: &CallFailure| {
            failure.retryable
        })
        .await
        .map_err(|failure| failure.error)
    }

    async fn call(&self, method: &str, payload: &Value) -> Result<(), BotError> {
        let url = self.method_url(method);
        let url = url.as_str();
        let http = &self.http;
        self.with_retry(|| async move {
            let response = http
                .post(url)
                .json(payload)
                .send()
                .await
                .map_err(CallFailure::transport)?;
            let status = response.status();
            let body: ApiResponse = response.json().await.map_err(|e| {
                CallFailure::rejected(
                    status,
                    BotError::TelegramError(format!("{method}: unreadable response ({status}): {e}")),
                )
            })?;
            if body.ok {
                Ok(())
            } else {
                let description = body.description.unwrap_or_else(|| "unknown error".to_string());
                warn!("Telegram {} failed ({}): {}", method, status, description);
                Err(CallFailure::rejected(
                    status,
                    BotError::TelegramError(format!("{method}: {description}")),
                ))
            }
        })
        .await
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), BotError> {
        let parts = split_message(text, MESSAGE_TEXT_LIMIT);
        let last = parts.len().saturating_sub(1);
        for (i, part) in parts.iter().enumerate() {
            let mut payload = json!({ "chat_id": chat_id.0, "text": part });
            if i == last
                && let Some(kb) = keyboard
            {
                payload["reply_markup"] = kb.to_reply_markup();
            }
            self.call("sendMessage", &payload).await?;
        }
        info!(chat_id = %chat_id, parts = parts.len(), "Sent message");
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: i64,
        text: &str,
    ) -> Result<(), BotError> {
        let truncated: String = text.chars().take(MESSAGE_TEXT_LIMIT).collect();
        let payload = json!({
            "chat_id": chat_id.0,
            "message_id": message_id,
            "text": truncated,
        });
        self.call("editMessageText", &payload).await
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), BotError> {
        self.call(
            "answerCallbackQuery",
            &json!({ "callback_query_id": callback_id }),
        )
        .await
    }
}

/// Split `text` into pieces of at most `limit` characters, preferring line
/// breaks. A single line longer than `limit` is cut at character boundaries.
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > limit && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                parts.push(piece.iter().collect());
            }
            continue;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}
