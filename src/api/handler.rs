//! Webhook Lambda handler - thin router that delegates to the command router.
//!
//! This module handles:
//! - Request validation (headers, body, webhook secret)
//! - Decoding the Telegram update into an inbound event
//! - Dispatching the event and always acknowledging Telegram with a 200

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use super::helpers;
use crate::ai::{LlmClient, Summarizer};
use crate::bot::CommandRouter;
use crate::core::config::{AppConfig, SummarizerSettings};
use crate::core::state::BotState;
use crate::errors::BotError;
use crate::telegram::TelegramClient;
use crate::telegram::parsing::{decode_update, get_header_value};
use crate::utils::extract::HttpExtractor;

/// Header Telegram sets when the webhook was registered with a `secret_token`.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// State that lives for as long as the Lambda container stays warm.
///
/// Quotas and collecting sessions are held in this process only, so the
/// function must run as a single instance: reserved concurrency 1, and the
/// webhook registered with `max_connections=1`. Telegram then delivers one
/// update at a time, and every update for every user reaches the same
/// `WebhookApp`. A second concurrent container would get its own empty state.
pub struct WebhookApp {
    webhook_secret: Option<String>,
    router: CommandRouter,
}

impl WebhookApp {
    #[must_use]
    pub fn new(webhook_secret: Option<String>, router: CommandRouter) -> Self {
        Self {
            webhook_secret,
            router,
        }
    }

    /// Wire the production clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or the quota
    /// settings are invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        let state = Arc::new(BotState::from_config(config)?);
        let llm = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.model_name(),
            config.generation_timeout,
        )?;
        let summarizer = Summarizer::new(Arc::new(llm), SummarizerSettings::default());
        let messenger = Arc::new(TelegramClient::new(config.telegram_bot_token.clone())?);
        let extractor = Arc::new(HttpExtractor::new()?);

        Ok(Self::new(
            config.telegram_webhook_secret.clone(),
            CommandRouter::new(state, summarizer, messenger, extractor),
        ))
    }

    #[must_use]
    pub fn router(&self) -> &CommandRouter {
        &self.router
    }
}

/// Lambda handler for the webhook entrypoint.
///
/// # Errors
///
/// Never fails for malformed requests; those get a 4xx response payload.
pub async fn function_handler(app: Arc<WebhookApp>, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let correlation_id = Uuid::new_v4().to_string();
    let span = info_span!("webhook", correlation_id = %correlation_id);
    Ok(process_request(&app, &event.payload).instrument(span).await)
}

/// Validate, decode and dispatch one API Gateway / function URL payload.
pub async fn process_request(app: &WebhookApp, payload: &Value) -> Value {
    // ========================================================================
    // Extract and validate headers
    // ========================================================================

    let Some(headers) = payload.get("headers") else {
        error!("Request missing headers");
        return helpers::err_response(400, "Missing headers");
    };

    if let Err(response) = verify_secret(headers, app.webhook_secret.as_deref()) {
        return response;
    }

    let body = match extract_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    // ========================================================================
    // Decode and route
    // ========================================================================

    let event = match decode_update(&body) {
        Ok(Some(event)) => event,
        Ok(None) => {
            info!("Ignoring unsupported update");
            return helpers::ok_empty();
        }
        Err(e) => {
            error!("Failed to decode update: {}", e);
            return helpers::err_response(400, &format!("Parse Error: {e}"));
        }
    };

    info!(user_id = %event.user_id(), chat_id = ?event.chat_id(), "Routing inbound event");
    let reply = app.router.handle(event).await;
    info!(?reply, "Event handled");

    helpers::ok_empty()
}

// ============================================================================
// Request Validation Helpers
// ============================================================================

fn extract_body(payload: &Value) -> Result<String, Value> {
    let Some(body) = payload.get("body") else {
        error!("Request missing body");
        return Err(helpers::err_response(400, "Missing body"));
    };

    let Some(body_str) = body.as_str() else {
        error!("Request body is not a string");
        return Err(helpers::err_response(400, "Invalid body format"));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !is_base64 {
        return Ok(body_str.to_string());
    }

    BASE64
        .decode(body_str)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| {
            error!("Request body is not valid base64 UTF-8");
            helpers::err_response(400, "Invalid body encoding")
        })
}

fn verify_secret(headers: &Value, expected: Option<&str>) -> Result<(), Value> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match get_header_value(headers, SECRET_TOKEN_HEADER) {
        Some(given) if given == expected => Ok(()),
        Some(_) => {
            warn!("Webhook secret token mismatch");
            Err(helpers::err_response(401, "Invalid secret token"))
        }
        None => {
            warn!("Missing {} header", SECRET_TOKEN_HEADER);
            Err(helpers::err_response(401, "Missing secret token"))
        }
    }
}
