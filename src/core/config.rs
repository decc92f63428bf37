use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_DAILY_REQUEST_LIMIT: u32 = 20;
pub const DEFAULT_QUOTA_WINDOW_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub telegram_webhook_secret: Option<String>,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub daily_request_limit: u32,
    pub quota_window: Duration,
    pub generation_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|e| format!("TELEGRAM_BOT_TOKEN: {}", e))?,
            telegram_webhook_secret: env::var("TELEGRAM_WEBHOOK_SECRET").ok(),
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            daily_request_limit: parse_or_default(
                "DAILY_REQUEST_LIMIT",
                env::var("DAILY_REQUEST_LIMIT").ok(),
                DEFAULT_DAILY_REQUEST_LIMIT,
            )?,
            quota_window: Duration::from_secs(parse_or_default(
                "QUOTA_WINDOW_SECS",
                env::var("QUOTA_WINDOW_SECS").ok(),
                DEFAULT_QUOTA_WINDOW_SECS,
            )?),
            generation_timeout: Duration::from_secs(parse_or_default(
                "GENERATION_TIMEOUT_SECS",
                env::var("GENERATION_TIMEOUT_SECS").ok(),
                DEFAULT_GENERATION_TIMEOUT_SECS,
            )?),
        })
    }

    #[must_use]
    pub fn model_name(&self) -> String {
        self.openai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string())
    }
}

/// Parse an optional env value, falling back to `default` when unset or blank.
pub fn parse_or_default<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|e| format!("{}: {} ({:?})", name, e, value)),
    }
}

/// Thresholds for the single-pass / map-reduce split.
#[derive(Debug, Clone, Copy)]
pub struct SummarizerSettings {
    pub single_pass_threshold: usize,
    pub chunk_size: usize,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            single_pass_threshold: 3000,
            chunk_size: 3000,
        }
    }
}
