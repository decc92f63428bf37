use crate::core::config::AppConfig;
use crate::core::session::SessionStore;
use crate::core::usage::UsageLimiter;
use crate::errors::BotError;

/// Process-wide per-user state.
///
/// Lock discipline: the limiter and the session store each guard a user's
/// record with that user's map entry. No operation holds both at once, and
/// neither is held across an `.await`.
pub struct BotState {
    pub usage: UsageLimiter,
    pub sessions: SessionStore,
}

impl BotState {
    #[must_use]
    pub fn new(usage: UsageLimiter) -> Self {
        Self {
            usage,
            sessions: SessionStore::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the quota window in `config` is out of range.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        Ok(Self::new(UsageLimiter::from_config(config)?))
    }
}
