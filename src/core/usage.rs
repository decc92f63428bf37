//! Per-user request quota with a fixed reset window.
//!
//! Each user gets a [`UsageRecord`] the first time they are seen. The record
//! counts allowed requests until its `reset_at` deadline passes, at which point
//! the count starts over and a new window begins at the time of that request.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::models::UserId;
use crate::errors::BotError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

impl UsageRecord {
    fn fresh(now: DateTime<Utc>, window: TimeDelta) -> Self {
        Self {
            count: 0,
            reset_at: now + window,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.reset_at
    }
}

pub struct UsageLimiter {
    limit: u32,
    window: TimeDelta,
    records: DashMap<UserId, UsageRecord>,
}

impl UsageLimiter {
    #[must_use]
    pub fn new(limit: u32, window: TimeDelta) -> Self {
        Self {
            limit,
            window,
            records: DashMap::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configured window does not fit a `TimeDelta`.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        let window = TimeDelta::from_std(config.quota_window)
            .map_err(|e| BotError::ConfigError(format!("QUOTA_WINDOW_SECS: {e}")))?;
        Ok(Self::new(config.daily_request_limit, window))
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Record one request for `user_id` if the quota allows it.
    ///
    /// The check and the increment happen under the user's entry lock, so two
    /// concurrent callers can never both take the last slot.
    pub fn allow(&self, user_id: UserId, now: DateTime<Utc>) -> bool {
        let mut record = self
            .records
            .entry(user_id)
            .or_insert_with(|| UsageRecord::fresh(now, self.window));

        if record.is_expired(now) {
            debug!(user_id = %user_id, "Quota window elapsed, resetting usage");
            *record = UsageRecord::fresh(now, self.window);
        }

        if record.count >= self.limit {
            info!(
                user_id = %user_id,
                count = record.count,
                reset_at = %record.reset_at,
                "Quota exhausted"
            );
            return false;
        }

        record.count += 1;
        true
    }

    /// Give back one request taken by [`allow`](Self::allow) for work that
    /// turned out not to need the model. Never goes below zero.
    pub fn refund(&self, user_id: UserId) {
        if let Some(mut record) = self.records.get_mut(&user_id) {
            record.count = record.count.saturating_sub(1);
            debug!(user_id = %user_id, count = record.count, "Refunded request");
        }
    }

    /// Requests still available in the current window. Never creates a record.
    #[must_use]
    pub fn remaining(&self, user_id: UserId, now: DateTime<Utc>) -> u32 {
        match self.records.get(&user_id) {
            Some(record) if !record.is_expired(now) => self.limit.saturating_sub(record.count),
            _ => self.limit,
        }
    }

    #[must_use]
    pub fn snapshot(&self, user_id: UserId) -> Option<UsageRecord> {
        self.records.get(&user_id).map(|r| r.clone())
    }
}
