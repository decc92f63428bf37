//! Per-user collection sessions.
//!
//! All mutations take the user's map entry for their whole duration, so an
//! append can never interleave with the flush that detaches the buffer.

use dashmap::DashMap;
use tracing::debug;

use crate::core::models::{Mode, UserId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub mode: Mode,
    pub collecting: bool,
    pub messages: Vec<String>,
}

/// Buffer detached from a session by [`SessionStore::take_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub mode: Mode,
    pub messages: Vec<String>,
}

impl Batch {
    #[must_use]
    pub fn joined(&self) -> String {
        self.messages.join("\n")
    }
}

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<UserId, Session>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self, user_id: UserId) -> Mode {
        self.sessions
            .get(&user_id)
            .map(|s| s.mode)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_collecting(&self, user_id: UserId) -> bool {
        self.sessions.get(&user_id).is_some_and(|s| s.collecting)
    }

    #[must_use]
    pub fn buffered(&self, user_id: UserId) -> usize {
        self.sessions.get(&user_id).map_or(0, |s| s.messages.len())
    }

    pub fn set_mode(&self, user_id: UserId, mode: Mode) {
        self.sessions.entry(user_id).or_default().mode = mode;
    }

    /// Enter collecting mode, discarding anything buffered before.
    pub fn start_collecting(&self, user_id: UserId) {
        let mut session = self.sessions.entry(user_id).or_default();
        if !session.messages.is_empty() {
            debug!(
                user_id = %user_id,
                dropped = session.messages.len(),
                "Restarting collection, dropping buffered messages"
            );
        }
        session.collecting = true;
        session.messages.clear();
    }

    /// Append `text` to the buffer. Returns the new buffer length, or `None`
    /// when the user is not collecting.
    pub fn append(&self, user_id: UserId, text: &str) -> Option<usize> {
        let mut session = self.sessions.get_mut(&user_id)?;
        if !session.collecting {
            return None;
        }
        session.messages.push(text.to_string());
        Some(session.messages.len())
    }

    /// Detach the buffered messages and reset the session in one step.
    ///
    /// Returns `None` (and leaves the session untouched) when nothing is buffered.
    pub fn take_batch(&self, user_id: UserId) -> Option<Batch> {
        let mut session = self.sessions.get_mut(&user_id)?;
        if session.messages.is_empty() {
            return None;
        }
        let taken = std::mem::take(&mut *session);
        Some(Batch {
            mode: taken.mode,
            messages: taken.messages,
        })
    }

    pub fn clear(&self, user_id: UserId) {
        if let Some(mut session) = self.sessions.get_mut(&user_id) {
            *session = Session::default();
        }
    }

    #[must_use]
    pub fn snapshot(&self, user_id: UserId) -> Option<Session> {
        self.sessions.get(&user_id).map(|s| s.clone())
    }
}
