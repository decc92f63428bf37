use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary granularity selected by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Short,
    #[default]
    Standard,
    Detailed,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Short, Mode::Standard, Mode::Detailed];

    /// Number of bullet points requested from the model.
    #[must_use]
    pub fn bullet_count(self) -> usize {
        match self {
            Mode::Short => 3,
            Mode::Standard => 5,
            Mode::Detailed => 8,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Short => "short",
            Mode::Standard => "standard",
            Mode::Detailed => "detailed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Mode> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "short" => Some(Mode::Short),
            "standard" => Some(Mode::Standard),
            "detailed" => Some(Mode::Detailed),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried by an inline-keyboard button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    SummarizeNow,
    Clear,
    SetMode(Mode),
}

impl ButtonAction {
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            ButtonAction::SummarizeNow => "summarize".to_string(),
            ButtonAction::Clear => "clear".to_string(),
            ButtonAction::SetMode(mode) => format!("mode:{mode}"),
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<ButtonAction> {
        match token {
            "summarize" => Some(ButtonAction::SummarizeNow),
            "clear" => Some(ButtonAction::Clear),
            other => other
                .strip_prefix("mode:")
                .and_then(Mode::parse)
                .map(ButtonAction::SetMode),
        }
    }
}

/// An inbound webhook event, decoded once at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    TextMessage {
        user_id: UserId,
        chat_id: ChatId,
        text: String,
    },
    CallbackAction {
        user_id: UserId,
        chat_id: ChatId,
        message_id: i64,
        callback_id: String,
        /// Raw button token; unknown tokens are acknowledged and ignored.
        action: String,
    },
    /// A button press without an attached chat message or data (inline-mode
    /// results, games). Only needs answering.
    BareCallback {
        user_id: UserId,
        callback_id: String,
    },
}

impl InboundEvent {
    #[must_use]
    pub fn user_id(&self) -> UserId {
        match self {
            InboundEvent::TextMessage { user_id, .. }
            | InboundEvent::CallbackAction { user_id, .. }
            | InboundEvent::BareCallback { user_id, .. } => *user_id,
        }
    }

    #[must_use]
    pub fn chat_id(&self) -> Option<ChatId> {
        match self {
            InboundEvent::TextMessage { chat_id, .. }
            | InboundEvent::CallbackAction { chat_id, .. } => Some(*chat_id),
            InboundEvent::BareCallback { .. } => None,
        }
    }
}
