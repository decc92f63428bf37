//! Inline keyboard builders.
//!
//! Buttons carry a [`ButtonAction`] token as `callback_data`, which comes back
//! to the webhook as a callback query when pressed.

use serde_json::{Value, json};

use crate::core::models::{ButtonAction, Mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    /// Render as a Bot API `reply_markup` object.
    #[must_use]
    pub fn to_reply_markup(&self) -> Value {
        let rows: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                Value::Array(
                    row.iter()
                        .map(|b| json!({ "text": b.text, "callback_data": b.action.token() }))
                        .collect(),
                )
            })
            .collect();
        json!({ "inline_keyboard": rows })
    }
}

/// Shown under each acknowledgement while collecting.
#[must_use]
pub fn collecting_keyboard() -> InlineKeyboard {
    InlineKeyboard {
        rows: vec![vec![
            InlineButton {
                text: "✅ Summarize now".to_string(),
                action: ButtonAction::SummarizeNow,
            },
            InlineButton {
                text: "🗑 Clear".to_string(),
                action: ButtonAction::Clear,
            },
        ]],
    }
}

/// One button per mode; the active one is marked.
#[must_use]
pub fn mode_keyboard(current: Mode) -> InlineKeyboard {
    let row = Mode::ALL
        .iter()
        .map(|&mode| {
            let label = match mode {
                Mode::Short => "Short",
                Mode::Standard => "Standard",
                Mode::Detailed => "Detailed",
            };
            InlineButton {
                text: if mode == current {
                    format!("• {label} •")
                } else {
                    label.to_string()
                },
                action: ButtonAction::SetMode(mode),
            }
        })
        .collect();
    InlineKeyboard { rows: vec![row] }
}
