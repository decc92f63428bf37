//! Decoding of Telegram webhook `Update` payloads into [`InboundEvent`]s.

use serde::Deserialize;

use crate::core::models::{ChatId, InboundEvent, UserId};
use crate::errors::BotError;

#[derive(Debug, Deserialize)]
struct Update {
    message: Option<Message>,
    callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct Message {
    message_id: i64,
    from: Option<User>,
    chat: Chat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    id: String,
    from: User,
    message: Option<Message>,
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
    #[serde(default)]
    is_bot: bool,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

/// Decode a webhook body.
///
/// Returns `Ok(None)` for well-formed updates the bot does not act on
/// (edits, media without text, messages from bots).
///
/// # Errors
///
/// Returns `BotError::ParseError` if the body is not a Telegram update.
pub fn decode_update(body: &str) -> Result<Option<InboundEvent>, BotError> {
    let update: Update = serde_json::from_str(body)
        .map_err(|e| BotError::ParseError(format!("Invalid update JSON: {e}")))?;

    if let Some(callback) = update.callback_query {
        let (Some(message), Some(data)) = (callback.message, callback.data) else {
            return Ok(Some(InboundEvent::BareCallback {
                user_id: UserId(callback.from.id),
                callback_id: callback.id,
            }));
        };
        return Ok(Some(InboundEvent::CallbackAction {
            user_id: UserId(callback.from.id),
            chat_id: ChatId(message.chat.id),
            message_id: message.message_id,
            callback_id: callback.id,
            action: data,
        }));
    }

    let Some(message) = update.message else {
        return Ok(None);
    };
    let Some(from) = message.from.filter(|u| !u.is_bot) else {
        return Ok(None);
    };
    let Some(text) = message.text.filter(|t| !t.trim().is_empty()) else {
        return Ok(None);
    };

    Ok(Some(InboundEvent::TextMessage {
        user_id: UserId(from.id),
        chat_id: ChatId(message.chat.id),
        text,
    }))
}

/// Case-insensitive header lookup on an API Gateway `headers` object.
#[must_use]
pub fn get_header_value<'a>(headers: &'a serde_json::Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}
