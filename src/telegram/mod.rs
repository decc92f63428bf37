//! All Telegram-specific functionality

pub mod client;
pub mod keyboards;
pub mod parsing;

// Re-export main types for convenience
pub use client::{MESSAGE_TEXT_LIMIT, Messenger, TelegramClient, split_message};
pub use keyboards::{InlineButton, InlineKeyboard, collecting_keyboard, mode_keyboard};
pub use parsing::decode_update;
