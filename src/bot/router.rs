//! Routes decoded inbound events to session, quota and summarization logic.
//!
//! Every event resolves to exactly one [`Reply`], which is delivered through
//! the [`Messenger`] before `handle` returns. Delivery failures are logged and
//! never surface to the caller.
//!
//! Quota is charged only for actions that are about to call the model:
//! one-off text or link summaries and non-empty session flushes. Mode
//! changes, collection, buffering and clearing are free.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::commands::{Command, parse_command};
use super::messages;
use crate::ai::Summarizer;
use crate::core::models::{ButtonAction, ChatId, InboundEvent, Mode, UserId};
use crate::core::state::BotState;
use crate::telegram::{InlineKeyboard, Messenger, collecting_keyboard, mode_keyboard};
use crate::utils::extract::PageExtractor;
use crate::utils::links::as_single_link;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Send {
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboard>,
    },
    Edit {
        chat_id: ChatId,
        message_id: i64,
        text: String,
    },
    /// Acknowledged without a visible reply.
    Ack,
}

impl Reply {
    fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Reply::Send {
            chat_id,
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(chat_id: ChatId, text: impl Into<String>, keyboard: InlineKeyboard) -> Self {
        Reply::Send {
            chat_id,
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

pub struct CommandRouter {
    state: Arc<BotState>,
    summarizer: Summarizer,
    messenger: Arc<dyn Messenger>,
    extractor: Arc<dyn PageExtractor>,
}

impl CommandRouter {
    #[must_use]
    pub fn new(
        state: Arc<BotState>,
        summarizer: Summarizer,
        messenger: Arc<dyn Messenger>,
        extractor: Arc<dyn PageExtractor>,
    ) -> Self {
        Self {
            state,
            summarizer,
            messenger,
            extractor,
        }
    }

    #[must_use]
    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Process one inbound event and deliver its reply.
    pub async fn handle(&self, event: InboundEvent) -> Reply {
        let reply = match event {
            InboundEvent::TextMessage {
                user_id,
                chat_id,
                text,
            } => self.on_text(user_id, chat_id, &text).await,
            InboundEvent::CallbackAction {
                user_id,
                chat_id,
                message_id,
                callback_id,
                action,
            } => {
                if let Err(e) = self.messenger.answer_callback(&callback_id).await {
                    warn!("Failed to answer callback {}: {}", callback_id, e);
                }
                self.on_action(user_id, chat_id, message_id, &action).await
            }
            InboundEvent::BareCallback {
                user_id,
                callback_id,
            } => {
                info!(user_id = %user_id, "Answering callback without message");
                if let Err(e) = self.messenger.answer_callback(&callback_id).await {
                    warn!("Failed to answer callback {}: {}", callback_id, e);
                }
                Reply::Ack
            }
        };

        self.deliver(&reply).await;
        reply
    }

    async fn on_text(&self, user_id: UserId, chat_id: ChatId, text: &str) -> Reply {
        if let Some(command) = parse_command(text) {
            return self.on_command(user_id, chat_id, command).await;
        }

        if let Some(count) = self.state.sessions.append(user_id, text) {
            info!(user_id = %user_id, count, "Buffered message");
            return Reply::with_keyboard(chat_id, messages::buffered(count), collecting_keyboard());
        }

        Reply::text(chat_id, self.summarize_one_off(user_id, text).await)
    }

    async fn on_command(&self, user_id: UserId, chat_id: ChatId, command: Command) -> Reply {
        info!(user_id = %user_id, ?command, "Command");
        match command {
            Command::Start | Command::Help => Reply::text(chat_id, messages::HELP),
            Command::SetMode(mode) => {
                self.state.sessions.set_mode(user_id, mode);
                Reply::text(chat_id, messages::mode_set(mode))
            }
            Command::ShowMode => {
                let mode = self.state.sessions.mode(user_id);
                Reply::with_keyboard(chat_id, messages::current_mode(mode), mode_keyboard(mode))
            }
            Command::Collect => {
                self.state.sessions.start_collecting(user_id);
                Reply::text(chat_id, messages::COLLECT_STARTED)
            }
            Command::Summarize => Reply::text(chat_id, self.flush_session(user_id).await),
            Command::Clear => {
                self.state.sessions.clear(user_id);
                Reply::text(chat_id, messages::SESSION_CLEARED)
            }
            Command::Usage => {
                let remaining = self.state.usage.remaining(user_id, Utc::now());
                Reply::text(chat_id, messages::usage(remaining, self.state.usage.limit()))
            }
            Command::Unknown(_) => Reply::text(chat_id, messages::UNKNOWN_COMMAND),
        }
    }

    async fn on_action(
        &self,
        user_id: UserId,
        chat_id: ChatId,
        message_id: i64,
        token: &str,
    ) -> Reply {
        let Some(action) = ButtonAction::from_token(token) else {
            warn!(user_id = %user_id, token, "Unknown callback action");
            return Reply::Ack;
        };

        info!(user_id = %user_id, ?action, "Callback action");
        match action {
            ButtonAction::SummarizeNow => Reply::text(chat_id, self.flush_session(user_id).await),
            ButtonAction::Clear => {
                self.state.sessions.clear(user_id);
                Reply::Edit {
                    chat_id,
                    message_id,
                    text: messages::SESSION_CLEARED.to_string(),
                }
            }
            ButtonAction::SetMode(mode) => {
                self.state.sessions.set_mode(user_id, mode);
                Reply::Edit {
                    chat_id,
                    message_id,
                    text: messages::mode_set(mode),
                }
            }
        }
    }

    /// Summarize and clear the user's buffered messages.
    ///
    /// The buffer is detached under the session lock, so appends that land
    /// after this point start a new buffer instead of being lost mid-summary.
    async fn flush_session(&self, user_id: UserId) -> String {
        if self.state.sessions.buffered(user_id) == 0 {
            return messages::NOTHING_TO_SUMMARIZE.to_string();
        }
        if !self.state.usage.allow(user_id, Utc::now()) {
            return messages::quota_exceeded(self.state.usage.limit());
        }
        let Some(batch) = self.state.sessions.take_batch(user_id) else {
            // A concurrent flush took the buffer after the check above.
            self.state.usage.refund(user_id);
            return messages::NOTHING_TO_SUMMARIZE.to_string();
        };

        info!(
            user_id = %user_id,
            messages = batch.messages.len(),
            mode = %batch.mode,
            "Flushing session"
        );
        self.summarize_or_apologize(&batch.joined(), batch.mode).await
    }

    async fn summarize_one_off(&self, user_id: UserId, text: &str) -> String {
        if !self.state.usage.allow(user_id, Utc::now()) {
            return messages::quota_exceeded(self.state.usage.limit());
        }
        let mode = self.state.sessions.mode(user_id);

        match as_single_link(text) {
            Some(url) => match self.extractor.extract(&url).await {
                Some(body) => self.summarize_or_apologize(&body, mode).await,
                None => messages::EXTRACTION_FAILED.to_string(),
            },
            None => self.summarize_or_apologize(text, mode).await,
        }
    }

    async fn summarize_or_apologize(&self, text: &str, mode: Mode) -> String {
        match self.summarizer.summarize(text, mode).await {
            Ok(summary) => summary,
            Err(e) => {
                error!("Failed to generate summary: {}", e);
                messages::CANONICAL_FAILURE_MESSAGE.to_string()
            }
        }
    }

    async fn deliver(&self, reply: &Reply) {
        let result = match reply {
            Reply::Send {
                chat_id,
                text,
                keyboard,
            } => {
                self.messenger
                    .send_message(*chat_id, text, keyboard.as_ref())
                    .await
            }
            Reply::Edit {
                chat_id,
                message_id,
                text,
            } => self.messenger.edit_message(*chat_id, *message_id, text).await,
            Reply::Ack => Ok(()),
        };

        if let Err(e) = result {
            error!("Failed to deliver reply: {}", e);
        }
    }
}
