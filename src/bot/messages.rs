//! User-facing reply texts.

use crate::core::models::Mode;

/// Canonical failure message shown to users when summarization fails.
pub const CANONICAL_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't generate a summary at this time. Please try again later.";

pub const EXTRACTION_FAILED: &str =
    "Sorry, I couldn't extract readable text from that link. Try pasting the text instead.";

pub const NOTHING_TO_SUMMARIZE: &str =
    "Nothing to summarize yet. Send /collect, then type or forward the messages you want summarized.";

pub const COLLECT_STARTED: &str =
    "📥 Collecting. Send or forward messages, then press Summarize now or send /summarize.";

pub const SESSION_CLEARED: &str = "🗑 Session cleared.";

pub const UNKNOWN_COMMAND: &str = "Unknown command. Send /help to see what I can do.";

pub const HELP: &str = "Send me any text or a link and I'll summarize it.\n\n\
/collect - start buffering several messages\n\
/summarize - summarize the buffered messages\n\
/clear - drop the buffer\n\
/short, /standard, /detailed - choose summary length\n\
/mode - show the current length\n\
/usage - requests left today";

#[must_use]
pub fn quota_exceeded(limit: u32) -> String {
    format!("You've used all {limit} summaries for today. Please try again later.")
}

#[must_use]
pub fn mode_set(mode: Mode) -> String {
    format!(
        "Summary length set to {mode} ({} bullet points).",
        mode.bullet_count()
    )
}

#[must_use]
pub fn current_mode(mode: Mode) -> String {
    format!("Current summary length: {mode}. Pick another:")
}

#[must_use]
pub fn buffered(count: usize) -> String {
    if count == 1 {
        "Added. 1 message buffered.".to_string()
    } else {
        format!("Added. {count} messages buffered.")
    }
}

#[must_use]
pub fn usage(remaining: u32, limit: u32) -> String {
    format!("{remaining} of {limit} summaries left in the current window.")
}
