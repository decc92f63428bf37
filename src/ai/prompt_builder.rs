//! Prompt templates for single-pass, per-chunk and reduce summarization.

use crate::core::models::Mode;

/// Fixed instruction used for each chunk in the map pass.
pub const PARTIAL_SUMMARY_DIRECTIVE: &str = "Summarize in 3 concise lines.";

/// Remove control characters that could break the prompt layout.
/// Newlines and tabs survive since they carry message structure.
#[must_use]
pub fn sanitize_content(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}

/// Terse prompt for one chunk of a long input.
#[must_use]
pub fn build_partial_prompt(text: &str) -> String {
    format!(
        "{PARTIAL_SUMMARY_DIRECTIVE}\n\nTEXT:\n{}",
        sanitize_content(text)
    )
}

/// Rich prompt honouring the user's `mode`, used for a whole text or for the
/// concatenated partial summaries.
#[must_use]
pub fn build_final_prompt(text: &str, mode: Mode) -> String {
    let bullets = mode.bullet_count();
    format!(
        "Summarize the text below in exactly {bullets} bullet points, \
         followed by one sentence starting with \"Key takeaway:\".\n\
         ─────────────── RULES ───────────────\n\
         1. No opinions.\n\
         2. No fluff or filler phrases.\n\
         3. Preserve facts, numbers and names exactly as written.\n\
         4. Write in the language of the text.\n\n\
         TEXT:\n{}",
        sanitize_content(text)
    )
}
