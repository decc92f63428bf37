use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static RAW_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^https?://[^\s<>"']+$"#).expect("static regex compile"));

/// If the whole message is a single http(s) link, return it normalized.
///
/// Messages that merely contain a link among other words are treated as
/// plain text and summarized as-is.
#[must_use]
pub fn as_single_link(text: &str) -> Option<String> {
    let candidate = trim_trailing_punctuation(text.trim());
    let candidate = candidate.trim_matches(|c: char| matches!(c, '<' | '>'));
    if !RAW_URL_RE.is_match(candidate) {
        return None;
    }
    normalize_link(candidate)
}

#[must_use]
pub fn looks_like_url(text: &str) -> bool {
    as_single_link(text).is_some()
}

#[must_use]
fn normalize_link(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    if !host.contains('.') && host != "localhost" {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

#[must_use]
fn trim_trailing_punctuation(s: &str) -> &str {
    s.trim_end_matches(&['.', ',', ';', ':', '!', '?', ')', ']', '}'][..])
}
