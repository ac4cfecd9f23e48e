use regex::Regex;
use std::sync::LazyLock;

/// Longest accepted candidate URL, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

// Scheme-optional host-and-path pattern: dot-separated DNS labels, a 2-6
// character top-level label, an optional port and an optional
// path/query/fragment. Only http(s) schemes pass.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,6}(?::\d{1,5})?(?:[/?#][^\s]*)?$",
    )
    .expect("url pattern is a valid regex")
});

/// Advisory syntax check for a candidate URL.
///
/// Accepts schemeless (`example.com/x`) and `http(s)://`-prefixed forms.
/// Rejects empty or over-long input, anything outside printable ASCII
/// (control characters, DEL and all non-ASCII input) and schemes other than
/// http/https. This does not verify reachability.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.len() > MAX_URL_LENGTH {
        return false;
    }

    if !candidate.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return false;
    }

    URL_PATTERN.is_match(candidate)
}
