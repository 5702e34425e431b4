//! Platform/track code inference from free-text quay names.

use std::sync::LazyLock;

use regex::Regex;

/// "Spor 2", "Platform B", "Bay 12" and friends.
static KEYWORD_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:spor|track|platform|plattform|stop|stopp|bay)\s*((?-i:[A-Za-z0-9])+)")
        .expect("keyword pattern is valid")
});

/// A standalone token like "4", "12" or "A12". Word boundaries are ASCII
/// only, so "Ø1" still yields "1".
static BARE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)([A-Za-z]?[0-9]{1,3})(?-u:\b)").expect("bare pattern is valid")
});

/// Infer a short platform/track code from a quay name.
///
/// Used when the provider doesn't supply a public code for the quay.
/// Returns an empty string when nothing code-like is found.
///
/// # Examples
///
/// ```
/// use departure_server::domain::extract_quay_code;
///
/// assert_eq!(extract_quay_code("Platform 4"), "4");
/// assert_eq!(extract_quay_code("Spor B"), "B");
/// assert_eq!(extract_quay_code("A12"), "A12");
/// assert_eq!(extract_quay_code(""), "");
/// ```
pub fn extract_quay_code(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    KEYWORD_CODE
        .captures(name)
        .or_else(|| BARE_CODE.captures(name))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
