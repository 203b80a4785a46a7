use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Centralized registry for redaction regex patterns.
///
/// All patterns are vetted literals that compile successfully.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Compact JWT pattern: three base64url segments separated by dots
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
        });
        &JWT_REGEX
    }

    /// Base64-like token pattern: matches base64 or base64url runs (≥16 chars)
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }
}

/// Redacts credentials from a string.
///
/// Whole JWTs go first so their segments are not redacted piecemeal, then
/// any remaining opaque base64-like run of 16+ characters.
pub fn redact(input: &str) -> String {
    let jwt_redacted = PiiRegexRegistry::jwt().replace_all(input, "[REDACTED_TOKEN]");

    PiiRegexRegistry::base64_token()
        .replace_all(&jwt_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// Shows only the first character of a username followed by asterisks.
pub fn redact_username(username: &str) -> String {
    match username.chars().next() {
        Some(first) => format!("{first}***"),
        None => String::new(),
    }
}

/// A wrapper that redacts tokens when displayed.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

/// A wrapper that masks a username when displayed.
pub struct RedactedUsername<'a>(pub &'a str);

impl fmt::Display for RedactedUsername<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact_username(self.0))
    }
}
