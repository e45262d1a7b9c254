//! Log Redaction
//!
//! Scrubs bot tokens, bearer credentials and phone numbers from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

/// Discord bot tokens: base64 user id, timestamp, HMAC separated by dots.
static BOT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[MNO][A-Za-z\d_-]{23,27}\.[A-Za-z\d_-]{6}\.[A-Za-z\d_-]{27,}").unwrap());
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:Bearer|Bot)\s+[A-Za-z0-9\-\._~+/]{20,}=*").unwrap());
static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BOT_TOKEN_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = BEARER_RE.replace_all(&redacted, "[REDACTED_TOKEN]");
    TELEPHONE_RE.replace_all(&redacted, "[REDACTED_PHONE]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_token_is_removed() {
        let token = "MTA4NzY1NDMyMTA5ODc2NTQzMg.GhAbCd.abcdefghijklmnopqrstuvwxyz0123456";
        let clean = redact_sensitive_data(&format!("login failed for {token}"));
        assert_eq!(clean, "login failed for [REDACTED_TOKEN]");
    }

    #[test]
    fn authorization_headers_are_removed() {
        let clean = redact_sensitive_data(
            "Authorization: Bot abc.def-ghi.jkl-mno.pqrs and Bearer eyJhbGciOiJIUzI1NiJ9xyz==",
        );
        assert!(!clean.contains("abc.def-ghi"));
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiJ9"));
    }

    #[test]
    fn the_word_bot_alone_is_kept() {
        assert_eq!(redact_sensitive_data("Bot is down again"), "Bot is down again");
    }

    #[test]
    fn phone_numbers_are_removed() {
        let clean = redact_sensitive_data("call me at +1-555-123-4567");
        assert_eq!(clean, "call me at [REDACTED_PHONE]");
    }

    #[test]
    fn ordinary_text_is_untouched() {
        assert_eq!(redact_sensitive_data("b.echo \"hello world\""), "b.echo \"hello world\"");
    }
}
