/// Command detection: recognise prefixed messages and split them into tokens.
use crate::types::CommandInvocation;

/// Split `text` into tokens, keeping spans between `quote_delimiter` pairs whole.
///
/// Unquoted stretches are split on runs of whitespace; each quoted stretch
/// becomes exactly one token, taken verbatim (so `""` yields an empty token).
/// A trailing delimiter with no partner is tolerated: the text after it is
/// dropped rather than reported.
///
/// An empty delimiter disables quoting.
pub fn tokenize(text: &str, quote_delimiter: &str) -> Vec<String> {
    if quote_delimiter.is_empty() {
        return text.split_whitespace().map(str::to_owned).collect();
    }

    let segments: Vec<&str> = text.split(quote_delimiter).collect();
    // Segments alternate unquoted/quoted starting with unquoted, so an even
    // count means the last quote was never closed.
    let closed = if segments.len() % 2 == 0 {
        segments.len() - 1
    } else {
        segments.len()
    };

    let mut tokens = Vec::new();
    for (i, segment) in segments[..closed].iter().enumerate() {
        if i % 2 == 0 {
            tokens.extend(segment.split_whitespace().map(str::to_owned));
        } else {
            tokens.push((*segment).to_owned());
        }
    }
    tokens
}

/// Detect a command invocation in `text`.
///
/// Returns `None` if the text does not start with `prefix`. Otherwise the
/// first token, minus the prefix, is the command name and the remaining
/// tokens are its arguments.
pub fn detect_command(prefix: &str, quote_delimiter: &str, text: &str) -> Option<CommandInvocation> {
    if !text.starts_with(prefix) {
        return None;
    }

    let mut tokens = tokenize(text, quote_delimiter).into_iter();
    let name = tokens
        .next()
        .map(|first| strip_command_prefix(&first, prefix))
        .unwrap_or_default();

    Some(CommandInvocation { name, args: tokens.collect() })
}

/// Drop the prefix from the first token. When the prefix itself contains
/// whitespace the token no longer starts with it; fall back to skipping as
/// many characters as the prefix has.
fn strip_command_prefix(token: &str, prefix: &str) -> String {
    match token.strip_prefix(prefix) {
        Some(rest) => rest.to_string(),
        None => token.chars().skip(prefix.chars().count()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str, delim: &str) -> Vec<String> {
        tokenize(text, delim)
    }

    #[test]
    fn quoted_span_is_one_token() {
        assert_eq!(toks(r#"a b "c d" e"#, "\""), vec!["a", "b", "c d", "e"]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(toks("  a \t b\n c  ", "\""), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_span_is_verbatim() {
        assert_eq!(toks(r#"say "  padded  ""#, "\""), vec!["say", "  padded  "]);
        assert_eq!(toks(r#"x "" y"#, "\""), vec!["x", "", "y"]);
    }

    #[test]
    fn adjacent_quotes_are_separate_tokens() {
        assert_eq!(toks(r#""a""b""#, "\""), vec!["a", "b"]);
    }

    #[test]
    fn unmatched_quote_is_tolerated() {
        assert_eq!(toks(r#"a "b c"#, "\""), vec!["a"]);
        assert_eq!(toks(r#"a "b" c "d e"#, "\""), vec!["a", "b", "c"]);
        assert_eq!(toks(r#"""#, "\""), Vec::<String>::new());
    }

    #[test]
    fn multi_character_delimiter() {
        assert_eq!(toks("run ``a b`` now", "``"), vec!["run", "a b", "now"]);
    }

    #[test]
    fn empty_delimiter_disables_quoting() {
        assert_eq!(toks(r#"a "b c""#, ""), vec!["a", "\"b", "c\""]);
    }

    #[test]
    fn no_prefix_is_not_a_command() {
        assert_eq!(detect_command("b.", "\"", "hello b.echo"), None);
        assert_eq!(detect_command("b.", "\"", " b.echo"), None);
    }

    #[test]
    fn detects_name_and_args() {
        let inv = detect_command("b.", "\"", r#"b.echo hello "big world""#).unwrap();
        assert_eq!(inv.name, "echo");
        assert_eq!(inv.args, vec!["hello", "big world"]);
    }

    #[test]
    fn bare_prefix_has_empty_name() {
        let inv = detect_command("b.", "\"", "b. echo").unwrap();
        assert_eq!(inv.name, "");
        assert_eq!(inv.args, vec!["echo"]);
    }

    #[test]
    fn prefix_with_whitespace_skips_characters() {
        let inv = detect_command("hey bot ", "\"", "hey bot ping now").unwrap();
        // first token is "hey"; eight characters are skipped from it
        assert_eq!(inv.name, "");
        assert_eq!(inv.args, vec!["bot", "ping", "now"]);
    }

    #[test]
    fn quote_directly_after_name_starts_args() {
        let inv = detect_command("!", "\"", r#"!say"hi there""#).unwrap();
        assert_eq!(inv.name, "say");
        assert_eq!(inv.args, vec!["hi there"]);
    }
}
