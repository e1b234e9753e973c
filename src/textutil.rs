//! Small text helpers shared across modes.

/// Escape a prompt for embedding inside a double-quoted instruction string.
///
/// Backslashes are doubled before quotes are escaped so the output never
/// re-escapes its own escapes.
pub fn escape_prompt(prompt: &str) -> String {
    prompt.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes() {
        assert_eq!(escape_prompt(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn escapes_backslashes_before_quotes() {
        assert_eq!(escape_prompt(r#"path\to\"x""#), r#"path\\to\\\"x\""#);
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_prompt("how do I update my system?"), "how do I update my system?");
    }
}
