//! Reply text policies.

/// Reply used when every inference attempt has failed.
pub const FALLBACK_REPLY: &str = "I'm experiencing technical difficulties. Please try again.";

/// Collapse every run of whitespace into a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a finished reply for display.
///
/// Whitespace is collapsed and a period is appended unless the text already
/// ends with one. Case is left untouched. Empty input stays empty.
#[must_use]
pub fn normalize_reply(text: &str) -> String {
    let mut out = collapse_whitespace(text);
    if !out.is_empty() && !out.ends_with('.') {
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(collapse_whitespace("  a\n\n b\t c  "), "a b c");
    }

    #[test]
    fn appends_period_once() {
        assert_eq!(normalize_reply("Hello there"), "Hello there.");
        assert_eq!(normalize_reply("Hello there."), "Hello there.");
    }

    #[test]
    fn other_terminators_still_get_period() {
        assert_eq!(normalize_reply("Really?"), "Really?.");
    }

    #[test]
    fn preserves_case() {
        assert_eq!(normalize_reply("GLaDOS Online"), "GLaDOS Online.");
    }

    #[test]
    fn fallback_is_already_normalized() {
        assert_eq!(normalize_reply(FALLBACK_REPLY), FALLBACK_REPLY);
    }

    #[test]
    fn whitespace_only_stays_empty() {
        assert_eq!(normalize_reply(" \n "), "");
    }
}
