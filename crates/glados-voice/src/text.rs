//! Text preparation for speech: reasoning removal and clause segmentation.

/// Characters that end a spoken clause.
pub const TERMINATORS: [char; 4] = ['.', '!', '?', ';'];

/// Segments shorter than this (in characters) are not worth synthesizing.
pub const MIN_SEGMENT_CHARS: usize = 3;

/// Prepare a reply for synthesis: drop reasoning blocks, then segment.
#[must_use]
pub fn prepare_for_speech(text: &str) -> Vec<String> {
    split_segments(&strip_reasoning(text))
}

/// Remove `<think>…</think>` and `<reasoning>…</reasoning>` blocks.
///
/// Reasoning models emit these before their answer; they must never be
/// spoken. Matching is case-insensitive. An opening tag without a close is
/// left in place.
#[must_use]
pub fn strip_reasoning(text: &str) -> String {
    let text = strip_tag_block_pair(text, "<think", "</think>");
    strip_tag_block_pair(&text, "<reasoning", "</reasoning>")
}

fn strip_tag_block_pair(text: &str, open_prefix: &str, close_tag: &str) -> String {
    let mut result = String::with_capacity(text.len());
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let haystack = text.to_ascii_lowercase();

    let mut cursor = 0;
    while cursor < text.len() {
        let Some(open_start) = haystack[cursor..].find(open_prefix) else {
            result.push_str(&text[cursor..]);
            break;
        };
        let abs_open = cursor + open_start;

        let block_end = haystack[abs_open..].find('>').and_then(|tag_end_offset| {
            let tag_end = abs_open + tag_end_offset + 1;
            haystack[tag_end..]
                .find(close_tag)
                .map(|close_offset| tag_end + close_offset + close_tag.len())
        });

        match block_end {
            Some(end) => {
                result.push_str(&text[cursor..abs_open]);
                cursor = end;
            }
            None => {
                result.push_str(&text[cursor..abs_open + open_prefix.len()]);
                cursor = abs_open + open_prefix.len();
            }
        }
    }

    result
}

/// Split text into clauses suitable for one synthesis call each.
///
/// A clause is a maximal run of non-terminator characters plus at most one
/// following terminator. A terminator with no text before it is skipped.
/// Clauses are trimmed; those shorter than [`MIN_SEGMENT_CHARS`] are
/// dropped.
#[must_use]
pub fn split_segments(text: &str) -> Vec<String> {
    let mut raw = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if TERMINATORS.contains(&ch) {
            if !current.is_empty() {
                current.push(ch);
                raw.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        raw.push(current);
    }

    raw.iter()
        .map(|segment| segment.trim())
        .filter(|segment| segment.chars().count() >= MIN_SEGMENT_CHARS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminators() {
        assert_eq!(
            split_segments("Hello, world! How are you?"),
            vec!["Hello, world!", "How are you?"]
        );
    }

    #[test]
    fn keeps_three_character_segments() {
        assert_eq!(split_segments("Ok. Hi."), vec!["Ok.", "Hi."]);
    }

    #[test]
    fn drops_short_fragments() {
        assert_eq!(split_segments("A. B. Long enough."), vec!["Long enough."]);
        assert!(split_segments("a").is_empty());
    }

    #[test]
    fn trailing_text_without_terminator_is_kept() {
        assert_eq!(
            split_segments("Science; it never stops"),
            vec!["Science;", "it never stops"]
        );
    }

    #[test]
    fn leading_and_repeated_terminators_are_skipped() {
        assert_eq!(split_segments("...Wait... what?!"), vec!["Wait.", "what?"]);
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(split_segments("   \n ").is_empty());
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(split_segments("ÄÖ."), vec!["ÄÖ."]);
        assert!(split_segments("é.").is_empty());
    }

    #[test]
    fn strips_think_blocks() {
        assert_eq!(
            strip_reasoning("<think>the user wants cake</think>The cake is a lie."),
            "The cake is a lie."
        );
        assert_eq!(
            strip_reasoning("A <THINK>x</THINK>B <reasoning>y</reasoning>C"),
            "A B C"
        );
    }

    #[test]
    fn unclosed_think_is_left_alone() {
        assert_eq!(strip_reasoning("<think>still going"), "<think>still going");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(strip_reasoning("Hello there."), "Hello there.");
    }

    #[test]
    fn prepare_skips_reasoning() {
        assert_eq!(
            prepare_for_speech("<think>Plan. Steps.</think>Goodbye. Forever."),
            vec!["Goodbye.", "Forever."]
        );
    }
}
