//! Bold-span tokenizer.
//!
//! Splits one segment into whitespace-delimited words, tagging the words
//! inside `**...**` spans as bold. Spans are matched non-greedily and never
//! nest. An opening marker without a closing one is kept as literal text.

/// One renderable word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub bold: bool,
}

/// Scans `segment` for `**...**` spans and splits the pieces into [`Token`]s.
///
/// The scan is a two-state walk over the characters: outside a span the text
/// up to the next marker pair becomes regular tokens, inside it the text up
/// to the closing pair becomes bold tokens. Nothing is emitted for a span
/// until its closing marker is actually seen, so a trailing unmatched `**`
/// falls through to the final flush and survives as literal regular text.
pub fn tokenize(segment: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    // Byte offset of the first character not yet turned into tokens.
    let mut emitted = 0;
    // Byte offset of the last `**` that opened a span, if still unclosed.
    let mut open: Option<usize> = None;
    let mut prev_star = false;

    for (idx, ch) in segment.char_indices() {
        if ch != '*' {
            prev_star = false;
            continue;
        }
        if !prev_star {
            prev_star = true;
            continue;
        }
        prev_star = false;

        // Two consecutive stars: the marker spans marker_start..idx + 1.
        let marker_start = idx - 1;
        match open {
            None => open = Some(marker_start),
            Some(span_start) => {
                push_words(&mut tokens, &segment[emitted..span_start], false);
                push_words(&mut tokens, &segment[span_start + 2..marker_start], true);
                emitted = idx + 1;
                open = None;
            }
        }
    }

    // Everything after the last closed span, including any unmatched opening
    // marker, is literal regular text.
    push_words(&mut tokens, &segment[emitted..], false);
    tokens
}

fn push_words(tokens: &mut Vec<Token>, piece: &str, bold: bool) {
    tokens.extend(
        piece
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(|word| Token {
                text: word.to_string(),
                bold,
            }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, bold: bool) -> Token {
        Token {
            text: text.to_string(),
            bold,
        }
    }

    #[test]
    fn tags_span_words_as_bold() {
        let tokens = tokenize("Hello **World** bye");

        assert_eq!(
            tokens,
            vec![
                token("Hello", false),
                token("World", true),
                token("bye", false),
            ]
        );
    }

    #[test]
    fn plain_text_splits_into_regular_words() {
        let tokens = tokenize("never odd or even");

        assert_eq!(tokens.len(), 4);
        assert!(tokens.iter().all(|t| !t.bold));
    }

    #[test]
    fn span_boundaries_split_words() {
        let tokens = tokenize("ab**cd**ef");

        assert_eq!(
            tokens,
            vec![token("ab", false), token("cd", true), token("ef", false)]
        );
    }

    #[test]
    fn consecutive_spaces_produce_no_empty_tokens() {
        let tokens = tokenize("a  b   **c  d**");

        assert_eq!(
            tokens,
            vec![
                token("a", false),
                token("b", false),
                token("c", true),
                token("d", true),
            ]
        );
    }

    #[test]
    fn empty_span_dissolves() {
        assert!(tokenize("****").is_empty());
        assert!(tokenize("** **").is_empty());
    }

    #[test]
    fn unmatched_trailing_marker_is_literal() {
        let tokens = tokenize("hello **world");

        assert_eq!(tokens, vec![token("hello", false), token("**world", false)]);
    }

    #[test]
    fn unmatched_marker_keeps_surrounding_text_intact() {
        // The opener glues to the word before it when no space separates them.
        let tokens = tokenize("a** b");

        assert_eq!(tokens, vec![token("a**", false), token("b", false)]);
    }

    #[test]
    fn spans_are_matched_non_greedily() {
        let tokens = tokenize("**a** and **b**");

        assert_eq!(
            tokens,
            vec![token("a", true), token("and", false), token("b", true)]
        );
    }

    #[test]
    fn marker_only_chunks_stay_balanced() {
        // Five stars: one empty span plus one literal star.
        assert_eq!(tokenize("*****"), vec![token("*", false)]);
    }

    #[test]
    fn joined_tokens_reproduce_the_marker_free_text() {
        let input = "The **quick** brown  fox --runs-- **very fast**";
        let stripped = input.replace("**", "");
        let normalized: Vec<&str> = stripped.split_whitespace().collect();

        let joined: Vec<String> = tokenize(input).into_iter().map(|t| t.text).collect();
        assert_eq!(joined, normalized);
    }
}
