//! Greedy line wrapping.
//!
//! Tokens flow into the current line while the remaining pixel budget holds
//! them; a token that does not fit flushes the line and starts the next one.
//! After each placed token one inter-word space is reserved out of the
//! budget when there is still room for it, so the measured line width stays
//! within the limit for any realistic width table.

use crate::glyph_width::WidthTable;
use crate::text::token::Token;

/// One wrapped line plus its measured pixel width.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub tokens: Vec<Token>,
    pub width: f32,
}

impl Line {
    /// Measures `tokens` through `widths` and wraps them into a line.
    pub fn new(tokens: Vec<Token>, widths: &WidthTable) -> Self {
        let width = widths.line_width(&tokens);
        Self { tokens, width }
    }
}

/// Distributes `tokens` over as few lines as the `max_width` budget allows.
///
/// A token wider than `max_width` still gets placed: it occupies a line of
/// its own and that line overflows the budget. Token order is preserved and
/// the result is fully determined by the inputs.
pub fn wrap(tokens: Vec<Token>, max_width: f32, widths: &WidthTable) -> Vec<Line> {
    let space_width = widths.space_width();
    let mut lines = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut remaining = max_width;

    for token in tokens {
        let token_width = widths.token_width(&token);

        if token_width <= remaining {
            current.push(token);
            remaining -= token_width;
        } else {
            if !current.is_empty() {
                lines.push(Line::new(std::mem::take(&mut current), widths));
            }
            current.push(token);
            remaining = max_width - token_width;
        }

        // Reserve the separator in front of the next token while it fits.
        if remaining >= space_width {
            remaining -= space_width;
        }
    }

    if !current.is_empty() {
        lines.push(Line::new(current, widths));
    }

    lines
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::glyph_width::UniformWidths;
    use crate::text::token::tokenize;

    fn table(char_width: f32, space_width: f32) -> WidthTable {
        WidthTable::build(Arc::new(UniformWidths::new(char_width, space_width)))
    }

    fn words(line: &Line) -> Vec<&str> {
        line.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn short_input_stays_on_one_line() {
        let widths = table(10.0, 5.0);
        let lines = wrap(tokenize("Hello World"), 300.0, &widths);

        assert_eq!(lines.len(), 1);
        assert_eq!(words(&lines[0]), vec!["Hello", "World"]);
        // 50 + 5 + 50
        assert_eq!(lines[0].width, 105.0);
    }

    #[test]
    fn budget_exhaustion_starts_a_new_line() {
        let widths = table(10.0, 5.0);
        // Six 5-char words at 50px each; five fit into 300px, one spills.
        let lines = wrap(
            tokenize("alpha bravo cedar delta eagle fawns"),
            300.0,
            &widths,
        );

        assert_eq!(lines.len(), 2);
        assert_eq!(
            words(&lines[0]),
            vec!["alpha", "bravo", "cedar", "delta", "eagle"]
        );
        assert_eq!(words(&lines[1]), vec!["fawns"]);
        // 5 * 50 + 4 * 5
        assert_eq!(lines[0].width, 270.0);
        assert!(lines[0].width <= 300.0);
    }

    #[test]
    fn space_is_reserved_after_every_placed_token() {
        let widths = table(10.0, 5.0);
        // 60px fits exactly, but the reserved separator leaves only 35px,
        // so the 40px token wraps; the same reservation on the fresh line
        // then bumps the final 60px token onto a third line.
        let lines = wrap(tokenize("abcdef wxyz abcdef"), 100.0, &widths);

        assert_eq!(lines.len(), 3);
        assert_eq!(words(&lines[0]), vec!["abcdef"]);
        assert_eq!(words(&lines[1]), vec!["wxyz"]);
        assert_eq!(words(&lines[2]), vec!["abcdef"]);
    }

    #[test]
    fn overlong_token_gets_its_own_line() {
        let widths = table(10.0, 5.0);
        let lines = wrap(tokenize("hi incomprehensibilities yo"), 100.0, &widths);

        assert_eq!(lines.len(), 3);
        assert_eq!(words(&lines[0]), vec!["hi"]);
        assert_eq!(words(&lines[1]), vec!["incomprehensibilities"]);
        assert!(lines[1].width > 100.0);
        assert_eq!(words(&lines[2]), vec!["yo"]);
    }

    #[test]
    fn wrapped_lines_respect_the_width_limit() {
        let widths = table(10.0, 5.0);
        let text = "one two three four five six seven eight nine ten \
                    eleven twelve thirteen fourteen fifteen sixteen";
        let lines = wrap(tokenize(text), 180.0, &widths);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 180.0, "line {:?} overflows", words(line));
        }
    }

    #[test]
    fn token_order_and_styles_survive_wrapping() {
        let widths = table(10.0, 5.0);
        let tokens = tokenize("plain **bold words** plain again");
        let flags: Vec<bool> = tokens.iter().map(|t| t.bold).collect();

        let lines = wrap(tokens, 120.0, &widths);
        let rewrapped: Vec<bool> = lines
            .iter()
            .flat_map(|line| line.tokens.iter().map(|t| t.bold))
            .collect();

        assert_eq!(rewrapped, flags);
    }

    #[test]
    fn wrapping_is_deterministic() {
        let widths = table(10.0, 5.0);
        let text = "a deterministic layout makes image output reproducible";

        let first = wrap(tokenize(text), 150.0, &widths);
        let second = wrap(tokenize(text), 150.0, &widths);

        assert_eq!(first, second);
    }
}
