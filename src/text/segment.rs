/// Literal separator between independent quote segments.
const SEPARATOR: &str = "---";

/// Splits raw input into independent quote segments.
///
/// Pieces are trimmed of surrounding whitespace and empty pieces are
/// discarded, so the result may be empty for input consisting only of
/// separators and whitespace. Ordering follows the input.
pub fn segment(text: &str) -> Vec<&str> {
    text.split(SEPARATOR)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
