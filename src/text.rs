/// Line positioning around the canvas anchor.
pub mod layout;
/// Splits raw input into independent quote segments.
pub mod segment;
/// Word-level tokenization with `**bold**` span handling.
pub mod token;
/// Greedy width-budgeted line wrapping.
pub mod wrap;

pub use layout::{position, LayoutResult, PositionedLine};
pub use segment::segment;
pub use token::{tokenize, Token};
pub use wrap::{wrap, Line};
