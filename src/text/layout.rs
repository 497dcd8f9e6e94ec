//! Line positioning.
//!
//! Turns wrapped lines into canvas coordinates: every line is centered
//! horizontally on its own, and the whole block is centered vertically
//! around the configured anchor point.

use euclid::default::Point2D;

use crate::text::wrap::Line;
use crate::typography::LayoutConfig;

/// A wrapped line with its canvas position.
///
/// `origin.x` is the left edge of the line and `origin.y` the vertical
/// middle of its text row. Renderers derive the baseline from the resolved
/// font metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedLine {
    pub line: Line,
    pub origin: Point2D<f32>,
}

/// Positioned lines plus the block geometry they were computed from.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    pub lines: Vec<PositionedLine>,
    pub line_height: f32,
    pub max_width: f32,
    pub block_height: f32,
}

/// Assigns canvas coordinates to `lines`.
///
/// Each line starts at `canvas_width / 2 - line.width / 2`. The rows are
/// spaced one line height apart and shifted so that the middle of the block
/// sits on the anchor: row `i` of `n` lands at
/// `anchor_y - (n - 1) * line_height / 2 + i * line_height`.
///
/// Callers are expected to pass at least one line; wrapping never produces
/// an empty result for a non-empty token stream.
pub fn position(lines: Vec<Line>, config: &LayoutConfig) -> LayoutResult {
    let anchor = config.anchor();
    let line_height = config.line_height();
    let line_count = lines.len();
    let first_y = anchor.y - line_count.saturating_sub(1) as f32 * line_height / 2.0;

    let positioned = lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let origin = Point2D::new(
                anchor.x - line.width / 2.0,
                first_y + index as f32 * line_height,
            );
            PositionedLine { line, origin }
        })
        .collect();

    LayoutResult {
        lines: positioned,
        line_height,
        max_width: config.max_width(),
        block_height: line_count as f32 * line_height,
    }
}
