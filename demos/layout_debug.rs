//! Prints layout coordinates using fixed fake metrics, no fonts needed.
//!
//! Useful for eyeballing wrapping and centering decisions: every regular
//! character is 10px wide and every space 5px.

use std::sync::Arc;

use tanzaku::generate::layout_segments;
use tanzaku::typography::LayoutConfig;
use tanzaku::{UniformWidths, WidthTable};

fn main() {
    let widths = WidthTable::build(Arc::new(UniformWidths::new(10.0, 5.0)));
    let config = LayoutConfig::default();

    let text = "Words are, of course, the most **powerful drug** used by mankind. \
                --- Short second segment with **bold** flair";

    let anchor = config.anchor();
    println!(
        "canvas {}x{}  anchor ({}, {})  max_width {}  line_height {}",
        config.canvas_width,
        config.canvas_height,
        anchor.x,
        anchor.y,
        config.max_width(),
        config.line_height()
    );

    for (index, layout) in layout_segments(text, &config, &widths).iter().enumerate() {
        println!(
            "segment {}: {} line(s), block height {}",
            index + 1,
            layout.lines.len(),
            layout.block_height
        );
        for positioned in &layout.lines {
            let words: Vec<String> = positioned
                .line
                .tokens
                .iter()
                .map(|token| {
                    if token.bold {
                        format!("[{}]", token.text)
                    } else {
                        token.text.clone()
                    }
                })
                .collect();
            println!(
                "  y={:7.2}  x={:7.2}  width={:7.2}  | {}",
                positioned.origin.y,
                positioned.origin.x,
                positioned.line.width,
                words.join(" ")
            );
        }
    }
}
