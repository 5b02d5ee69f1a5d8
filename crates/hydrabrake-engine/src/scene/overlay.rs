//! Text overlay: component labels, key instructions, and the Pascal's Law
//! statement. Drawn last, at the root transform.

use super::palette;
use super::CANVAS_WIDTH;
use crate::render::draw::{Canvas, Color};
use crate::render::text::TextRenderer;

/// Glyph pixel size for labels and the statement.
pub const LABEL_SCALE: f32 = 2.0;

/// Glyph pixel size for key instructions.
pub const INSTRUCTION_SCALE: f32 = 3.0;

pub const PRINCIPLE: &str =
    "Pascal's Law: Pressure applied to a confined fluid is transmitted equally in all directions.";

/// Static component labels `(text, x, y)`.
const LABELS: [(&str, f32, f32); 9] = [
    ("Pedal", 70.0, 510.0),
    ("Master Cylinder", 120.0, 505.0),
    ("Brake Fluid", 255.0, 320.0),
    ("Slave Cylinder", 110.0, 215.0),
    ("Slave Cylinder", 250.0, 215.0),
    ("Brake Pad", 80.0, 235.0),
    ("Brake Pad", 320.0, 235.0),
    ("Disc", 130.0, 160.0),
    ("Disc", 270.0, 160.0),
];

const INSTRUCTIONS: [(&str, f32, Color); 3] = [
    ("Press F to Apply Brake", 20.0, palette::HINT_ENGAGE),
    ("Press R to Release Brake", 55.0, palette::HINT_RELEASE),
    ("Press ESC to Exit", 90.0, palette::HINT_EXIT),
];

/// Top of the last statement line.
const PRINCIPLE_Y: f32 = 570.0;
const PRINCIPLE_MARGIN: f32 = 20.0;
const LINE_SPACING: f32 = 4.0;

/// Greedy word wrap so no line is wider than `max_width` at `scale`.
///
/// A single word wider than `max_width` gets a line of its own.
pub fn wrap<'a>(text: &'a str, max_width: f32, scale: f32, glyphs: &TextRenderer) -> Vec<&'a str> {
    let mut lines = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;

    let words = text
        .split(' ')
        .scan(0, |offset, word| {
            let index = *offset;
            *offset += word.len() + 1;
            Some((index, word))
        })
        .filter(|(_, word)| !word.is_empty());

    for (index, word) in words {
        let word_end = index + word.len();
        match start {
            None => start = Some(index),
            Some(line_start) => {
                if glyphs.text_width(&text[line_start..word_end], scale) > max_width {
                    lines.push(&text[line_start..end]);
                    start = Some(index);
                }
            }
        }
        end = word_end;
    }
    if let Some(line_start) = start {
        lines.push(&text[line_start..end]);
    }
    lines
}

pub fn draw(canvas: &mut Canvas, car_offset: f32) {
    for (text, x, y) in LABELS {
        canvas.text(x, y, text, LABEL_SCALE, palette::LABEL);
    }
    canvas.text(200.0 + car_offset, 110.0, "Car", LABEL_SCALE, palette::LABEL);

    for (text, y, color) in INSTRUCTIONS {
        canvas.text(20.0, y, text, INSTRUCTION_SCALE, color);
    }

    let glyphs = TextRenderer::new();
    let lines = wrap(
        PRINCIPLE,
        CANVAS_WIDTH - 2.0 * PRINCIPLE_MARGIN,
        LABEL_SCALE,
        &glyphs,
    );
    let line_height = glyphs.text_height(LABEL_SCALE) + LINE_SPACING;
    let first_y = PRINCIPLE_Y - line_height * lines.len().saturating_sub(1) as f32;
    for (row, line) in lines.into_iter().enumerate() {
        let x = (CANVAS_WIDTH - glyphs.text_width(line, LABEL_SCALE)) / 2.0;
        canvas.text(
            x,
            first_y + line_height * row as f32,
            line,
            LABEL_SCALE,
            palette::PRINCIPLE,
        );
    }
}
