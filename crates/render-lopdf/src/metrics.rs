//! Static glyph-width tables for the two standard fonts the quote uses.
//!
//! Widths come from the Adobe AFM files for Helvetica and Helvetica-Bold, in
//! 1/1000 em. Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.
//! Anything outside that range is measured with the width of a digit, which is
//! close enough for Latin-1 accented letters.

use quotedoc_render_core::FontWeight;

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn table(font: FontWeight) -> &'static [u16; 95] {
    match font {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    }
}

/// Width of `text` in points when set in `font` at `size`.
pub fn text_width(font: FontWeight, size: f32, text: &str) -> f32 {
    let widths = table(font);
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                widths[code - 32] as u32
            } else {
                FALLBACK_WIDTH as u32
            }
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap.
///
/// The first line may be narrower than the rest (it continues after a label).
/// A word wider than a whole line gets a line of its own. Explicit newlines
/// always break.
pub fn wrap_text(
    font: FontWeight,
    size: f32,
    text: &str,
    first_line_width: f32,
    line_width: f32,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let space = text_width(font, size, " ");

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let limit = if lines.is_empty() {
                first_line_width
            } else {
                line_width
            };
            let word_width = text_width(font, size, word);

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= limit {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }
        lines.push(current);
    }

    // A leading word that does not fit after the label moves to the next line.
    if let Some(first) = lines.first()
        && !first.is_empty()
        && text_width(font, size, first) > first_line_width
        && first_line_width < line_width
    {
        lines.insert(0, String::new());
    }

    lines
}
