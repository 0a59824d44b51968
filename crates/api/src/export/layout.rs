//! Plain-text layout helpers for the PDF renderer.
//!
//! Line capacity is estimated from an average glyph width rather than
//! measured per string.

/// Average DejaVu Sans glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.55;

/// Millimetres per typographic point.
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Estimate how many characters of `font_size_pt` text fit in `width_mm`.
///
/// Never returns less than 1.
pub fn chars_per_line(width_mm: f32, font_size_pt: f32) -> usize {
    let glyph_mm = font_size_pt * AVG_GLYPH_EM * MM_PER_PT;
    if glyph_mm <= 0.0 {
        return 1;
    }
    ((width_mm / glyph_mm).floor() as usize).max(1)
}

/// Line height in millimetres for a font size, with 1.2 leading.
pub fn line_height_mm(font_size_pt: f32) -> f32 {
    font_size_pt * 1.2 * MM_PER_PT
}

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Explicit newlines start a new line, blank input lines are kept as empty
/// lines, runs of whitespace collapse to one space, and words longer than a
/// line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Hard-split words that cannot fit on any line.
            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        lines.push(current);
    }

    lines
}
