//! Text rendering utilities

use crate::document::Color;
use crate::font::StandardFont;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text color (RGB)
    pub color: Color,
}

/// Calculate X offset for text alignment
///
/// # Arguments
/// * `text_width` - Width of text in points
/// * `container_width` - Available width for alignment
/// * `align` - Desired alignment
pub fn calculate_x_offset(text_width: f64, container_width: f64, align: Align) -> f64 {
    match align {
        Align::Left => 0.0,
        Align::Center => (container_width - text_width) / 2.0,
        Align::Right => container_width - text_width,
    }
}

/// Generate PDF operators for text insertion
///
/// Creates the text operators (BT, rg, Tf, Td, Tj, ET) for one run of text.
/// The position is the left end of the baseline in PDF coordinates.
///
/// # Arguments
/// * `literal` - Escaped literal string including parentheses, e.g. "(Total)"
/// * `x` - X coordinate in points (from left)
/// * `y` - Y coordinate in points (from bottom)
/// * `ctx` - Text rendering context
pub fn generate_text_operators(literal: &str, x: f64, y: f64, ctx: &TextRenderContext) -> Vec<u8> {
    let mut ops = String::new();

    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{x} {y} Td\n"));
    ops.push_str(&format!("{literal} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Split text into lines that fit `max_width` points
///
/// Explicit newlines always start a new line. Words are never split: a
/// single word wider than `max_width` occupies a line of its own.
///
/// # Arguments
/// * `font` - Font used for measuring
/// * `font_size` - Font size in points
/// * `text` - Text to split
/// * `max_width` - Maximum line width in points
pub fn wrap_text(font: StandardFont, font_size: f32, text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current_line = String::new();

        for word in paragraph.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
                continue;
            }

            let candidate = format!("{current_line} {word}");
            if font.text_width_points(&candidate, font_size) as f64 <= max_width {
                current_line = candidate;
            } else {
                lines.push(std::mem::replace(&mut current_line, word.to_string()));
            }
        }

        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Shorten text so it fits `max_width` points, marking the cut with "…"
///
/// Text that already fits is returned unchanged.
pub fn truncate_to_width(font: StandardFont, font_size: f32, text: &str, max_width: f64) -> String {
    if font.text_width_points(text, font_size) as f64 <= max_width {
        return text.to_string();
    }

    let ellipsis = font.text_width_points("…", font_size) as f64;
    let mut width = 0.0;
    let mut result = String::new();

    for c in text.chars() {
        let char_width = font.char_width(c) as f64 * font_size as f64 / 1000.0;
        if width + char_width + ellipsis > max_width {
            break;
        }
        width += char_width;
        result.push(c);
    }

    let mut result = result.trim_end().to_string();
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_to_width_fits() {
        assert_eq!(
            truncate_to_width(StandardFont::Helvetica, 10.0, "1,000", 90.0),
            "1,000"
        );
    }

    #[test]
    fn test_truncate_to_width_cuts() {
        let text = "Very long description that cannot fit";
        let cut = truncate_to_width(StandardFont::Helvetica, 10.0, text, 60.0);

        assert!(cut.ends_with('…'));
        assert!(cut.len() < text.len());
        assert!(StandardFont::Helvetica.text_width_points(&cut, 10.0) as f64 <= 60.0);
    }

    #[test]
    fn test_x_offset_left() {
        assert_eq!(calculate_x_offset(100.0, 500.0, Align::Left), 0.0);
    }

    #[test]
    fn test_x_offset_center() {
        assert_eq!(calculate_x_offset(100.0, 500.0, Align::Center), 200.0);
    }

    #[test]
    fn test_x_offset_right() {
        assert_eq!(calculate_x_offset(100.0, 500.0, Align::Right), 400.0);
    }

    #[test]
    fn test_generate_text_operators() {
        let ctx = TextRenderContext {
            font_name: "F1".to_string(),
            font_size: 12.0,
            color: Color::black(),
        };

        let ops = generate_text_operators("(Hello)", 100.0, 700.0, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.starts_with("BT\n"));
        assert!(ops_str.contains("0 0 0 rg"));
        assert!(ops_str.contains("/F1 12 Tf"));
        assert!(ops_str.contains("100 700 Td"));
        assert!(ops_str.contains("(Hello) Tj"));
        assert!(ops_str.ends_with("ET\n"));
    }

    #[test]
    fn test_generate_text_operators_with_color() {
        let ctx = TextRenderContext {
            font_name: "F2".to_string(),
            font_size: 9.0,
            color: Color::white(),
        };

        let ops = generate_text_operators("(A)", 10.0, 20.0, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("1 1 1 rg"));
        assert!(ops_str.contains("/F2 9 Tf"));
    }

    #[test]
    fn test_wrap_text_fits_on_one_line() {
        let lines = wrap_text(StandardFont::Helvetica, 10.0, "Short text", 500.0);
        assert_eq!(lines, vec!["Short text".to_string()]);
    }

    #[test]
    fn test_wrap_text_breaks_on_width() {
        // "aaaa" at 10pt is 22.24pt wide, "aaaa aaaa" is 47.26pt
        let lines = wrap_text(StandardFont::Helvetica, 10.0, "aaaa aaaa aaaa", 40.0);
        assert_eq!(lines, vec!["aaaa", "aaaa", "aaaa"]);
    }

    #[test]
    fn test_wrap_text_keeps_explicit_newlines() {
        let lines = wrap_text(StandardFont::Helvetica, 10.0, "First\n\nThird", 500.0);
        assert_eq!(lines, vec!["First", "", "Third"]);
    }

    #[test]
    fn test_wrap_text_long_word_own_line() {
        let lines = wrap_text(
            StandardFont::Helvetica,
            10.0,
            "a Supercalifragilisticexpialidocious b",
            30.0,
        );
        assert_eq!(lines, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        let lines = wrap_text(StandardFont::Helvetica, 10.0, "", 100.0);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn test_wrap_text_collapses_spaces() {
        let lines = wrap_text(StandardFont::Helvetica, 10.0, "Hello    world", 500.0);
        assert_eq!(lines, vec!["Hello world"]);
    }
}
