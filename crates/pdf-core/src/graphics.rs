//! Vector graphics operators (rectangles, lines)

use crate::document::Color;

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectStyle {
    /// Fill with the current fill color
    Fill,
    /// Outline with the current stroke color and line width
    Stroke,
    /// Fill, then outline
    #[default]
    FillStroke,
}

impl RectStyle {
    fn paint_operator(self) -> &'static str {
        match self {
            RectStyle::Fill => "f",
            RectStyle::Stroke => "S",
            RectStyle::FillStroke => "B",
        }
    }
}

/// Paint state captured at the time a shape is drawn
#[derive(Debug, Clone, Copy)]
pub struct PaintContext {
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f32,
}

/// Generate operators for a rectangle
///
/// # Arguments
/// * `x` - Left edge in points
/// * `y` - Bottom edge in points (PDF coordinates)
/// * `width` - Width in points
/// * `height` - Height in points
/// * `style` - Paint mode
/// * `paint` - Colors and line width
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: RectStyle,
    paint: &PaintContext,
) -> Vec<u8> {
    let mut ops = String::from("q\n");

    if style != RectStyle::Stroke {
        ops.push_str(&format!(
            "{} {} {} rg\n",
            paint.fill.r, paint.fill.g, paint.fill.b
        ));
    }
    if style != RectStyle::Fill {
        ops.push_str(&format!(
            "{} {} {} RG\n{} w\n",
            paint.stroke.r, paint.stroke.g, paint.stroke.b, paint.line_width
        ));
    }

    ops.push_str(&format!("{x} {y} {width} {height} re\n"));
    ops.push_str(style.paint_operator());
    ops.push_str("\nQ\n");

    ops.into_bytes()
}

/// Generate operators for a straight stroked line between two PDF points
pub fn generate_line_operators(x1: f64, y1: f64, x2: f64, y2: f64, paint: &PaintContext) -> Vec<u8> {
    format!(
        "q\n{} {} {} RG\n{} w\n{x1} {y1} m\n{x2} {y2} l\nS\nQ\n",
        paint.stroke.r, paint.stroke.g, paint.stroke.b, paint.line_width
    )
    .into_bytes()
}
