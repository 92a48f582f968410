//! Draw instructions and the layout cursor
//!
//! Layout code never touches a document. It returns `DrawOp` values that
//! `apply` replays onto a `PdfDocument` page in order.

use crate::{QuoteError, Result};
use pdf_core::{Align, Color, ImageScaleMode, PdfDocument, RectStyle, StandardFont};

/// Vertical draw cursor, in points from the top of the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutState {
    pub y: f64,
}

impl LayoutState {
    pub fn new(y: f64) -> Self {
        Self { y }
    }

    /// Cursor moved down by `dy`
    pub fn advance(self, dy: f64) -> Self {
        Self { y: self.y + dy }
    }
}

/// Font, size and color of a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: StandardFont,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn regular(size: f32, color: Color) -> Self {
        Self {
            font: StandardFont::Helvetica,
            size,
            color,
        }
    }

    pub fn bold(size: f32, color: Color) -> Self {
        Self {
            font: StandardFont::HelveticaBold,
            size,
            color,
        }
    }

    /// Baseline offset that centers a single line in a box of `height`
    pub fn centered_baseline(&self, height: f64) -> f64 {
        let size = self.size as f64;
        let ascent = self.font.ascender() as f64 / 1000.0 * size;
        let descent = self.font.descender() as f64 / 1000.0 * size;
        (height + ascent + descent) / 2.0
    }
}

/// One drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled and stroked rectangle, `y` is the top edge
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
        stroke: Color,
    },
    /// Horizontal or vertical rule
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f32,
    },
    /// Single line of text; `x` is the anchor for `align`, `y` the baseline
    Text {
        text: String,
        x: f64,
        y: f64,
        align: Align,
        style: TextStyle,
    },
    /// Text wrapped to `width`; `y` is the first baseline
    TextBox {
        text: String,
        x: f64,
        y: f64,
        width: f64,
        line_height: f64,
        align: Align,
        style: TextStyle,
    },
    /// Image fitted into a box, `y` is the top edge
    Image {
        data: Vec<u8>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl DrawOp {
    /// Text carried by a text instruction
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } | DrawOp::TextBox { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Replay this instruction onto `page` of `doc`
    pub fn apply(&self, doc: &mut PdfDocument, page: usize) -> pdf_core::Result<()> {
        match self {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                doc.set_fill_color(*fill);
                doc.set_stroke_color(*stroke);
                doc.set_line_width(0.5);
                doc.draw_rect(page, *x, *y, *width, *height, RectStyle::FillStroke)
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                doc.set_stroke_color(*color);
                doc.set_line_width(*width);
                doc.draw_line(page, *x1, *y1, *x2, *y2)
            }
            DrawOp::Text {
                text,
                x,
                y,
                align,
                style,
            } => {
                set_text_style(doc, style);
                doc.insert_text(text, page, *x, *y, *align)
            }
            DrawOp::TextBox {
                text,
                x,
                y,
                width,
                line_height,
                align,
                style,
            } => {
                set_text_style(doc, style);
                doc.insert_text_box(text, page, *x, *y, *width, *align, *line_height)
                    .map(|_| ())
            }
            DrawOp::Image {
                data,
                x,
                y,
                width,
                height,
            } => doc
                .insert_image_scaled(data, page, *x, *y, *width, *height, ImageScaleMode::FitBox)
                .map(|_| ()),
        }
    }
}

fn set_text_style(doc: &mut PdfDocument, style: &TextStyle) {
    doc.set_font(style.font, style.size);
    doc.set_text_color(style.color);
}

/// Replay `ops` in order, stopping at the first failing primitive
pub fn apply_all(ops: &[DrawOp], doc: &mut PdfDocument, page: usize) -> Result<()> {
    for (index, op) in ops.iter().enumerate() {
        op.apply(doc, page)
            .map_err(|e| QuoteError::Render(format!("draw instruction {index}: {e}")))?;
    }
    Ok(())
}
