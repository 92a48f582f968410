//! PDF Core - Low-level PDF page drawing
//!
//! This crate provides functionality for:
//! - Creating single-page documents from scratch (A4, Letter)
//! - Drawing filled and stroked rectangles and lines
//! - Placing text with the standard Helvetica fonts, aligned and width-constrained
//! - Inserting images (JPEG, PNG)
//!
//! All coordinates are in points, with `y` measured from the top of the page.
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, Color, PageSize, PdfDocument, RectStyle, StandardFont};
//!
//! let mut doc = PdfDocument::new(PageSize::A4);
//! doc.set_fill_color(Color::from_rgb(30, 58, 95));
//! doc.draw_rect(1, 50.0, 100.0, 200.0, 20.0, RectStyle::FillStroke)?;
//! doc.set_font(StandardFont::HelveticaBold, 12.0);
//! doc.insert_text("Hello, World!", 1, 55.0, 114.0, Align::Left)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod graphics;
mod image;
mod text;

pub use document::{Color, PageSize, PdfDocument};
pub use font::StandardFont;
pub use graphics::RectStyle;
pub use image::ImageScaleMode;
pub use text::{calculate_x_offset, truncate_to_width, wrap_text};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
