//! Quotation - business quotation documents rendered to PDF
//!
//! This crate provides:
//! - Quotation, line item and company profile types (camelCase JSON)
//! - Totals arithmetic (amount, VAT, total)
//! - Table layout with header, item, custom item and totals row styles
//! - Page assembly as pure layout blocks producing draw instructions
//! - An async renderer persisting `quotation-<quoteNumber>.pdf` atomically
//!
//! # Example
//!
//! ```ignore
//! use quotation::{Quotation, QuotationRenderer, RendererConfig};
//!
//! let renderer = QuotationRenderer::new(RendererConfig::default())?;
//! let quotation = Quotation::from_json(json)?;
//! let path = renderer.generate_document(&quotation, None).await?;
//! println!("{}", path.display());
//! ```

pub mod assembler;
pub mod canvas;
mod config;
mod model;
mod renderer;
mod storage;
pub mod table;
mod theme;
pub mod totals;

pub use assembler::Assembler;
pub use canvas::{DrawOp, LayoutState};
pub use config::RendererConfig;
pub use model::{validate_quote_number, CompanyProfile, LineItem, Quotation};
pub use renderer::QuotationRenderer;
pub use storage::OutputStore;
pub use table::{layout_columns, CellAlign, Column, ColumnField, TableConfig, TableLayout};
pub use theme::{CellStyle, Rgb, RowStyle, Theme};
pub use totals::{Totals, DEFAULT_VAT_RATE};

use thiserror::Error;

/// Errors that can occur while rendering a quotation
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for quotation operations
pub type Result<T> = std::result::Result<T, QuoteError>;
