//! Doc Format - display formatting for rendered documents
//!
//! This crate provides:
//! - Grouped number formatting ("1,160", "2,500.5")
//! - Quotation date parsing and formatting (RFC 3339 or `YYYY-MM-DD` input)
//!
//! # Example
//!
//! ```ignore
//! use doc_format::{format_grouped, format_quote_date};
//!
//! let text = format_grouped(1160.0, 2);                   // "1,160"
//! let date = format_quote_date("2025-01-22", "%d %b %Y"); // "22 Jan 2025"
//! ```

mod formatter;

pub use formatter::{check_date_pattern, format_grouped, format_quote_date, parse_quote_date};

use thiserror::Error;

/// Errors that can occur while formatting
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date pattern: {0}")]
    InvalidPattern(String),
}

/// Result type for formatting operations
pub type Result<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(1000.0, 2), "1,000");
        assert_eq!(format_grouped(160.0, 2), "160");
        assert_eq!(format_grouped(1160.0, 2), "1,160");
    }

    #[test]
    fn test_invalid_date_message() {
        let err = parse_quote_date("yesterday").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date: yesterday");
    }
}
