//! Renderer configuration

use crate::assembler::LABEL_WIDTH;
use crate::model::CompanyProfile;
use crate::table::TableConfig;
use crate::theme::Theme;
use crate::totals::DEFAULT_VAT_RATE;
use crate::{QuoteError, Result};
use doc_format::check_date_pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest supported `amountFractionDigits`
const MAX_FRACTION_DIGITS: u8 = 6;

/// Renderer settings, loaded from camelCase JSON with every field optional
///
/// # Example
/// ```ignore
/// let config = RendererConfig::from_json(r#"{"uploadsDir": "/srv/uploads"}"#)?;
/// assert_eq!(config.default_vat_rate, 16.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererConfig {
    /// Directory receiving `quotation-<quoteNumber>.pdf`
    pub uploads_dir: PathBuf,

    /// VAT rate shown when the company profile has none
    pub default_vat_rate: f64,

    /// chrono strftime pattern for the quotation date
    pub date_format: String,

    /// Maximum fraction digits of printed amounts
    pub amount_fraction_digits: u8,

    pub title: String,

    pub footer: String,

    /// Profile used when a render call passes none
    pub company: Option<CompanyProfile>,

    pub theme: Theme,

    pub table: TableConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from("uploads"),
            default_vat_rate: DEFAULT_VAT_RATE,
            date_format: "%d %b %Y".to_string(),
            amount_fraction_digits: 2,
            title: "QUOTATION".to_string(),
            footer: "Thank you for your business!".to_string(),
            company: None,
            theme: Theme::default(),
            table: TableConfig::default(),
        }
    }
}

impl RendererConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check values the layout depends on
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(QuoteError::Config(message));

        if !(self.default_vat_rate.is_finite() && self.default_vat_rate >= 0.0) {
            return invalid(format!("defaultVatRate {}", self.default_vat_rate));
        }
        if self.date_format.trim().is_empty() {
            return invalid("dateFormat is empty".to_string());
        }
        if let Err(err) = check_date_pattern(&self.date_format) {
            return invalid(format!("dateFormat: {err}"));
        }
        if self.amount_fraction_digits > MAX_FRACTION_DIGITS {
            return invalid(format!(
                "amountFractionDigits {} exceeds {MAX_FRACTION_DIGITS}",
                self.amount_fraction_digits
            ));
        }
        if !(self.table.row_height.is_finite() && self.table.row_height > 0.0) {
            return invalid(format!("table.rowHeight {}", self.table.row_height));
        }
        if !self.table.origin_x.is_finite() {
            return invalid(format!("table.originX {}", self.table.origin_x));
        }
        if self.table.columns.len() < 2 {
            return invalid("table needs at least two columns".to_string());
        }
        if let Some(column) = self
            .table
            .columns
            .iter()
            .find(|c| !(c.width.is_finite() && c.width > 0.0))
        {
            return invalid(format!(
                "column {:?} has width {}",
                column.title, column.width
            ));
        }
        if let Some(company) = &self.company {
            company
                .validate()
                .map_err(|err| QuoteError::Config(format!("company: {err}")))?;
        }
        let table_width: f64 = self.table.columns.iter().map(|c| c.width).sum();
        if table_width <= LABEL_WIDTH {
            return invalid(format!(
                "table width {table_width} leaves no room for metadata values"
            ));
        }

        Ok(())
    }

    /// Profile passed to a render call, or the configured default
    pub fn resolve_profile<'a>(
        &'a self,
        profile: Option<&'a CompanyProfile>,
    ) -> Option<&'a CompanyProfile> {
        profile.or(self.company.as_ref())
    }

    /// VAT rate printed in the totals label
    pub fn vat_rate_for(&self, profile: Option<&CompanyProfile>) -> f64 {
        profile
            .and_then(|p| p.vat_rate)
            .unwrap_or(self.default_vat_rate)
    }
}
