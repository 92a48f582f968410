//! Quotation record types

use crate::totals;
use crate::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Longest accepted quote number, in bytes
const MAX_QUOTE_NUMBER_LEN: usize = 128;

/// One row of the items table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,

    /// Unit label (e.g. "pcs", "m2")
    #[serde(default)]
    pub units: String,

    pub quantity: f64,

    pub unit_price: f64,

    /// Line amount as supplied; printed as-is
    pub amount: f64,
}

impl LineItem {
    /// Create a line item with `amount = quantity * unit_price`
    pub fn new(
        description: impl Into<String>,
        units: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            description: description.into(),
            units: units.into(),
            quantity,
            unit_price,
            amount: totals::amount(quantity, unit_price),
        }
    }

    fn validate(&self, list: &str, index: usize) -> Result<()> {
        let invalid = |reason: &str| {
            Err(QuoteError::Validation(format!(
                "{list}[{index}] ({}): {reason}",
                self.description
            )))
        };

        if !(self.quantity.is_finite() && self.unit_price.is_finite() && self.amount.is_finite()) {
            return invalid("numbers must be finite");
        }
        if self.quantity <= 0.0 {
            return invalid("quantity must be greater than zero");
        }
        if self.unit_price < 0.0 {
            return invalid("unitPrice must not be negative");
        }
        Ok(())
    }
}

/// A quotation record with totals computed upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    /// Unique quote number, also the output file key
    pub quote_number: String,

    /// Issue date (RFC 3339 or YYYY-MM-DD; other text is printed as-is)
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub client_address: String,

    #[serde(default)]
    pub site: String,

    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Items rendered with the custom item style, after `items`
    #[serde(default)]
    pub custom_items: Vec<LineItem>,

    pub sub_total: f64,

    pub vat: f64,

    pub total_amount: f64,

    #[serde(default)]
    pub terms_and_conditions: String,
}

impl Quotation {
    /// Parse a quotation from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check everything the renderer relies on before any I/O happens
    ///
    /// Totals are not cross-checked against the items.
    pub fn validate(&self) -> Result<()> {
        validate_quote_number(&self.quote_number)?;

        for (index, item) in self.items.iter().enumerate() {
            item.validate("items", index)?;
        }
        for (index, item) in self.custom_items.iter().enumerate() {
            item.validate("customItems", index)?;
        }

        let totals = [self.sub_total, self.vat, self.total_amount];
        if !totals.iter().all(|v| v.is_finite()) {
            return Err(QuoteError::Validation(
                "subTotal, vat and totalAmount must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reject quote numbers that are unsafe as a file name component
pub fn validate_quote_number(quote_number: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(QuoteError::Validation(format!(
            "quoteNumber {quote_number:?} {reason}"
        )))
    };

    if quote_number.trim().is_empty() {
        return reject("is empty");
    }
    if quote_number.len() > MAX_QUOTE_NUMBER_LEN {
        return reject("is too long");
    }
    if quote_number.contains(['/', '\\']) {
        return reject("contains a path separator");
    }
    if quote_number.contains("..") {
        return reject("contains a traversal sequence");
    }
    if quote_number.chars().any(char::is_control) {
        return reject("contains control characters");
    }
    Ok(())
}

/// Company details printed in the header and terms blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    /// VAT rate in percent shown in the totals label
    #[serde(default)]
    pub vat_rate: Option<f64>,

    /// Path to a JPEG or PNG logo
    #[serde(default)]
    pub logo: Option<PathBuf>,

    #[serde(default)]
    pub terms: Option<String>,

    #[serde(default)]
    pub bank_details: Option<String>,
}

impl CompanyProfile {
    /// Reject a VAT rate that cannot be printed as a percentage
    pub fn validate(&self) -> Result<()> {
        match self.vat_rate {
            Some(rate) if !(rate.is_finite() && rate >= 0.0) => Err(QuoteError::Validation(
                format!("company {:?} has vatRate {rate}", self.name),
            )),
            _ => Ok(()),
        }
    }
}
