//! Totals arithmetic
//!
//! The renderer only prints totals handed to it. `Totals::from_line_items`
//! exists for producers building a quotation record.

use crate::model::{LineItem, Quotation};

/// VAT rate in percent used when no organizational rate is configured
pub const DEFAULT_VAT_RATE: f64 = 16.0;

/// Line amount
pub fn amount(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// VAT on `amount` at `rate` percent
pub fn vat(amount: f64, rate: f64) -> f64 {
    amount * rate / 100.0
}

/// `amount` plus its VAT at `rate` percent
pub fn total(amount: f64, rate: f64) -> f64 {
    amount + vat(amount, rate)
}

/// Subtotal, VAT and total of a quotation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub sub_total: f64,
    pub vat: f64,
    pub total: f64,
}

impl Totals {
    /// Sum the supplied line amounts and derive VAT and total at `rate`
    pub fn from_line_items(items: &[LineItem], custom_items: &[LineItem], rate: f64) -> Self {
        let sub_total: f64 = items.iter().chain(custom_items).map(|item| item.amount).sum();
        Self {
            sub_total,
            vat: vat(sub_total, rate),
            total: total(sub_total, rate),
        }
    }

    /// Totals exactly as stored on the quotation
    pub fn from_quotation(quotation: &Quotation) -> Self {
        Self {
            sub_total: quotation.sub_total,
            vat: quotation.vat,
            total: quotation.total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount() {
        assert_eq!(amount(10.0, 50.0), 500.0);
        assert_eq!(amount(0.5, 3.0), 1.5);
    }

    #[test]
    fn test_vat_and_total_default_rate() {
        assert_eq!(vat(1000.0, DEFAULT_VAT_RATE), 160.0);
        assert_eq!(total(1000.0, DEFAULT_VAT_RATE), 1160.0);
    }

    #[test]
    fn test_vat_explicit_rate() {
        assert_eq!(vat(200.0, 15.0), 30.0);
        assert_eq!(total(200.0, 0.0), 200.0);
    }

    #[test]
    fn test_from_line_items() {
        let items = vec![LineItem::new("A", "pcs", 2.0, 250.0)];
        let custom = vec![LineItem::new("C", "", 1.0, 500.0)];

        let totals = Totals::from_line_items(&items, &custom, DEFAULT_VAT_RATE);
        assert_eq!(
            totals,
            Totals {
                sub_total: 1000.0,
                vat: 160.0,
                total: 1160.0,
            }
        );
    }

    #[test]
    fn test_from_line_items_uses_amount_field() {
        let mut item = LineItem::new("A", "pcs", 2.0, 250.0);
        item.amount = 450.0;

        let totals = Totals::from_line_items(&[item], &[], 0.0);
        assert_eq!(totals.sub_total, 450.0);
    }

    #[test]
    fn test_from_quotation_is_verbatim() {
        let quotation = crate::Quotation::from_json(
            r#"{"quoteNumber": "Q-1", "subTotal": 1000, "vat": 150, "totalAmount": 1234}"#,
        )
        .unwrap();

        let totals = Totals::from_quotation(&quotation);
        assert_eq!(totals.sub_total, 1000.0);
        assert_eq!(totals.vat, 150.0);
        assert_eq!(totals.total, 1234.0);
    }
}
