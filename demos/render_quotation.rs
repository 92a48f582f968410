//! Render a quotation to `uploads/quotation-<quoteNumber>.pdf`
//!
//! Usage:
//!   cargo run -p quotation --example render_quotation [quotation.json] [config.json]
//!
//! Without arguments a sample quotation is rendered with the default
//! configuration.

use quotation::{
    CompanyProfile, LineItem, Quotation, QuotationRenderer, RendererConfig, Totals,
    DEFAULT_VAT_RATE,
};
use std::env;

fn sample_quotation() -> Quotation {
    let items = vec![
        LineItem::new("Portland cement 50kg", "bags", 40.0, 12.5),
        LineItem::new("Reinforcement bar Y12", "pcs", 120.0, 9.75),
        LineItem::new("River sand", "tons", 6.0, 38.0),
    ];
    let custom_items = vec![LineItem::new("Site delivery and offloading", "trip", 2.0, 85.0)];
    let totals = Totals::from_line_items(&items, &custom_items, DEFAULT_VAT_RATE);

    Quotation {
        quote_number: "Q-2025-0001".to_string(),
        date: "2025-01-22".to_string(),
        client_name: "Harbor Logistics Ltd".to_string(),
        client_address: "Plot 17, Industrial Area, Mombasa Road".to_string(),
        site: "Warehouse extension, Block C".to_string(),
        items,
        custom_items,
        sub_total: totals.sub_total,
        vat: totals.vat,
        total_amount: totals.total,
        terms_and_conditions: "Prices valid for 30 days. 50% deposit on order, balance on delivery."
            .to_string(),
    }
}

fn sample_profile() -> CompanyProfile {
    CompanyProfile {
        name: "Summit Builders Supplies".to_string(),
        address: "45 Enterprise Road, Nairobi".to_string(),
        phone: "+254 700 000 000".to_string(),
        email: "sales@summit.example".to_string(),
        vat_rate: Some(DEFAULT_VAT_RATE),
        bank_details: Some("Bank: Example Bank, Account: 0123456789".to_string()),
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let quotation = match args.get(1) {
        Some(path) => Quotation::from_json(&std::fs::read_to_string(path)?)?,
        None => sample_quotation(),
    };
    let config = match args.get(2) {
        Some(path) => RendererConfig::from_file(path)?,
        None => RendererConfig::default(),
    };

    let renderer = QuotationRenderer::new(config)?;
    let profile = sample_profile();
    let path = renderer
        .generate_document(&quotation, Some(&profile))
        .await?;

    println!("Saved {}", path.display());
    Ok(())
}
