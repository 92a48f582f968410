//! Page assembly
//!
//! The page is built from blocks drawn top to bottom. Each block is a pure
//! function of the cursor and its content, returning the advanced cursor
//! together with the instructions it produced:
//!
//! 1. header (logo, title)
//! 2. company details
//! 3. quotation metadata
//! 4. items table
//! 5. totals, directly below the last table row
//! 6. terms and bank details
//! 7. footer, at a fixed position near the bottom of the page

use crate::canvas::{apply_all, DrawOp, LayoutState, TextStyle};
use crate::config::RendererConfig;
use crate::model::{CompanyProfile, Quotation};
use crate::table::{vat_label, TableLayout};
use crate::theme::Theme;
use crate::totals::Totals;
use crate::Result;
use doc_format::format_quote_date;
use pdf_core::{wrap_text, Align, Color, PageSize, PdfDocument};

/// Every quotation is a single A4 page
pub const PAGE_SIZE: PageSize = PageSize::A4;

/// Top of the header block
const TOP_MARGIN: f64 = 40.0;

/// Logo bounding box (width, height)
const LOGO_BOX: (f64, f64) = (120.0, 60.0);

const HEADER_HEIGHT: f64 = 70.0;
const TITLE_SIZE: f32 = 24.0;

const BODY_SIZE: f32 = 10.0;
const BODY_LINE: f64 = 14.0;

/// Width reserved for metadata labels
pub(crate) const LABEL_WIDTH: f64 = 80.0;

const SMALL_SIZE: f32 = 9.0;
const SMALL_LINE: f64 = 12.0;

/// Distance of the footer baseline from the page bottom
const FOOTER_MARGIN: f64 = 40.0;

/// Horizontal extent shared by all blocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub right: f64,
}

impl Frame {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }
}

fn rule(y: f64, frame: Frame, color: Color, width: f32) -> DrawOp {
    DrawOp::Line {
        x1: frame.left,
        y1: y,
        x2: frame.right,
        y2: y,
        color,
        width,
    }
}

/// Wrapped text starting at the cursor; returns the op and its height
fn paragraph(text: &str, x: f64, y: f64, width: f64, line: f64, style: TextStyle) -> (DrawOp, f64) {
    let lines = wrap_text(style.font, style.size, text, width).len();
    let op = DrawOp::TextBox {
        text: text.to_string(),
        x,
        y: y + line - 2.0,
        width,
        line_height: line,
        align: Align::Left,
        style,
    };
    (op, lines as f64 * line)
}

/// Logo at the top left, title right aligned
pub fn header_block(
    state: LayoutState,
    logo: Option<&[u8]>,
    title: &str,
    theme: &Theme,
    frame: Frame,
) -> (LayoutState, Vec<DrawOp>) {
    let mut ops = Vec::new();

    if let Some(data) = logo {
        ops.push(DrawOp::Image {
            data: data.to_vec(),
            x: frame.left,
            y: state.y,
            width: LOGO_BOX.0,
            height: LOGO_BOX.1,
        });
    }

    ops.push(DrawOp::Text {
        text: title.to_string(),
        x: frame.right,
        y: state.y + 30.0,
        align: Align::Right,
        style: TextStyle::bold(TITLE_SIZE, theme.primary.into()),
    });

    (state.advance(HEADER_HEIGHT), ops)
}

/// Company name, address, phone and email, closed by a rule
///
/// Draws nothing without a profile.
pub fn company_block(
    state: LayoutState,
    profile: Option<&CompanyProfile>,
    theme: &Theme,
    frame: Frame,
) -> (LayoutState, Vec<DrawOp>) {
    let Some(profile) = profile else {
        return (state, Vec::new());
    };

    let mut ops = Vec::new();
    let mut state = state;

    if !profile.name.is_empty() {
        ops.push(DrawOp::Text {
            text: profile.name.clone(),
            x: frame.left,
            y: state.y + 14.0,
            align: Align::Left,
            style: TextStyle::bold(14.0, theme.primary.into()),
        });
        state = state.advance(20.0);
    }

    let details = [
        profile.address.clone(),
        prefixed("Tel: ", &profile.phone),
        prefixed("Email: ", &profile.email),
    ];
    let body = TextStyle::regular(BODY_SIZE, theme.text.into());
    for line in details.into_iter().filter(|l| !l.is_empty()) {
        let (op, height) = paragraph(&line, frame.left, state.y, frame.width(), BODY_LINE, body);
        ops.push(op);
        state = state.advance(height);
    }

    ops.push(rule(state.y + 6.0, frame, theme.primary.into(), 1.0));
    (state.advance(16.0), ops)
}

fn prefixed(prefix: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{prefix}{value}")
    }
}

/// Quote number, date, client, address and site as label/value rows
pub fn metadata_block(
    state: LayoutState,
    quotation: &Quotation,
    date_format: &str,
    theme: &Theme,
    frame: Frame,
) -> (LayoutState, Vec<DrawOp>) {
    let rows = [
        ("Quote No.:", quotation.quote_number.clone()),
        ("Date:", format_quote_date(&quotation.date, date_format)),
        ("Client:", quotation.client_name.clone()),
        ("Address:", quotation.client_address.clone()),
        ("Site:", quotation.site.clone()),
    ];

    let label_style = TextStyle::bold(BODY_SIZE, theme.text.into());
    let value_style = TextStyle::regular(BODY_SIZE, theme.text.into());
    let value_x = frame.left + LABEL_WIDTH;
    let value_width = frame.right - value_x;

    let mut ops = Vec::new();
    let mut state = state;
    for (label, value) in rows {
        ops.push(DrawOp::Text {
            text: label.to_string(),
            x: frame.left,
            y: state.y + BODY_LINE - 2.0,
            align: Align::Left,
            style: label_style,
        });

        let (op, height) = paragraph(&value, value_x, state.y, value_width, BODY_LINE, value_style);
        if !value.is_empty() {
            ops.push(op);
        }
        state = state.advance(height);
    }

    (state.advance(10.0), ops)
}

/// Terms & Conditions, then bank details, each only when non-empty
pub fn terms_block(
    state: LayoutState,
    terms: &str,
    profile: Option<&CompanyProfile>,
    theme: &Theme,
    frame: Frame,
) -> (LayoutState, Vec<DrawOp>) {
    let profile_terms = profile.and_then(|p| p.terms.as_deref()).unwrap_or("");
    let bank_details = profile.and_then(|p| p.bank_details.as_deref()).unwrap_or("");

    let terms: Vec<&str> = [terms.trim(), profile_terms.trim()]
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect();
    let sections = [
        ("Terms & Conditions", terms.join("\n")),
        ("Bank Details", bank_details.trim().to_string()),
    ];

    let heading = TextStyle::bold(11.0, theme.primary.into());
    let body = TextStyle::regular(SMALL_SIZE, theme.text.into());

    let mut ops = Vec::new();
    let mut state = state.advance(20.0);
    for (title, text) in sections.iter().filter(|(_, text)| !text.is_empty()) {
        ops.push(DrawOp::Text {
            text: title.to_string(),
            x: frame.left,
            y: state.y + 11.0,
            align: Align::Left,
            style: heading,
        });
        state = state.advance(16.0);

        let (op, height) = paragraph(text, frame.left, state.y, frame.width(), SMALL_LINE, body);
        ops.push(op);
        state = state.advance(height + 8.0);
    }

    (state, ops)
}

/// Centered footer line near the bottom of the page
///
/// The position does not depend on the cursor.
pub fn footer_block(
    state: LayoutState,
    footer: &str,
    theme: &Theme,
    frame: Frame,
    page_height: f64,
) -> (LayoutState, Vec<DrawOp>) {
    let baseline = page_height - FOOTER_MARGIN;
    if footer.is_empty() {
        return (state, Vec::new());
    }

    let ops = vec![
        rule(baseline - 14.0, frame, theme.border.into(), 0.5),
        DrawOp::Text {
            text: footer.to_string(),
            x: frame.center(),
            y: baseline,
            align: Align::Center,
            style: TextStyle::regular(SMALL_SIZE, theme.text.into()),
        },
    ];

    (LayoutState::new(state.y.max(baseline)), ops)
}

/// Lays out and renders a quotation page
pub struct Assembler<'a> {
    config: &'a RendererConfig,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a RendererConfig) -> Self {
        Self { config }
    }

    /// All draw instructions of the page, in drawing order
    ///
    /// `logo` holds the image bytes of the profile's logo, already loaded.
    pub fn layout(
        &self,
        quotation: &Quotation,
        profile: Option<&CompanyProfile>,
        logo: Option<&[u8]>,
    ) -> Vec<DrawOp> {
        let config = self.config;
        let theme = &config.theme;
        let profile = config.resolve_profile(profile);

        let table = TableLayout::new(&config.table, theme);
        let frame = Frame {
            left: config.table.origin_x,
            right: table.right_edge(),
        };

        let mut ops = Vec::new();
        let state = LayoutState::new(TOP_MARGIN);

        let (state, block) = header_block(state, logo, &config.title, theme, frame);
        ops.extend(block);

        let (state, block) = company_block(state, profile, theme, frame);
        ops.extend(block);

        let (state, block) =
            metadata_block(state, quotation, &config.date_format, theme, frame);
        ops.extend(block);

        let digits = config.amount_fraction_digits;
        let (state, block) =
            table.render_table(state, &quotation.items, &quotation.custom_items, digits);
        ops.extend(block);

        let totals = Totals::from_quotation(quotation);
        let label = vat_label(config.vat_rate_for(profile));
        let (state, block) = table.render_totals(state, &totals, &label, digits);
        ops.extend(block);

        let (state, block) =
            terms_block(state, &quotation.terms_and_conditions, profile, theme, frame);
        ops.extend(block);

        let (_, block) = footer_block(state, &config.footer, theme, frame, PAGE_SIZE.height);
        ops.extend(block);

        ops
    }

    /// Render the page to PDF bytes
    pub fn render(
        &self,
        quotation: &Quotation,
        profile: Option<&CompanyProfile>,
        logo: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let ops = self.layout(quotation, profile, logo);

        let mut doc = PdfDocument::new(PAGE_SIZE);
        apply_all(&ops, &mut doc, 1)?;
        Ok(doc.to_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use pretty_assertions::assert_eq;

    fn frame() -> Frame {
        Frame {
            left: 50.0,
            right: 570.0,
        }
    }

    fn texts(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter().filter_map(DrawOp::text).collect()
    }

    fn quotation() -> Quotation {
        Quotation {
            quote_number: "Q-001".to_string(),
            date: "2025-01-22".to_string(),
            client_name: "Acme Ltd".to_string(),
            client_address: "12 Market Street".to_string(),
            site: "Warehouse B".to_string(),
            items: vec![
                LineItem::new("A", "pcs", 2.0, 250.0),
                LineItem::new("B", "pcs", 1.0, 300.0),
            ],
            custom_items: vec![LineItem::new("C", "", 1.0, 200.0)],
            sub_total: 1000.0,
            vat: 160.0,
            total_amount: 1160.0,
            terms_and_conditions: "Valid for 30 days".to_string(),
        }
    }

    fn profile() -> CompanyProfile {
        CompanyProfile {
            name: "Builders Co".to_string(),
            address: "1 Industrial Way".to_string(),
            phone: "555-0100".to_string(),
            email: "sales@builders.example".to_string(),
            vat_rate: Some(15.0),
            terms: Some("Prices exclude delivery".to_string()),
            bank_details: Some("Account 12345".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_header_block() {
        let theme = Theme::default();
        let (state, ops) = header_block(
            LayoutState::new(40.0),
            Some(b"logo".as_slice()),
            "QUOTATION",
            &theme,
            frame(),
        );

        assert_eq!(state, LayoutState::new(110.0));
        assert!(matches!(ops[0], DrawOp::Image { x, y, .. } if x == 50.0 && y == 40.0));
        assert!(matches!(
            &ops[1],
            DrawOp::Text { text, x, align: Align::Right, .. } if text == "QUOTATION" && *x == 570.0
        ));
    }

    #[test]
    fn test_header_block_without_logo() {
        let theme = Theme::default();
        let (_, ops) = header_block(LayoutState::default(), None, "QUOTATION", &theme, frame());
        assert_eq!(ops.len(), 1);
    }

    #[test]
    fn test_company_block() {
        let theme = Theme::default();
        let profile = profile();
        let (state, ops) =
            company_block(LayoutState::new(100.0), Some(&profile), &theme, frame());

        assert_eq!(
            texts(&ops),
            vec![
                "Builders Co",
                "1 Industrial Way",
                "Tel: 555-0100",
                "Email: sales@builders.example"
            ]
        );
        assert!(matches!(ops.last(), Some(DrawOp::Line { .. })));
        // name 20, three detail lines 42, rule 16
        assert_eq!(state, LayoutState::new(178.0));
    }

    #[test]
    fn test_company_block_without_profile() {
        let theme = Theme::default();
        let (state, ops) = company_block(LayoutState::new(100.0), None, &theme, frame());
        assert_eq!(state, LayoutState::new(100.0));
        assert!(ops.is_empty());
    }

    #[test]
    fn test_metadata_block() {
        let theme = Theme::default();
        let (state, ops) =
            metadata_block(LayoutState::new(0.0), &quotation(), "%d %b %Y", &theme, frame());

        assert_eq!(
            texts(&ops),
            vec![
                "Quote No.:",
                "Q-001",
                "Date:",
                "22 Jan 2025",
                "Client:",
                "Acme Ltd",
                "Address:",
                "12 Market Street",
                "Site:",
                "Warehouse B"
            ]
        );
        assert_eq!(state, LayoutState::new(5.0 * BODY_LINE + 10.0));
    }

    #[test]
    fn test_metadata_block_wraps_long_address() {
        let theme = Theme::default();
        let mut quotation = quotation();
        quotation.client_address = "Plot 17, ".repeat(30);

        let (state, _) =
            metadata_block(LayoutState::new(0.0), &quotation, "%d %b %Y", &theme, frame());
        assert!(state.y > 5.0 * BODY_LINE + 10.0);
    }

    #[test]
    fn test_terms_block_sections() {
        let theme = Theme::default();
        let profile = profile();
        let (_, ops) = terms_block(
            LayoutState::new(500.0),
            "Valid for 30 days",
            Some(&profile),
            &theme,
            frame(),
        );

        assert_eq!(
            texts(&ops),
            vec![
                "Terms & Conditions",
                "Valid for 30 days\nPrices exclude delivery",
                "Bank Details",
                "Account 12345"
            ]
        );
    }

    #[test]
    fn test_terms_block_empty() {
        let theme = Theme::default();
        let (state, ops) = terms_block(LayoutState::new(500.0), "  ", None, &theme, frame());
        assert!(ops.is_empty());
        assert_eq!(state, LayoutState::new(520.0));
    }

    #[test]
    fn test_footer_block_fixed_position() {
        let theme = Theme::default();
        let footer = "Thank you for your business!";

        let (_, near_top) = footer_block(LayoutState::new(100.0), footer, &theme, frame(), 841.89);
        let (_, lower) = footer_block(LayoutState::new(600.0), footer, &theme, frame(), 841.89);
        assert_eq!(near_top, lower);

        match &near_top[1] {
            DrawOp::Text { x, y, align, .. } => {
                assert_eq!(*x, 310.0);
                assert!((y - 801.89).abs() < 1e-9);
                assert_eq!(*align, Align::Center);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_layout_block_order() {
        let config = RendererConfig::default();
        let profile = profile();
        let ops = Assembler::new(&config).layout(&quotation(), Some(&profile), None);
        let texts = texts(&ops);

        let position = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();
        assert!(position("QUOTATION") < position("Builders Co"));
        assert!(position("Builders Co") < position("Quote No.:"));
        assert!(position("Quote No.:") < position("Description"));
        assert!(position("A") < position("B"));
        assert!(position("B") < position("C"));
        assert!(position("C") < position("Subtotal"));
        assert!(position("Subtotal") < position("Terms & Conditions"));
        assert_eq!(texts.last(), Some(&"Thank you for your business!"));
        assert!(texts.contains(&"VAT (15%)"));
    }

    #[test]
    fn test_layout_totals_follow_header_without_items() {
        let config = RendererConfig::default();
        let mut quotation = quotation();
        quotation.items.clear();
        quotation.custom_items.clear();

        let ops = Assembler::new(&config).layout(&quotation, None, None);

        let header_top = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, y, .. } if text == "Description" => Some(*y),
                _ => None,
            })
            .unwrap();
        let subtotal_top = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, y, .. } if text == "Subtotal" => Some(*y),
                _ => None,
            })
            .unwrap();

        assert!((subtotal_top - header_top - config.table.row_height).abs() < 1e-9);

        let texts = texts(&ops);
        let amount = texts.iter().position(|t| *t == "Amount").unwrap();
        assert_eq!(texts[amount + 1], "Subtotal");
        assert!(texts.contains(&"VAT (16%)"));
    }

    #[test]
    fn test_render_produces_pdf() {
        let config = RendererConfig::default();
        let bytes = Assembler::new(&config)
            .render(&quotation(), None, None)
            .unwrap();

        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);

        let page_id = *parsed.get_pages().get(&1).unwrap();
        let content = String::from_utf8(parsed.get_page_content(page_id).unwrap()).unwrap();
        assert!(content.contains("(1,160) Tj"));
    }

    #[test]
    fn test_render_invalid_logo_is_render_error() {
        let config = RendererConfig::default();
        let err = Assembler::new(&config)
            .render(&quotation(), None, Some(b"not an image".as_slice()))
            .unwrap_err();
        assert!(matches!(err, crate::QuoteError::Render(_)));
    }
}
