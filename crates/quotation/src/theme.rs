//! Colors and row styles

use pdf_core::Color;
use serde::{Deserialize, Serialize};

/// RGB color with 0-255 components, written as `[r, g, b]` in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Row variants of the items table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Header,
    Item,
    CustomItem,
    Totals,
}

/// Resolved paint for one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub fill: Color,
    pub stroke: Color,
    pub text: Color,
    pub bold: bool,
}

/// Document color set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    /// Title, headings, header row fill and rules
    pub primary: Rgb,
    pub header_text: Rgb,
    pub item_fill: Rgb,
    pub custom_item_fill: Rgb,
    pub custom_item_text: Rgb,
    pub totals_fill: Rgb,
    /// Body text
    pub text: Rgb,
    /// Cell borders
    pub border: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Rgb(30, 58, 95),
            header_text: Rgb(255, 255, 255),
            item_fill: Rgb(255, 255, 255),
            custom_item_fill: Rgb(240, 247, 255),
            custom_item_text: Rgb(0, 90, 140),
            totals_fill: Rgb(242, 242, 242),
            text: Rgb(33, 33, 33),
            border: Rgb(190, 190, 190),
        }
    }
}

impl Theme {
    /// Paint for a row variant
    pub fn cell_style(&self, style: RowStyle) -> CellStyle {
        let (fill, text, bold) = match style {
            RowStyle::Header => (self.primary, self.header_text, true),
            RowStyle::Item => (self.item_fill, self.text, false),
            RowStyle::CustomItem => (self.custom_item_fill, self.custom_item_text, false),
            RowStyle::Totals => (self.totals_fill, self.text, true),
        };

        CellStyle {
            fill: fill.into(),
            stroke: self.border.into(),
            text: text.into(),
            bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rgb_to_color() {
        let color: Color = Rgb(255, 0, 51).into();
        assert_eq!(color, Color::rgb(1.0, 0.0, 0.2));
    }

    #[test]
    fn test_row_styles_differ() {
        let theme = Theme::default();
        let header = theme.cell_style(RowStyle::Header);
        let item = theme.cell_style(RowStyle::Item);
        let custom = theme.cell_style(RowStyle::CustomItem);
        let totals = theme.cell_style(RowStyle::Totals);

        assert!(header.bold && totals.bold);
        assert!(!item.bold && !custom.bold);
        assert_ne!(item.fill, custom.fill);
        assert_ne!(item.text, custom.text);
        assert_ne!(header.fill, totals.fill);
        assert_eq!(item.stroke, totals.stroke);
    }

    #[test]
    fn test_theme_json_partial() {
        let theme: Theme = serde_json::from_str(r#"{"primary": [0, 128, 0]}"#).unwrap();
        assert_eq!(theme.primary, Rgb(0, 128, 0));
        assert_eq!(theme.border, Theme::default().border);
    }
}
