//! Items table layout
//!
//! Columns are placed left to right from `origin_x`. Every row draws one
//! filled and stroked cell rectangle per column, then the cell text inside
//! it with a fixed horizontal padding.

use crate::canvas::{DrawOp, LayoutState, TextStyle};
use crate::model::LineItem;
use crate::theme::{CellStyle, RowStyle, Theme};
use crate::totals::Totals;
use doc_format::format_grouped;
use pdf_core::{truncate_to_width, Align};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Horizontal padding inside a cell, in points
pub const CELL_PADDING: f64 = 5.0;

/// Font size of table text
const FONT_SIZE: f32 = 10.0;

/// Column offsets as cumulative sums of `widths` starting at `origin_x`
///
/// # Example
/// ```
/// use quotation::layout_columns;
/// assert_eq!(
///     layout_columns(&[200.0, 60.0, 60.0, 100.0, 100.0], 50.0),
///     vec![50.0, 250.0, 310.0, 370.0, 470.0]
/// );
/// ```
pub fn layout_columns(widths: &[f64], origin_x: f64) -> Vec<f64> {
    widths
        .iter()
        .scan(origin_x, |x, width| {
            let start = *x;
            *x += width;
            Some(start)
        })
        .collect()
}

/// Label of the VAT totals row, e.g. "VAT (16%)"
pub fn vat_label(rate: f64) -> String {
    format!("VAT ({}%)", format_grouped(rate, 2))
}

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl From<CellAlign> for Align {
    fn from(align: CellAlign) -> Self {
        match align {
            CellAlign::Left => Align::Left,
            CellAlign::Center => Align::Center,
            CellAlign::Right => Align::Right,
        }
    }
}

/// Line item field shown in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnField {
    Description,
    Units,
    Quantity,
    UnitPrice,
    /// The supplied amount, never recomputed
    Amount,
}

impl ColumnField {
    /// Cell text of `item` for this field
    pub fn cell(self, item: &LineItem, fraction_digits: u8) -> String {
        match self {
            ColumnField::Description => item.description.clone(),
            ColumnField::Units => item.units.clone(),
            ColumnField::Quantity => format_grouped(item.quantity, fraction_digits),
            ColumnField::UnitPrice => format_grouped(item.unit_price, fraction_digits),
            ColumnField::Amount => format_grouped(item.amount, fraction_digits),
        }
    }
}

/// One table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub field: ColumnField,
    pub title: String,
    pub width: f64,
    #[serde(default)]
    pub align: CellAlign,
}

impl Column {
    pub fn new(
        field: ColumnField,
        title: impl Into<String>,
        width: f64,
        align: CellAlign,
    ) -> Self {
        Self {
            field,
            title: title.into(),
            width,
            align,
        }
    }
}

/// Table geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    pub origin_x: f64,
    pub row_height: f64,
    pub columns: Vec<Column>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            row_height: 20.0,
            columns: vec![
                Column::new(ColumnField::Description, "Description", 200.0, CellAlign::Left),
                Column::new(ColumnField::Units, "Units", 60.0, CellAlign::Center),
                Column::new(ColumnField::Quantity, "Qty", 60.0, CellAlign::Center),
                Column::new(ColumnField::UnitPrice, "Unit Price", 100.0, CellAlign::Right),
                Column::new(ColumnField::Amount, "Amount", 100.0, CellAlign::Right),
            ],
        }
    }
}

/// Table bound to its columns and theme
pub struct TableLayout<'a> {
    columns: &'a [Column],
    offsets: Vec<f64>,
    row_height: f64,
    theme: &'a Theme,
}

impl<'a> TableLayout<'a> {
    pub fn new(config: &'a TableConfig, theme: &'a Theme) -> Self {
        let widths: Vec<f64> = config.columns.iter().map(|c| c.width).collect();
        Self {
            columns: &config.columns,
            offsets: layout_columns(&widths, config.origin_x),
            row_height: config.row_height,
            theme,
        }
    }

    /// Left edge of every column
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Right edge of the last column
    pub fn right_edge(&self) -> f64 {
        match (self.offsets.last(), self.columns.last()) {
            (Some(x), Some(column)) => x + column.width,
            _ => 0.0,
        }
    }

    /// Draw one row with its top edge at `y`
    ///
    /// Missing cells render empty; cells beyond the last column are ignored.
    pub fn render_row(
        &self,
        cells: &[String],
        y: f64,
        row_height: f64,
        style: RowStyle,
    ) -> Vec<DrawOp> {
        let cell_style = self.theme.cell_style(style);

        self.columns
            .iter()
            .zip(&self.offsets)
            .enumerate()
            .flat_map(|(i, (column, x))| {
                let text = cells.get(i).map(String::as_str).unwrap_or("");
                render_cell(
                    *x,
                    y,
                    column.width,
                    row_height,
                    text,
                    column.align.into(),
                    &cell_style,
                )
            })
            .collect()
    }

    /// Header row, standard items, then custom items, each in given order
    ///
    /// Returns the cursor at the bottom edge of the last row drawn.
    pub fn render_table(
        &self,
        state: LayoutState,
        items: &[LineItem],
        custom_items: &[LineItem],
        fraction_digits: u8,
    ) -> (LayoutState, Vec<DrawOp>) {
        debug!(
            items = items.len(),
            custom_items = custom_items.len(),
            "Laying out items table"
        );

        let titles: Vec<String> = self.columns.iter().map(|c| c.title.clone()).collect();
        let mut ops = self.render_row(&titles, state.y, self.row_height, RowStyle::Header);
        let mut state = state.advance(self.row_height);

        let rows = items
            .iter()
            .map(|item| (item, RowStyle::Item))
            .chain(custom_items.iter().map(|item| (item, RowStyle::CustomItem)));

        for (item, style) in rows {
            let cells = self.item_cells(item, fraction_digits);
            ops.extend(self.render_row(&cells, state.y, self.row_height, style));
            state = state.advance(self.row_height);
        }

        (state, ops)
    }

    /// Subtotal, VAT and Total rows starting at the cursor
    ///
    /// The label spans every column but the last; the value sits in the last.
    pub fn render_totals(
        &self,
        state: LayoutState,
        totals: &Totals,
        vat_label: &str,
        fraction_digits: u8,
    ) -> (LayoutState, Vec<DrawOp>) {
        let (Some(value_x), Some(value_column)) = (self.offsets.last(), self.columns.last())
        else {
            return (state, Vec::new());
        };
        let label_x = self.offsets[0];
        let label_width = value_x - label_x;
        let cell_style = self.theme.cell_style(RowStyle::Totals);

        let rows = [
            ("Subtotal", totals.sub_total),
            (vat_label, totals.vat),
            ("Total", totals.total),
        ];

        let mut ops = Vec::new();
        let mut state = state;
        for (label, value) in rows {
            ops.extend(render_cell(
                label_x,
                state.y,
                label_width,
                self.row_height,
                label,
                Align::Right,
                &cell_style,
            ));
            ops.extend(render_cell(
                *value_x,
                state.y,
                value_column.width,
                self.row_height,
                &format_grouped(value, fraction_digits),
                value_column.align.into(),
                &cell_style,
            ));
            state = state.advance(self.row_height);
        }

        (state, ops)
    }

    /// Cell texts of an item row, one per column
    fn item_cells(&self, item: &LineItem, fraction_digits: u8) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.field.cell(item, fraction_digits))
            .collect()
    }
}

fn render_cell(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    text: &str,
    align: Align,
    style: &CellStyle,
) -> Vec<DrawOp> {
    let mut ops = vec![DrawOp::Rect {
        x,
        y,
        width,
        height,
        fill: style.fill,
        stroke: style.stroke,
    }];

    let text_style = if style.bold {
        TextStyle::bold(FONT_SIZE, style.text)
    } else {
        TextStyle::regular(FONT_SIZE, style.text)
    };

    let inner_width = (width - 2.0 * CELL_PADDING).max(0.0);
    let text = truncate_to_width(text_style.font, text_style.size, text, inner_width);
    if text.is_empty() {
        return ops;
    }

    let anchor = match align {
        Align::Left => x + CELL_PADDING,
        Align::Center => x + width / 2.0,
        Align::Right => x + width - CELL_PADDING,
    };

    ops.push(DrawOp::Text {
        text,
        x: anchor,
        y: y + text_style.centered_baseline(height),
        align,
        style: text_style,
    });

    ops
}
