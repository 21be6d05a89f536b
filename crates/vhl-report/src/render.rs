//! Aligned text rendering for the terminal.

use comfy_table::presets::NOTHING;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::table::ResultTable;

/// Builds the terminal table: plain aligned text with a header row, no
/// borders and no index column. Estimates are right-aligned.
pub fn render_table(table: &ResultTable) -> Table {
    let mut out = Table::new();
    out.load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(table.headers().into_iter().map(header_cell));
    for index in 1..=5 {
        align_column(&mut out, index, CellAlignment::Right);
    }
    for row in &table.rows {
        out.add_row(vec![
            Cell::new(&row.predictor),
            Cell::new(format!("{:.2}", row.odds_ratio)),
            Cell::new(format!("{:.2}", row.ci_low)),
            Cell::new(format!("{:.2}", row.ci_high)),
            p_value_cell(row.p_value),
            Cell::new(row.strata),
        ]);
    }
    out
}

/// Renders `table` to a string.
pub fn render_text(table: &ResultTable) -> String {
    render_table(table).to_string()
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn p_value_cell(p: f64) -> Cell {
    let cell = Cell::new(format!("{p:.4}"));
    if p < 0.05 {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
