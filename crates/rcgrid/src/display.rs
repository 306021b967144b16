//! Text rendering of a table as a grid
//!
//! Each row from 0 to the area's last row becomes one line, with the cells of
//! columns 0 to the area's last column joined by `", "`. Absent cells render as
//! empty fields.

use crate::{Area, Cell, Coordinates, Table};

/// Render cached values over `area`
pub fn render_values(table: &Table, area: Area) -> String {
    render(table, area, |cell| cell.cached_value.to_string())
}

/// Render expressions over `area`
pub fn render_expressions(table: &Table, area: Area) -> String {
    render(table, area, |cell| cell.expression.clone())
}

/// Render cached values over [`Table::bounds`]
pub fn render_all_values(table: &Table) -> String {
    if table.is_empty() {
        return String::new();
    }
    render_values(table, table.bounds())
}

/// Render expressions over [`Table::bounds`]
pub fn render_all_expressions(table: &Table) -> String {
    if table.is_empty() {
        return String::new();
    }
    render_expressions(table, table.bounds())
}

fn render<F>(table: &Table, area: Area, field: F) -> String
where
    F: Fn(&Cell) -> String,
{
    let mut out = String::new();
    for row in 0..=area.max_row() {
        for col in 0..=area.max_col() {
            if col > 0 {
                out.push_str(", ");
            }
            if let Ok(cell) = table.cell(Coordinates::new(row, col)) {
                out.push_str(&field(cell));
            }
        }
        out.push('\n');
    }
    out
}
