use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use notes_cli::pipeline::ExtractSummary;

pub fn print_summary(summary: &ExtractSummary) {
    println!("Input: {}", summary.input_path.display());
    println!("Output: {}", summary.output_path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(summary.rows_read)]);
    table.add_row(vec![
        Cell::new("Discharge summaries written"),
        count_cell(summary.records_written, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Other categories skipped"),
        dim_cell(summary.rows_skipped),
    ]);
    table.add_row(vec![
        Cell::new("Duration").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2?}", summary.duration)),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
