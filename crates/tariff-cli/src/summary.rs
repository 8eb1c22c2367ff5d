use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tariff_model::{SourceSummary, TariffRecord, TariffTable};

use crate::types::{LafferResult, LoadResult};

pub fn print_load_summary(result: &LoadResult) {
    println!("{}", source_table(&result.sources));
    println!("Rows: {}", result.table.len());
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
}

pub fn print_records(table: &TariffTable) {
    if table.is_empty() {
        println!("No matching rows.");
        return;
    }
    println!("{}", record_table(table));
}

pub fn print_laffer(result: &LafferResult) {
    println!(
        "Imports: {}  Elasticity: {}",
        result.import_value, result.elasticity
    );
    println!("{}", laffer_table(result));
    if let Some(best) = &result.best {
        println!(
            "Revenue peaks at rate {} ({})",
            format_rate(best.rate),
            format_amount(best.revenue)
        );
    }
}

/// Per-file summary with a total row.
pub fn source_table(sources: &[SourceSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Year"),
        header_cell("Rows"),
        header_cell("Rated"),
        header_cell("Mean rate"),
        header_cell("Max rate"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_rows = 0usize;
    let mut total_rated = 0usize;
    for source in sources {
        total_rows += source.rows;
        total_rated += source.rated_rows;
        table.add_row(vec![
            Cell::new(&source.source_file).fg(Color::Blue),
            optional_cell(source.source_year),
            Cell::new(source.rows),
            Cell::new(source.rated_rows),
            optional_cell(source.mean_rate.map(format_rate)),
            optional_cell(source.max_rate.map(format_rate)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(total_rated).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

/// The typed columns of each row.
pub fn record_table(records: &TariffTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("HTS8"),
        header_cell("Ad valorem"),
        header_cell("AVE"),
        header_cell("End date"),
        header_cell("File"),
        header_cell("Year"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for record in records {
        table.add_row(record_row(record));
    }
    table
}

fn record_row(record: &TariffRecord) -> Vec<Cell> {
    vec![
        Cell::new(&record.hts8).add_attribute(Attribute::Bold),
        optional_cell(record.mfn_ad_val_rate.map(format_rate)),
        optional_cell(record.mfn_ave.map(format_rate)),
        optional_cell(record.end_effective_date),
        Cell::new(&record.source_file),
        optional_cell(record.source_year),
    ]
}

pub fn laffer_table(result: &LafferResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rate"),
        header_cell("Imports"),
        header_cell("Revenue"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for point in &result.points {
        let is_best = result.best.as_ref() == Some(point);
        let revenue = Cell::new(format_amount(point.revenue));
        table.add_row(vec![
            Cell::new(format_rate(point.rate)),
            Cell::new(format_amount(point.imports)),
            if is_best {
                revenue.fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                revenue
            },
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
