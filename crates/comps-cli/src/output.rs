//! Terminal tables for `comps list` and `comps show`.

use chrono::{DateTime, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use comps_core::CompSetView;
use comps_model::{CompSetListItem, CompSetStats, notes};

pub fn list_table(items: &[CompSetListItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Comp Set"),
        header_cell("Properties"),
        header_cell("Created"),
        header_cell("Updated"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(item.property_count),
            timestamp_cell(item.created_at),
            timestamp_cell(item.updated_at),
        ]);
    }
    table
}

pub fn comp_set_table(view: &CompSetView) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Property"),
        header_cell("Address"),
        header_cell("Type"),
        header_cell("Units"),
        header_cell("Year Built"),
        header_cell("Occupancy"),
        header_cell("Distance"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for property in &view.properties {
        let record = &property.record;
        let info = &record.basic_info;
        let name = if property.data_not_found {
            Cell::new(format!("{} (no data)", record.name)).fg(Color::Yellow)
        } else {
            Cell::new(&record.name)
        };
        table.add_row(vec![
            name,
            text_cell(&record.address),
            text_cell(&info.property_type),
            optional_cell(info.total_units),
            optional_cell(info.year_built),
            optional_cell(notes::occupancy(record).map(|rate| format!("{rate}%"))),
            optional_cell(notes::distance(record)),
        ]);
    }
    table
}

pub fn stats_table(stats: &CompSetStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Properties", Some(stats.total_properties.to_string())),
        ("With full data", Some(stats.properties_with_full_data.to_string())),
        (
            "Missing data",
            Some(stats.properties_with_missing_data.to_string()),
        ),
        ("Total units", Some(stats.total_units.to_string())),
        (
            "Avg occupancy",
            stats.avg_occupancy.map(|value| format!("{value:.1}%")),
        ),
        (
            "Avg rent/SF",
            stats.avg_rent_per_sf.map(|value| format!("${value:.2}")),
        ),
        (
            "Avg year built",
            stats.avg_year_built.map(|year| year.to_string()),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), optional_cell(value)]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value.to_string()),
        None => dim_cell("-"),
    }
}

fn timestamp_cell(value: Option<DateTime<Utc>>) -> Cell {
    match value {
        Some(at) => Cell::new(at.format("%Y-%m-%d %H:%M").to_string()),
        None => dim_cell("-"),
    }
}
