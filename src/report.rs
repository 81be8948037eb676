//! Terminal table and CSV rendering of extracted change records.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::config::ColumnConfig;
use crate::error::TftldrError;
use crate::extract::ChangeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    ChangeType,
    ResourceName,
    ChangedParams,
    ResourceType,
    ResourceAddress,
}

const COLUMN_ORDER: [Column; 5] = [
    Column::ChangeType,
    Column::ResourceName,
    Column::ChangedParams,
    Column::ResourceType,
    Column::ResourceAddress,
];

impl Column {
    fn table_header(self) -> &'static str {
        match self {
            Column::ChangeType => "Type",
            Column::ResourceName => "Name",
            Column::ChangedParams => "Changed Parameters",
            Column::ResourceType => "Resource Type",
            Column::ResourceAddress => "Resource Address",
        }
    }

    fn csv_header(self) -> &'static str {
        match self {
            Column::ChangeType => "Change Type",
            Column::ResourceName => "Resource Name",
            Column::ChangedParams => "Changed Parameters",
            Column::ResourceType => "Resource Type",
            Column::ResourceAddress => "Terraform Resource Address",
        }
    }

    fn is_visible(self, columns: &ColumnConfig) -> bool {
        match self {
            Column::ChangeType => columns.change_type,
            Column::ResourceName => columns.resource_name,
            Column::ChangedParams => columns.changed_params,
            Column::ResourceType => columns.resource_type,
            Column::ResourceAddress => columns.resource_address,
        }
    }

    fn cell(self, record: &ChangeRecord) -> String {
        match self {
            Column::ChangeType => record.change_type.to_uppercase(),
            Column::ResourceName => record.resource_name.clone(),
            Column::ChangedParams => record.changed_params.clone(),
            Column::ResourceType => record.resource_type.clone(),
            Column::ResourceAddress => record.resource_address.clone(),
        }
    }
}

fn visible_columns(columns: &ColumnConfig) -> Vec<Column> {
    COLUMN_ORDER
        .into_iter()
        .filter(|column| column.is_visible(columns))
        .collect()
}

/// Renders the records as an ASCII table. The change type cell is coloured
/// by action when `color` is set.
pub fn render_table(records: &[ChangeRecord], columns: &ColumnConfig, color: bool) -> String {
    let visible = visible_columns(columns);
    if visible.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    builder.push_record(visible.iter().map(|column| column.table_header().to_string()));

    for record in records {
        builder.push_record(visible.iter().map(|column| {
            let text = column.cell(record);
            if color && *column == Column::ChangeType {
                paint(&record.change_type, text)
            } else {
                text
            }
        }));
    }

    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

fn paint(change_type: &str, text: String) -> String {
    match change_type {
        "create" => text.green().to_string(),
        "update" => text.yellow().to_string(),
        "delete" => text.red().to_string(),
        _ => text,
    }
}

/// Writes the records as CSV, honouring the same column visibility as the
/// table. Never coloured.
pub fn write_csv<W: Write>(
    writer: W,
    records: &[ChangeRecord],
    columns: &ColumnConfig,
) -> Result<(), TftldrError> {
    let visible = visible_columns(columns);
    if visible.is_empty() {
        return Ok(());
    }

    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(visible.iter().map(|column| column.csv_header()))?;
    for record in records {
        csv.write_record(visible.iter().map(|column| column.cell(record)))?;
    }

    csv.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the records to it as CSV.
pub fn export_csv(
    path: &Path,
    records: &[ChangeRecord],
    columns: &ColumnConfig,
) -> Result<(), TftldrError> {
    let file = File::create(path)?;
    write_csv(file, records, columns)?;
    tracing::debug!(path = %path.display(), count = records.len(), "exported CSV");
    Ok(())
}

/// Per-action record counts for the closing summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl Summary {
    pub fn from_records(records: &[ChangeRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut summary, record| {
                match record.change_type.as_str() {
                    "create" => summary.create += 1,
                    "update" => summary.update += 1,
                    "delete" => summary.delete += 1,
                    _ => {}
                }
                summary
            })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plan: {} to create, {} to update, {} to delete.",
            self.create, self.update, self.delete
        )
    }
}
