use std::io;
use std::path::Path;
use std::string::FromUtf8Error;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;
use tracing::info;

use crate::io::atomic_write_string;
use crate::state::projection::ProjectedView;

#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output is not UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// Serializes the visible columns of a projected view. The first line is the header
/// row; every body row follows in display order. No trailing newline.
pub fn to_csv(view: &ProjectedView) -> Result<String, CsvExportError> {
    let columns = view.visible_columns();
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let header: Vec<String> = columns
        .iter()
        .map(|&column| match view.cell(0, column).filter(|cell| !cell.is_empty()) {
            Some(cell) => cell.display(),
            None => format!("Column {}", column + 1),
        })
        .collect();
    writer.write_record(&header)?;

    for row in view.header_rows()..view.row_count() {
        writer.write_record(columns.iter().map(|&column| view.display(row, column)))?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    let mut content = String::from_utf8(bytes)?;
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

/// `"Q3 Orders"` exports as `Q3_Orders_export.csv`.
pub fn export_file_name(sheet_name: &str) -> String {
    format!("{}_export.csv", sheet_name.split_whitespace().collect::<Vec<_>>().join("_"))
}

pub fn save_csv(path: &Path, content: &str) -> Result<(), CsvExportError> {
    atomic_write_string(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "exported csv");
    Ok(())
}
