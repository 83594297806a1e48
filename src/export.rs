// src/export.rs
use std::io::Write;

use serde::Serialize;

use crate::config::options::ExportOptions;
use crate::error::Result;

/// Serialize rows as CSV/TSV to any writer. Column names come from the row
/// type's field names.
pub fn write_table<W: Write, T: Serialize>(w: W, rows: &[T], export: &ExportOptions) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(export.format.delim())
        .has_headers(export.include_headers)
        .from_writer(w);
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Full export text, e.g. for copying to the clipboard or printing.
pub fn to_export_string<T: Serialize>(rows: &[T], export: &ExportOptions) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_table(&mut buf, rows, export)?;

    Ok(match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    })
}
