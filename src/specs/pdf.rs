// src/specs/pdf.rs
//! Squad-list PDF: one table per team, every table with the same header row.
//!
//! The actual cell extraction is a black box behind [`TableExtractor`]. Two
//! back-ends ship with the crate:
//! - [`LopdfExtractor`] reads the PDF text layer page by page and splits lines
//!   into cells on tabs or runs of two or more spaces.
//! - [`CsvDirExtractor`] reads a directory of pre-extracted tables, one CSV
//!   file per table, header row first.
//!
//! [`load_tables`] is the loader contract on top: at least one table, and
//! identical headers everywhere.

use std::{fs, path::Path, sync::LazyLock};

use lopdf::Document;
use regex::Regex;

use crate::core::net::{self, Locator};
use crate::core::sanitize::{header_key, normalize_ws};
use crate::error::{PipelineError, Result};
use crate::model::RawTable;

pub trait TableExtractor {
    /// One raw table per logical page/group, in document order.
    fn extract(&self, loc: &Locator) -> Result<Vec<RawTable>>;
}

/// Fetch, extract, and check the shape contract.
pub fn load_tables(extractor: &dyn TableExtractor, loc: &Locator) -> Result<Vec<RawTable>> {
    let tables = extractor.extract(loc)?;
    let first = tables
        .first()
        .ok_or_else(|| PipelineError::source_format(format!("no tables extracted from {loc}")))?;

    let expected: Vec<String> = first.headers.iter().map(|h| header_key(h)).collect();
    for (i, t) in tables.iter().enumerate().skip(1) {
        let got: Vec<String> = t.headers.iter().map(|h| header_key(h)).collect();
        if got != expected {
            return Err(PipelineError::source_format(format!(
                "table {i} headers {:?} differ from table 0 headers {:?}",
                t.headers, first.headers
            )));
        }
    }

    log::info!("PDF: {} tables from {loc}", tables.len());
    Ok(tables)
}

/// Picks a back-end from the locator: directories are CSV tables, anything
/// else is a PDF.
pub struct DefaultExtractor;

impl TableExtractor for DefaultExtractor {
    fn extract(&self, loc: &Locator) -> Result<Vec<RawTable>> {
        if loc.is_dir() {
            CsvDirExtractor.extract(loc)
        } else {
            LopdfExtractor.extract(loc)
        }
    }
}

/* ---------------- PDF text layer ---------------- */

pub struct LopdfExtractor;

impl TableExtractor for LopdfExtractor {
    fn extract(&self, loc: &Locator) -> Result<Vec<RawTable>> {
        let bytes = net::fetch_bytes(loc)?;
        let doc = Document::load_mem(&bytes)?;
        drop(bytes);

        let mut tables = Vec::new();
        for &page in doc.get_pages().keys() {
            let text = doc.extract_text(&[page])?;
            match table_from_text(&text) {
                Some(t) => tables.push(t),
                None => log::debug!("PDF: page {page} has no table, skipped"),
            }
        }
        Ok(tables)
    }
}

/// First line with more than one cell is the header; every later multi-cell
/// line is a row. Single-cell lines (titles, footers) are ignored.
pub fn table_from_text(text: &str) -> Option<RawTable> {
    let mut lines = text.lines().map(split_cells).filter(|c| c.len() > 1);
    let headers = lines.next()?;
    let rows: Vec<Vec<String>> = lines.collect();
    Some(RawTable::new(headers, rows))
}

static CELL_SEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t|\s{2,}").expect("valid cell separator regex"));

fn split_cells(line: &str) -> Vec<String> {
    CELL_SEP_RE
        .split(line)
        .map(normalize_ws)
        .filter(|c| !c.is_empty())
        .collect()
}

/* ---------------- Pre-extracted CSV tables ---------------- */

pub struct CsvDirExtractor;

impl TableExtractor for CsvDirExtractor {
    fn extract(&self, loc: &Locator) -> Result<Vec<RawTable>> {
        let dir = match loc {
            Locator::Path(p) if p.is_dir() => p,
            _ => return Err(PipelineError::source_format(format!("{loc} is not a directory"))),
        };

        let mut files: Vec<_> = fs::read_dir(dir)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("csv"))
            .collect();
        files.sort();

        files.iter().map(|p| read_csv_table(p)).collect()
    }
}

fn read_csv_table(path: &Path) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers = rdr.headers()?.iter().map(normalize_ws).collect();
    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?.iter().map(|c| s!(c.trim())).collect());
    }
    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<RawTable>);
    impl TableExtractor for Fixed {
        fn extract(&self, _loc: &Locator) -> Result<Vec<RawTable>> {
            Ok(self.0.clone())
        }
    }

    fn table(headers: &[&str]) -> RawTable {
        RawTable::new(headers.iter().map(|h| s!(*h)).collect(), vec![])
    }

    #[test]
    fn zero_tables_is_source_format() {
        let err = load_tables(&Fixed(vec![]), &Locator::parse("x.pdf")).unwrap_err();
        assert!(matches!(err, PipelineError::SourceFormat(_)));
    }

    #[test]
    fn mismatched_headers_are_source_format() {
        let ex = Fixed(vec![table(&["Team", "#"]), table(&["Team", "No"])]);
        let err = load_tables(&ex, &Locator::parse("x.pdf")).unwrap_err();
        assert!(err.to_string().contains("table 1 headers"));
    }

    #[test]
    fn headers_compare_whitespace_and_case_insensitively() {
        let ex = Fixed(vec![table(&["Birth Date", "#"]), table(&["birth  date ", "#"])]);
        assert_eq!(load_tables(&ex, &Locator::parse("x.pdf")).unwrap().len(), 2);
    }

    #[test]
    fn table_from_text_splits_on_wide_gaps() {
        let text = "Argentina\n\
                    Team  #  Pos.  FIFA Popular Name\n\
                    Argentina  1  GK  Nahuel GUZMAN\n\
                    Page 1\n\
                    Argentina\t2\tDF\tGabriel MERCADO\n";
        let t = table_from_text(text).unwrap();
        assert_eq!(t.headers, vec!["Team", "#", "Pos.", "FIFA Popular Name"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1], vec!["Argentina", "2", "DF", "Gabriel MERCADO"]);
    }

    #[test]
    fn csv_dir_reads_one_table_per_file_in_name_order() {
        let mut dir = std::env::temp_dir();
        dir.push("squad_scrape_csv_dir");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.csv"), "Team,#\nBrazil,1\n").unwrap();
        fs::write(dir.join("a.csv"), "Team,#\nArgentina,1\nArgentina,2\n").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let tables = CsvDirExtractor.extract(&Locator::Path(dir)).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[1].rows[0], vec!["Brazil", "1"]);
    }
}
