// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::config::consts::{AGE_COHORTS_STEM, LEAGUE_COUNTS_STEM, MERGED_FILE_STEM, TEAM_SUMMARY_STEM};
use crate::config::options::ExportOptions;
use crate::error::Result;
use crate::export::write_table;
use crate::model::MergedRecord;
use crate::report;

/// Write the merged table and, when enabled, the summary tables into
/// `export.out_dir`. Returns the paths written, merged table first.
pub fn write_outputs(export: &ExportOptions, merged: &[MergedRecord]) -> Result<Vec<PathBuf>> {
    ensure_directory(&export.out_dir)?;

    let mut written = vec![write_table_file(&export.out_path(MERGED_FILE_STEM), merged, export)?];

    if export.summaries {
        written.push(write_table_file(
            &export.out_path(TEAM_SUMMARY_STEM),
            &report::team_summary(merged),
            export,
        )?);
        written.push(write_table_file(
            &export.out_path(AGE_COHORTS_STEM),
            &report::age_cohorts(merged),
            export,
        )?);
        written.push(write_table_file(
            &export.out_path(LEAGUE_COUNTS_STEM),
            &report::league_counts(merged),
            export,
        )?);
    }
    Ok(written)
}

/// Create/truncate `path` and serialize `rows` into it.
pub fn write_table_file<T: Serialize>(path: &Path, rows: &[T], export: &ExportOptions) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let out = BufWriter::new(File::create(path)?);
    write_table(out, rows, export)?;
    log::debug!("Export: {} rows → {}", rows.len(), path.display());
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let msg = format!("Path exists but is not a directory: {}", dir.display());
        return Err(io::Error::other(msg).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
