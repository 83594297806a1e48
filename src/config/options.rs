// src/config/options.rs
use std::path::PathBuf;

use chrono::NaiveDate;

use super::consts::*;
use crate::core::net::Locator;
use crate::model::SquadShape;
use crate::normalize::{AliasTable, ColumnMap};
use crate::reconcile::JoinPolicy;

#[derive(Clone, Debug, Default)]
pub struct AppOptions {
    pub pipeline: PipelineOptions,
    pub export: ExportOptions,
}

/// Everything the pipeline itself needs: where the two sources live and how
/// to read and join them.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub pdf: Locator,
    pub web: Locator,
    /// Tournament opening day; ages are measured up to this date.
    pub reference_date: NaiveDate,
    pub shape: SquadShape,
    pub aliases: AliasTable,
    pub columns: ColumnMap,
    pub selectors: WebSelectors,
    pub join_policy: JoinPolicy,
    /// Compare PDF and web names on matched rows and warn on disagreement.
    pub cross_check: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            pdf: Locator::parse(DEFAULT_PDF_URL),
            web: Locator::parse(DEFAULT_WEB_URL),
            reference_date: tournament_start(),
            shape: SquadShape::default(),
            aliases: AliasTable::default(),
            columns: ColumnMap::default(),
            selectors: WebSelectors::default(),
            join_policy: JoinPolicy::KeepUnmatched,
            cross_check: true,
        }
    }
}

pub fn tournament_start() -> NaiveDate {
    let (y, m, d) = TOURNAMENT_START;
    // Constant date; a bad constant is a build-time mistake, fall back to the epoch.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// CSS selectors and text filters for the squads page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebSelectors {
    pub headings: String,
    pub shirt_numbers: String,
    pub names: String,
    pub caps: String,
    /// Headings matching this pattern are group sub-headers, not team names.
    pub group_pattern: String,
    /// Link texts that mark a role (captaincy) rather than a player.
    pub role_markers: Vec<String>,
}

impl Default for WebSelectors {
    fn default() -> Self {
        Self {
            headings: s!(SEL_HEADINGS),
            shirt_numbers: s!(SEL_SHIRT_NUMBERS),
            names: s!(SEL_NAMES),
            caps: s!(SEL_CAPS),
            group_pattern: s!(GROUP_HEADING_PATTERN),
            role_markers: ROLE_MARKERS.iter().map(|m| s!(*m)).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
    /// Also write the summary tables next to the merged table.
    pub summaries: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
            summaries: true,
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/<stem>.<ext>`
    pub fn out_path(&self, stem: &str) -> PathBuf {
        self.out_dir.join(join!(stem, ".", self.format.ext()))
    }
}
