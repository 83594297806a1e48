// src/normalize.rs
//
// Raw PDF tables → PlayerRecord rows.
//
// Steps, in order: concatenate tables, map source headers onto canonical
// fields, apply team aliases, split "Club (LGE)", parse birth dates, derive age.

use std::{collections::BTreeMap, path::Path};

use chrono::NaiveDate;

use crate::config::consts::{DAYS_PER_YEAR, DEFAULT_TEAM_ALIASES};
use crate::core::sanitize::{header_key, normalize_ws};
use crate::error::{PipelineError, Result};
use crate::model::{PlayerRecord, Position, RawTable};

/* ---------------- Team aliases ---------------- */

/// Static lookup from a source-specific team label to the canonical spelling.
/// Labels not in the table pass through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasTable {
    map: BTreeMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let mut t = AliasTable::empty();
        for (alias, canonical) in DEFAULT_TEAM_ALIASES {
            t.insert(alias, canonical);
        }
        t
    }
}

impl AliasTable {
    pub fn empty() -> Self {
        Self { map: BTreeMap::new() }
    }

    pub fn insert(&mut self, alias: &str, canonical: &str) {
        self.map.insert(normalize_ws(alias), normalize_ws(canonical));
    }

    pub fn resolve(&self, team: &str) -> String {
        let t = normalize_ws(team);
        match self.map.get(&t) {
            Some(c) => c.clone(),
            None => t,
        }
    }

    pub fn len(&self) -> usize { self.map.len() }
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Merge `alias,canonical` pairs from a two-column CSV file over the
    /// current entries. An optional `alias,canonical` header line is skipped.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        let mut added = 0;
        for rec in rdr.records() {
            let rec = rec?;
            let (Some(alias), Some(canonical)) = (rec.get(0), rec.get(1)) else {
                continue;
            };
            if alias.trim().eq_ignore_ascii_case("alias") || alias.trim().is_empty() {
                continue;
            }
            self.insert(alias, canonical);
            added += 1;
        }
        log::debug!("Aliases: {added} entries from {}", path.display());
        Ok(added)
    }
}

/* ---------------- Column mapping ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Team,
    ShirtNumber,
    Position,
    Name,
    BirthDate,
    ShirtLabel,
    Club,
    Height,
    Weight,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Team, Field::ShirtNumber, Field::Position, Field::Name, Field::BirthDate,
        Field::ShirtLabel, Field::Club, Field::Height, Field::Weight,
    ];

    /// Height and weight are missing from some revisions of the document.
    pub fn required(self) -> bool {
        !matches!(self, Field::Height | Field::Weight)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Canonical field → header spellings accepted for it (compared after
/// lower-casing and whitespace collapsing).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    spellings: BTreeMap<Field, Vec<String>>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        let table: [(Field, &[&str]); 9] = [
            (Field::Team, &["team", "country", "association"]),
            (Field::ShirtNumber, &["#", "no", "no.", "number", "shirt number"]),
            (Field::Position, &["pos", "pos.", "position"]),
            (Field::Name, &["fifa popular name", "popular name", "name", "player"]),
            (Field::BirthDate, &["birth date", "date of birth", "dob"]),
            (Field::ShirtLabel, &["shirt name", "name on shirt"]),
            (Field::Club, &["club"]),
            (Field::Height, &["height", "height (cm)"]),
            (Field::Weight, &["weight", "weight (kg)"]),
        ];
        let mut spellings = BTreeMap::new();
        for (field, names) in table {
            spellings.insert(field, names.iter().map(|n| s!(*n)).collect());
        }
        Self { spellings }
    }
}

impl ColumnMap {
    pub fn with_spelling(mut self, field: Field, header: &str) -> Self {
        self.spellings.entry(field).or_default().push(header_key(header));
        self
    }

    /// Locate each canonical field in a header row.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnIndex> {
        let keys: Vec<String> = headers.iter().map(|h| header_key(h)).collect();
        let mut slots = [None; 9];
        for field in Field::ALL {
            let accepted = self.spellings.get(&field).map(Vec::as_slice).unwrap_or(&[]);
            slots[field.slot()] = keys.iter().position(|k| accepted.iter().any(|a| a == k));
            if slots[field.slot()].is_none() && field.required() {
                return Err(PipelineError::source_format(format!(
                    "no column for {field:?} in headers {headers:?}"
                )));
            }
        }
        Ok(ColumnIndex { slots })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnIndex {
    slots: [Option<usize>; 9],
}

impl ColumnIndex {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.slots[field.slot()]
    }

    fn cell<'a>(&self, row: &'a [String], field: Field) -> &'a str {
        self.get(field).and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
    }
}

/* ---------------- Pipeline ---------------- */

/// Normalize the raw tables into one PlayerRecord per player, in table order.
pub fn normalize(
    tables: &[RawTable],
    columns: &ColumnMap,
    aliases: &AliasTable,
    reference: NaiveDate,
) -> Result<Vec<PlayerRecord>> {
    let headers = tables.first().map(|t| t.headers.as_slice()).unwrap_or(&[]);
    let idx = columns.resolve(headers)?;
    let rows = concat_tables(tables)?;

    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        out.push(normalize_row(i, row, &idx, aliases, reference)?);
    }
    log::info!("Normalize: {} players from {} tables", out.len(), tables.len());
    Ok(out)
}

/// Flatten all tables into one row list. Blank rows are dropped, short rows
/// padded to the header width; a row wider than its header is malformed.
/// Every table must hold the same number of rows, so the flat length is
/// rows-per-table times table count.
pub fn concat_tables(tables: &[RawTable]) -> Result<Vec<Vec<String>>> {
    let mut flat = Vec::new();
    let mut per_table = Vec::with_capacity(tables.len());

    for (t, table) in tables.iter().enumerate() {
        let width = table.headers.len();
        let before = flat.len();
        for (r, row) in table.rows.iter().enumerate() {
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            if row.len() > width {
                return Err(PipelineError::source_format(format!(
                    "table {t} row {r} has {} cells, header has {width}",
                    row.len()
                )));
            }
            let mut padded = row.clone();
            padded.resize(width, s!());
            flat.push(padded);
        }
        per_table.push(flat.len() - before);
    }

    if let Some(&first) = per_table.first() {
        if let Some(t) = per_table.iter().position(|&n| n != first) {
            return Err(PipelineError::source_format(format!(
                "table {t} has {} rows, table 0 has {first} (sizes {per_table:?})",
                per_table[t]
            )));
        }
        debug_assert_eq!(flat.len(), first * per_table.len());
    }
    Ok(flat)
}

fn normalize_row(
    i: usize,
    row: &[String],
    idx: &ColumnIndex,
    aliases: &AliasTable,
    reference: NaiveDate,
) -> Result<PlayerRecord> {
    let number_txt = idx.cell(row, Field::ShirtNumber);
    let shirt_number = parse_int(number_txt).ok_or_else(|| {
        PipelineError::source_format(format!("row {i}: shirt number {number_txt:?}"))
    })?;

    let date_txt = idx.cell(row, Field::BirthDate);
    let birth_date = parse_birth_date(date_txt)
        .ok_or_else(|| PipelineError::DateParse { value: s!(date_txt), row: i })?;

    let (club, league) = split_club(idx.cell(row, Field::Club));

    Ok(PlayerRecord {
        team: aliases.resolve(idx.cell(row, Field::Team)),
        shirt_number,
        position: Position::parse(idx.cell(row, Field::Position)),
        display_name: normalize_ws(idx.cell(row, Field::Name)),
        birth_date,
        shirt_label: normalize_ws(idx.cell(row, Field::ShirtLabel)),
        club,
        league,
        height: parse_measure(idx.cell(row, Field::Height)),
        weight: parse_measure(idx.cell(row, Field::Weight)),
        age: age_at(birth_date, reference),
    })
}

/* ---------------- Field parsers ---------------- */

/// Split a composite "Club Name (LGE)" into `("Club Name", "LGE")`.
///
/// Grammar, first match wins:
/// - `club (league)` or `club [league]`: the last bracketed token at the end
///   is the league; spaces, `-` and `,` between it and the club are dropped.
/// - `club LGE`: no delimiters, but a trailing three-letter upper-case token.
/// - `club`: no league; league is empty.
pub fn split_club(composite: &str) -> (String, String) {
    let s = normalize_ws(composite);

    for (open, close) in [('(', ')'), ('[', ']')] {
        if s.ends_with(close) {
            if let Some(o) = s.rfind(open) {
                let league = s[o + open.len_utf8()..s.len() - close.len_utf8()].trim();
                return (trim_club(&s[..o]), s!(league));
            }
        }
    }

    if let Some((head, tail)) = s.rsplit_once(' ') {
        if tail.len() == 3 && tail.chars().all(|c| c.is_ascii_uppercase()) {
            return (trim_club(head), s!(tail));
        }
    }
    (s, s!())
}

fn trim_club(s: &str) -> String {
    s!(s.trim_matches(|c: char| c.is_whitespace() || c == '-' || c == ','))
}

const DATE_FORMATS: &[&str] = &[
    "%d.%m.%Y", "%d-%m-%Y", "%d/%m/%Y", "%d-%b-%Y", "%d %b %Y", "%d %B %Y",
];

/// Day-month-year in any of the common spellings.
pub fn parse_birth_date(s: &str) -> Option<NaiveDate> {
    let t = normalize_ws(s);
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(&t, f).ok())
}

/// Canonical text form; `parse_birth_date` reads it back unchanged.
pub fn format_birth_date(d: NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}

/// Elapsed days over the mean Gregorian year length.
pub fn age_at(birth: NaiveDate, reference: NaiveDate) -> f64 {
    reference.signed_duration_since(birth).num_days() as f64 / DAYS_PER_YEAR
}

/// Integer cell; tolerates float spellings of whole numbers ("7.0").
pub fn parse_int(s: &str) -> Option<u32> {
    let t = s.trim();
    if let Ok(n) = t.parse::<u32>() {
        return Some(n);
    }
    let f = t.parse::<f64>().ok()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as u32)
}

fn parse_measure(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() { return None; }
    t.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}
