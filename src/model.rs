// src/model.rs
//
// Row types flowing through the pipeline, in order:
//   RawTable  (PDF extractor output, untyped text cells)
//   PlayerRecord (normalized PDF row)      WebRecord (scraped web row)
//                     \                    /
//                      MergedRecord (left join on team + shirt number)

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// One table as handed back by a PDF extractor: a header row plus ragged
/// rows of text cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    GK,
    DF,
    MF,
    FW,
    /// Anything the source printed that is not one of the four codes.
    /// Kept so the validator can name it instead of the normalizer choking.
    Unknown(String),
}

impl Position {
    pub fn parse(code: &str) -> Self {
        let c = code.trim().to_ascii_uppercase();
        match c.as_str() {
            "GK" => Position::GK,
            "DF" => Position::DF,
            "MF" => Position::MF,
            "FW" => Position::FW,
            _ => Position::Unknown(c),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Position::GK => "GK",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
            Position::Unknown(c) => c,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Position::Unknown(_))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.code())
    }
}

/// Normalized PDF row, one per player.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub team: String,
    pub shirt_number: u32,
    pub position: Position,
    pub display_name: String,
    pub birth_date: NaiveDate,
    pub shirt_label: String,
    pub club: String,
    pub league: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    /// Fractional years between `birth_date` and the tournament's opening day.
    pub age: f64,
}

/// Row assembled from the squads web page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WebRecord {
    pub shirt_number: u32,
    pub display_name: String,
    pub team: String,
    pub caps: u32,
}

/// Final tidy row. `display_name` and `caps` come from the web side and are
/// `None` when no web row shared the `(team, shirt_number)` key.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MergedRecord {
    pub team: String,
    pub shirt_number: u32,
    pub position: Position,
    pub display_name: Option<String>,
    pub birth_date: NaiveDate,
    pub shirt_label: String,
    pub club: String,
    pub league: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: f64,
    pub caps: Option<u32>,
}

pub const MERGED_HEADERS: [&str; 12] = [
    "team", "shirt_number", "position", "display_name", "birth_date", "shirt_label",
    "club", "league", "height", "weight", "age", "caps",
];

/// Expected tournament shape: how many squads, players per squad and
/// goalkeepers per squad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquadShape {
    pub teams: usize,
    pub squad_size: usize,
    pub goalkeepers: usize,
}

impl SquadShape {
    pub fn total_players(&self) -> usize {
        self.teams * self.squad_size
    }
}

impl Default for SquadShape {
    fn default() -> Self {
        Self { teams: 32, squad_size: 23, goalkeepers: 3 }
    }
}
