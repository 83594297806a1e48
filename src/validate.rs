// src/validate.rs
//
// Structural checks over the normalized roster. `validate` only reports;
// the caller decides whether a violation stops the run (`ensure_valid` does).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{PipelineError, Result};
use crate::model::{PlayerRecord, Position, SquadShape};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    TeamCount { expected: usize, found: usize },
    RosterSize { team: String, expected: usize, found: usize },
    GoalkeeperCount { team: String, expected: usize, found: usize },
    UnknownPosition { team: String, shirt_number: u32, code: String },
    /// Left rows with no web counterpart, under a strict join policy.
    UnmatchedRows { count: usize, first: (String, u32) },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TeamCount { expected, found } => {
                write!(f, "team count: expected {expected} distinct teams, found {found}")
            }
            Violation::RosterSize { team, expected, found } => {
                write!(f, "roster size: {team} has {found} players, expected {expected}")
            }
            Violation::GoalkeeperCount { team, expected, found } => {
                write!(f, "goalkeeper count: {team} has {found} GK, expected {expected}")
            }
            Violation::UnknownPosition { team, shirt_number, code } => {
                write!(f, "position: {team} #{shirt_number} has unknown code {code:?}")
            }
            Violation::UnmatchedRows { count, first: (team, number) } => {
                write!(f, "join: {count} players without a web match (first: {team} #{number})")
            }
        }
    }
}

/// All violated invariants, checked in order: team count, roster size per
/// team, goalkeepers per team, position codes. Empty means valid.
pub fn validate(players: &[PlayerRecord], shape: &SquadShape) -> Vec<Violation> {
    let mut out = Vec::new();

    // team -> (players, goalkeepers)
    let mut teams: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for p in players {
        let e = teams.entry(p.team.as_str()).or_default();
        e.0 += 1;
        if p.position == Position::GK {
            e.1 += 1;
        }
    }

    if teams.len() != shape.teams {
        out.push(Violation::TeamCount { expected: shape.teams, found: teams.len() });
    }

    for (team, (n, _)) in &teams {
        if *n != shape.squad_size {
            out.push(Violation::RosterSize {
                team: s!(*team),
                expected: shape.squad_size,
                found: *n,
            });
        }
    }

    for (team, (_, gk)) in &teams {
        if *gk != shape.goalkeepers {
            out.push(Violation::GoalkeeperCount {
                team: s!(*team),
                expected: shape.goalkeepers,
                found: *gk,
            });
        }
    }

    for p in players.iter().filter(|p| !p.position.is_known()) {
        out.push(Violation::UnknownPosition {
            team: p.team.clone(),
            shirt_number: p.shirt_number,
            code: s!(p.position.code()),
        });
    }

    out
}

/// Shirt-number anomaly. Diagnostic only: it never fails a run, but a
/// duplicate makes two players share one web row in the join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShirtIssue {
    Duplicate { team: String, shirt_number: u32 },
    OutOfRange { team: String, shirt_number: u32, max: u32 },
}

impl fmt::Display for ShirtIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShirtIssue::Duplicate { team, shirt_number } => {
                write!(f, "shirt number: {team} #{shirt_number} appears more than once")
            }
            ShirtIssue::OutOfRange { team, shirt_number, max } => {
                write!(f, "shirt number: {team} #{shirt_number} outside 1..={max}")
            }
        }
    }
}

/// Shirt numbers should be unique per team and within `1..=squad_size`.
/// Issues come back in roster order, each duplicate once.
pub fn shirt_number_issues(players: &[PlayerRecord], shape: &SquadShape) -> Vec<ShirtIssue> {
    let max = shape.squad_size as u32;
    let mut seen: BTreeSet<(&str, u32)> = BTreeSet::new();
    let mut reported: BTreeSet<(&str, u32)> = BTreeSet::new();
    let mut out = Vec::new();

    for p in players {
        let key = (p.team.as_str(), p.shirt_number);
        if !(1..=max).contains(&p.shirt_number) {
            out.push(ShirtIssue::OutOfRange { team: p.team.clone(), shirt_number: p.shirt_number, max });
        }
        if !seen.insert(key) && reported.insert(key) {
            out.push(ShirtIssue::Duplicate { team: p.team.clone(), shirt_number: p.shirt_number });
        }
    }
    out
}

/// Hard stop on the first violated invariant. Shirt-number issues are
/// logged as warnings.
pub fn ensure_valid(players: &[PlayerRecord], shape: &SquadShape) -> Result<()> {
    for issue in shirt_number_issues(players, shape) {
        log::warn!("Validate: {issue}");
    }
    let violations = validate(players, shape);
    for v in violations.iter().skip(1) {
        log::debug!("Validate: also {v}");
    }
    match violations.into_iter().next() {
        Some(first) => Err(PipelineError::Validation(first)),
        None => {
            log::info!("Validate: {} players, {} teams OK", players.len(), shape.teams);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn player(team: &str, n: u32, pos: Position) -> PlayerRecord {
        PlayerRecord {
            team: s!(team),
            shirt_number: n,
            position: pos,
            display_name: format!("{team} {n}"),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            shirt_label: s!(),
            club: s!(),
            league: s!(),
            height: None,
            weight: None,
            age: 28.0,
        }
    }

    fn squad(team: &str, size: u32, gks: u32) -> Vec<PlayerRecord> {
        (1..=size)
            .map(|n| player(team, n, if n <= gks { Position::GK } else { Position::MF }))
            .collect()
    }

    const SMALL: SquadShape = SquadShape { teams: 2, squad_size: 4, goalkeepers: 1 };

    #[test]
    fn valid_roster_has_no_violations() {
        let mut ps = squad("A", 4, 1);
        ps.extend(squad("B", 4, 1));
        assert!(validate(&ps, &SMALL).is_empty());
        assert!(ensure_valid(&ps, &SMALL).is_ok());
    }

    #[test]
    fn team_count_is_checked_first() {
        let mut ps = squad("A", 3, 0);
        ps.extend(squad("B", 4, 1));
        ps.extend(squad("C", 4, 1));
        let v = validate(&ps, &SMALL);
        assert_eq!(v[0], Violation::TeamCount { expected: 2, found: 3 });
        assert_eq!(v[1], Violation::RosterSize { team: "A".into(), expected: 4, found: 3 });
        assert_eq!(v[2], Violation::GoalkeeperCount { team: "A".into(), expected: 1, found: 0 });
    }

    #[test]
    fn goalkeeper_shortfall_names_the_team() {
        let mut ps = squad("A", 4, 1);
        ps.extend(squad("B", 4, 0));
        let err = ensure_valid(&ps, &SMALL).unwrap_err();
        match err {
            PipelineError::Validation(Violation::GoalkeeperCount { team, found, .. }) => {
                assert_eq!(team, "B");
                assert_eq!(found, 0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_positions_are_reported_per_player() {
        let mut ps = squad("A", 4, 1);
        ps.extend(squad("B", 4, 1));
        ps[3].position = Position::parse("ST");
        let v = validate(&ps, &SMALL);
        assert_eq!(v, vec![Violation::UnknownPosition {
            team: "A".into(),
            shirt_number: 4,
            code: "ST".into(),
        }]);
        assert!(v[0].to_string().contains("\"ST\""));
    }

    #[test]
    fn shirt_number_issues_flag_duplicates_and_range() {
        let mut ps = squad("A", 4, 1);
        ps.extend(squad("B", 4, 1));
        assert!(shirt_number_issues(&ps, &SMALL).is_empty());

        ps[2].shirt_number = 1;
        ps[3].shirt_number = 1;
        ps[7].shirt_number = 9;
        let issues = shirt_number_issues(&ps, &SMALL);
        assert_eq!(issues, vec![
            ShirtIssue::Duplicate { team: "A".into(), shirt_number: 1 },
            ShirtIssue::OutOfRange { team: "B".into(), shirt_number: 9, max: 4 },
        ]);

        // Warn only; the four roster invariants still hold.
        assert!(ensure_valid(&ps, &SMALL).is_ok());
    }
}
