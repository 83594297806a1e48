// src/report.rs
//
// Descriptive tables over the merged roster. Read-only; nothing here feeds
// back into the pipeline.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::consts::ELITE_LEAGUES;
use crate::model::MergedRecord;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team: String,
    pub players: usize,
    pub mean_age: f64,
    /// Over players with a web match only.
    pub mean_caps: Option<f64>,
    pub mean_height: Option<f64>,
    pub mean_weight: Option<f64>,
    /// Fraction of the squad playing in an elite league.
    pub elite_share: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CohortCount {
    pub cohort: &'static str,
    pub players: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeagueCount {
    pub league: String,
    pub players: usize,
    pub elite: bool,
}

pub fn is_elite(league: &str) -> bool {
    ELITE_LEAGUES.iter().any(|l| *l == league)
}

pub const COHORTS: [&str; 5] = ["<20", "20-24", "25-29", "30-34", "35+"];

pub fn age_cohort(age: f64) -> &'static str {
    match age {
        a if a < 20.0 => COHORTS[0],
        a if a < 25.0 => COHORTS[1],
        a if a < 30.0 => COHORTS[2],
        a if a < 35.0 => COHORTS[3],
        _ => COHORTS[4],
    }
}

/// One row per team, teams in name order.
pub fn team_summary(rows: &[MergedRecord]) -> Vec<TeamSummary> {
    let mut by_team: BTreeMap<&str, Vec<&MergedRecord>> = BTreeMap::new();
    for r in rows {
        by_team.entry(r.team.as_str()).or_default().push(r);
    }

    by_team
        .into_iter()
        .map(|(team, squad)| {
            let n = squad.len();
            let elite = squad.iter().filter(|r| is_elite(&r.league)).count();
            TeamSummary {
                team: s!(team),
                players: n,
                mean_age: round2(squad.iter().map(|r| r.age).sum::<f64>() / n as f64),
                mean_caps: mean(squad.iter().filter_map(|r| r.caps.map(f64::from))),
                mean_height: mean(squad.iter().filter_map(|r| r.height)),
                mean_weight: mean(squad.iter().filter_map(|r| r.weight)),
                elite_share: round2(elite as f64 / n as f64),
            }
        })
        .collect()
}

/// Player counts per age cohort, every cohort present, youngest first.
pub fn age_cohorts(rows: &[MergedRecord]) -> Vec<CohortCount> {
    COHORTS
        .iter()
        .map(|&cohort| CohortCount {
            cohort,
            players: rows.iter().filter(|r| age_cohort(r.age) == cohort).count(),
        })
        .collect()
}

/// Players per league code, most represented first; ties by code.
pub fn league_counts(rows: &[MergedRecord]) -> Vec<LeagueCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in rows {
        *counts.entry(r.league.as_str()).or_default() += 1;
    }
    let mut out: Vec<LeagueCount> = counts
        .into_iter()
        .map(|(league, players)| LeagueCount { league: s!(league), players, elite: is_elite(league) })
        .collect();
    out.sort_by(|a, b| b.players.cmp(&a.players).then_with(|| a.league.cmp(&b.league)));
    out
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| round2(sum / n as f64))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
