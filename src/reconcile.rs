// src/reconcile.rs
//
// Left join of the validated roster with the web rows on (team, shirt number).
// Every roster row survives; unmatched web rows are dropped.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::core::sanitize::name_tokens;
use crate::error::{PipelineError, Result};
use crate::model::{MergedRecord, PlayerRecord, WebRecord};
use crate::validate::Violation;

/// What to do with roster rows that found no web row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Keep them with empty web fields.
    #[default]
    KeepUnmatched,
    /// Fail the run with a validation error.
    RejectUnmatched,
}

/// A matched pair whose names do not look like the same person. Diagnostic only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameMismatch {
    pub team: String,
    pub shirt_number: u32,
    pub pdf_name: String,
    pub web_name: String,
}

#[derive(Clone, Debug, Default)]
pub struct Reconciled {
    pub rows: Vec<MergedRecord>,
    /// Roster rows that found no web row.
    pub unmatched: usize,
    pub mismatches: Vec<NameMismatch>,
}

pub fn reconcile(
    players: &[PlayerRecord],
    web: &[WebRecord],
    policy: JoinPolicy,
    cross_check: bool,
) -> Result<Reconciled> {
    let mut index: HashMap<(&str, u32), &WebRecord> = HashMap::with_capacity(web.len());
    for w in web {
        match index.entry((w.team.as_str(), w.shirt_number)) {
            Entry::Vacant(e) => { e.insert(w); }
            Entry::Occupied(_) => {
                log::warn!("Reconcile: duplicate web key {} #{}, keeping first", w.team, w.shirt_number);
            }
        }
    }

    let mut out = Reconciled { rows: Vec::with_capacity(players.len()), ..Default::default() };
    let mut first_unmatched: Option<(String, u32)> = None;

    for p in players {
        let hit = index.get(&(p.team.as_str(), p.shirt_number)).copied();

        match hit {
            Some(w) if cross_check && !names_agree(&p.display_name, &w.display_name) => {
                out.mismatches.push(NameMismatch {
                    team: p.team.clone(),
                    shirt_number: p.shirt_number,
                    pdf_name: p.display_name.clone(),
                    web_name: w.display_name.clone(),
                });
            }
            Some(_) => {}
            None => {
                out.unmatched += 1;
                first_unmatched.get_or_insert_with(|| (p.team.clone(), p.shirt_number));
            }
        }

        out.rows.push(merge_row(p, hit));
    }

    for m in &out.mismatches {
        log::warn!(
            "Reconcile: {} #{} name mismatch: pdf={:?} web={:?}",
            m.team, m.shirt_number, m.pdf_name, m.web_name
        );
    }
    log::info!(
        "Reconcile: {} rows, {} matched, {} unmatched",
        out.rows.len(),
        out.rows.len() - out.unmatched,
        out.unmatched
    );

    if let (JoinPolicy::RejectUnmatched, Some(first)) = (policy, first_unmatched) {
        return Err(PipelineError::Validation(Violation::UnmatchedRows {
            count: out.unmatched,
            first,
        }));
    }
    Ok(out)
}

fn merge_row(p: &PlayerRecord, w: Option<&WebRecord>) -> MergedRecord {
    MergedRecord {
        team: p.team.clone(),
        shirt_number: p.shirt_number,
        position: p.position.clone(),
        display_name: w.map(|w| w.display_name.clone()),
        birth_date: p.birth_date,
        shirt_label: p.shirt_label.clone(),
        club: p.club.clone(),
        league: p.league.clone(),
        height: p.height,
        weight: p.weight,
        age: p.age,
        caps: w.map(|w| w.caps),
    }
}

/// Loose same-person test: a shared name token of two or more letters, or
/// one name's letters contained in the other's ("Seunggyu" vs "Seung-gyu").
pub fn names_agree(a: &str, b: &str) -> bool {
    let ta = name_tokens(a);
    let tb = name_tokens(b);
    if ta.iter().any(|t| t.chars().count() > 1 && tb.contains(t)) {
        return true;
    }
    let ja: String = ta.concat();
    let jb: String = tb.concat();
    !ja.is_empty() && !jb.is_empty() && (ja.contains(&jb) || jb.contains(&ja))
}
