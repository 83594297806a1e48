// src/specs/web.rs
//! Squads web page: one heading and one table per team.
//!
//! Four independent selector queries each yield one flat sequence in document
//! order: team headings, shirt numbers, player names, caps. Records are
//! assembled purely by position.
//!
//! **Alignment precondition.** Entry *i* of the shirt-number, name and caps
//! sequences is assumed to describe the same player, and player *i* is
//! assumed to belong to heading `i / squad_size`. Nothing on the page ties
//! these together; the only guard here is the length check. The name
//! cross-check in `reconcile` surfaces drift after the join.

use std::iter;

use regex::Regex;
use scraper::Html;

use crate::config::options::WebSelectors;
use crate::core::html::select_texts;
use crate::core::net::{self, Locator};
use crate::core::sanitize::strip_brackets;
use crate::error::{PipelineError, Result};
use crate::model::{SquadShape, WebRecord};
use crate::normalize::parse_int;

pub trait HtmlFetcher: Sync {
    fn fetch(&self, loc: &Locator) -> Result<String>;
}

/// URL → HTTP GET, path → file read.
pub struct HttpFetcher;

impl HtmlFetcher for HttpFetcher {
    fn fetch(&self, loc: &Locator) -> Result<String> {
        net::fetch_text(loc)
    }
}

pub fn fetch_squads(
    fetcher: &dyn HtmlFetcher,
    loc: &Locator,
    selectors: &WebSelectors,
    shape: &SquadShape,
) -> Result<Vec<WebRecord>> {
    let html = fetcher.fetch(loc)?;
    let t = std::time::Instant::now();
    let out = parse_squads(&html, selectors, shape)?;
    log::debug!("Web: parse {loc} in {:?}", t.elapsed());
    log::info!("Web: {} players from {loc}", out.len());
    Ok(out)
}

/// Split out for offline tests against captured pages.
pub fn parse_squads(
    html: &str,
    selectors: &WebSelectors,
    shape: &SquadShape,
) -> Result<Vec<WebRecord>> {
    let doc = Html::parse_document(html);
    let total = shape.total_players();

    let group = Regex::new(&selectors.group_pattern)
        .map_err(|e| PipelineError::Selector(format!("{} ({e})", selectors.group_pattern)))?;

    // 1) Team headings minus "Group X" sub-headers; document order is team order.
    let teams: Vec<String> = select_texts(&doc, &selectors.headings)?
        .into_iter()
        .filter(|h| !group.is_match(h))
        .take(shape.teams)
        .collect();

    // 2) Shirt numbers, one per player.
    let numbers = select_texts(&doc, &selectors.shirt_numbers)?;

    // 3) Player names minus role markers, first `total` only.
    let names: Vec<String> = select_texts(&doc, &selectors.names)?
        .into_iter()
        .filter(|n| !selectors.role_markers.iter().any(|m| m == n))
        .take(total)
        .collect();

    // 4) Caps, same order as shirt numbers.
    let caps = select_texts(&doc, &selectors.caps)?;

    check_len("team headings", teams.len(), shape.teams)?;
    check_len("shirt numbers", numbers.len(), total)?;
    check_len("player names", names.len(), total)?;
    check_len("caps", caps.len(), total)?;

    let numbers = parse_ints("shirt number", &numbers)?;
    let caps = parse_ints("caps", &caps)?;

    // 5) Positional assembly.
    let team_col = teams
        .iter()
        .flat_map(|t| iter::repeat(t).take(shape.squad_size));

    let records = team_col
        .zip(numbers)
        .zip(names)
        .zip(caps)
        .map(|(((team, shirt_number), display_name), caps)| WebRecord {
            shirt_number,
            display_name,
            team: team.clone(),
            caps,
        })
        .collect();
    Ok(records)
}

fn check_len(what: &str, found: usize, expected: usize) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(PipelineError::source_format(format!(
            "web page: {found} {what}, expected {expected}"
        )))
    }
}

fn parse_ints(what: &str, cells: &[String]) -> Result<Vec<u32>> {
    cells
        .iter()
        .enumerate()
        .map(|(i, c)| {
            parse_int(&strip_brackets(c)).ok_or_else(|| {
                PipelineError::source_format(format!("web page: {what} entry {i} is {c:?}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPE: SquadShape = SquadShape { teams: 2, squad_size: 2, goalkeepers: 1 };

    const HEADER_ROW: &str =
        "<tr><th>No.</th><th>Pos.</th><th>Player</th><th>Date of birth (age)</th><th>Caps</th><th>Goals</th><th>Club</th></tr>";

    // No. | Pos. | Player (th) | DOB | Caps | Goals | Club
    fn row(n: u32, name: &str, caps: &str, goals: &str, captain: bool) -> String {
        let marker = if captain { r#" (<a href="/wiki/Captain">c</a>)"# } else { "" };
        format!(
            r#"<tr><td>{n}</td><td><a href="/wiki/Goalkeeper">GK</a></td><th scope="row"><a href="/wiki/{name}">{name}</a>{marker}</th><td>1 January 1990 (aged 28)</td><td>{caps}</td><td>{goals}</td><td><a href="/wiki/Club">Club</a></td></tr>"#
        )
    }

    fn page(caps_b2: Option<&str>) -> String {
        let b2 = caps_b2.map(|c| row(2, "Bravo Two", c, "1", false)).unwrap_or_default();
        format!(
            r#"<html><body>
            <h2><span class="mw-headline">Group A</span></h2>
            <h3><span class="mw-headline">Alpha</span></h3>
            <table class="wikitable sortable">{HEADER_ROW}{}{}</table>
            <h3><span class="mw-headline">Bravo</span></h3>
            <table class="wikitable sortable">{HEADER_ROW}{}{}</table>
            <h2><span class="mw-headline">Statistics</span></h2>
            </body></html>"#,
            row(1, "Alpha One", "10", "2", true),
            row(2, "Alpha Two", "3[1]", "0", false),
            row(1, "Bravo One", "0", "0", false),
            b2,
        )
    }

    #[test]
    fn parses_and_aligns_by_position() {
        let recs = parse_squads(&page(Some("7")), &WebSelectors::default(), &SHAPE).unwrap();
        assert_eq!(recs.len(), 4);
        assert_eq!(
            recs[0],
            WebRecord { shirt_number: 1, display_name: "Alpha One".into(), team: "Alpha".into(), caps: 10 }
        );
        assert_eq!(recs[1].caps, 3);
        assert_eq!(recs[3].team, "Bravo");
        assert_eq!(recs[3].display_name, "Bravo Two");
        assert_eq!(recs[3].caps, 7);
    }

    #[test]
    fn group_headings_and_trailing_sections_are_skipped() {
        let recs = parse_squads(&page(Some("7")), &WebSelectors::default(), &SHAPE).unwrap();
        assert!(recs.iter().all(|r| r.team == "Alpha" || r.team == "Bravo"));
    }

    #[test]
    fn short_sequences_are_source_format() {
        let err = parse_squads(&page(None), &WebSelectors::default(), &SHAPE).unwrap_err();
        assert!(matches!(err, PipelineError::SourceFormat(_)));
        assert!(err.to_string().contains("shirt numbers"), "{err}");
    }

    #[test]
    fn non_numeric_caps_are_source_format() {
        let err = parse_squads(&page(Some("n/a")), &WebSelectors::default(), &SHAPE).unwrap_err();
        assert!(err.to_string().contains("caps entry 3"), "{err}");
    }

    #[test]
    fn bad_group_pattern_is_selector_error() {
        let sel = WebSelectors { group_pattern: s!("(unclosed"), ..WebSelectors::default() };
        let err = parse_squads(&page(Some("7")), &sel, &SHAPE).unwrap_err();
        assert!(matches!(err, PipelineError::Selector(_)));
    }

    #[test]
    fn caps_come_from_the_caps_column_not_goals() {
        let shape = SquadShape { teams: 1, squad_size: 2, goalkeepers: 1 };
        let html = format!(
            r#"<h3><span class="mw-headline">Russia</span></h3>
            <table class="wikitable sortable">{HEADER_ROW}{}{}</table>"#,
            row(1, "Igor Akinfeev", "106", "0", true),
            row(2, "Mário Fernandes", "5", "1", false),
        );
        let recs = parse_squads(&html, &WebSelectors::default(), &shape).unwrap();
        let caps: Vec<u32> = recs.iter().map(|r| r.caps).collect();
        let numbers: Vec<u32> = recs.iter().map(|r| r.shirt_number).collect();
        assert_eq!(caps, vec![106, 5]);
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(recs[0].display_name, "Igor Akinfeev");
    }
}
