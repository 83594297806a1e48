// tests/common/mod.rs
//
// Synthetic tournament: 32 squads of 23 with 3 goalkeepers each, served by
// in-memory source back-ends. Teams 7 and 12 use the PDF spellings that the
// default alias table maps onto the web page's names.
#![allow(dead_code)]

use squad_scrape::core::net::Locator;
use squad_scrape::model::RawTable;
use squad_scrape::specs::pdf::TableExtractor;
use squad_scrape::specs::web::HtmlFetcher;
use squad_scrape::Result;

pub const TEAMS: usize = 32;
pub const SQUAD: u32 = 23;

pub const PDF_HEADERS: [&str; 9] = [
    "Team", "#", "Pos.", "FIFA Popular Name", "Birth Date", "Shirt Name", "Club", "Height", "Weight",
];

/// (pdf spelling, web spelling)
pub fn team_names(t: usize) -> (String, String) {
    match t {
        7 => ("Korea Republic".into(), "South Korea".into()),
        12 => ("IR Iran".into(), "Iran".into()),
        _ => {
            let n = format!("Team {t:02}");
            (n.clone(), n)
        }
    }
}

pub fn position(n: u32) -> &'static str {
    match n {
        1 | 12 | 23 => "GK",
        2..=8 => "DF",
        9..=16 => "MF",
        _ => "FW",
    }
}

pub fn player_name(t: usize, n: u32) -> String {
    format!("Player {t}x{n}")
}

pub fn caps(t: usize, n: u32) -> u32 {
    (t as u32 * 3 + n) % 90 + 100
}

/// Always below 100, so never equal to a caps value.
pub fn goals(n: u32) -> u32 {
    n % 7
}

/// Column order of the real squads tables.
const HEADER_ROW: &str =
    "<tr><th>No.</th><th>Pos.</th><th>Player</th><th>Date of birth (age)</th><th>Caps</th><th>Goals</th><th>Club</th></tr>";

const LEAGUES: [&str; 4] = ["ENG", "ESP", "KSA", "MEX"];

pub fn pdf_row(t: usize, n: u32) -> Vec<String> {
    vec![
        team_names(t).0,
        n.to_string(),
        position(n).into(),
        player_name(t, n),
        format!("{:02}.{:02}.{}", 1 + n % 28, 1 + t % 12, 1985 + n % 12),
        format!("PLAYER{n}"),
        format!("Club {} ({})", t % 5, LEAGUES[n as usize % LEAGUES.len()]),
        format!("{}", 170 + n),
        format!("{}", 65 + n % 20),
    ]
}

/// One table per team, as the PDF prints them.
pub fn pdf_tables() -> Vec<RawTable> {
    (0..TEAMS)
        .map(|t| {
            RawTable::new(
                PDF_HEADERS.iter().map(|h| h.to_string()).collect(),
                (1..=SQUAD).map(|n| pdf_row(t, n)).collect(),
            )
        })
        .collect()
}

/// Squads page. `drop_last_caps` cuts the very last player's row off after the birth date.
pub fn web_page(drop_last_caps: bool) -> String {
    let mut body = String::new();
    for t in 0..TEAMS {
        if t % 4 == 0 {
            body.push_str(&format!(
                r#"<h2><span class="mw-headline">Group {}</span></h2>"#,
                (b'A' + (t / 4) as u8) as char
            ));
        }
        body.push_str(&format!(r#"<h3><span class="mw-headline">{}</span></h3>"#, team_names(t).1));
        body.push_str(r#"<table class="wikitable sortable">"#);
        body.push_str(HEADER_ROW);
        for n in 1..=SQUAD {
            let marker = if n == 10 { r#" (<a href="/wiki/Captain">c</a>)"# } else { "" };
            // Truncated row: the stats and club cells are missing.
            let tail = if drop_last_caps && t == TEAMS - 1 && n == SQUAD {
                String::new()
            } else {
                format!(
                    r#"<td>{}</td><td>{}</td><td><a href="/wiki/club{t}">Club {t}</a></td>"#,
                    caps(t, n),
                    goals(n)
                )
            };
            body.push_str(&format!(
                r#"<tr><td>{n}</td><td>{pos}</td><th scope="row"><a href="/wiki/p{t}_{n}">{name}</a>{marker}</th><td>1 January 1990 (aged 28)</td>{tail}</tr>"#,
                pos = position(n),
                name = player_name(t, n),
            ));
        }
        body.push_str("</table>");
    }
    body.push_str(r#"<h2><span class="mw-headline">Statistics</span></h2>"#);
    format!("<html><body>{body}</body></html>")
}

pub struct FakePdf(pub Vec<RawTable>);

impl TableExtractor for FakePdf {
    fn extract(&self, _loc: &Locator) -> Result<Vec<RawTable>> {
        Ok(self.0.clone())
    }
}

pub struct FakeWeb(pub String);

impl HtmlFetcher for FakeWeb {
    fn fetch(&self, _loc: &Locator) -> Result<String> {
        Ok(self.0.clone())
    }
}

pub fn tmp_dir(name: &str) -> std::path::PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("squad_scrape_{name}"));
    let _ = std::fs::remove_dir_all(&p);
    std::fs::create_dir_all(&p).unwrap();
    p
}
