// tests/export_outputs.rs
mod common;

use std::fs;

use chrono::NaiveDate;
use squad_scrape::config::options::{ExportFormat, ExportOptions};
use squad_scrape::file::write_outputs;
use squad_scrape::model::{MergedRecord, Position};

fn row(team: &str, n: u32, caps: Option<u32>) -> MergedRecord {
    MergedRecord {
        team: team.into(),
        shirt_number: n,
        position: Position::GK,
        display_name: caps.map(|_| format!("Keeper {n}")),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        shirt_label: "KEEPER".into(),
        club: "Club, Town".into(),
        league: "ENG".into(),
        height: Some(190.0),
        weight: None,
        age: 28.08,
        caps,
    }
}

#[test]
fn tsv_without_headers_or_summaries() {
    let dir = common::tmp_dir("export_tsv");
    let export = ExportOptions {
        format: ExportFormat::Tsv,
        out_dir: dir.clone(),
        include_headers: false,
        summaries: false,
    };
    let written = write_outputs(&export, &[row("Peru", 1, Some(12)), row("Peru", 12, None)]).unwrap();
    assert_eq!(written, vec![dir.join("merged.tsv")]);

    let text = fs::read_to_string(&written[0]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "Peru\t1\tGK\tKeeper 1\t1990-05-17\tKEEPER\tClub, Town\tENG\t190.0\t\t28.08\t12"
    );
    assert!(lines[1].ends_with("\t28.08\t"));
}

#[test]
fn csv_quotes_commas_and_writes_summaries() {
    let dir = common::tmp_dir("export_csv");
    let export = ExportOptions { out_dir: dir.clone(), ..Default::default() };
    let written = write_outputs(&export, &[row("Peru", 1, Some(12))]).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["merged.csv", "team_summary.csv", "age_cohorts.csv", "league_counts.csv"]);

    let merged = fs::read_to_string(dir.join("merged.csv")).unwrap();
    assert!(merged.contains("\"Club, Town\""));

    let leagues = fs::read_to_string(dir.join("league_counts.csv")).unwrap();
    assert_eq!(leagues, "league,players,elite\nENG,1,true\n");
}

#[test]
fn rerun_truncates_previous_output() {
    let dir = common::tmp_dir("export_rerun");
    let export = ExportOptions { out_dir: dir.clone(), summaries: false, ..Default::default() };
    write_outputs(&export, &[row("Peru", 1, None), row("Peru", 2, None)]).unwrap();
    write_outputs(&export, &[row("Peru", 1, None)]).unwrap();
    let merged = fs::read_to_string(dir.join("merged.csv")).unwrap();
    assert_eq!(merged.lines().count(), 2);
}
