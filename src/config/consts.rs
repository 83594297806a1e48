// src/config/consts.rs

// Sources
pub const DEFAULT_PDF_URL: &str =
    "https://img.fifa.com/image/upload/hzfqyndmnqazczvdhlxx.pdf";
pub const DEFAULT_WEB_URL: &str = "https://en.wikipedia.org/wiki/2018_FIFA_World_Cup_squads";

// Net config
pub const USER_AGENT: &str = concat!("squad_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Tournament
pub const TOURNAMENT_START: (i32, u32, u32) = (2018, 6, 14);
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// (alias as printed in the PDF, canonical spelling used by the web page)
pub const DEFAULT_TEAM_ALIASES: &[(&str, &str)] = &[
    ("Korea Republic", "South Korea"),
    ("IR Iran", "Iran"),
];

// Web selectors (squads page)
pub const SEL_HEADINGS: &str = "span.mw-headline";
pub const SEL_SHIRT_NUMBERS: &str = "table.sortable td:nth-child(1)";
pub const SEL_NAMES: &str = "table.sortable th[scope=row] a";
pub const SEL_CAPS: &str = "table.sortable td:nth-child(5)";
pub const GROUP_HEADING_PATTERN: &str = r"^Group\s+[A-Z]$";
pub const ROLE_MARKERS: &[&str] = &["c", "captain"];

/// Leagues treated as the elite tier in summaries.
pub const ELITE_LEAGUES: &[&str] = &["ENG", "ESP", "GER", "ITA", "FRA"];

// Logging
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = ".store/debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const MERGED_FILE_STEM: &str = "merged";
pub const TEAM_SUMMARY_STEM: &str = "team_summary";
pub const AGE_COHORTS_STEM: &str = "age_cohorts";
pub const LEAGUE_COUNTS_STEM: &str = "league_counts";
