// src/cli.rs
use std::{env, path::PathBuf};

use log::{LevelFilter, SetLoggerError};
use thiserror::Error;

use crate::config::consts::LOG_FILE;
use crate::config::options::{AppOptions, ExportFormat};
use crate::core::net::Locator;
use crate::error::PipelineError;
use crate::logging;
use crate::progress::{Progress, Stage};
use crate::reconcile::JoinPolicy;
use crate::runner::{self, Sources};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("logger: {0}")]
    Logger(#[from] SetLoggerError),
}

fn usage(msg: impl Into<String>) -> CliError {
    CliError::Usage(msg.into())
}

/// Parsed command line: run options plus process-level settings.
#[derive(Debug)]
pub struct CliArgs {
    pub opts: AppOptions,
    pub aliases_file: Option<PathBuf>,
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            opts: AppOptions::default(),
            aliases_file: None,
            level: LevelFilter::Info,
            log_file: Some(PathBuf::from(LOG_FILE)),
        }
    }
}

#[derive(Debug)]
pub enum Command {
    Run(CliArgs),
    Help,
}

pub fn run() -> Result<(), CliError> {
    let args = match parse_args(env::args().skip(1))? {
        Command::Help => {
            eprint!("{}", include_str!("cli_help.txt"));
            return Ok(());
        }
        Command::Run(args) => args,
    };

    logging::init(args.level, args.log_file.as_deref())?;

    let mut opts = args.opts;
    if let Some(path) = &args.aliases_file {
        let n = opts.pipeline.aliases.merge_file(path)?;
        log::info!("Aliases: {n} loaded from {}", path.display());
    }

    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts, Sources::live(), Some(&mut progress))?;

    let rec = &summary.reconciled;
    log::info!(
        "Merged {} rows ({} without a web match, {} name mismatches)",
        rec.rows.len(), rec.unmatched, rec.mismatches.len()
    );
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut out = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| usage(format!("Missing value for {flag}")));
        match a.as_str()
        {
            "--pdf" => out.opts.pipeline.pdf = Locator::parse(&value("--pdf")?),
            "--web" => out.opts.pipeline.web = Locator::parse(&value("--web")?),
            "-o" | "--out" => out.opts.export.out_dir = PathBuf::from(value("--out")?),
            "--format" => {
                let v = value("--format")?;
                out.opts.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(usage(format!("Unknown format: {other}"))),
                };}
            "--no-headers" => out.opts.export.include_headers = false,
            "--no-summaries" => out.opts.export.summaries = false,
            "--aliases" => out.aliases_file = Some(PathBuf::from(value("--aliases")?)),
            "--strict-join" => out.opts.pipeline.join_policy = JoinPolicy::RejectUnmatched,
            "--no-cross-check" => out.opts.pipeline.cross_check = false,
            "--log-file" => out.log_file = Some(PathBuf::from(value("--log-file")?)),
            "-v" | "--verbose" => out.level = LevelFilter::Debug,
            "-q" | "--quiet" => out.level = LevelFilter::Error,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(usage(format!("Unknown arg: {a}"))),
        }
    }
    Ok(Command::Run(out))
}

/// Stage ticks as log lines.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        log::debug!("{msg}");
    }

    fn stage_done(&mut self, stage: Stage) {
        self.done += 1;
        log::info!("[{}/{}] {stage}", self.done, self.total);
    }
}
