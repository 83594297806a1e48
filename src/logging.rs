// src/logging.rs
//
// `log` facade sink: `[hh:mm:ss.mmm][LEVEL] msg` lines on stderr, plus an
// optional append-only file. Only binaries call `init`; the library just logs.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

pub fn format_line(elapsed_ms: u128, level: Level, msg: &str) -> String {
    format!("[{}][{level}] {msg}\n", fmt_elapsed(elapsed_ms))
}

struct RunLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl Log for RunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(start().elapsed().as_millis(), record.level(), &record.args().to_string());

        let _ = std::io::stderr().write_all(line.as_bytes());
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Install the process-wide logger. A log file that cannot be opened is
/// reported on stderr and skipped.
pub fn init(level: LevelFilter, file: Option<&Path>) -> Result<(), SetLoggerError> {
    start();
    let file = file.and_then(|p| {
        if let Some(parent) = p.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match OpenOptions::new().create(true).append(true).open(p) {
            Ok(f) => Some(Mutex::new(f)),
            Err(e) => {
                eprintln!("Warning: cannot open log file {}: {e}", p.display());
                None
            }
        }
    });

    log::set_boxed_logger(Box::new(RunLogger { level, file }))?;
    log::set_max_level(level);
    Ok(())
}
