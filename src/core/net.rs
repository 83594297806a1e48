// src/core/net.rs

// One-shot GET for a source document. The client and its connection live only
// for the duration of a single call.

use std::{fmt, fs, path::PathBuf, time::Duration};

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{PipelineError, Result};

/// Where a source document lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    Url(String),
    Path(PathBuf),
}

impl Locator {
    /// `http://` / `https://` → URL, anything else → local path.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        let lc = t.to_ascii_lowercase();
        if lc.starts_with("http://") || lc.starts_with("https://") {
            Locator::Url(s!(t))
        } else {
            Locator::Path(PathBuf::from(t))
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Locator::Path(p) if p.is_dir())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Url(u) => f.write_str(u),
            Locator::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

pub fn fetch_bytes(loc: &Locator) -> Result<Vec<u8>> {
    match loc {
        Locator::Path(p) => Ok(fs::read(p)?),
        Locator::Url(url) => {
            let resp = client()?.get(url).send()?;
            let status = resp.status();
            if !status.is_success() {
                return Err(PipelineError::source_format(format!("HTTP {status} for {url}")));
            }
            let body = resp.bytes()?;
            log::debug!("GET {url}: {} bytes", body.len());
            Ok(body.to_vec())
        }
    }
}

pub fn fetch_text(loc: &Locator) -> Result<String> {
    let bytes = fetch_bytes(loc)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(c)
}
