// src/core/html.rs
use scraper::{ElementRef, Html, Selector};

use crate::error::{PipelineError, Result};
use super::sanitize::normalize_ws;

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| PipelineError::Selector(format!("{css} ({e:?})")))
}

/// Visible text of an element, whitespace-collapsed.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text of every node matching `css`, in document order.
pub fn select_texts(doc: &Html, css: &str) -> Result<Vec<String>> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).map(element_text).collect())
}
