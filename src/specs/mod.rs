// src/specs/mod.rs
//! # Source “specs” module
//!
//! This module hosts the **source-specific extraction specifications**. Each spec
//! knows one upstream document and encodes *where the ground truth lives in it*
//! and *how to get it out as data*.
//!
//! ## What lives here
//! - `pdf` – the official squad-list PDF: one raw table per page, every cell a
//!   trimmed string, header row kept separate. Extraction sits behind the
//!   `TableExtractor` trait so a directory of CSV exports can stand in for the PDF.
//! - `web` – the squads web page: group headings, shirt numbers, player names and
//!   caps pulled by CSS selector and aligned by position into `WebRecord`s.
//!   Fetching sits behind `HtmlFetcher`; parsing is a pure function over HTML.
//!
//! ## What does **not** live here
//! - **Cleaning** (dates, club/league split, team aliases) – that is `normalize`.
//! - **Shape checks** beyond what extraction itself needs – that is `validate`.
//! - **Joining** the two sources – that is `reconcile`.
//!
//! ## Typical call chain
//! ```text
//! runner → specs::pdf::load_tables → normalize → validate ─┐
//!        → specs::web::fetch_squads ─────────────────────── reconcile → export
//! ```
//!
//! ## Conventions & invariants
//! - A source that cannot be read or does not have the expected shape is a
//!   `PipelineError`; no partial tables are returned.
//! - Parsers are **offline-testable**: feed them text/HTML fixtures, no network.
//! - Selectors and shape come from `PipelineOptions`, never hard-coded in a parser.
pub mod pdf;
pub mod web;
