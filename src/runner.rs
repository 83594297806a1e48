// src/runner.rs
//
// One run: load PDF → normalize → validate, load web (concurrently with the
// PDF side), reconcile, export. Any error aborts the run.

use std::{panic, path::PathBuf, thread};

use crate::{
    config::options::{AppOptions, PipelineOptions},
    error::Result,
    file,
    model::{PlayerRecord, WebRecord},
    normalize,
    progress::{Progress, Stage},
    reconcile::{self, Reconciled},
    specs::{
        pdf::{self, DefaultExtractor, TableExtractor},
        web::{self, HtmlFetcher, HttpFetcher},
    },
    validate,
};

/// The two black-box source back-ends.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    pub pdf: &'a dyn TableExtractor,
    pub web: &'a dyn HtmlFetcher,
}

impl Sources<'static> {
    /// Real network/file back-ends.
    pub fn live() -> Self {
        Self { pdf: &DefaultExtractor, web: &HttpFetcher }
    }
}

/// Summary of what was produced.
pub struct RunSummary {
    pub reconciled: Reconciled,
    pub files_written: Vec<PathBuf>,
}

/// Full run including export.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &AppOptions,
    sources: Sources<'_>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(Stage::ALL.len());
    }

    let result = build_with(&opts.pipeline, sources, &mut progress).and_then(|reconciled| {
        let files_written = step(&mut progress, Stage::Export, || {
            file::write_outputs(&opts.export, &reconciled.rows)
        })?;
        Ok(RunSummary { reconciled, files_written })
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

/// Everything up to the merged table, nothing written to disk.
pub fn build(
    opts: &PipelineOptions,
    sources: Sources<'_>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Reconciled> {
    build_with(opts, sources, &mut progress)
}

fn build_with(
    opts: &PipelineOptions,
    sources: Sources<'_>,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<Reconciled> {
    // The two sources are independent until the join; fetch the web page on
    // a scoped thread while the PDF side runs here.
    let fetcher = sources.web;
    let (players, web_rows) = thread::scope(|s| -> Result<(Vec<PlayerRecord>, Vec<WebRecord>)> {
        let web_job = s.spawn(move || web::fetch_squads(fetcher, &opts.web, &opts.selectors, &opts.shape));

        let players = pdf_side(opts, sources.pdf, progress);
        let web_rows = web_job.join().unwrap_or_else(|e| panic::resume_unwind(e));

        let players = players?;
        let web_rows = web_rows?;
        if let Some(p) = progress.as_deref_mut() {
            p.stage_done(Stage::LoadWeb);
        }
        Ok((players, web_rows))
    })?;

    step(progress, Stage::Reconcile, || {
        reconcile::reconcile(&players, &web_rows, opts.join_policy, opts.cross_check)
    })
}

fn pdf_side(
    opts: &PipelineOptions,
    extractor: &dyn TableExtractor,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<Vec<PlayerRecord>> {
    let tables = step(progress, Stage::LoadPdf, || pdf::load_tables(extractor, &opts.pdf))?;
    let players = step(progress, Stage::Normalize, || {
        normalize::normalize(&tables, &opts.columns, &opts.aliases, opts.reference_date)
    })?;
    step(progress, Stage::Validate, || validate::ensure_valid(&players, &opts.shape))?;
    Ok(players)
}

fn step<T>(
    progress: &mut Option<&mut dyn Progress>,
    stage: Stage,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("{stage}…"));
    }
    let out = f();
    match &out {
        Ok(_) => {
            if let Some(p) = progress.as_deref_mut() {
                p.stage_done(stage);
            }
        }
        Err(e) => log::error!("{stage}: {e}"),
    }
    out
}
