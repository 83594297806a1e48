// src/progress.rs
use std::fmt;

/// Pipeline stages, in run order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    LoadPdf,
    Normalize,
    Validate,
    LoadWeb,
    Reconcile,
    Export,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::LoadPdf, Stage::Normalize, Stage::Validate,
        Stage::LoadWeb, Stage::Reconcile, Stage::Export,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stage::LoadPdf => "Load PDF tables",
            Stage::Normalize => "Normalize roster",
            Stage::Validate => "Validate roster",
            Stage::LoadWeb => "Load web squads",
            Stage::Reconcile => "Reconcile sources",
            Stage::Export => "Export tables",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lightweight progress reporting for a run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of stages that will run.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when a stage completes successfully.
    fn stage_done(&mut self, _stage: Stage) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
