// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod specs;

pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod validate;

pub mod export;
pub mod file;
pub mod logging;
pub mod progress;
pub mod runner;

pub use error::{PipelineError, Result};
