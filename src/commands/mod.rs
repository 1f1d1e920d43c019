//! Command implementations

pub mod analyze;
mod cancel;
mod config;
pub mod export;
pub mod interactive;

pub use analyze::{
    AnalysisConfig, FirstGuessReport, GuessStats, analyze_first_guesses, write_rankings,
    write_reports,
};
pub use cancel::CancelToken;
pub use config::{SessionConfig, StrategyChoice};
pub use export::{ExportSummary, export_traces, trace_line};
pub use interactive::{PromptOracle, choose_target, play_interactive};

use crate::core::SolverError;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::io;

/// Errors of the batch commands, which both play games and write files
#[derive(Debug)]
pub enum CommandError {
    Solver(SolverError),
    Io(io::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solver(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Solver(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<SolverError> for CommandError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}

impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Progress bar over `len` games
fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}
