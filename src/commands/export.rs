//! Game trace export
//!
//! One line per target: a `guessIndex,responseCode` token for every step
//! before the winning one, then the target's index, all tab-separated. A lost
//! game lists every step.

use super::{CancelToken, CommandError, progress_bar};
use crate::core::{SolverError, Word};
use crate::solver::{GameResult, Session, Solver};
use std::io::Write;

/// Totals of an export run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub games: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// Format the trace of a game played against the target at `target`
///
/// # Errors
/// Returns `SolverError::UnknownWord` if a traced guess is not in the guess
/// pool, since it then has no index.
///
/// # Examples
/// ```
/// use wordle_infogain::commands::export::trace_line;
/// use wordle_infogain::core::{ResponseModel, Word, WordPool};
/// use wordle_infogain::solver::{Session, Solver, StrategyKind};
///
/// let pool = WordPool::new(["crane", "slate"].map(|w| Word::new(w).unwrap()), 5).unwrap();
/// let session = Session::new(ResponseModel::new(5).unwrap(), pool.clone(), pool).unwrap();
/// let solver = Solver::new(&session, None, StrategyKind::Heuristic).unwrap();
///
/// let first = Word::new("crane").unwrap();
/// let result = solver.play_target(1, Some(&first)).unwrap();
/// // "crane" against "slate" is 00202, code 2*9 + 2*81 = 180
/// assert_eq!(trace_line(&session, 1, &result).unwrap(), "0,180\t1");
/// ```
pub fn trace_line(
    session: &Session,
    target: usize,
    result: &GameResult,
) -> Result<String, SolverError> {
    let steps = if result.is_win() {
        &result.trace[..result.trace.len().saturating_sub(1)]
    } else {
        &result.trace[..]
    };

    let mut tokens = steps
        .iter()
        .map(|step| {
            let index = step
                .guess_index
                .ok_or_else(|| SolverError::UnknownWord(step.guess.text().to_string()))?;
            Ok(format!("{index},{}", session.model().encode(&step.response)))
        })
        .collect::<Result<Vec<String>, SolverError>>()?;
    tokens.push(target.to_string());
    Ok(tokens.join("\t"))
}

/// Play the first `limit` targets (every target by default) and write one
/// trace line per game to `out`
///
/// # Errors
/// Propagates solver errors and write failures.
pub fn export_traces<W: Write>(
    solver: &Solver<'_>,
    first_guess: Option<&Word>,
    limit: Option<usize>,
    out: &mut W,
    cancel: &CancelToken,
) -> Result<ExportSummary, CommandError> {
    let session = solver.session();
    let target_count = session.targets().len().min(limit.unwrap_or(usize::MAX));
    let pb = progress_bar(target_count);
    pb.set_message("exporting traces");

    let mut summary = ExportSummary::default();
    for target in 0..target_count {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }
        let result = solver.play_target(target, first_guess)?;
        writeln!(out, "{}", trace_line(session, target, &result)?)?;

        summary.games += 1;
        if !result.is_win() {
            summary.failed += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    out.flush()?;

    log::info!(
        "{:<32}{} games, {} failed",
        "exported traces",
        summary.games,
        summary.failed
    );
    Ok(summary)
}
