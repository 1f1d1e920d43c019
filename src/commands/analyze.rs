//! First-guess analysis
//!
//! Ranks every guess by its initial score, then plays every target with each
//! of the top-ranked words forced as the first guess.

use super::{CancelToken, CommandError, progress_bar};
use crate::core::Word;
use crate::solver::{GameResult, Solver};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Settings of a first-guess analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Number of top-ranked first guesses to evaluate
    pub top_k: usize,
    /// Play only the first `limit` targets
    pub limit: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            limit: None,
        }
    }
}

/// Distribution of guess counts over a batch of games
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessStats {
    counts: BTreeMap<usize, usize>,
    failed: usize,
}

impl GuessStats {
    /// Count a finished game; lost games are tallied apart
    pub fn record(&mut self, result: &GameResult) {
        if result.is_win() {
            *self.counts.entry(result.guess_count()).or_insert(0) += 1;
        } else {
            self.failed += 1;
        }
    }

    #[must_use]
    pub fn solved(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    #[must_use]
    pub fn games(&self) -> usize {
        self.solved() + self.failed
    }

    /// Mean guesses over solved games
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        let solved = self.solved();
        (solved > 0).then(|| {
            let total: usize = self.counts.iter().map(|(&n, &c)| n * c).sum();
            total as f64 / solved as f64
        })
    }

    #[must_use]
    pub fn min(&self) -> Option<usize> {
        self.counts.keys().next().copied()
    }

    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }

    /// Games solved in exactly `guesses` guesses
    #[must_use]
    pub fn count(&self, guesses: usize) -> usize {
        self.counts.get(&guesses).copied().unwrap_or(0)
    }

    /// One-line summary: mean, min, max and the count of every guess total
    /// between them
    #[must_use]
    pub fn summary(&self) -> String {
        let (Some(mean), Some(min), Some(max)) = (self.mean(), self.min(), self.max()) else {
            return format!("No games solved, Failed: {}", self.failed);
        };

        let counts: String = (min..=max)
            .map(|guesses| format!(" [{guesses}] {}", self.count(guesses)))
            .collect();
        let mut line =
            format!("Mean: {mean:.3}, Min: {min}, Max: {max}, Count of Guesses:{counts}");
        if self.failed > 0 {
            line.push_str(&format!(", Failed: {}", self.failed));
        }
        line
    }
}

/// Performance of one forced first guess
#[derive(Debug, Clone, PartialEq)]
pub struct FirstGuessReport {
    pub rank: usize,
    pub guess: Word,
    pub score: f64,
    pub stats: GuessStats,
    /// False if the run was cancelled before every target was played
    pub complete: bool,
}

impl FirstGuessReport {
    #[must_use]
    pub fn line(&self) -> String {
        format!(
            "({}) Guess: {} (Score: {:.2}), {}",
            self.rank,
            self.guess,
            self.score,
            self.stats.summary()
        )
    }
}

/// Play every target with each of the first `config.top_k` ranked guesses
/// forced as the opening
///
/// `cancel` is polled before every target. A cancelled run returns the
/// reports gathered so far, the last one marked incomplete.
///
/// # Errors
/// Propagates solver errors from any game.
pub fn analyze_first_guesses(
    solver: &Solver<'_>,
    ranked: &[(&Word, f64)],
    config: &AnalysisConfig,
    cancel: &CancelToken,
) -> Result<Vec<FirstGuessReport>, CommandError> {
    let target_count = solver
        .session()
        .targets()
        .len()
        .min(config.limit.unwrap_or(usize::MAX));
    let mut reports = Vec::new();

    for (rank, &(guess, score)) in ranked.iter().take(config.top_k).enumerate() {
        let start = Instant::now();
        let pb = progress_bar(target_count);
        pb.set_message(guess.text().to_uppercase());

        let mut stats = GuessStats::default();
        let mut complete = true;
        for target in 0..target_count {
            if cancel.is_cancelled() {
                complete = false;
                break;
            }
            stats.record(&solver.play_target(target, Some(guess))?);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let report = FirstGuessReport {
            rank,
            guess: guess.clone(),
            score,
            stats,
            complete,
        };
        log::info!(
            "{:<32}{} in {:.2}s",
            format!("analyzed first guess {}", report.guess),
            report.stats.summary(),
            start.elapsed().as_secs_f64()
        );
        reports.push(report);

        if !complete {
            log::warn!("analysis cancelled after {} first guesses", reports.len());
            break;
        }
    }
    Ok(reports)
}

/// Write `word \t score` lines
///
/// # Errors
/// Returns an I/O error if the file cannot be written.
pub fn write_rankings(path: &Path, ranked: &[(&Word, f64)]) -> io::Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    for (word, score) in ranked {
        writeln!(out, "{word}\t{score}")?;
    }
    out.flush()?;
    log::info!("{:<32}{}", "saved initial scores", path.display());
    Ok(())
}

/// Write one report line per first guess
///
/// # Errors
/// Returns an I/O error if the file cannot be written.
pub fn write_reports(path: &Path, reports: &[FirstGuessReport]) -> io::Result<()> {
    let lines: Vec<String> = reports.iter().map(FirstGuessReport::line).collect();
    fs::write(path, lines.join("\n"))?;
    log::info!("{:<32}{}", "saved first-guess analysis", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ResponseModel, WordPool};
    use crate::solver::{GameStatus, Session, StrategyKind};

    fn session() -> Session {
        let pool = WordPool::new(
            ["crane", "slate", "irate", "crate", "grate", "coach"].map(|w| Word::new(w).unwrap()),
            5,
        )
        .unwrap();
        Session::new(ResponseModel::new(5).unwrap(), pool.clone(), pool).unwrap()
    }

    fn result(status: GameStatus, guesses: usize) -> GameResult {
        let session = session();
        let solver = Solver::new(&session, None, StrategyKind::Heuristic).unwrap();
        let mut trace = solver.play_target(0, None).unwrap().trace;
        let first = trace[0].clone();
        trace.resize(guesses, first);
        GameResult { status, trace }
    }

    #[test]
    fn stats_summary_lists_every_count_between_min_and_max() {
        let mut stats = GuessStats::default();
        for n in [2, 2, 4] {
            stats.record(&result(GameStatus::Won, n));
        }
        stats.record(&result(GameStatus::Exhausted, 3));

        assert_eq!(stats.games(), 4);
        assert_eq!(stats.failed(), 1);
        assert_eq!(
            stats.summary(),
            "Mean: 2.667, Min: 2, Max: 4, Count of Guesses: [2] 2 [3] 0 [4] 1, Failed: 1"
        );
    }

    #[test]
    fn stats_summary_omits_failures_when_none() {
        let mut stats = GuessStats::default();
        for n in [3, 1] {
            stats.record(&result(GameStatus::Won, n));
        }
        assert_eq!(
            stats.summary(),
            "Mean: 2.000, Min: 1, Max: 3, Count of Guesses: [1] 1 [2] 0 [3] 1"
        );
    }

    #[test]
    fn stats_without_wins() {
        let mut stats = GuessStats::default();
        stats.record(&result(GameStatus::Exhausted, 2));
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.summary(), "No games solved, Failed: 1");
    }

    #[test]
    fn analysis_plays_every_target_per_guess() {
        let session = session();
        let solver = Solver::new(&session, None, StrategyKind::Heuristic).unwrap();
        let ranked = solver.initial_scores().unwrap();
        let config = AnalysisConfig {
            top_k: 2,
            limit: None,
        };

        let reports =
            analyze_first_guesses(&solver, &ranked, &config, &CancelToken::new()).unwrap();
        assert_eq!(reports.len(), 2);
        for (rank, report) in reports.iter().enumerate() {
            assert_eq!(report.rank, rank);
            assert_eq!(&report.guess, ranked[rank].0);
            assert!(report.complete);
            assert_eq!(report.stats.games(), session.targets().len());
            assert_eq!(report.stats.failed(), 0);
        }
    }

    #[test]
    fn cancelled_analysis_stops_early() {
        let session = session();
        let solver = Solver::new(&session, None, StrategyKind::Heuristic).unwrap();
        let ranked = solver.initial_scores().unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let reports =
            analyze_first_guesses(&solver, &ranked, &AnalysisConfig::default(), &cancel).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(!reports[0].complete);
        assert_eq!(reports[0].stats.games(), 0);
    }

    #[test]
    fn limit_caps_targets() {
        let session = session();
        let solver = Solver::new(&session, None, StrategyKind::Heuristic).unwrap();
        let ranked = solver.initial_scores().unwrap();
        let config = AnalysisConfig {
            top_k: 1,
            limit: Some(3),
        };

        let reports =
            analyze_first_guesses(&solver, &ranked, &config, &CancelToken::new()).unwrap();
        assert_eq!(reports[0].stats.games(), 3);
    }

    #[test]
    fn rankings_file_has_word_and_score() {
        let word = Word::new("crane").unwrap();
        let path = std::env::temp_dir().join(format!(
            "wordle_infogain_rankings_{}.txt",
            std::process::id()
        ));
        write_rankings(&path, &[(&word, 1.5)]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(text, "crane\t1.5\n");
    }
}
