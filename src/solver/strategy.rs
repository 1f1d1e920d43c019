//! Guess selection strategies
//!
//! Defines the Strategy trait and the closed set of implementations.

use super::entropy::EntropyMaximizer;
use super::heuristic::FrequencyHeuristic;
use super::{CandidateSet, Session, SessionCache};
use crate::core::{SolverError, Word};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::fmt;

/// A strategy for scoring and selecting guesses
///
/// Implementations keep their own distribution cache, recounted through
/// [`Strategy::refresh`] whenever the candidate set shrinks.
pub trait Strategy: Sync {
    /// Score a word against the current candidates; higher is better
    fn score(&self, word: &Word) -> f64;

    /// True when the guess should be picked from `words` (the candidates)
    /// rather than from the full guess pool
    fn should_narrow_pool(&self, words: &[&Word]) -> bool;

    /// Recompute cached distributions for a new candidate set
    fn refresh(&mut self, candidates: &CandidateSet);

    /// Select the highest-scoring word of `pool` that is not in `excluded`
    ///
    /// Scores are computed in parallel; the scan that picks the winner is
    /// sequential and keeps the first word reaching the maximum.
    /// Returns `None` if every word is excluded.
    fn select_guess<'w>(
        &self,
        pool: &[&'w Word],
        excluded: &FxHashSet<Word>,
    ) -> Option<(&'w Word, f64)> {
        let scores: Vec<Option<f64>> = pool
            .par_iter()
            .map(|&word| (!excluded.contains(word)).then(|| self.score(word)))
            .collect();

        let mut best: Option<(&'w Word, f64)> = None;
        for (&word, score) in pool.iter().zip(scores) {
            if let Some(score) = score
                && best.is_none_or(|(_, max)| score > max)
            {
                best = Some((word, score));
            }
        }
        best
    }
}

/// Names of the available strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Letter-frequency heuristic
    Heuristic,
    /// Entropy maximization over a precomputed response table
    Entropy,
}

impl StrategyKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Entropy => "entropy",
        }
    }

    /// Whether the strategy reads the session's precomputed tables
    #[must_use]
    pub const fn needs_cache(self) -> bool {
        matches!(self, Self::Entropy)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enum wrapper over every strategy
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone)]
pub enum StrategyType<'s> {
    Heuristic(FrequencyHeuristic<'s>),
    Entropy(EntropyMaximizer<'s>),
}

impl<'s> StrategyType<'s> {
    /// Create a fresh strategy for one game
    ///
    /// # Errors
    /// Returns `SolverError::MissingCache` if the strategy needs precomputed
    /// tables and none were supplied.
    pub fn new(
        kind: StrategyKind,
        session: &'s Session,
        cache: Option<&'s SessionCache>,
    ) -> Result<Self, SolverError> {
        match kind {
            StrategyKind::Heuristic => Ok(Self::Heuristic(FrequencyHeuristic::new(
                session.targets(),
            ))),
            StrategyKind::Entropy => cache
                .map(|cache| Self::Entropy(EntropyMaximizer::new(session, cache)))
                .ok_or(SolverError::MissingCache),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Heuristic(_) => StrategyKind::Heuristic,
            Self::Entropy(_) => StrategyKind::Entropy,
        }
    }
}

impl Strategy for StrategyType<'_> {
    fn score(&self, word: &Word) -> f64 {
        match self {
            Self::Heuristic(s) => s.score(word),
            Self::Entropy(s) => s.score(word),
        }
    }

    fn should_narrow_pool(&self, words: &[&Word]) -> bool {
        match self {
            Self::Heuristic(_) => FrequencyHeuristic::should_narrow_pool(words),
            Self::Entropy(_) => EntropyMaximizer::should_narrow_pool(words),
        }
    }

    fn refresh(&mut self, candidates: &CandidateSet) {
        match self {
            Self::Heuristic(s) => s.refresh(candidates),
            Self::Entropy(s) => s.refresh(candidates),
        }
    }
}
