//! Per-session state shared by every game
//!
//! A session fixes the word length, the response symbols and both pools. The
//! expensive precomputation lives in a separate [`SessionCache`] owned by the
//! caller and lent to strategies, so one table serves every game played
//! against the same pools.

use super::entropy::Histograms;
use super::{CandidateSet, ResponseTable};
use crate::core::{ResponseModel, SolverError, WordPool};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;

/// Word length, response model and the guess and target pools of one session
#[derive(Debug, Clone)]
pub struct Session {
    model: ResponseModel,
    guesses: WordPool,
    targets: WordPool,
}

impl Session {
    /// # Errors
    /// Returns `SolverError::LengthMismatch` if either pool's word length
    /// differs from the model's.
    pub fn new(
        model: ResponseModel,
        guesses: WordPool,
        targets: WordPool,
    ) -> Result<Self, SolverError> {
        for pool in [&guesses, &targets] {
            if pool.word_length() != model.length() {
                return Err(SolverError::LengthMismatch {
                    guess: pool.word_length(),
                    target: model.length(),
                });
            }
        }
        Ok(Self {
            model,
            guesses,
            targets,
        })
    }

    #[inline]
    #[must_use]
    pub const fn model(&self) -> &ResponseModel {
        &self.model
    }

    #[inline]
    #[must_use]
    pub const fn guesses(&self) -> &WordPool {
        &self.guesses
    }

    #[inline]
    #[must_use]
    pub const fn targets(&self) -> &WordPool {
        &self.targets
    }

    #[inline]
    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.model.length()
    }

    /// Build the response table and the initial histograms over every target
    ///
    /// # Errors
    /// Propagates evaluation errors from the table build.
    pub fn build_cache(&self) -> Result<SessionCache, SolverError> {
        let table = ResponseTable::build(&self.model, &self.guesses, &self.targets)?;

        let start = Instant::now();
        let initial = Histograms::compute(&table, &CandidateSet::full(self.targets.len()));
        log::info!(
            "{:<32}{} guesses in {:.2}s",
            "computed initial histograms",
            initial.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(SessionCache { table, initial })
    }

    /// Hash of the symbols and every word of both pools, in pool order
    ///
    /// Changes whenever a word, its position in a pool or a symbol changes.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.word_length().hash(&mut hasher);
        self.model.symbols().hash(&mut hasher);
        for pool in [&self.guesses, &self.targets] {
            pool.len().hash(&mut hasher);
            for word in pool {
                word.text().hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// Whether `cache` has the dimensions of this session's pools
    #[must_use]
    pub fn fits(&self, cache: &SessionCache) -> bool {
        cache.table.word_length() == self.word_length()
            && cache.table.guess_count() == self.guesses.len()
            && cache.table.target_count() == self.targets.len()
            && cache.initial.len() == self.guesses.len()
            && cache.initial.total() == self.targets.len()
    }
}

/// Precomputed response table and initial response histograms
///
/// Read-only once built; games borrow it and never modify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCache {
    pub table: ResponseTable,
    pub initial: Histograms,
}
