//! Precomputed guess × target response lookup
//!
//! Built once per session; every later lookup is a single index.

use crate::core::{Response, ResponseCode, ResponseModel, SolverError, WordPool};
use rayon::prelude::*;
use std::time::Instant;

/// Response codes for every (guess, target) pair, stored row-major by guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    length: usize,
    guess_count: usize,
    target_count: usize,
    codes: Vec<ResponseCode>,
}

impl ResponseTable {
    /// Evaluate every guess against every target
    ///
    /// Rows are computed in parallel; each guess row writes only its own slice.
    ///
    /// # Errors
    /// Returns `SolverError::LengthMismatch` if a pool's word length differs
    /// from the model's.
    ///
    /// # Examples
    /// ```
    /// use wordle_infogain::core::{ResponseModel, Word, WordPool};
    /// use wordle_infogain::solver::ResponseTable;
    ///
    /// let model = ResponseModel::new(5).unwrap();
    /// let pool = WordPool::new(["robot", "coach"].map(|w| Word::new(w).unwrap()), 5).unwrap();
    /// let table = ResponseTable::build(&model, &pool, &pool).unwrap();
    ///
    /// assert_eq!(model.render(&table.response(0, 1).unwrap()), "02000");
    /// ```
    pub fn build(
        model: &ResponseModel,
        guesses: &WordPool,
        targets: &WordPool,
    ) -> Result<Self, SolverError> {
        check_pool_length(model, guesses)?;
        check_pool_length(model, targets)?;

        let start = Instant::now();
        let target_count = targets.len();
        let mut codes: Vec<ResponseCode> = vec![0; guesses.len() * target_count];

        codes
            .par_chunks_mut(target_count.max(1))
            .zip(guesses.words().par_iter())
            .try_for_each(|(row, guess)| {
                for (slot, target) in row.iter_mut().zip(targets) {
                    *slot = model.evaluate_code(guess, target)?;
                }
                Ok::<(), SolverError>(())
            })?;

        log::info!(
            "{:<32}{} x {} in {:.2}s",
            "computed response table",
            guesses.len(),
            target_count,
            start.elapsed().as_secs_f64()
        );

        Ok(Self {
            length: model.length(),
            guess_count: guesses.len(),
            target_count,
            codes,
        })
    }

    /// Assemble a table from already-known codes
    pub(crate) fn from_codes(
        length: usize,
        guess_count: usize,
        target_count: usize,
        codes: Vec<ResponseCode>,
    ) -> Self {
        debug_assert_eq!(codes.len(), guess_count * target_count);
        Self {
            length,
            guess_count,
            target_count,
            codes,
        }
    }

    #[inline]
    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.length
    }

    #[inline]
    #[must_use]
    pub const fn guess_count(&self) -> usize {
        self.guess_count
    }

    #[inline]
    #[must_use]
    pub const fn target_count(&self) -> usize {
        self.target_count
    }

    /// Response code of `guess` against `target`
    ///
    /// # Panics
    /// Panics if either index is outside its pool.
    #[inline]
    #[must_use]
    pub fn code(&self, guess: usize, target: usize) -> ResponseCode {
        assert!(guess < self.guess_count, "guess index out of range");
        assert!(target < self.target_count, "target index out of range");
        self.codes[guess * self.target_count + target]
    }

    /// Decoded response of `guess` against `target`
    ///
    /// # Errors
    /// Only fails if the stored code is out of range for the word length.
    pub fn response(&self, guess: usize, target: usize) -> Result<Response, SolverError> {
        Response::from_code(self.code(guess, target), self.length)
    }

    /// All target codes for one guess
    #[inline]
    #[must_use]
    pub fn row(&self, guess: usize) -> &[ResponseCode] {
        let start = guess * self.target_count;
        &self.codes[start..start + self.target_count]
    }

    /// Every entry as `(guess, target, code)` in row-major order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, ResponseCode)> + '_ {
        self.codes.iter().enumerate().map(|(i, &code)| {
            (i / self.target_count, i % self.target_count, code)
        })
    }
}

fn check_pool_length(model: &ResponseModel, pool: &WordPool) -> Result<(), SolverError> {
    if pool.word_length() == model.length() {
        Ok(())
    } else {
        Err(SolverError::LengthMismatch {
            guess: pool.word_length(),
            target: model.length(),
        })
    }
}
