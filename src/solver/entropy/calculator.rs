//! Shannon entropy of response distributions
//!
//! Given a guess and set of candidates, computes the expected information gain.

use crate::core::{ResponseCode, ResponseModel, SolverError, Word};
use crate::solver::{CandidateSet, ResponseTable};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Count of candidates per response for one guess
pub type Histogram = FxHashMap<ResponseCode, usize>;

/// Response histograms for every guess in the guess pool over one candidate set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histograms {
    per_guess: Vec<Histogram>,
    total: usize,
}

impl Histograms {
    /// Count responses of every guess row over the candidates
    ///
    /// Guess rows are independent and computed in parallel.
    #[must_use]
    pub fn compute(table: &ResponseTable, candidates: &CandidateSet) -> Self {
        let per_guess = (0..table.guess_count())
            .into_par_iter()
            .map(|guess| {
                let row = table.row(guess);
                let mut counts = Histogram::default();
                for &target in candidates.indices() {
                    *counts.entry(row[target]).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        Self {
            per_guess,
            total: candidates.len(),
        }
    }

    /// Assemble histograms that were counted elsewhere
    pub(crate) const fn from_parts(per_guess: Vec<Histogram>, total: usize) -> Self {
        Self { per_guess, total }
    }

    /// Histogram of one guess
    #[must_use]
    pub fn get(&self, guess: usize) -> Option<&Histogram> {
        self.per_guess.get(guess)
    }

    /// Number of guesses covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.per_guess.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.per_guess.is_empty()
    }

    /// Number of candidates each histogram was counted over
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Iterate `(guess, histogram)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Histogram)> {
        self.per_guess.iter().enumerate()
    }
}

/// Calculate Shannon entropy from a response distribution, in nats
///
/// H = -Σ p · ln(p), summed over observed responses only
///
/// # Properties
/// - Returns 0.0 for a certain outcome (one response with p=1)
/// - Maximized for a uniform distribution
/// - Always in range [0, ln(n)] for n responses
///
/// # Examples
/// ```
/// use wordle_infogain::solver::entropy::shannon_entropy;
/// use std::collections::HashMap;
///
/// let uniform: HashMap<u16, usize> = [(0, 25), (1, 25), (2, 25), (3, 25)].into();
///
/// let entropy = shannon_entropy(&uniform);
/// assert!((entropy - 4f64.ln()).abs() < 1e-9);
/// ```
#[must_use]
pub fn shannon_entropy<S>(response_counts: &HashMap<ResponseCode, usize, S>) -> f64
where
    S: BuildHasher,
{
    let total = response_counts.values().sum::<usize>() as f64;

    if total == 0.0 {
        return 0.0;
    }

    response_counts
        .values()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.ln()
        })
        .sum::<f64>()
        .max(0.0)
}

/// Group candidates by the response they give to `guess`, evaluating live
///
/// # Errors
/// Returns `SolverError::LengthMismatch` if a candidate's length differs from the guess.
pub fn histogram_of(
    model: &ResponseModel,
    guess: &Word,
    candidates: &[&Word],
) -> Result<Histogram, SolverError> {
    let mut counts = Histogram::default();
    for &candidate in candidates {
        *counts.entry(model.evaluate_code(guess, candidate)?).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Calculate Shannon entropy for a guess against candidates, evaluating live
///
/// # Errors
/// Returns `SolverError::LengthMismatch` if a candidate's length differs from the guess.
///
/// # Examples
/// ```
/// use wordle_infogain::core::{ResponseModel, Word};
/// use wordle_infogain::solver::entropy::calculate_entropy;
///
/// let model = ResponseModel::new(5).unwrap();
/// let guess = Word::new("slate").unwrap();
/// let candidates = [Word::new("slate").unwrap(), Word::new("zzzzz").unwrap()];
/// let candidate_refs: Vec<&Word> = candidates.iter().collect();
///
/// let entropy = calculate_entropy(&model, &guess, &candidate_refs).unwrap();
/// assert!((entropy - 2f64.ln()).abs() < 1e-9); // an even split
/// ```
pub fn calculate_entropy(
    model: &ResponseModel,
    guess: &Word,
    candidates: &[&Word],
) -> Result<f64, SolverError> {
    Ok(shannon_entropy(&histogram_of(model, guess, candidates)?))
}
