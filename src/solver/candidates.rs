//! The live set of targets still consistent with all feedback in a game

use super::ResponseTable;
use crate::core::{ResponseCode, SolverError, Word, WordPool};
use rayon::prelude::*;

/// Candidate sets at least this large are filtered in parallel
const PARALLEL_PRUNE_THRESHOLD: usize = 4096;

/// Target-pool indices consistent with every response seen so far
///
/// Indices are kept in pool order. Pruning only ever removes indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    indices: Vec<usize>,
}

impl CandidateSet {
    /// Every target of a pool of `target_count` words
    #[must_use]
    pub fn full(target_count: usize) -> Self {
        Self {
            indices: (0..target_count).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    pub fn contains(&self, target: usize) -> bool {
        self.indices.binary_search(&target).is_ok()
    }

    /// Resolve the candidates to their words
    #[must_use]
    pub fn words<'p>(&self, targets: &'p WordPool) -> Vec<&'p Word> {
        self.indices.iter().map(|&i| &targets[i]).collect()
    }

    /// Keep the candidates whose response to the guess equals `response`
    ///
    /// `response_of` maps a target index to the response the current guess
    /// would get against it, by table lookup or live evaluation.
    ///
    /// # Errors
    /// Propagates the first error from `response_of`.
    pub fn prune<F>(&self, response: ResponseCode, response_of: F) -> Result<Self, SolverError>
    where
        F: Fn(usize) -> Result<ResponseCode, SolverError> + Sync,
    {
        let keep = |&target: &usize| match response_of(target) {
            Ok(code) if code == response => Some(Ok(target)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        };

        let indices = if self.indices.len() >= PARALLEL_PRUNE_THRESHOLD {
            self.indices
                .par_iter()
                .filter_map(keep)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            self.indices
                .iter()
                .filter_map(keep)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self { indices })
    }

    /// Prune using a precomputed table row
    #[must_use]
    pub fn prune_with_table(
        &self,
        table: &ResponseTable,
        guess: usize,
        response: ResponseCode,
    ) -> Self {
        let row = table.row(guess);
        Self {
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&t| row[t] == response)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResponseModel;

    fn setup() -> (ResponseModel, WordPool) {
        let model = ResponseModel::new(5).unwrap();
        let targets = WordPool::new(
            ["irate", "crate", "grate", "slate", "coach", "floor"].map(|w| Word::new(w).unwrap()),
            5,
        )
        .unwrap();
        (model, targets)
    }

    fn live_prune(
        set: &CandidateSet,
        model: &ResponseModel,
        targets: &WordPool,
        guess: &Word,
        response: ResponseCode,
    ) -> CandidateSet {
        set.prune(response, |t| model.evaluate_code(guess, &targets[t]))
            .unwrap()
    }

    #[test]
    fn prune_keeps_consistent_targets() {
        let (model, targets) = setup();
        let guess = Word::new("crane").unwrap();
        let answer = Word::new("grate").unwrap();
        let response = model.evaluate_code(&guess, &answer).unwrap();

        let full = CandidateSet::full(targets.len());
        let pruned = live_prune(&full, &model, &targets, &guess, response);

        assert!(pruned.contains(2));
        assert!(pruned.len() < targets.len());
        for &t in pruned.indices() {
            assert_eq!(model.evaluate_code(&guess, &targets[t]).unwrap(), response);
        }
    }

    #[test]
    fn prune_is_idempotent() {
        let (model, targets) = setup();
        let guess = Word::new("slate").unwrap();
        let response = model
            .evaluate_code(&guess, &Word::new("crate").unwrap())
            .unwrap();

        let full = CandidateSet::full(targets.len());
        let once = live_prune(&full, &model, &targets, &guess, response);
        let twice = live_prune(&once, &model, &targets, &guess, response);
        assert_eq!(once, twice);
    }

    #[test]
    fn prune_never_grows() {
        let (model, targets) = setup();
        let mut set = CandidateSet::full(targets.len());
        let answer = Word::new("floor").unwrap();

        for guess in ["crane", "robot", "floor"] {
            let guess = Word::new(guess).unwrap();
            let response = model.evaluate_code(&guess, &answer).unwrap();
            let next = live_prune(&set, &model, &targets, &guess, response);
            assert!(next.len() <= set.len());
            assert!(next.indices().iter().all(|&t| set.contains(t)));
            set = next;
        }
        assert_eq!(set.words(&targets), [&answer]);
    }

    #[test]
    fn impossible_response_empties_set() {
        let (model, targets) = setup();
        let guess = Word::new("zzzzz").unwrap();
        let pruned = live_prune(
            &CandidateSet::full(targets.len()),
            &model,
            &targets,
            &guess,
            model.win_code(),
        );
        assert!(pruned.is_empty());
    }

    #[test]
    fn prune_propagates_errors() {
        let (model, targets) = setup();
        let guess = Word::new("cat").unwrap();
        let result = CandidateSet::full(targets.len())
            .prune(0, |t| model.evaluate_code(&guess, &targets[t]));
        assert!(matches!(result, Err(SolverError::LengthMismatch { .. })));
    }

    #[test]
    fn table_prune_matches_live_prune() {
        let (model, targets) = setup();
        let table = ResponseTable::build(&model, &targets, &targets).unwrap();
        let full = CandidateSet::full(targets.len());

        for (g, guess) in targets.iter().enumerate() {
            for t in 0..targets.len() {
                let response = table.code(g, t);
                assert_eq!(
                    full.prune_with_table(&table, g, response),
                    live_prune(&full, &model, &targets, guess, response)
                );
            }
        }
    }

    #[test]
    fn large_sets_prune_in_parallel_with_same_result() {
        let full = CandidateSet::full(PARALLEL_PRUNE_THRESHOLD * 2);
        let pruned = full.prune(1, |t| Ok((t % 3) as ResponseCode)).unwrap();
        let expected = (0..PARALLEL_PRUNE_THRESHOLD * 2).filter(|t| t % 3 == 1).count();
        assert_eq!(pruned.len(), expected);
        assert!(pruned.indices().windows(2).all(|w| w[0] < w[1]));
        assert!(pruned.indices().iter().all(|t| t % 3 == 1));
    }
}
