//! Entropy-maximizing guess selection
//!
//! Scores each guess by the Shannon entropy of the responses it would produce
//! over the current candidates, using histograms counted from the session's
//! response table.

use super::calculator::{Histograms, calculate_entropy, shannon_entropy};
use crate::core::Word;
use crate::solver::{CandidateSet, Session, SessionCache};
use std::borrow::Cow;

/// Strategy choosing the guess with the highest expected information gain
///
/// Starts from the session's shared initial histograms and only allocates its
/// own copy once the candidate set first shrinks.
#[derive(Debug, Clone)]
pub struct EntropyMaximizer<'s> {
    session: &'s Session,
    cache: &'s SessionCache,
    histograms: Cow<'s, Histograms>,
    candidates: CandidateSet,
}

impl<'s> EntropyMaximizer<'s> {
    #[must_use]
    pub fn new(session: &'s Session, cache: &'s SessionCache) -> Self {
        Self {
            session,
            cache,
            histograms: Cow::Borrowed(&cache.initial),
            candidates: CandidateSet::full(session.targets().len()),
        }
    }

    /// Current histograms
    #[must_use]
    pub fn histograms(&self) -> &Histograms {
        &self.histograms
    }

    /// Entropy (in nats) of the response distribution for `word`
    ///
    /// Guess-pool words read their cached histogram; other words are
    /// evaluated live against the current candidates.
    #[must_use]
    pub fn score(&self, word: &Word) -> f64 {
        if let Some(histogram) = self
            .session
            .guesses()
            .index_of(word)
            .and_then(|g| self.histograms.get(g))
        {
            return shannon_entropy(histogram);
        }

        let candidates = self.candidates.words(self.session.targets());
        calculate_entropy(self.session.model(), word, &candidates).unwrap_or(0.0)
    }

    /// Recount histograms over the surviving candidates
    pub fn refresh(&mut self, candidates: &CandidateSet) {
        self.histograms = Cow::Owned(Histograms::compute(&self.cache.table, candidates));
        self.candidates = candidates.clone();
    }

    /// True once a single candidate remains
    #[must_use]
    pub const fn should_narrow_pool(words: &[&Word]) -> bool {
        words.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ResponseModel, WordPool};

    fn session(guesses: &[&str], targets: &[&str]) -> Session {
        let pool = |list: &[&str]| {
            WordPool::new(list.iter().map(|w| Word::new(*w).unwrap()), 5).unwrap()
        };
        Session::new(ResponseModel::new(5).unwrap(), pool(guesses), pool(targets)).unwrap()
    }

    #[test]
    fn score_is_nonnegative_and_prefers_splitting_guesses() {
        let session = session(
            &["aaaaa", "aeros", "crane"],
            &["slate", "irate", "crate", "grate"],
        );
        let cache = session.build_cache().unwrap();
        let maximizer = EntropyMaximizer::new(&session, &cache);

        let flat = maximizer.score(&Word::new("aaaaa").unwrap());
        let split = maximizer.score(&Word::new("crane").unwrap());
        assert!(flat >= 0.0);
        assert!(split > flat);
    }

    #[test]
    fn zero_score_only_for_single_outcome() {
        let session = session(&["zzzzz", "slate"], &["aaaaa", "bbbbb"]);
        let cache = session.build_cache().unwrap();
        let maximizer = EntropyMaximizer::new(&session, &cache);

        assert!(maximizer.score(&Word::new("zzzzz").unwrap()).abs() < f64::EPSILON);

        // "abbey" is outside the guess pool and separates the two targets
        let live = maximizer.score(&Word::new("abbey").unwrap());
        assert!((live - 2f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn refresh_recounts_over_candidates() {
        let session = session(&["crane", "slate"], &["crane", "slate", "irate"]);
        let cache = session.build_cache().unwrap();
        let mut maximizer = EntropyMaximizer::new(&session, &cache);
        assert!(matches!(maximizer.histograms, Cow::Borrowed(_)));

        let only_crane = CandidateSet::full(3).prune(1, |t| Ok(u16::from(t == 0))).unwrap();
        maximizer.refresh(&only_crane);

        assert_eq!(maximizer.histograms().total(), 1);
        assert!(maximizer.score(&Word::new("slate").unwrap()).abs() < f64::EPSILON);
        // The shared initial histograms are untouched
        assert_eq!(cache.initial.total(), 3);
    }

    #[test]
    fn narrow_pool_only_for_single_candidate() {
        let words = ["crane", "slate"].map(|w| Word::new(w).unwrap());
        assert!(EntropyMaximizer::should_narrow_pool(&[&words[0]]));
        assert!(!EntropyMaximizer::should_narrow_pool(&[&words[0], &words[1]]));
        assert!(!EntropyMaximizer::should_narrow_pool(&[]));
    }
}
