//! Letter-frequency guess scoring
//!
//! Prefers guesses built from letters that appear in many of the remaining
//! candidates. Each letter counts once per word, both when measuring
//! frequencies and when scoring, so words like "sissy" gain nothing from
//! repeating a common letter.

use super::CandidateSet;
use crate::core::{ALPHABET_SIZE, Word, WordPool};

/// Per-letter share of candidates containing the letter
///
/// Letters present in every candidate carry no information and are stored as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterFrequencies([f64; ALPHABET_SIZE]);

impl LetterFrequencies {
    /// Measure frequencies over a set of words, counting each letter once per word
    ///
    /// # Examples
    /// ```
    /// use wordle_infogain::core::Word;
    /// use wordle_infogain::solver::LetterFrequencies;
    ///
    /// let words = ["crane", "crate", "slate"].map(|w| Word::new(w).unwrap());
    /// let freq = LetterFrequencies::from_words(&words);
    ///
    /// assert_eq!(freq.get(b'a'), 0.0); // in every word
    /// assert!((freq.get(b'c') - 2.0 / 3.0).abs() < 1e-9);
    /// assert_eq!(freq.get(b'z'), 0.0);
    /// ```
    pub fn from_words<'w, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'w Word>,
    {
        let mut counts = [0usize; ALPHABET_SIZE];
        let mut total = 0usize;

        for word in words {
            total += 1;
            let mask = word.letter_mask();
            for (letter, count) in counts.iter_mut().enumerate() {
                if mask & (1 << letter) != 0 {
                    *count += 1;
                }
            }
        }

        let mut frequencies = [0.0; ALPHABET_SIZE];
        if total > 0 {
            for (freq, &count) in frequencies.iter_mut().zip(&counts) {
                *freq = (count % total) as f64 / total as f64;
            }
        }
        Self(frequencies)
    }

    /// Frequency of a lowercase ASCII letter
    #[must_use]
    pub fn get(&self, letter: u8) -> f64 {
        letter
            .checked_sub(b'a')
            .and_then(|i| self.0.get(usize::from(i)))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of the frequencies of the distinct letters in `word`
    #[must_use]
    pub fn score(&self, word: &Word) -> f64 {
        let mask = word.letter_mask();
        self.0
            .iter()
            .enumerate()
            .filter(|&(letter, _)| mask & (1 << letter) != 0)
            .map(|(_, &freq)| freq)
            .sum()
    }
}

/// Heuristic strategy scoring words by aggregate letter frequency
#[derive(Debug, Clone)]
pub struct FrequencyHeuristic<'s> {
    targets: &'s WordPool,
    frequencies: LetterFrequencies,
}

impl<'s> FrequencyHeuristic<'s> {
    /// Start with frequencies over the whole target pool
    #[must_use]
    pub fn new(targets: &'s WordPool) -> Self {
        Self {
            targets,
            frequencies: LetterFrequencies::from_words(targets),
        }
    }

    #[must_use]
    pub const fn frequencies(&self) -> &LetterFrequencies {
        &self.frequencies
    }

    #[must_use]
    pub fn score(&self, word: &Word) -> f64 {
        self.frequencies.score(word)
    }

    /// Recompute frequencies over the surviving candidates
    ///
    /// An empty set leaves the previous frequencies in place.
    pub fn refresh(&mut self, candidates: &CandidateSet) {
        if !candidates.is_empty() {
            self.frequencies = LetterFrequencies::from_words(candidates.words(self.targets));
        }
    }

    /// True when every word has the same set of distinct letters
    ///
    /// Such words all score the same, so the guess should come from them directly.
    #[must_use]
    pub fn should_narrow_pool(words: &[&Word]) -> bool {
        words
            .windows(2)
            .all(|pair| pair[0].letter_mask() == pair[1].letter_mask())
    }
}
