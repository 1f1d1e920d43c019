//! Word lists for Wordle solving
//!
//! Targets always come from the small list. Guesses come from either the small
//! list or the large pool: the small list followed by the large list's words
//! not already present.

pub mod loader;

use crate::core::{SolverError, Word, WordPool};
use std::fmt;
use std::io;
use std::path::Path;

/// Which list the guess pool is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSize {
    Small,
    Large,
}

impl ListSize {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for ListSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw small and large lists, unfiltered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordLists {
    pub small: Vec<Word>,
    pub large: Vec<Word>,
}

impl WordLists {
    /// Load the small list, and the large list when `large` is given
    ///
    /// # Errors
    /// Returns an I/O error if a file cannot be read.
    pub fn load(small: &Path, large: Option<&Path>) -> io::Result<Self> {
        Ok(Self {
            small: loader::load_from_file(small)?,
            large: large.map(loader::load_from_file).transpose()?.unwrap_or_default(),
        })
    }

    /// Target pool of `length`-letter words
    ///
    /// # Errors
    /// Returns `SolverError::EmptyPool` if the small list has no such words.
    pub fn targets(&self, length: usize) -> Result<WordPool, SolverError> {
        WordPool::new(self.small.iter().cloned(), length)
    }

    /// Guess pool of `length`-letter words drawn from the list of `size`
    ///
    /// # Errors
    /// Returns `SolverError::EmptyPool` if the lists have no such words.
    pub fn guesses(&self, size: ListSize, length: usize) -> Result<WordPool, SolverError> {
        match size {
            ListSize::Small => self.targets(length),
            ListSize::Large => WordPool::merged(
                self.small.iter().cloned(),
                self.large.iter().cloned(),
                length,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists() -> WordLists {
        WordLists {
            small: loader::parse_words("crane\nslate\ncat"),
            large: loader::parse_words("slate\nrobot\ndog\ncrane\nfloor"),
        }
    }

    #[test]
    fn targets_come_from_small_list() {
        let targets = lists().targets(5).unwrap();
        let texts: Vec<&str> = targets.iter().map(Word::text).collect();
        assert_eq!(texts, ["crane", "slate"]);
    }

    #[test]
    fn large_pool_appends_new_words_only() {
        let guesses = lists().guesses(ListSize::Large, 5).unwrap();
        let texts: Vec<&str> = guesses.iter().map(Word::text).collect();
        assert_eq!(texts, ["crane", "slate", "robot", "floor"]);
    }

    #[test]
    fn small_pool_matches_targets() {
        let lists = lists();
        assert_eq!(
            lists.guesses(ListSize::Small, 3).unwrap(),
            lists.targets(3).unwrap()
        );
    }

    #[test]
    fn missing_length_is_an_error() {
        assert_eq!(
            lists().targets(4).unwrap_err(),
            SolverError::EmptyPool { length: 4 }
        );
    }
}
