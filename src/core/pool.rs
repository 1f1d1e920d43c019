//! Ordered, deduplicated word pools
//!
//! The index a pool assigns to a word is permanent and keys every table built
//! from the pool.

use super::{SolverError, Word};
use rustc_hash::FxHashMap;
use std::ops::Index;

/// An ordered, index-stable list of unique words of one length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    length: usize,
    words: Vec<Word>,
    index: FxHashMap<Word, usize>,
}

impl WordPool {
    /// Build a pool from words, keeping only `length`-letter words and the
    /// first occurrence of each duplicate
    ///
    /// # Errors
    /// Returns `SolverError::EmptyPool` if no word has the requested length.
    ///
    /// # Examples
    /// ```
    /// use wordle_infogain::core::{Word, WordPool};
    ///
    /// let words = ["crane", "slate", "crane", "cat"].map(|w| Word::new(w).unwrap());
    /// let pool = WordPool::new(words, 5).unwrap();
    /// assert_eq!(pool.len(), 2);
    /// assert_eq!(pool.index_of(&Word::new("slate").unwrap()), Some(1));
    /// ```
    pub fn new<I>(words: I, length: usize) -> Result<Self, SolverError>
    where
        I: IntoIterator<Item = Word>,
    {
        let mut pool = Self {
            length,
            words: Vec::new(),
            index: FxHashMap::default(),
        };
        pool.extend(words);

        if pool.words.is_empty() {
            return Err(SolverError::EmptyPool { length });
        }
        Ok(pool)
    }

    /// Build a pool from the `primary` words followed by the `extra` words not
    /// already present
    ///
    /// # Errors
    /// Returns `SolverError::EmptyPool` if neither list has a word of the requested length.
    pub fn merged<I, J>(primary: I, extra: J, length: usize) -> Result<Self, SolverError>
    where
        I: IntoIterator<Item = Word>,
        J: IntoIterator<Item = Word>,
    {
        Self::new(primary.into_iter().chain(extra), length)
    }

    fn extend<I>(&mut self, words: I)
    where
        I: IntoIterator<Item = Word>,
    {
        for word in words {
            if word.len() == self.length && !self.index.contains_key(&word) {
                self.index.insert(word.clone(), self.words.len());
                self.words.push(word);
            }
        }
    }

    /// Word length shared by every word in the pool
    #[inline]
    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    /// Permanent index of a word in this pool
    #[inline]
    #[must_use]
    pub fn index_of(&self, word: &Word) -> Option<usize> {
        self.index.get(word).copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(word)
    }

    /// Look up a word by text, returning its index and the pooled word
    ///
    /// # Errors
    /// Returns `SolverError::UnknownWord` if the text is not a word of this pool.
    pub fn find(&self, text: &str) -> Result<(usize, &Word), SolverError> {
        Word::new(text)
            .ok()
            .and_then(|word| self.index_of(&word))
            .map(|i| (i, &self.words[i]))
            .ok_or_else(|| SolverError::UnknownWord(text.to_string()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl Index<usize> for WordPool {
    type Output = Word;

    fn index(&self, index: usize) -> &Word {
        &self.words[index]
    }
}

impl<'a> IntoIterator for &'a WordPool {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
