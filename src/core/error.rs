//! Errors raised by the solver core

use super::WordError;
use std::fmt;

/// Errors produced while building pools, evaluating feedback, or decoding responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Guess and target lengths disagree
    LengthMismatch { guess: usize, target: usize },
    /// A word list contains no words of the session length
    EmptyPool { length: usize },
    /// A response string has the wrong length
    InvalidResponseFormat(String),
    /// A response string contains a symbol outside the symbol table
    UnknownResponseSymbol { symbol: char, position: usize },
    /// Integer response code outside `[0, 3^k)`
    CodeOutOfRange(u32),
    /// Word length is zero or too long for the code space
    UnsupportedLength(usize),
    /// Symbol table is not three distinct characters
    InvalidSymbols(String),
    /// A word is not part of the pool it was looked up in
    UnknownWord(String),
    /// A word failed validation
    Word(WordError),
    /// The oracle could not produce a response at all
    Oracle(String),
    /// A strategy needs precomputed tables and none were built
    MissingCache,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { guess, target } => write!(
                f,
                "size of the guess ({guess}) does not equal the size of the target ({target})"
            ),
            Self::EmptyPool { length } => {
                write!(f, "input words do not contain {length}-letter words")
            }
            Self::InvalidResponseFormat(response) => {
                write!(f, "invalid response format: {response:?}")
            }
            Self::UnknownResponseSymbol { symbol, position } => {
                write!(f, "unknown response symbol {symbol:?} at position {position}")
            }
            Self::CodeOutOfRange(code) => write!(f, "response code {code} out of range"),
            Self::UnsupportedLength(length) => write!(f, "unsupported word length {length}"),
            Self::InvalidSymbols(symbols) => write!(
                f,
                "wrong response format {symbols:?}: must be three distinct single characters"
            ),
            Self::UnknownWord(word) => write!(f, "word '{word}' is not in the word list"),
            Self::Word(e) => write!(f, "invalid word: {e}"),
            Self::Oracle(reason) => write!(f, "oracle failed: {reason}"),
            Self::MissingCache => f.write_str("response table has not been precomputed"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Word(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WordError> for SolverError {
    fn from(e: WordError) -> Self {
        Self::Word(e)
    }
}
