//! Core domain types for Wordle
//!
//! Words, word pools, and the feedback model. Everything here is pure and
//! free of I/O.

mod error;
mod pool;
mod response;
mod word;

pub use error::SolverError;
pub use pool::WordPool;
pub use response::{Feedback, Response, ResponseCode, ResponseModel};
pub use word::{ALPHABET_SIZE, MAX_WORD_LENGTH, Word, WordError};
