//! Wordle InfoGain
//!
//! A Wordle solver that picks guesses either by a letter-frequency heuristic
//! or by maximizing the Shannon entropy of the response distribution.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_infogain::core::{ResponseModel, Word};
//!
//! let model = ResponseModel::new(5).unwrap();
//! let guess = Word::new("crane").unwrap();
//! let target = Word::new("slate").unwrap();
//!
//! let response = model.evaluate(&guess, &target).unwrap();
//! assert_eq!(model.render(&response), "00202");
//! ```

// Words, responses and word pools
pub mod core;

// Strategies, candidate tracking and games
pub mod solver;

// On-disk precomputed tables
pub mod cache;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
