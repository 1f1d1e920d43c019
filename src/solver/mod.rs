//! Wordle solving algorithms
//!
//! Precomputed response tables, candidate pruning, the two scoring strategies
//! and the game loop that ties them together.

mod candidates;
pub mod entropy;
mod game;
mod heuristic;
mod session;
pub mod strategy;
mod table;

pub use candidates::CandidateSet;
pub use entropy::{EntropyMaximizer, Histograms};
pub use game::{Game, GameResult, GameStatus, Oracle, Solver, Step, TargetOracle};
pub use heuristic::{FrequencyHeuristic, LetterFrequencies};
pub use session::{Session, SessionCache};
pub use strategy::{Strategy, StrategyKind, StrategyType};
pub use table::ResponseTable;
