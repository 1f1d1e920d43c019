//! Entropy-based guess selection
//!
//! Implements Shannon entropy over response distributions and the strategy
//! that maximizes it.

mod calculator;
mod maximizer;

pub use calculator::{Histogram, Histograms, calculate_entropy, histogram_of, shannon_entropy};
pub use maximizer::EntropyMaximizer;
