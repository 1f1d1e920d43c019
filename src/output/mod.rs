//! Terminal output formatting
//!
//! Printing of games, rankings and analysis reports.

pub mod display;
pub mod formatters;

pub use display::{
    print_export_summary, print_game_header, print_game_result, print_rankings, print_reports,
    print_response, print_turn,
};
