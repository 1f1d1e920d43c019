//! Formatting utilities for terminal output

use crate::core::{Feedback, Response};

/// Format a response as emoji squares
#[must_use]
pub fn response_to_emoji(response: &Response) -> String {
    response
        .feedback()
        .iter()
        .map(|feedback| match feedback {
            Feedback::Wrong => '⬜',
            Feedback::Misplaced => '🟨',
            Feedback::Correct => '🟩',
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// "guess" or "guesses"
#[must_use]
pub const fn plural(count: usize) -> &'static str {
    if count == 1 { "guess" } else { "guesses" }
}
