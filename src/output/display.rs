//! Display functions for command results

use super::formatters::{create_progress_bar, plural, response_to_emoji};
use crate::commands::{ExportSummary, FirstGuessReport};
use crate::core::{Response, ResponseModel, Word};
use crate::solver::GameResult;
use colored::Colorize;
use std::path::Path;

/// Print the banner of an interactive game
pub fn print_game_header(target: Option<&Word>) {
    let target = target.map_or_else(
        || "UNKNOWN".bright_black().bold(),
        |word| word.text().to_uppercase().bright_yellow().bold(),
    );
    println!("\n{}", "─".repeat(60).cyan());
    println!("TARGET: {target}");
    println!("{}", "─".repeat(60).cyan());
}

pub fn print_turn(turn: usize, candidates: usize, guess: &Word, score: f64) {
    println!(
        "\nTurn {turn}: {} (Score: {}, Candidates: {candidates})",
        guess.text().to_uppercase().bright_white().bold(),
        format!("{score:.3}").bright_yellow()
    );
}

pub fn print_response(model: &ResponseModel, response: &Response) {
    println!(
        "  Response: {} {}",
        model.render(response),
        response_to_emoji(response)
    );
}

pub fn print_game_result(result: &GameResult) {
    println!();
    if result.is_win() {
        println!(
            "{}",
            format!("Congrats! Total Guesses: {}", result.guess_count())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            "Failed to guess: no more available candidates!".red().bold()
        );
    }
}

/// Print the `top` best-scoring opening guesses
pub fn print_rankings(ranked: &[(&Word, f64)], top: usize) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "INITIAL SCORES".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let best = ranked.first().map_or(0.0, |&(_, score)| score);
    for (rank, (word, score)) in ranked.iter().take(top).enumerate() {
        println!(
            "  {:>3}. {} [{}] {}",
            rank + 1,
            word.text().to_uppercase(),
            create_progress_bar(*score, best, 30).green(),
            format!("{score:.4}").bright_yellow()
        );
    }
}

/// Print first-guess reports with their guess distributions
pub fn print_reports(reports: &[FirstGuessReport]) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "FIRST GUESS ANALYSIS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    for report in reports {
        let stats = &report.stats;
        println!(
            "\n({}) {} (Score: {:.2})",
            report.rank,
            report.guess.text().to_uppercase().bright_yellow().bold(),
            report.score
        );
        if let Some(mean) = stats.mean() {
            println!("   Mean:  {}", format!("{mean:.3}").bright_yellow().bold());
        }
        if let (Some(min), Some(max)) = (stats.min(), stats.max()) {
            let games = stats.games() as f64;
            for guesses in min..=max {
                let count = stats.count(guesses);
                println!(
                    "   {guesses:>2} {:<7} {} {count:5}",
                    plural(guesses),
                    create_progress_bar(count as f64, games, 40).green()
                );
            }
        }
        if stats.failed() > 0 {
            println!("   {}", format!("Failed: {}", stats.failed()).red());
        }
        if !report.complete {
            println!("   {}", "(cancelled before every target was played)".yellow());
        }
    }
}

pub fn print_export_summary(summary: &ExportSummary, path: &Path) {
    println!(
        "\nExported {} games ({} failed) to {}",
        summary.games.to_string().bright_yellow(),
        summary.failed,
        path.display()
    );
    if summary.cancelled {
        println!("{}", "Export was cancelled before every target was played".yellow());
    }
}
