//! Output formatting and styling module.
//!
//! Centralizes all terminal presentation: colored status lines, the
//! end-of-run summary table, and progress bar construction. The organizer
//! itself never prints; it hands [`FileOutcome`] values to the CLI, which
//! renders them here. That keeps the core testable without capturing
//! terminal output.

use crate::organizer::{FileOutcome, RunStatistics, TransferMode};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const RULE_WIDTH: usize = 50;

/// Stateless facade over all CLI output.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints the startup banner.
    pub fn banner() {
        println!("{}", "╔═══════════════════════════════════════╗".cyan());
        println!("{}", "║          FILE ORGANIZER TOOL          ║".cyan());
        println!("{}", "╚═══════════════════════════════════════╝".cyan());
        println!();
    }

    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Renders the status line for one file outcome.
    ///
    /// Returned as a `String` so it can go through `ProgressBar::println`
    /// without tearing the bar.
    pub fn outcome_line(outcome: &FileOutcome, mode: TransferMode) -> String {
        match outcome {
            FileOutcome::Transferred {
                file_name,
                category,
            } => {
                let label = match mode {
                    TransferMode::Move => "MOVED:".yellow().bold(),
                    TransferMode::Copy => "COPIED:".blue().bold(),
                };
                format!("{} {} → {}/", label, file_name, category)
            }
            FileOutcome::Skipped { file_name } => {
                format!("{} {} (already organized)", "SKIPPED:".dimmed(), file_name)
            }
            FileOutcome::Failed { file_name, error } => {
                format!(
                    "{} Could not process {} - {}",
                    "ERROR:".red().bold(),
                    file_name,
                    error
                )
            }
        }
    }

    /// Creates a progress bar for the transfer loop.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the end-of-run summary.
    ///
    /// One row per category sorted by descending count (ties in first-seen
    /// order), then `Skipped` / `Errors` rows only when nonzero, then the
    /// total.
    pub fn summary(stats: &RunStatistics) {
        let rule = "─".repeat(RULE_WIDTH);

        println!("\n{}", rule);
        println!("{}", "SUMMARY:".cyan().bold());
        println!("{}", rule);

        for (category, count) in stats.ranked() {
            println!("{:<20} : {:>5} file(s)", category, count);
        }

        if stats.skipped > 0 {
            println!("{:<20} : {:>5} file(s)", "Skipped", stats.skipped);
        }

        if stats.errors > 0 {
            let line = format!("{:<20} : {:>5} file(s)", "Errors", stats.errors);
            println!("{}", line.red());
        }

        println!("{}", rule);
        // pad before styling: ANSI escapes count toward the field width
        let total = format!(
            "{:<20} : {:>5} file(s)",
            "Total Processed",
            stats.total_processed()
        );
        println!("{}", total.bold());
    }
}
