//! Command-line interface module for filetidy.
//!
//! Handles argument parsing, the interactive prompt sequence, and the
//! orchestration of one organize run:
//! - Gather parameters from flags or prompts
//! - Validate the target directory before touching anything
//! - Drive the organizer, rendering a line per file
//! - Render the summary

use crate::category::CategoryTable;
use crate::config::SkipConfig;
use crate::organizer::{Organizer, TransferMode};
use crate::output::OutputFormatter;
use clap::Parser;
use dialoguer::{Input, theme::ColorfulTheme};
use std::env;
use std::path::PathBuf;

/// Sort a directory's files into category subfolders by extension.
///
/// With no DIRECTORY argument the tool prompts interactively for the
/// folder, the operation mode, and recursion.
#[derive(Debug, Parser)]
#[command(name = "filetidy", version)]
pub struct CliArgs {
    /// Directory to organize; prompts interactively when omitted
    pub directory: Option<PathBuf>,

    /// Move files into category folders (the originals are removed)
    #[arg(long = "move", conflicts_with = "copy")]
    pub move_files: bool,

    /// Copy files into category folders, leaving the originals in place (default)
    #[arg(long)]
    pub copy: bool,

    /// Also organize files in nested subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Path to a TOML skip-rule configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Parameters for one organize run, after flags and prompts are resolved.
#[derive(Debug, Clone)]
struct RunOptions {
    root: PathBuf,
    mode: TransferMode,
    recursive: bool,
}

/// Runs one complete organize invocation.
///
/// Returns a display-ready message on failure; the caller maps that to the
/// process exit code. No files are touched before the target directory and
/// configuration have both validated.
pub fn run_cli(args: &CliArgs) -> Result<(), String> {
    OutputFormatter::banner();

    let options = gather_options(args)?;

    if !options.root.is_dir() {
        return Err(format!(
            "The folder does not exist: {}",
            options.root.display()
        ));
    }

    let skips = SkipConfig::load(args.config.as_deref())
        .and_then(SkipConfig::compile)
        .map_err(|error| error.to_string())?;

    let table = CategoryTable::standard();
    let organizer = Organizer::new(&table, options.mode, options.recursive, &skips);

    println!();
    OutputFormatter::info(&format!(
        "{} files in {}...",
        options.mode.verb(),
        options.root.display()
    ));

    let files = organizer
        .enumerate(&options.root)
        .map_err(|error| error.to_string())?;

    if files.is_empty() {
        OutputFormatter::plain(&format!(
            "No files found in {}.",
            options.root.display()
        ));
        return Ok(());
    }

    OutputFormatter::plain(&format!("Found {} file(s)\n", files.len()));

    let pb = OutputFormatter::create_progress_bar(files.len() as u64);
    let stats = organizer.organize_files(&options.root, &files, |outcome| {
        pb.println(OutputFormatter::outcome_line(outcome, options.mode));
        pb.inc(1);
    });
    pb.finish_and_clear();

    OutputFormatter::summary(&stats);

    if stats.errors == 0 {
        println!();
        OutputFormatter::success("All files organized successfully!");
    }

    Ok(())
}

/// Resolves run parameters from flags, prompting for whatever is missing.
///
/// A positional directory makes the run fully non-interactive; without one,
/// the original prompt sequence runs (any mode/recursion flags still win
/// over their prompts).
fn gather_options(args: &CliArgs) -> Result<RunOptions, String> {
    if let Some(directory) = &args.directory {
        return Ok(RunOptions {
            root: directory.clone(),
            mode: flag_mode(args).unwrap_or(TransferMode::Copy),
            recursive: args.recursive,
        });
    }

    let theme = ColorfulTheme::default();

    let raw_path: String = Input::with_theme(&theme)
        .with_prompt("Enter the folder path to organize (blank for current directory)")
        .allow_empty(true)
        .interact_text()
        .map_err(|error| format!("Prompt failed: {}", error))?;

    let root = match parse_folder_input(&raw_path) {
        Some(path) => path,
        None => {
            let cwd = env::current_dir()
                .map_err(|error| format!("Could not determine current directory: {}", error))?;
            OutputFormatter::plain(&format!("Using current directory: {}", cwd.display()));
            cwd
        }
    };

    let mode = match flag_mode(args) {
        Some(mode) => mode,
        None => {
            println!("\nChoose operation mode:");
            println!("1. Move files (original files will be moved)");
            println!("2. Copy files (original files remain)");
            let choice: String = Input::with_theme(&theme)
                .with_prompt("Enter your choice (1 or 2)")
                .allow_empty(true)
                .interact_text()
                .map_err(|error| format!("Prompt failed: {}", error))?;
            parse_mode_choice(&choice)
        }
    };

    let recursive = if args.recursive {
        true
    } else {
        let answer: String = Input::with_theme(&theme)
            .with_prompt("Include subfolders? (y/n)")
            .allow_empty(true)
            .interact_text()
            .map_err(|error| format!("Prompt failed: {}", error))?;
        parse_recursion_choice(&answer)
    };

    Ok(RunOptions {
        root,
        mode,
        recursive,
    })
}

/// Mode requested via flags, if any.
fn flag_mode(args: &CliArgs) -> Option<TransferMode> {
    if args.move_files {
        Some(TransferMode::Move)
    } else if args.copy {
        Some(TransferMode::Copy)
    } else {
        None
    }
}

/// Normalizes the folder prompt answer: trimmed, surrounding quotes
/// stripped, empty meaning "use the current directory" (`None`).
fn parse_folder_input(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim().trim_matches('"').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// The literal `"1"` selects move; anything else selects copy.
fn parse_mode_choice(raw: &str) -> TransferMode {
    if raw.trim() == "1" {
        TransferMode::Move
    } else {
        TransferMode::Copy
    }
}

/// `"y"`/`"Y"` selects recursive; anything else does not.
fn parse_recursion_choice(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folder_input_trims_and_strips_quotes() {
        assert_eq!(
            parse_folder_input("  \"/home/user/Downloads\"  "),
            Some(PathBuf::from("/home/user/Downloads"))
        );
        assert_eq!(
            parse_folder_input("plain/path"),
            Some(PathBuf::from("plain/path"))
        );
    }

    #[test]
    fn test_parse_folder_input_empty_means_current_directory() {
        assert_eq!(parse_folder_input(""), None);
        assert_eq!(parse_folder_input("   "), None);
        assert_eq!(parse_folder_input("\"\""), None);
    }

    #[test]
    fn test_parse_mode_choice_one_is_move() {
        assert_eq!(parse_mode_choice("1"), TransferMode::Move);
        assert_eq!(parse_mode_choice(" 1 "), TransferMode::Move);
    }

    #[test]
    fn test_parse_mode_choice_anything_else_is_copy() {
        assert_eq!(parse_mode_choice("2"), TransferMode::Copy);
        assert_eq!(parse_mode_choice(""), TransferMode::Copy);
        assert_eq!(parse_mode_choice("move"), TransferMode::Copy);
    }

    #[test]
    fn test_parse_recursion_choice() {
        assert!(parse_recursion_choice("y"));
        assert!(parse_recursion_choice("Y"));
        assert!(parse_recursion_choice(" y "));
        assert!(!parse_recursion_choice("yes"));
        assert!(!parse_recursion_choice("n"));
        assert!(!parse_recursion_choice(""));
    }

    #[test]
    fn test_flag_mode() {
        let mut args = CliArgs::parse_from(["filetidy", "some/dir"]);
        assert_eq!(flag_mode(&args), None);

        args.move_files = true;
        assert_eq!(flag_mode(&args), Some(TransferMode::Move));

        args.move_files = false;
        args.copy = true;
        assert_eq!(flag_mode(&args), Some(TransferMode::Copy));
    }

    #[test]
    fn test_args_parse_flags() {
        let args = CliArgs::parse_from(["filetidy", "/tmp/stuff", "--move", "-r"]);
        assert_eq!(args.directory, Some(PathBuf::from("/tmp/stuff")));
        assert!(args.move_files);
        assert!(args.recursive);
        assert!(args.config.is_none());
    }
}
