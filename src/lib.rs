//! filetidy - sort a directory's files into category subfolders
//!
//! This library scans a directory (optionally recursively), classifies each
//! file by extension into a fixed set of categories, and moves or copies it
//! into a per-category subfolder, renaming on collision. Skip rules for the
//! scan can be supplied via a TOML configuration file.

pub mod category;
pub mod cli;
pub mod config;
pub mod organizer;
pub mod output;

pub use category::{CategoryTable, FALLBACK_CATEGORY};
pub use config::{CompiledSkips, ConfigError, SkipConfig, SkipRules};
pub use organizer::{
    FileOutcome, FileRecord, OrganizeError, OrganizeResult, Organizer, RunStatistics,
    TransferMode, resolve_unique_path,
};

pub use cli::{CliArgs, run_cli};
