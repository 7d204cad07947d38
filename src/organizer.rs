//! Core organize run: enumeration, skip rule, transfer, statistics.
//!
//! The [`Organizer`] walks a root directory, classifies every regular file
//! through a borrowed [`CategoryTable`], and moves or copies each one into
//! `root/<category>/`, renaming on collision. Failures are caught per file
//! and aggregated; one bad file never aborts the run.

use crate::category::CategoryTable;
use crate::config::CompiledSkips;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that can occur while organizing a directory.
#[derive(Debug)]
pub enum OrganizeError {
    /// The root directory does not exist or is not a directory.
    RootNotFound { path: PathBuf },
    /// Walking the directory tree failed before any file was touched.
    EnumerationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to move or copy a file to its destination.
    TransferFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: io::Error,
    },
    /// The path has no final name component.
    MissingFileName { path: PathBuf },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "The folder does not exist: {}", path.display())
            }
            Self::EnumerationFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::TransferFailed {
                source_path,
                destination,
                source,
            } => {
                write!(
                    f,
                    "Failed to transfer {} to {}: {}",
                    source_path.display(),
                    destination.display(),
                    source
                )
            }
            Self::MissingFileName { path } => {
                write!(f, "Path has no file name: {}", path.display())
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organize operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Whether files are moved into category folders or copied there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// The source file is removed after the transfer.
    Move,
    /// The source file is retained.
    Copy,
}

impl TransferMode {
    /// Present-tense verb for progress messages ("Moving" / "Copying").
    pub fn verb(&self) -> &'static str {
        match self {
            TransferMode::Move => "Moving",
            TransferMode::Copy => "Copying",
        }
    }
}

/// Per-iteration view of one file, derived from its raw path.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Full path to the source file.
    pub path: PathBuf,
    /// Final name component.
    pub file_name: String,
    /// Lowercased extension with the leading dot; empty when there is none.
    pub extension: String,
    /// Name of the immediate containing directory; empty at a filesystem root.
    pub parent_name: String,
}

impl FileRecord {
    /// Derives a record from a path.
    ///
    /// Fails only when the path has no final name component.
    pub fn from_path(path: &Path) -> OrganizeResult<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| OrganizeError::MissingFileName {
                path: path.to_path_buf(),
            })?;

        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        let parent_name = path
            .parent()
            .and_then(|parent| parent.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            extension,
            parent_name,
        })
    }
}

/// What happened to a single file during a run.
///
/// The per-file loop aggregates these instead of letting errors unwind
/// across it; callers observe them through the `on_file` callback.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was moved or copied into `category/`.
    Transferred { file_name: String, category: String },
    /// The file already sat inside a category-named folder and was left alone.
    Skipped { file_name: String },
    /// Processing this file failed; the run continued.
    Failed {
        file_name: String,
        error: OrganizeError,
    },
}

/// Counters accumulated over one organize run.
///
/// Per-category counts keep first-seen order so summary ties render in a
/// stable order. Created empty per run and discarded after the summary.
#[derive(Debug, Default)]
pub struct RunStatistics {
    counts: Vec<(String, usize)>,
    /// Files left untouched by the skip rule.
    pub skipped: usize,
    /// Files whose processing failed.
    pub errors: usize,
}

impl RunStatistics {
    /// Counts one successfully processed file under `category`.
    pub fn record(&mut self, category: &str) {
        match self.counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((category.to_string(), 1)),
        }
    }

    /// Count for one category; zero when the category never appeared.
    pub fn count_for(&self, category: &str) -> usize {
        self.counts
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Total number of successfully processed files.
    pub fn total_processed(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// True when nothing was processed, skipped, or errored.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.skipped == 0 && self.errors == 0
    }

    /// Category counts sorted by descending count, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        // sort_by is stable, so equal counts keep insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Returns a destination path that does not currently exist.
///
/// If `desired` is free it is returned unchanged; otherwise `stem_1.ext`,
/// `stem_2.ext`, ... are probed from 1 until a free path is found.
///
/// The check-then-use pattern is inherently racy: another process can claim
/// the returned path before the caller uses it. Accepted for a single-user
/// interactive tool. Probing is O(n) in the number of prior collisions, with
/// no upper bound; a known limitation rather than something to optimize.
///
/// # Examples
///
/// ```no_run
/// use filetidy::organizer::resolve_unique_path;
/// use std::path::Path;
///
/// let destination = resolve_unique_path(Path::new("/tmp/Documents/notes.txt"));
/// assert!(!destination.exists());
/// ```
pub fn resolve_unique_path(desired: &Path) -> PathBuf {
    if !desired.exists() {
        return desired.to_path_buf();
    }

    let parent = desired.parent().unwrap_or_else(|| Path::new(""));
    let stem = desired
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = desired
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1usize;
    loop {
        let candidate = parent.join(format!("{}_{}{}", stem, counter, extension));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Moves a file, falling back to copy-then-remove across filesystems.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(source, destination)?;
            fs::remove_file(source)
        }
        Err(error) => Err(error),
    }
}

/// Drives one organize run over a root directory.
///
/// Borrows its category table and compiled skip rules so tests can inject
/// both. Single-threaded, blocking I/O throughout; the statistics
/// accumulator is owned by the run and never shared.
pub struct Organizer<'a> {
    table: &'a CategoryTable,
    mode: TransferMode,
    recursive: bool,
    skips: &'a CompiledSkips,
}

impl<'a> Organizer<'a> {
    pub fn new(
        table: &'a CategoryTable,
        mode: TransferMode,
        recursive: bool,
        skips: &'a CompiledSkips,
    ) -> Self {
        Self {
            table,
            mode,
            recursive,
            skips,
        }
    }

    /// Collects the regular files a run would process, in enumeration order.
    ///
    /// Top-level only unless the organizer is recursive. Directory entries
    /// are never targets; files matching a compiled skip rule are excluded
    /// here and appear in no counter. The whole list is collected before any
    /// file is touched, so files moved during the run are not re-enumerated.
    pub fn enumerate(&self, root: &Path) -> OrganizeResult<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(OrganizeError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(root).max_depth(max_depth) {
            let entry = entry.map_err(|error| {
                let path = error
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                OrganizeError::EnumerationFailed {
                    path,
                    source: error.into(),
                }
            })?;

            // the tool's own configuration file is never a target
            if entry.file_name() == crate::config::LOCAL_CONFIG_FILE {
                continue;
            }

            if entry.file_type().is_file() && !self.skips.should_skip(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Enumerates `root` and processes every file found.
    ///
    /// `on_file` observes each [`FileOutcome`] as it happens, which keeps
    /// presentation out of the core: callers print progress lines, tests
    /// pass `|_| {}`.
    pub fn organize<F>(&self, root: &Path, on_file: F) -> OrganizeResult<RunStatistics>
    where
        F: FnMut(&FileOutcome),
    {
        let files = self.enumerate(root)?;
        Ok(self.organize_files(root, &files, on_file))
    }

    /// Processes an already-enumerated file list.
    ///
    /// Public so the CLI can size its progress bar from the list first, and
    /// so tests can hand in a stale list (a source that vanished between
    /// enumeration and transfer is a per-file error, not a run failure).
    pub fn organize_files<F>(&self, root: &Path, files: &[PathBuf], mut on_file: F) -> RunStatistics
    where
        F: FnMut(&FileOutcome),
    {
        let mut stats = RunStatistics::default();

        for path in files {
            let outcome = self.process_file(root, path);
            match &outcome {
                FileOutcome::Transferred { category, .. } => stats.record(category),
                FileOutcome::Skipped { .. } => stats.skipped += 1,
                FileOutcome::Failed { .. } => stats.errors += 1,
            }
            on_file(&outcome);
        }

        stats
    }

    /// Processes one file, catching every failure at the file boundary.
    fn process_file(&self, root: &Path, path: &Path) -> FileOutcome {
        let record = match FileRecord::from_path(path) {
            Ok(record) => record,
            Err(error) => {
                return FileOutcome::Failed {
                    file_name: path.display().to_string(),
                    error,
                };
            }
        };

        // Only the immediate parent is consulted; category-named folders
        // deeper in the tree are not detected.
        if self.table.is_category_dir(&record.parent_name) {
            return FileOutcome::Skipped {
                file_name: record.file_name,
            };
        }

        let category = self.table.classify(&record.extension).to_string();

        match self.transfer(root, &record, &category) {
            Ok(()) => FileOutcome::Transferred {
                file_name: record.file_name,
                category,
            },
            Err(error) => FileOutcome::Failed {
                file_name: record.file_name,
                error,
            },
        }
    }

    /// Ensures the category folder exists and transfers one file into it.
    fn transfer(&self, root: &Path, record: &FileRecord, category: &str) -> OrganizeResult<()> {
        let category_dir = root.join(category);
        fs::create_dir_all(&category_dir).map_err(|error| {
            OrganizeError::DirectoryCreationFailed {
                path: category_dir.clone(),
                source: error,
            }
        })?;

        let destination = resolve_unique_path(&category_dir.join(&record.file_name));

        let result = match self.mode {
            TransferMode::Move => move_file(&record.path, &destination),
            TransferMode::Copy => fs::copy(&record.path, &destination).map(|_| ()),
        };

        result.map_err(|error| OrganizeError::TransferFailed {
            source_path: record.path.clone(),
            destination,
            source: error,
        })
    }
}
