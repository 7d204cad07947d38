//! Optional skip-rule configuration.
//!
//! An organize run can be told to leave certain files out of the scan
//! entirely via a small TOML file. Category assignments themselves are
//! fixed; only the set of files considered is configurable.
//!
//! # Configuration File Format
//!
//! ```toml
//! [skip]
//! hidden = true
//! filenames = ["Thumbs.db", "desktop.ini"]
//! extensions = ["tmp", "part"]
//! globs = ["*.crdownload"]
//! regex = ["^~\\$"]
//! ```
//!
//! With no configuration file present, nothing is skipped — dotfiles are
//! organized like any other file.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".filetidy.toml";

/// Errors raised while loading or compiling skip rules.
#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    NotFound(PathBuf),
    /// The configuration file could not be read.
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    Parse { path: PathBuf, reason: String },
    /// A skip glob failed to compile.
    BadGlob(String),
    /// A skip regex failed to compile.
    BadRegex { pattern: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            Self::Unreadable { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            Self::Parse { path, reason } => {
                write!(f, "Invalid configuration in {}: {}", path.display(), reason)
            }
            Self::BadGlob(pattern) => write!(f, "Invalid skip glob '{}'", pattern),
            Self::BadRegex { pattern, reason } => {
                write!(f, "Invalid skip regex '{}': {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration file schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkipConfig {
    #[serde(default)]
    pub skip: SkipRules,
}

/// Rules naming files an organize run should never touch.
///
/// Every field defaults to empty, so an absent or empty file skips nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkipRules {
    /// Skip dotfiles (names starting with `.`).
    #[serde(default)]
    pub hidden: bool,

    /// Exact file names to skip (e.g. "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Extensions to skip, without the dot, case-insensitive.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns matched against the file name and full path.
    #[serde(default)]
    pub globs: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl SkipConfig {
    /// Loads configuration, falling back through the usual locations.
    ///
    /// Order: the `explicit` path if given (must exist and parse), then
    /// `./.filetidy.toml`, then `~/.config/filetidy/config.toml`, then
    /// empty defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_file(&local);
        }

        if let Ok(home) = std::env::var("HOME") {
            let user_config = PathBuf::from(home)
                .join(".config")
                .join("filetidy")
                .join("config.toml");
            if user_config.exists() {
                return Self::load_file(&user_config);
            }
        }

        Ok(Self::default())
    }

    /// Loads and parses one specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })
    }

    /// Compiles the rules into matchers, validating every pattern.
    pub fn compile(self) -> Result<CompiledSkips, ConfigError> {
        CompiledSkips::from_rules(self.skip)
    }
}

/// Pre-compiled skip rules, ready for per-file matching.
///
/// Patterns are parsed once per run instead of once per file.
pub struct CompiledSkips {
    hidden: bool,
    filenames: HashSet<String>,
    extensions: HashSet<String>,
    globs: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl CompiledSkips {
    /// Skip rules that skip nothing.
    pub fn none() -> Self {
        Self {
            hidden: false,
            filenames: HashSet::new(),
            extensions: HashSet::new(),
            globs: Vec::new(),
            regexes: Vec::new(),
        }
    }

    fn from_rules(rules: SkipRules) -> Result<Self, ConfigError> {
        let globs = rules
            .globs
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::BadGlob(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = rules
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|error| ConfigError::BadRegex {
                    pattern: pattern.clone(),
                    reason: error.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            hidden: rules.hidden,
            filenames: rules.filenames.into_iter().collect(),
            extensions: rules
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            globs,
            regexes,
        })
    }

    /// Whether the scan should leave this file out entirely.
    pub fn should_skip(&self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        if self.hidden && file_name.starts_with('.') {
            return true;
        }

        if self.filenames.contains(file_name.as_ref()) {
            return true;
        }

        if let Some(ext) = path.extension()
            && self.extensions.contains(&ext.to_string_lossy().to_lowercase())
        {
            return true;
        }

        if self
            .globs
            .iter()
            .any(|glob| glob.matches(&file_name) || glob.matches_path(path))
        {
            return true;
        }

        self.regexes.iter().any(|regex| regex.is_match(&file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn compile(rules: SkipRules) -> CompiledSkips {
        SkipConfig { skip: rules }
            .compile()
            .expect("Rules should compile")
    }

    #[test]
    fn test_default_rules_skip_nothing() {
        let skips = compile(SkipRules::default());

        assert!(!skips.should_skip(Path::new("photo.jpg")));
        assert!(!skips.should_skip(Path::new(".hidden")));
        assert!(!skips.should_skip(Path::new("Thumbs.db")));
    }

    #[test]
    fn test_hidden_files_skipped_when_enabled() {
        let skips = compile(SkipRules {
            hidden: true,
            ..Default::default()
        });

        assert!(skips.should_skip(Path::new(".DS_Store")));
        assert!(skips.should_skip(Path::new("dir/.gitignore")));
        assert!(!skips.should_skip(Path::new("visible.txt")));
    }

    #[test]
    fn test_exact_filenames() {
        let skips = compile(SkipRules {
            filenames: vec!["Thumbs.db".to_string()],
            ..Default::default()
        });

        assert!(skips.should_skip(Path::new("Thumbs.db")));
        assert!(skips.should_skip(Path::new("sub/Thumbs.db")));
        assert!(!skips.should_skip(Path::new("thumbs.db")));
    }

    #[test]
    fn test_extensions_are_case_insensitive() {
        let skips = compile(SkipRules {
            extensions: vec!["tmp".to_string()],
            ..Default::default()
        });

        assert!(skips.should_skip(Path::new("draft.tmp")));
        assert!(skips.should_skip(Path::new("draft.TMP")));
        assert!(!skips.should_skip(Path::new("draft.txt")));
    }

    #[test]
    fn test_globs_match_name_and_path() {
        let skips = compile(SkipRules {
            globs: vec!["*.crdownload".to_string(), "**/cache/**".to_string()],
            ..Default::default()
        });

        assert!(skips.should_skip(Path::new("movie.mkv.crdownload")));
        assert!(skips.should_skip(Path::new("app/cache/blob.bin")));
        assert!(!skips.should_skip(Path::new("movie.mkv")));
    }

    #[test]
    fn test_regex_matches_file_name() {
        let skips = compile(SkipRules {
            regex: vec![r"^~\$".to_string()],
            ..Default::default()
        });

        assert!(skips.should_skip(Path::new("~$budget.xlsx")));
        assert!(!skips.should_skip(Path::new("budget.xlsx")));
    }

    #[test]
    fn test_bad_glob_is_an_error() {
        let result = SkipConfig {
            skip: SkipRules {
                globs: vec!["[broken".to_string()],
                ..Default::default()
            },
        }
        .compile();

        assert!(matches!(result, Err(ConfigError::BadGlob(_))));
    }

    #[test]
    fn test_bad_regex_is_an_error() {
        let result = SkipConfig {
            skip: SkipRules {
                regex: vec!["[broken(".to_string()],
                ..Default::default()
            },
        }
        .compile();

        assert!(matches!(result, Err(ConfigError::BadRegex { .. })));
    }

    #[test]
    fn test_load_file_parses_toml() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            "[skip]\nhidden = true\nextensions = [\"tmp\"]\nfilenames = [\"Thumbs.db\"]"
        )
        .expect("Failed to write config");

        let config = SkipConfig::load_file(file.path()).expect("Load failed");
        assert!(config.skip.hidden);
        assert_eq!(config.skip.extensions, vec!["tmp"]);
        assert_eq!(config.skip.filenames, vec!["Thumbs.db"]);
    }

    #[test]
    fn test_load_missing_explicit_file_is_an_error() {
        let result = SkipConfig::load(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_file_rejects_bad_toml() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "[skip\nhidden = ").expect("Failed to write config");

        let result = SkipConfig::load_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
