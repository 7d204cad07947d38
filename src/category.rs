//! Category table and extension classifier.
//!
//! A [`CategoryTable`] maps file extensions to named category buckets
//! ("Images", "Documents", ...). The table is built once at process start
//! and handed by reference to the organizer, so custom tables can be
//! injected in tests.

use std::collections::HashSet;

/// Category assigned to extensions no declared category claims.
///
/// Never a declared table entry; [`CategoryTable::classify`] falls back to
/// it when lookup fails.
pub const FALLBACK_CATEGORY: &str = "Others";

/// Declaration-ordered mapping from category name to its extension set.
///
/// Extensions are stored lowercase with the leading dot (`".jpg"`).
/// Lookup walks entries in declaration order, so if an extension were ever
/// listed under two categories the first declared one wins, deterministically.
///
/// # Examples
///
/// ```
/// use filetidy::category::CategoryTable;
///
/// let table = CategoryTable::standard();
/// assert_eq!(table.classify(".jpg"), "Images");
/// assert_eq!(table.classify(".XLSX"), "Documents");
/// assert_eq!(table.classify(".xyz"), "Others");
/// ```
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: Vec<(String, HashSet<String>)>,
}

impl CategoryTable {
    /// Builds a table from `(name, extensions)` pairs, preserving order.
    ///
    /// Extensions are normalized to lowercase; callers supply them with the
    /// leading dot.
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        let entries = entries
            .iter()
            .map(|(name, extensions)| {
                let set = extensions.iter().map(|ext| ext.to_lowercase()).collect();
                (name.to_string(), set)
            })
            .collect();
        Self { entries }
    }

    /// The standard seven-category table.
    pub fn standard() -> Self {
        Self::new(&[
            (
                "Images",
                &[
                    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".ico", ".webp",
                ],
            ),
            (
                "Documents",
                &[
                    ".pdf", ".doc", ".docx", ".txt", ".xlsx", ".xls", ".ppt", ".pptx", ".csv",
                    ".odt",
                ],
            ),
            (
                "Audio",
                &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a", ".wma"],
            ),
            (
                "Video",
                &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v"],
            ),
            ("Archives", &[".zip", ".rar", ".7z", ".tar", ".gz", ".iso"]),
            (
                "Code",
                &[
                    ".cs", ".java", ".py", ".js", ".html", ".css", ".cpp", ".c", ".h", ".json",
                    ".xml",
                ],
            ),
            ("Executables", &[".exe", ".msi", ".dll", ".bat", ".sh"]),
        ])
    }

    /// Maps an extension to its category name.
    ///
    /// The extension is lowercased before lookup and compared exactly,
    /// leading dot included. Unrecognized extensions (and the empty string)
    /// map to [`FALLBACK_CATEGORY`]. Pure and total.
    pub fn classify(&self, extension: &str) -> &str {
        let normalized = extension.to_lowercase();
        self.entries
            .iter()
            .find(|(_, extensions)| extensions.contains(&normalized))
            .map(|(name, _)| name.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Whether `name` is a folder the organizer treats as already organized.
    ///
    /// Matches declared category names plus the fallback folder, exactly and
    /// case-sensitively. The fallback counts so that re-running over a
    /// previously organized tree moves nothing.
    pub fn is_category_dir(&self, name: &str) -> bool {
        name == FALLBACK_CATEGORY || self.entries.iter().any(|(declared, _)| declared == name)
    }

    /// Declared category names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_standard_extensions() {
        let table = CategoryTable::standard();
        assert_eq!(table.classify(".jpg"), "Images");
        assert_eq!(table.classify(".png"), "Images");
        assert_eq!(table.classify(".pdf"), "Documents");
        assert_eq!(table.classify(".txt"), "Documents");
        assert_eq!(table.classify(".mp3"), "Audio");
        assert_eq!(table.classify(".mkv"), "Video");
        assert_eq!(table.classify(".zip"), "Archives");
        assert_eq!(table.classify(".py"), "Code");
        assert_eq!(table.classify(".exe"), "Executables");
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let table = CategoryTable::standard();
        assert_eq!(table.classify(".JPG"), table.classify(".jpg"));
        assert_eq!(table.classify(".Pdf"), "Documents");
        assert_eq!(table.classify(".ZIP"), "Archives");
    }

    #[test]
    fn test_classify_unknown_falls_back_to_others() {
        let table = CategoryTable::standard();
        assert_eq!(table.classify(".xyz"), "Others");
        assert_eq!(table.classify(".tar.gz"), "Others");
        assert_eq!(table.classify(""), "Others");
    }

    #[test]
    fn test_duplicate_extension_first_declared_wins() {
        let table = CategoryTable::new(&[
            ("First", &[".dup", ".one"]),
            ("Second", &[".dup", ".two"]),
        ]);
        assert_eq!(table.classify(".dup"), "First");
        assert_eq!(table.classify(".two"), "Second");
    }

    #[test]
    fn test_is_category_dir_exact_match() {
        let table = CategoryTable::standard();
        assert!(table.is_category_dir("Images"));
        assert!(table.is_category_dir("Executables"));
        assert!(!table.is_category_dir("images"));
        assert!(!table.is_category_dir("Downloads"));
        assert!(!table.is_category_dir(""));
    }

    #[test]
    fn test_is_category_dir_includes_fallback() {
        let table = CategoryTable::standard();
        assert!(table.is_category_dir("Others"));
        assert!(!table.is_category_dir("others"));
    }

    #[test]
    fn test_names_keep_declaration_order() {
        let table = CategoryTable::standard();
        let names: Vec<_> = table.names().collect();
        assert_eq!(
            names,
            [
                "Images",
                "Documents",
                "Audio",
                "Video",
                "Archives",
                "Code",
                "Executables"
            ]
        );
    }
}
