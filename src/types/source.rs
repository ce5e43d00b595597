//! SourcePath - One configured backup target

use serde::Deserialize;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::PathBuf;

/// A named backup target read from the `source paths` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePath {
    /// Key in the configuration mapping, display only
    pub name: String,

    /// File or directory to back up
    pub path: PathBuf,

    /// Copy the immediate children of `path` one by one instead of `path` itself
    pub is_dir: bool,

    /// Child file names to skip when `is_dir` is set
    pub exceptions: BTreeSet<String>,
}

/// Per-entry attributes as written in the YAML file
///
/// Every key is required.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SourcePathAttributes {
    pub path: PathBuf,
    pub is_folder: bool,
    pub exceptions: Vec<String>,
}

impl SourcePath {
    /// Create a wholesale (single file or whole directory) entry
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
            exceptions: BTreeSet::new(),
        }
    }

    /// Create an entry that copies the children of `path`
    pub fn folder<I, S>(name: impl Into<String>, path: impl Into<PathBuf>, exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
            exceptions: exceptions.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn from_attributes(name: String, attrs: SourcePathAttributes) -> Self {
        Self {
            name,
            path: attrs.path,
            is_dir: attrs.is_folder,
            exceptions: attrs.exceptions.into_iter().collect(),
        }
    }

    /// Exact file-name match against the exceptions.
    ///
    /// Names that are not valid UTF-8 never match.
    pub fn is_excluded(&self, file_name: &OsStr) -> bool {
        file_name
            .to_str()
            .is_some_and(|name| self.exceptions.contains(name))
    }

    /// Basename used as the destination name for wholesale copies
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_is_wholesale() {
        let source = SourcePath::new("notes", "/data/notes.txt");
        assert_eq!(source.name, "notes");
        assert_eq!(source.path, Path::new("/data/notes.txt"));
        assert!(!source.is_dir);
        assert!(source.exceptions.is_empty());
    }

    #[test]
    fn test_folder_collects_exceptions() {
        let source = SourcePath::folder("docs", "/data/docs", ["tmp.txt", "cache"]);
        assert!(source.is_dir);
        assert_eq!(source.exceptions.len(), 2);
        assert!(source.exceptions.contains("cache"));
    }

    #[test]
    fn test_is_excluded_is_exact() {
        let source = SourcePath::folder("docs", "/data/docs", ["tmp.txt"]);
        assert!(source.is_excluded(OsStr::new("tmp.txt")));
        assert!(!source.is_excluded(OsStr::new("TMP.txt")));
        assert!(!source.is_excluded(OsStr::new("tmp.txt.bak")));
        assert!(!source.is_excluded(OsStr::new("tmp")));
    }

    #[test]
    fn test_is_excluded_does_not_glob() {
        let source = SourcePath::folder("docs", "/data/docs", ["*.log"]);
        assert!(!source.is_excluded(OsStr::new("app.log")));
        assert!(source.is_excluded(OsStr::new("*.log")));
    }

    #[test]
    #[cfg(unix)]
    fn test_is_excluded_non_utf8_never_matches() {
        use std::os::unix::ffi::OsStrExt;

        let source = SourcePath::folder("docs", "/data/docs", ["\u{fffd}"]);
        assert!(!source.is_excluded(OsStr::from_bytes(b"\xff")));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            SourcePath::new("a", "/data/report.pdf").file_name(),
            Some(OsStr::new("report.pdf"))
        );
        assert_eq!(SourcePath::new("root", "/").file_name(), None);
    }

    #[test]
    fn test_from_attributes_maps_is_folder() {
        let attrs = SourcePathAttributes {
            path: PathBuf::from("photos"),
            is_folder: true,
            exceptions: vec!["Thumbs.db".to_string(), "Thumbs.db".to_string()],
        };
        let source = SourcePath::from_attributes("photos".to_string(), attrs);
        assert!(source.is_dir);
        assert_eq!(source.exceptions.len(), 1);
    }
}
