//! System-library exclusion policy.

use std::path::Path;

/// Decides which resolved libraries are worth carrying along.
///
/// Libraries under the excluded path prefixes are assumed present on any
/// target machine and skipped, unless their file name contains one of the
/// `always_copy` substrings. The default matches the Python-bundling setup
/// this tool was built for: skip everything under `/lib/`, but carry
/// `libpython` since no base system ships it.
#[derive(Debug, Clone)]
pub struct CopyPolicy {
    excluded_prefixes: Vec<String>,
    always_copy: Vec<String>,
}

impl Default for CopyPolicy {
    fn default() -> Self {
        Self {
            excluded_prefixes: vec!["/lib/".to_string()],
            always_copy: vec!["libpython".to_string()],
        }
    }
}

impl CopyPolicy {
    pub fn new(excluded_prefixes: Vec<String>, always_copy: Vec<String>) -> Self {
        Self {
            excluded_prefixes,
            always_copy,
        }
    }

    /// True if the resolved path should be skipped rather than copied.
    #[must_use = "exclusion result should drive the copy decision"]
    pub fn excludes(&self, path: &Path) -> bool {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if self
            .always_copy
            .iter()
            .any(|substr| file_name.contains(substr.as_str()))
        {
            return false;
        }

        let path_str = path.to_string_lossy();
        self.excluded_prefixes
            .iter()
            .any(|prefix| path_str.starts_with(prefix.as_str()))
    }
}
