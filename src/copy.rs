//! Library copying into the target directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination side of a closure pass.
pub trait LibraryCopier {
    /// Copy `src` into `dest_dir` under its own file name, returning the
    /// destination path.
    fn copy_into(&self, src: &Path, dest_dir: &Path) -> Result<PathBuf>;
}

/// Copier backed by `std::fs`.
///
/// `fs::copy` reads through symlinks, so a link like
/// `libfoo.so.1 -> libfoo.so.1.2.3` lands as a regular file holding the
/// target's content (`cp -L` behavior). Versioned-name chains collapse to
/// whichever name the linker asked for.
pub struct FsCopier;

impl LibraryCopier for FsCopier {
    fn copy_into(&self, src: &Path, dest_dir: &Path) -> Result<PathBuf> {
        let file_name = src
            .file_name()
            .with_context(|| format!("Library path has no file name: {}", src.display()))?;
        let dest = dest_dir.join(file_name);

        fs::copy(src, &dest).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dest.display())
        })?;

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_into_preserves_content() {
        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let src = src_dir.path().join("libfoo.so");
        fs::write(&src, b"\x7fELF fake library").unwrap();

        let dest = FsCopier.copy_into(&src, dest_dir.path()).unwrap();
        assert_eq!(dest, dest_dir.path().join("libfoo.so"));
        assert_eq!(fs::read(&dest).unwrap(), b"\x7fELF fake library");
    }

    #[test]
    fn test_copy_into_dereferences_symlink() {
        let src_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let real = src_dir.path().join("libfoo.so.1.2.3");
        fs::write(&real, b"real content").unwrap();
        let link = src_dir.path().join("libfoo.so.1");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let dest = FsCopier.copy_into(&link, dest_dir.path()).unwrap();
        // The destination is a regular file with the target's content
        assert!(!dest.is_symlink());
        assert_eq!(fs::read(&dest).unwrap(), b"real content");
    }

    #[test]
    fn test_copy_missing_source_is_error() {
        let dest_dir = TempDir::new().unwrap();
        let result = FsCopier.copy_into(Path::new("/nonexistent/libgone.so"), dest_dir.path());
        assert!(result.is_err());
    }
}
