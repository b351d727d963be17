//! Work-queue computation of the dependency closure.

use anyhow::{bail, Context, Result};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::copy::LibraryCopier;
use crate::policy::CopyPolicy;
use crate::resolve::DependencyResolver;

/// What a closure pass did. A second pass over an already-closed directory
/// reports zero copies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClosureReport {
    pub files_scanned: usize,
    pub libraries_copied: usize,
}

/// Copy the transitive shared-library dependencies of everything in
/// `target_dir` into `target_dir` itself.
///
/// The work queue is seeded with the directory's current entries; every
/// library copied in is queued for its own scan, so the run ends exactly
/// when no queued file pulls in anything new. A dependency is copied only
/// if the linker resolved it to a path, the path exists on disk, no file of
/// the same name is already in `target_dir`, and the policy does not
/// exclude it.
///
/// # Errors
///
/// Returns an error if `target_dir` does not exist or is not a directory,
/// or if a copy fails (permissions, disk full). A dependency whose resolved
/// path is not on disk is skipped silently.
pub fn close_dependencies(
    target_dir: &Path,
    resolver: &dyn DependencyResolver,
    copier: &dyn LibraryCopier,
    policy: &CopyPolicy,
) -> Result<ClosureReport> {
    if !target_dir.is_dir() {
        bail!("Target is not a directory: {}", target_dir.display());
    }

    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    let entries = fs::read_dir(target_dir)
        .with_context(|| format!("Failed to list {}", target_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            queue.push_back(path);
        }
    }

    let mut report = ClosureReport::default();

    while let Some(file) = queue.pop_front() {
        info!("Finding out what {} requires", file.display());
        report.files_scanned += 1;

        for dep in resolver.dependencies(&file)? {
            let Some(src) = dep.path else {
                continue;
            };
            if policy.excludes(&src) {
                debug!("Skipping system library {}", src.display());
                continue;
            }
            let Some(file_name) = src.file_name() else {
                continue;
            };
            if target_dir.join(file_name).exists() {
                continue;
            }
            if !src.exists() {
                debug!("Resolved path {} is not on disk, skipping", src.display());
                continue;
            }

            info!("Copying {} to {}", src.display(), target_dir.display());
            let copied = copier.copy_into(&src, target_dir)?;
            report.libraries_copied += 1;
            queue.push_back(copied);
        }
    }

    Ok(report)
}
