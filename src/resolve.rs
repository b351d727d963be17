//! Dependency discovery using ldd.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// One line of dynamic-linker output: the library name, the path the linker
/// resolved it to, and the load address. Virtual and statically linked
/// entries have no resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub path: Option<PathBuf>,
    pub load_address: Option<String>,
}

/// Source of the dynamic-dependency relation.
///
/// Production code shells out to `ldd`; tests substitute a scripted resolver
/// so closure behavior can be exercised without real ELF binaries.
pub trait DependencyResolver {
    fn dependencies(&self, binary: &Path) -> Result<Vec<Dependency>>;
}

/// Resolver backed by the host dynamic linker via `ldd`.
pub struct LddResolver;

impl DependencyResolver for LddResolver {
    /// Run `ldd` on a file and parse its output.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - `ldd` is not installed
    ///
    /// Returns `Ok(Vec::new())` if `ldd` exits non-zero, which is what it
    /// does for anything that is not a dynamic executable (text files,
    /// static binaries). Those simply contribute no dependencies.
    fn dependencies(&self, binary: &Path) -> Result<Vec<Dependency>> {
        // Check file exists first for a clear error message
        if !binary.exists() {
            bail!("File does not exist: {}", binary.display());
        }

        let output = Command::new("ldd")
            .arg(binary)
            .output()
            .context("ldd command not found - install libc-bin/glibc")?;

        if !output.status.success() {
            return Ok(Vec::new());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ldd_output(&stdout))
    }
}

/// Parse ldd output into dependency records.
///
/// Example ldd output:
/// ```text
///     linux-vdso.so.1 (0x00007ffd3b7d9000)
///     libc.so.6 => /lib/x86_64-linux-gnu/libc.so.6 (0x00007f6e4a200000)
///     /lib64/ld-linux-x86-64.so.2 (0x00007f6e4a5f2000)
/// ```
///
/// Field 0 is the library name; field 2, when present, is the path the
/// linker resolved it to. Unresolved entries (`=> not found`) leave a
/// garbage third field; the existence check in the closure pass discards
/// those along with any other path that is not on disk.
pub fn parse_ldd_output(output: &str) -> Vec<Dependency> {
    let mut deps = Vec::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(name) = fields.first() else {
            continue;
        };
        deps.push(Dependency {
            name: (*name).to_string(),
            path: fields.get(2).map(PathBuf::from),
            load_address: fields.get(3).map(|s| (*s).to_string()),
        });
    }

    deps
}
