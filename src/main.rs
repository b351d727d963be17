//! CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use libclose::{close_dependencies, CopyPolicy, FsCopier, LddResolver};

/// Bundle the shared libraries a directory of binaries needs to run.
///
/// Repeatedly asks ldd what each file in TARGET_DIR requires and copies the
/// required libraries into TARGET_DIR, until nothing new turns up. System
/// libraries under excluded prefixes stay where they are.
#[derive(Parser)]
#[command(name = "libclose")]
#[command(version)]
struct Cli {
    /// Directory whose binaries should become self-contained
    target_dir: PathBuf,

    /// Path prefix of libraries assumed present on the target machine
    #[arg(
        long = "exclude-prefix",
        value_name = "PREFIX",
        default_values_t = vec![String::from("/lib/")]
    )]
    excluded_prefixes: Vec<String>,

    /// File-name substring copied even from an excluded prefix
    #[arg(
        long = "always-copy",
        value_name = "SUBSTR",
        default_values_t = vec![String::from("libpython")]
    )]
    always_copy: Vec<String>,

    /// Never override the prefix exclusion by library name
    #[arg(long)]
    no_exceptions: bool,

    /// Enable debug output (per-library skip decisions)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let always_copy = if cli.no_exceptions {
        Vec::new()
    } else {
        cli.always_copy
    };
    let policy = CopyPolicy::new(cli.excluded_prefixes, always_copy);

    let report = close_dependencies(&cli.target_dir, &LddResolver, &FsCopier, &policy)?;

    println!(
        "Scanned {} files, copied {} libraries into {}",
        report.files_scanned,
        report.libraries_copied,
        cli.target_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_policy_args() {
        let cli = Cli::parse_from(["libclose", "/opt/bundle"]);
        assert_eq!(cli.target_dir, PathBuf::from("/opt/bundle"));
        assert_eq!(cli.excluded_prefixes, vec!["/lib/"]);
        assert_eq!(cli.always_copy, vec!["libpython"]);
        assert!(!cli.no_exceptions);
    }

    #[test]
    fn test_repeatable_filter_args() {
        let cli = Cli::parse_from([
            "libclose",
            "--exclude-prefix",
            "/lib/",
            "--exclude-prefix",
            "/usr/lib/",
            "--always-copy",
            "libssl",
            "--no-exceptions",
            "/opt/bundle",
        ]);
        assert_eq!(cli.excluded_prefixes, vec!["/lib/", "/usr/lib/"]);
        assert_eq!(cli.always_copy, vec!["libssl"]);
        assert!(cli.no_exceptions);
    }
}
