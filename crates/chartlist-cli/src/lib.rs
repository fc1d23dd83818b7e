//! Chartlist CLI - shared plumbing for the two collector binaries
//!
//! `collect-chart-images` and `collect-chart-oci-refs` parse their flags
//! (each doubling as an environment variable) once in `main`, turn them into
//! core configuration and report progress on stderr.

use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub mod error;
pub mod exit_codes;

pub use error::{CliError, Result};

/// Parse the command line, exiting with [`exit_codes::USAGE_ERROR`] on bad
/// arguments
///
/// `--help` and `--version` still print to stdout and exit 0.
pub fn parse_args<C: Parser>() -> C {
    C::try_parse().unwrap_or_else(|err| {
        if !err.use_stderr() {
            err.exit();
        }
        let _ = err.print();
        std::process::exit(exit_codes::USAGE_ERROR)
    })
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(console::colors_enabled_stderr())
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Repository root: the override when given, otherwise two levels above the
/// directory holding the running binary (`<root>/target/release/<bin>`)
pub fn resolve_repo_root(repo_root: Option<PathBuf>) -> PathBuf {
    non_empty_path(repo_root).unwrap_or_else(default_repo_root)
}

fn default_repo_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| repo_root_for_exe(&exe))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn repo_root_for_exe(exe: &Path) -> Option<PathBuf> {
    exe.parent()?.parent()?.parent().map(Path::to_path_buf)
}

/// Drop empty path overrides, which an empty environment variable produces
pub fn non_empty_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Print the closing summary line
pub fn report_written(count: usize, what: &str, path: &Path) {
    eprintln!(
        "{} Written {} {} to {}",
        style("✓").green().for_stderr(),
        count,
        what,
        path.display()
    );
}

/// Render a fatal error and exit with its code
pub fn exit_with(err: CliError) -> ! {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_root_for_exe() {
        let root = repo_root_for_exe(Path::new("/repo/target/release/collect-chart-images"));
        assert_eq!(root, Some(PathBuf::from("/repo")));
    }

    #[test]
    fn test_repo_root_for_shallow_exe() {
        assert_eq!(repo_root_for_exe(Path::new("/bin")), None);
    }

    #[test]
    fn test_resolve_repo_root_override() {
        let root = resolve_repo_root(Some(PathBuf::from("/checkout")));
        assert_eq!(root, PathBuf::from("/checkout"));
    }

    #[test]
    fn test_empty_override_ignored() {
        assert_eq!(non_empty_path(Some(PathBuf::new())), None);
        assert_eq!(
            non_empty_path(Some(PathBuf::from("out.list"))),
            Some(PathBuf::from("out.list"))
        );
        assert_ne!(resolve_repo_root(Some(PathBuf::new())), PathBuf::new());
    }
}
