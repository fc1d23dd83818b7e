//! Chart version resolution
//!
//! The chart reference needs the version the rest of the build uses. It is
//! either given explicitly or queried from the build system with
//! `make get-version`. There is no fallback: a failed or empty query is an
//! error.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::non_blank;
use crate::error::{CoreError, Result};

/// Something that can report the current chart version
pub trait VersionSource {
    /// Human-readable origin of the version, for logs
    fn describe(&self) -> String;

    /// Resolve the version, trimmed and non-empty
    fn resolve(&self) -> Result<String>;
}

/// A version supplied by configuration
#[derive(Debug, Clone)]
pub struct ExplicitVersion {
    version: String,
}

impl ExplicitVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl VersionSource for ExplicitVersion {
    fn describe(&self) -> String {
        "VERSION".to_string()
    }

    fn resolve(&self) -> Result<String> {
        non_blank(Some(self.version.as_str()))
            .ok_or_else(|| CoreError::version("explicit version is empty"))
    }
}

/// A version printed on stdout by an external command
#[derive(Debug, Clone)]
pub struct CommandVersion {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl CommandVersion {
    pub fn new(program: impl Into<String>, args: &[&str], cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.into(),
        }
    }

    /// `make get-version`, run from the repository root
    pub fn make_get_version(repo_root: &Path) -> Self {
        Self::new("make", &["get-version"], repo_root)
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl VersionSource for CommandVersion {
    fn describe(&self) -> String {
        format!("'{}'", self.command_line())
    }

    fn resolve(&self) -> Result<String> {
        tracing::debug!("Running {} in {}", self.describe(), self.cwd.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| {
                CoreError::version(format!("failed to run {}: {}", self.describe(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(CoreError::version(format!(
                "{} exited with status {}: {}",
                self.describe(),
                code,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        non_blank(Some(stdout.as_ref())).ok_or_else(|| {
            CoreError::version(format!("{} printed an empty version", self.describe()))
        })
    }
}

/// Pick the version source: the explicit value when it is non-blank,
/// `make get-version` in `repo_root` otherwise
pub fn version_source(explicit: Option<&str>, repo_root: &Path) -> Box<dyn VersionSource> {
    match non_blank(explicit) {
        Some(version) => Box::new(ExplicitVersion::new(version)),
        None => Box::new(CommandVersion::make_get_version(repo_root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_version_trimmed() {
        let source = ExplicitVersion::new("  1.2.3\n");
        assert_eq!(source.resolve().unwrap(), "1.2.3");
    }

    #[test]
    fn test_explicit_version_empty() {
        let err = ExplicitVersion::new("  ").resolve().unwrap_err();
        assert!(matches!(err, CoreError::Version { .. }));
    }

    #[test]
    fn test_explicit_wins_without_running_command() {
        // The fallback directory does not exist, so running the command
        // there would fail.
        let missing = Path::new("/nonexistent/chartlist/repo");
        let source = version_source(Some(" 2.0.0 "), missing);
        assert_eq!(source.describe(), "VERSION");
        assert_eq!(source.resolve().unwrap(), "2.0.0");
    }

    #[test]
    fn test_blank_explicit_falls_back_to_make() {
        let source = version_source(Some(""), Path::new("."));
        assert_eq!(source.describe(), "'make get-version'");

        let source = version_source(None, Path::new("."));
        assert_eq!(source.describe(), "'make get-version'");
    }

    #[test]
    fn test_command_not_found() {
        let dir = TempDir::new().unwrap();
        let source = CommandVersion::new("chartlist-no-such-binary", &[], dir.path());
        let err = source.resolve().unwrap_err();
        assert!(err.to_string().contains("failed to run"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_stdout_trimmed() {
        let dir = TempDir::new().unwrap();
        let source = CommandVersion::new("sh", &["-c", "echo '  1.4.0-rc.1  '"], dir.path());
        assert_eq!(source.resolve().unwrap(), "1.4.0-rc.1");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_runs_in_cwd() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("VERSION"), "3.1.4\n").unwrap();
        let source = CommandVersion::new("cat", &["VERSION"], dir.path());
        assert_eq!(source.resolve().unwrap(), "3.1.4");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failure_status() {
        let dir = TempDir::new().unwrap();
        let source = CommandVersion::new("sh", &["-c", "echo boom >&2; exit 2"], dir.path());
        let err = source.resolve().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("exited with status 2"), "{message}");
        assert!(message.contains("boom"), "{message}");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_empty_output() {
        let dir = TempDir::new().unwrap();
        let source = CommandVersion::new("sh", &["-c", "printf '\\n  \\n'"], dir.path());
        let err = source.resolve().unwrap_err();
        assert!(err.to_string().contains("empty version"));
    }
}
