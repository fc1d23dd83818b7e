//! List file output

use std::path::Path;

use crate::error::{CoreError, Result};

/// Render lines one per entry, with a trailing newline unless empty
pub fn render_list<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Overwrite `path` with the rendered list in a single write
pub fn write_list<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    std::fs::write(path, render_list(lines)).map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
