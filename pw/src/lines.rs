//! Line-list sources: pick one non-empty line of a text file

use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::error::SourceError;

/// Result of sampling a line-list source
#[derive(Debug)]
pub enum LineSample {
    /// One line chosen uniformly at random
    Line(String),
    /// The file has no non-empty lines
    NoLines,
    /// The file could not be read
    Unusable(SourceError),
}

/// Pick one trimmed, non-empty line of the file at `path`
///
/// Read failures are logged and reported as [`LineSample::Unusable`], not
/// propagated.
pub fn pick_line<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> LineSample {
    debug!(path = %path.display(), "lines::pick_line: called");

    let lines = match read_lines(path) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(path = %e.path().display(), "{}", e);
            return LineSample::Unusable(e);
        }
    };

    match lines.choose(rng) {
        Some(line) => LineSample::Line(line.clone()),
        None => LineSample::NoLines,
    }
}

/// Read the trimmed, non-empty lines of the file at `path`
///
/// A lone `\r` also ends a line, so classic Mac line endings split the same
/// way as `\n` and `\r\n`.
pub fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
