//! Curated allow-list of ids to publish.
//!
//! Plain text, one integer id per line. Blank lines are skipped; order and
//! duplicates are preserved. A non-numeric line fails the whole read.

use std::path::Path;

use crate::error::AllowListError;
use crate::game::GameId;

/// Read and parse the allow-list file at `path`.
///
/// # Errors
/// Returns [`AllowListError::Io`] if the file cannot be read and
/// [`AllowListError::InvalidLine`] for the first non-numeric line.
pub fn read_allow_list(path: &Path) -> Result<Vec<GameId>, AllowListError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| AllowListError::Io { path: path.to_path_buf(), source })?;
    parse_allow_list(&content)
}

/// Parse allow-list text already in memory.
///
/// # Errors
/// Returns [`AllowListError::InvalidLine`] with the 1-based line number of the
/// first line that is neither blank nor an integer.
pub fn parse_allow_list(content: &str) -> Result<Vec<GameId>, AllowListError> {
    let mut ids = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let id = line.parse::<GameId>().map_err(|_| AllowListError::InvalidLine {
            line: idx + 1,
            value: line.to_owned(),
        })?;
        ids.push(id);
    }
    Ok(ids)
}
