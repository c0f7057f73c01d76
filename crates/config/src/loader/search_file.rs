//! Search query input: inline string or search file.
//!
//! A search file holds one query fragment per line. Lines starting with `#`
//! are comments. Fragments are concatenated with no separator, so a pipe on
//! a continuation line must carry its own leading space if one is wanted.

use std::path::Path;

use super::error::ConfigError;

/// Read a search file and concatenate its non-comment lines.
pub fn read_search_file(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::SearchFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<String>())
}

/// Pick the query from the search file (if given) or the inline string.
///
/// The search file wins when both are present.
pub fn resolve_query(inline: Option<&str>, file: Option<&Path>) -> Result<String, ConfigError> {
    let query = match file {
        Some(path) => read_search_file(path)?,
        None => inline.unwrap_or_default().to_string(),
    };

    if query.trim().is_empty() {
        return Err(ConfigError::MissingQuery);
    }
    Ok(query)
}
