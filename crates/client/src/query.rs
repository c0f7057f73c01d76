//! Search query normalization and log redaction.
//!
//! Invariants:
//! - `normalize_query` is idempotent.
//! - The `search ` prefix and the `strip_metadata` macro are each added at most once.
//! - `redact_query` never returns anything past the first command word.

use splunk_search_config::constants::{SEARCH_KEYWORD, STRIP_METADATA_MACRO};

use crate::error::{ClientError, Result};

/// Prepare a raw query for submission.
///
/// Trims surrounding whitespace, prepends `search ` unless the query already
/// starts with it (case-insensitive), and appends `` `strip_metadata` `` unless
/// `keep_metadata` is set or the macro is already referenced.
pub fn normalize_query(raw: &str, keep_metadata: bool) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidQuery(
            "search query is empty".to_string(),
        ));
    }

    let prefix = format!("{} ", SEARCH_KEYWORD);
    let mut query = if has_search_prefix(trimmed, &prefix) {
        trimmed.to_string()
    } else {
        format!("{}{}", prefix, trimmed)
    };

    if !keep_metadata && !query.contains(STRIP_METADATA_MACRO) {
        query.push(' ');
        query.push_str(STRIP_METADATA_MACRO);
    }

    Ok(query)
}

fn has_search_prefix(query: &str, prefix: &str) -> bool {
    query
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Reduce a query to something safe to log: the first command word and the length.
pub fn redact_query(query: &str) -> String {
    let first = query.split_whitespace().next().unwrap_or_default();
    format!("{} <redacted, {} chars>", first, query.chars().count())
}
