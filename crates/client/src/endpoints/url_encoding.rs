//! Percent-encoding for values interpolated into REST paths.
//!
//! Search IDs and app names are user- or server-supplied and must not be able
//! to add path segments or query strings to a request URL.
//!
//! ```
//! use splunk_search_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("scheduler__admin/x"), "scheduler__admin%2Fx");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters encoded in a single path segment.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a search ID or app name for use as one path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
