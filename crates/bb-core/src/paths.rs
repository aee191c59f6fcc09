//! Percent-encoding for identifiers placed into URL paths.
//!
//! Board names, txids, author ids and hashes all come from user-controlled
//! route segments. They must be encoded before being joined into a request
//! or route path so a `/`, `?` or `#` can never change which resource is hit.

use std::borrow::Cow;

/// Encodes `raw` as exactly one path segment.
/// Everything except ASCII alphanumerics and `-_.~` is escaped.
pub fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Reverses [`encode_segment`]. Invalid UTF-8 escapes are kept verbatim.
pub fn decode_segment(encoded: &str) -> Cow<'_, str> {
    match urlencoding::decode(encoded) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(encoded),
    }
}
