//! Identifier helpers
//!
//! - Random ids: truncated UUID v4 strings, short but NOT collision-free
//! - Internal ids: `<prefix>:<n>` strings produced by id sequences

use std::fmt;
use uuid::Uuid;

/// Length used by [`random_id`] callers that have no preference
pub const DEFAULT_RANDOM_ID_LENGTH: usize = 8;

/// Length of a hyphenated UUID, the longest random id
pub const MAX_RANDOM_ID_LENGTH: usize = 36;

/// Separator between prefix and counter in internal ids
pub const INTERNAL_ID_SEPARATOR: &str = ":";

/// Prefix of block ids
pub const BLOCK_ID_PREFIX: &str = "BLOCK";

/// Generate a random id of at most 36 characters
///
/// The id is the leading `length` characters of a hyphenated, lowercase
/// UUID v4. Lengths above [`MAX_RANDOM_ID_LENGTH`] are clamped. Shorter ids
/// collide more easily; nothing here guarantees uniqueness.
///
/// # Example
///
/// ```
/// use kvs_core::id::random_id;
///
/// assert_eq!(random_id(4).len(), 4);
/// assert_eq!(random_id(100).len(), 36);
/// ```
pub fn random_id(length: usize) -> String {
    let length = length.min(MAX_RANDOM_ID_LENGTH);
    let mut id = Uuid::new_v4().hyphenated().to_string();
    id.truncate(length);
    id
}

/// Format an internal id: `<prefix>:<counter>`
pub fn internal_id(prefix: impl fmt::Display, counter: u64) -> String {
    format!("{}{}{}", prefix, INTERNAL_ID_SEPARATOR, counter)
}
