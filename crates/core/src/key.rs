//! Key construction for the backing store
//!
//! Keys are plain strings built from an ordered tuple of identifier parts.
//! Each part is stringified, every space character is removed from it, and
//! the parts are joined with [`KEY_SEPARATOR`].
//!
//! ## Contract
//!
//! The key format is FROZEN. Data already written to a shared store is
//! addressed by these exact strings, so:
//! - Only U+0020 spaces are removed, anywhere in the part (not a trim)
//! - Parts are joined positionally, empty parts included
//! - No escaping is applied: a part containing `!` produces an ambiguous key
//!
//! Use [`try_build_key`] when parts come from untrusted input and an
//! ambiguous key must be rejected instead.
//!
//! ## Examples
//!
//! ```
//! use kvs_core::key::{build_key, job_key, sites_key};
//!
//! assert_eq!(build_key(&[&42, &"sites", &"block-7"]), "42!sites!block-7");
//! assert_eq!(job_key(7), "JOB!7");
//! assert_eq!(sites_key(7, "B1"), "7!sites!B1!");
//! ```

use std::fmt;
use thiserror::Error;

/// Separator placed between key parts
pub const KEY_SEPARATOR: &str = "!";

/// Leading part of every job key
pub const JOB_KEY_TOKEN: &str = "JOB";

/// Product name used for per-block site lists
pub const SITES_KEY_TOKEN: &str = "sites";

/// Build a key from an ordered list of parts
///
/// Pure function: the same parts always give the same key.
pub fn build_key(parts: &[&dyn fmt::Display]) -> String {
    parts
        .iter()
        .map(|part| strip_spaces(&part.to_string()))
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Build a key, rejecting parts that would make it ambiguous
///
/// Behaves like [`build_key`] but fails if any part, after space removal,
/// contains [`KEY_SEPARATOR`].
pub fn try_build_key(parts: &[&dyn fmt::Display]) -> Result<String, KeyError> {
    let mut stripped = Vec::with_capacity(parts.len());
    for (index, part) in parts.iter().enumerate() {
        let part = strip_spaces(&part.to_string());
        if part.contains(KEY_SEPARATOR) {
            return Err(KeyError::ContainsSeparator { index, part });
        }
        stripped.push(part);
    }
    Ok(stripped.join(KEY_SEPARATOR))
}

/// Key of a job record: `JOB!<job_id>`
pub fn job_key(job_id: impl fmt::Display) -> String {
    build_key(&[&JOB_KEY_TOKEN, &job_id])
}

/// Key of a job product
///
/// All four parts are always joined. Pass `""` for an absent block or site;
/// the empty part still contributes its separator, so
/// `product_key(7, "hazard", "", "")` is `7!hazard!!`.
pub fn product_key(
    job_id: impl fmt::Display,
    product: impl fmt::Display,
    block_id: impl fmt::Display,
    site: impl fmt::Display,
) -> String {
    build_key(&[&job_id, &product, &block_id, &site])
}

/// Key of the site list of a block: `product_key(job_id, "sites", block_id, "")`
pub fn sites_key(job_id: impl fmt::Display, block_id: impl fmt::Display) -> String {
    product_key(job_id, SITES_KEY_TOKEN, block_id, "")
}

fn strip_spaces(part: &str) -> String {
    part.replace(' ', "")
}

/// Key construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// A part contains the reserved separator
    #[error("key part {index} ('{part}') contains reserved separator '{}'", KEY_SEPARATOR)]
    ContainsSeparator {
        /// Position of the offending part
        index: usize,
        /// The part after space removal
        part: String,
    },
}

impl KeyError {
    /// Short machine-readable reason
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::ContainsSeparator { .. } => "contains_separator",
        }
    }
}
