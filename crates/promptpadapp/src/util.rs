//! Id generation and derived-field helpers.
//!
//! Every entity id is an opaque string (a v4 UUID). The derived fields on a
//! prompt (`content_length`, `word_count`) must only ever be computed through
//! [`char_count`] and [`word_count`] so that they cannot drift from the
//! content they describe.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a fresh opaque entity id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Number of maximal whitespace-delimited non-empty tokens in `content`.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Character length of `content` (scalar values, not bytes).
pub fn char_count(content: &str) -> usize {
    content.chars().count()
}

/// Human-friendly relative timestamp ("3 hours ago").
pub fn format_relative(instant: DateTime<Utc>) -> String {
    let secs = (Utc::now() - instant).num_seconds().max(0) as u64;
    timeago::Formatter::new().convert(std::time::Duration::from_secs(secs))
}

/// Absolute timestamp for detail views and webhook messages.
pub fn format_absolute(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}
