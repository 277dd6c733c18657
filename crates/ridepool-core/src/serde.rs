//! Deserialization helpers that sanitize request input while it is parsed.

use serde::{Deserialize, Deserializer};

/// Deserializes a string with surrounding whitespace removed.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Deserializes a string trimmed and lower-cased. Used for emails so that
/// lookups and uniqueness checks are case-insensitive.
pub fn trimmed_lowercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_lowercase())
}
