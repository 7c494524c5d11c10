//! Tolerant field decoding for gateway payloads
//!
//! The gateway sends `null` for unset fields and is not consistent about
//! types. A field that cannot be read as a string decodes as empty and does
//! not fail the surrounding struct.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a string field; `null` and non-string values become `""`
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}
