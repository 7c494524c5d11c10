//! Request signing
//!
//! The gateway signs the form payload, not the HTTP request: every
//! `key=value` pair is rendered, the pairs are sorted byte-wise, joined with
//! `&`, the secret key is appended with no separator, and the MD5 digest of
//! that string is sent as uppercase hex in `X-QF-SIGN`.

use crate::types::Payload;
use md5::{Digest, Md5};

/// Build the canonical string that gets hashed, key included
pub fn string_to_sign(payload: &Payload, key: &str) -> String {
    let mut parts: Vec<String> = payload
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    // Sort the rendered pairs, not the keys: `a-b=` sorts before `a=`.
    parts.sort_unstable();

    let mut joined = parts.join("&");
    joined.push_str(key);
    joined
}

/// Generate the `X-QF-SIGN` value for a payload
pub fn generate_sign(payload: &Payload, key: &str) -> String {
    let digest = Md5::digest(string_to_sign(payload, key).as_bytes());
    hex::encode_upper(digest)
}

/// Check a signature produced by [`generate_sign`]
pub fn verify_sign(payload: &Payload, key: &str, signature: &str) -> bool {
    generate_sign(payload, key).eq_ignore_ascii_case(signature)
}
