//! Form payloads for signed endpoints

use std::collections::{BTreeMap, HashMap};
use url::form_urlencoded;

/// Flat string-keyed parameter set sent as a form body and signed
///
/// Keys are unique; setting an existing key replaces its value. Encoding
/// emits keys in sorted order so the body is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    params: BTreeMap<String, String>,
}

impl Payload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Builder-style [`Payload::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the payload has no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over `(key, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as `application/x-www-form-urlencoded`
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Payload {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        payload.extend(iter);
        payload
    }
}

impl From<HashMap<String, String>> for Payload {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_value() {
        let mut payload = Payload::new();
        payload.set("txamt", "100").set("txamt", "200");
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("txamt"), Some("200"));
    }

    #[test]
    fn test_encode_sorted_and_escaped() {
        let payload = Payload::new()
            .with("goods_name", "Tea & Cake")
            .with("out_trade_no", "A1,A2")
            .with("txamt", "100");

        assert_eq!(
            payload.encode(),
            "goods_name=Tea+%26+Cake&out_trade_no=A1%2CA2&txamt=100"
        );
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("b".to_string(), "2".to_string());
        map.insert("a".to_string(), "1".to_string());

        let payload = Payload::from(map);
        let keys: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(!payload.is_empty());
    }
}
