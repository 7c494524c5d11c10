//! Path-addressed extraction from JSON response bodies
//!
//! A path expression is a dot-delimited address into a JSON document. Each
//! segment is one of:
//!
//! - a literal object key, e.g. `qrcode`
//! - `*`, meaning "every element of the array here"; the remaining segments
//!   are matched against each element in turn
//! - an empty segment, which is skipped
//!
//! Extraction is best-effort. A missing key, a node of the wrong kind, or a
//! leaf that does not fit the destination type yields the destination type's
//! default value instead of an error, and a body that is not JSON at all
//! leaves nothing but defaults behind. A wildcard over something that is not
//! an array contributes no elements.
//!
//! # Examples
//!
//! ```
//! use qfpay::extract::{extract, Extraction, Scalar, Sequence};
//!
//! let body = br#"{"qrcode":"ABC","data":[{"out_trade_no":"T1"},{"out_trade_no":"T2"}]}"#;
//!
//! let mut qrcode = String::new();
//! extract(body, "qrcode", &mut Scalar(&mut qrcode));
//! assert_eq!(qrcode, "ABC");
//!
//! let mut orders: Vec<String> = Vec::new();
//! let mut missing = String::from("sentinel");
//! Extraction::new()
//!     .sequence(&mut orders, "data.*.out_trade_no")
//!     .scalar(&mut missing, "nope")
//!     .apply(body);
//! assert_eq!(orders, vec!["T1", "T2"]);
//! assert_eq!(missing, "");
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Segment marking "every element of the array here"
pub const WILDCARD: &str = "*";

/// One step of a [`PathExpr`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Index into an object by key
    Key(String),
    /// Traverse every element of an array
    Wildcard,
    /// Pass-through, produced by leading, trailing or doubled dots
    Empty,
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<Segment>,
}

impl PathExpr {
    /// Split a dot-delimited path into segments
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .map(|part| match part {
                "" => Segment::Empty,
                WILDCARD => Segment::Wildcard,
                key => Segment::Key(key.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// The parsed segments, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the path can yield more than one value
    pub fn has_wildcard(&self) -> bool {
        self.segments.contains(&Segment::Wildcard)
    }

    /// Walk `root` and return every value the path addresses, in order
    ///
    /// `None` marks an absent value. Without wildcards the result has
    /// exactly one entry.
    pub fn select<'v>(&self, root: Option<&'v Value>) -> Vec<Option<&'v Value>> {
        let mut out = Vec::new();
        walk(root, &self.segments, &mut out);
        out
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Wildcard => f.write_str(WILDCARD)?,
                Segment::Empty => {}
            }
        }
        Ok(())
    }
}

fn walk<'v>(
    mut node: Option<&'v Value>,
    segments: &[Segment],
    out: &mut Vec<Option<&'v Value>>,
) {
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Empty => {}
            Segment::Key(key) => node = node.and_then(|value| value.get(key.as_str())),
            Segment::Wildcard => {
                if let Some(Value::Array(items)) = node {
                    for item in items {
                        walk(Some(item), &segments[i + 1..], out);
                    }
                }
                return;
            }
        }
    }
    out.push(node);
}

/// Convert one extracted value, falling back to `T::default()`
fn leaf<T: DeserializeOwned + Default>(value: Option<&Value>) -> T {
    value
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default()
}

/// Something [`extract`] can write into
pub trait Destination {
    /// Store the values a path selected; `None` entries are absent values
    fn fill(&mut self, found: &[Option<&Value>]);
}

/// Destination holding a single value
///
/// Receives the last selected value, or `T::default()` when the path
/// selected nothing.
#[derive(Debug)]
pub struct Scalar<'a, T>(pub &'a mut T);

impl<T: DeserializeOwned + Default> Destination for Scalar<'_, T> {
    fn fill(&mut self, found: &[Option<&Value>]) {
        *self.0 = leaf(found.last().copied().flatten());
    }
}

/// Destination growing a sequence
///
/// Every selected value is appended in encounter order; absent ones are
/// appended as `T::default()`. Existing elements are kept.
#[derive(Debug)]
pub struct Sequence<'a, T>(pub &'a mut Vec<T>);

impl<T: DeserializeOwned + Default> Destination for Sequence<'_, T> {
    fn fill(&mut self, found: &[Option<&Value>]) {
        self.0.extend(found.iter().map(|value| leaf::<T>(*value)));
    }
}

/// Populate `dest` with the value(s) at `path` inside `raw`
///
/// Never fails: an undecodable body is treated as an absent document.
pub fn extract<D: Destination + ?Sized>(raw: &[u8], path: &str, dest: &mut D) {
    let path = PathExpr::parse(path);
    let document = match serde_json::from_slice::<Value>(raw) {
        Ok(document) => Some(document),
        Err(e) => {
            tracing::debug!("Extraction of `{}` from undecodable body: {}", path, e);
            None
        }
    };
    let found = path.select(document.as_ref());
    dest.fill(&found);
}

/// Ordered (destination, path) pairs filled from one response body
///
/// Pairs are processed in the order they were added. There is no rollback:
/// every pair is filled independently.
#[derive(Default)]
pub struct Extraction<'a> {
    targets: Vec<(Box<dyn Destination + Send + 'a>, String)>,
}

impl fmt::Debug for Extraction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extraction")
            .field(
                "paths",
                &self.targets.iter().map(|(_, path)| path).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<'a> Extraction<'a> {
    /// Create an empty extraction
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-value destination
    pub fn scalar<T>(mut self, dest: &'a mut T, path: impl Into<String>) -> Self
    where
        T: DeserializeOwned + Default + Send + 'a,
    {
        self.push(Box::new(Scalar(dest)), path);
        self
    }

    /// Add a growable destination
    pub fn sequence<T>(mut self, dest: &'a mut Vec<T>, path: impl Into<String>) -> Self
    where
        T: DeserializeOwned + Default + Send + 'a,
    {
        self.push(Box::new(Sequence(dest)), path);
        self
    }

    /// Add a custom destination
    pub fn push(&mut self, dest: Box<dyn Destination + Send + 'a>, path: impl Into<String>) {
        self.targets.push((dest, path.into()));
    }

    /// Number of (destination, path) pairs
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether there are no pairs
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Fill every destination from `raw`
    pub fn apply(self, raw: &[u8]) {
        for (mut dest, path) in self.targets {
            extract(raw, &path, dest.as_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_parse_segments() {
        let path = PathExpr::parse("data.*..out_trade_no");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("data".to_string()),
                Segment::Wildcard,
                Segment::Empty,
                Segment::Key("out_trade_no".to_string()),
            ]
        );
        assert!(path.has_wildcard());
        assert_eq!(path.to_string(), "data.*..out_trade_no");
        assert!(!PathExpr::parse("qrcode").has_wildcard());
    }

    #[test]
    fn test_scalar_paths() {
        let raw = body(json!({"qrcode": "ABC", "syssn": "123"}));
        let mut qrcode = String::new();
        let mut syssn = String::new();

        Extraction::new()
            .scalar(&mut qrcode, "qrcode")
            .scalar(&mut syssn, "syssn")
            .apply(&raw);

        assert_eq!(qrcode, "ABC");
        assert_eq!(syssn, "123");
    }

    #[test]
    fn test_wildcard_plucks_field() {
        let raw = body(json!({"data": [{"out_trade_no": "T1"}, {"out_trade_no": "T2"}]}));
        let mut orders: Vec<String> = Vec::new();

        extract(&raw, "data.*.out_trade_no", &mut Sequence(&mut orders));

        assert_eq!(orders, vec!["T1", "T2"]);
    }

    #[test]
    fn test_absent_field_becomes_default_element() {
        let raw = body(json!({"data": [{}]}));
        let mut values: Vec<String> = Vec::new();

        extract(&raw, "data.*.missing_field", &mut Sequence(&mut values));

        assert_eq!(values, vec![String::new()]);
    }

    #[test]
    fn test_sequence_appends_to_existing() {
        let raw = body(json!({"ids": [1, 2]}));
        let mut ids = vec![0u32];

        extract(&raw, "ids.*", &mut Sequence(&mut ids));

        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_nested_wildcards() {
        let raw = body(json!({"rows": [[{"v": "a"}, {"v": "b"}], [], [{"v": "c"}]]}));
        let mut values: Vec<String> = Vec::new();

        extract(&raw, "rows.*.*.v", &mut Sequence(&mut values));

        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_intermediate_key() {
        let raw = body(json!({"a": {}}));
        let mut value = String::from("sentinel");

        extract(&raw, "a.b.c", &mut Scalar(&mut value));

        assert_eq!(value, "");
    }

    #[test]
    fn test_key_on_non_object_is_absent() {
        let raw = body(json!({"a": "string"}));
        let mut value = 7u64;

        extract(&raw, "a.b", &mut Scalar(&mut value));

        assert_eq!(value, 0);
    }

    #[test]
    fn test_wildcard_on_non_array_selects_nothing() {
        let raw = body(json!({"data": {"out_trade_no": "T1"}}));
        let mut orders: Vec<String> = Vec::new();
        let mut first = String::from("sentinel");

        Extraction::new()
            .sequence(&mut orders, "data.*.out_trade_no")
            .scalar(&mut first, "data.*.out_trade_no")
            .apply(&raw);

        assert!(orders.is_empty());
        assert_eq!(first, "");
    }

    #[test]
    fn test_scalar_takes_last_wildcard_match() {
        let raw = body(json!({"data": [{"syssn": "1"}, {"syssn": "2"}]}));
        let mut syssn = String::new();

        extract(&raw, "data.*.syssn", &mut Scalar(&mut syssn));

        assert_eq!(syssn, "2");
    }

    #[test]
    fn test_type_mismatch_becomes_default() {
        let raw = body(json!({"txamt": 100, "respcd": null}));
        let mut txamt = String::from("sentinel");
        let mut respcd = String::from("sentinel");

        Extraction::new()
            .scalar(&mut txamt, "txamt")
            .scalar(&mut respcd, "respcd")
            .apply(&raw);

        assert_eq!(txamt, "");
        assert_eq!(respcd, "");
    }

    #[test]
    fn test_undecodable_body_yields_defaults() {
        let mut value = String::from("sentinel");
        let mut values: Vec<String> = Vec::new();

        Extraction::new()
            .scalar(&mut value, "qrcode")
            .sequence(&mut values, "data.*")
            .apply(b"not json");

        assert_eq!(value, "");
        assert!(values.is_empty());
    }

    #[test]
    fn test_empty_segments_pass_through() {
        let raw = body(json!({"a": {"b": "x"}}));
        let mut value = String::new();

        extract(&raw, ".a..b.", &mut Scalar(&mut value));

        assert_eq!(value, "x");
    }

    #[test]
    fn test_struct_elements() {
        #[derive(Debug, Default, PartialEq, Deserialize)]
        struct Row {
            #[serde(default)]
            id: String,
        }

        let raw = body(json!({"data": [{"id": "x"}, 5]}));
        let mut rows: Vec<Row> = Vec::new();

        extract(&raw, "data.*", &mut Sequence(&mut rows));

        assert_eq!(rows, vec![Row { id: "x".to_string() }, Row::default()]);
    }

    #[test]
    fn test_query_records_with_null_fields() {
        let raw = br#"{"data":[{"out_trade_no":"T1","respcd":"0000","cardcd":null}]}"#;
        let mut records: Vec<crate::types::QueryRecord> = Vec::new();

        extract(raw, "data.*", &mut Sequence(&mut records));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].out_trade_no, "T1");
        assert!(records[0].paid());
        assert!(records[0].cardcd.is_empty());
    }

    #[test]
    fn test_extraction_len() {
        let mut a = String::new();
        let mut b: Vec<i64> = Vec::new();
        let extraction = Extraction::new().scalar(&mut a, "a").sequence(&mut b, "b.*");

        assert_eq!(extraction.len(), 2);
        assert!(!extraction.is_empty());
        assert!(Extraction::new().is_empty());
    }
}
