//! Attribute storage for catalog entities
//!
//! Every data-bearing entity (show, episode, actor, banner) wraps an
//! [`AttributeMap`]: an ordered mapping from field name to coerced [`Value`].
//! The map optionally normalizes keys to lower case so that fields can be
//! looked up without knowing the exact casing used on the wire.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A coerced field value as extracted from the XML payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Plain text, possibly empty
    Text(String),
    /// All-digit field
    Int(i64),
    /// Digits with a single decimal point
    Float(f64),
    /// A field of the exact form yyyy-mm-dd
    Date(NaiveDate),
    /// Pipe-delimited field, one entry per segment
    List(Vec<String>),
}

impl Value {
    /// The text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::List(items) => write!(f, "{}", items.join("|")),
        }
    }
}

/// An ordered field-name to value mapping with optional case-insensitive keys.
///
/// When built with `ignore_case` set, every key is lowercased before any
/// store, lookup, removal or containment check. The original casing is not
/// retained; iteration yields the normalized keys in sorted order.
#[derive(Debug, Clone)]
pub struct AttributeMap {
    ignore_case: bool,
    data: BTreeMap<String, Value>,
}

impl AttributeMap {
    pub fn new(ignore_case: bool) -> Self {
        Self {
            ignore_case,
            data: BTreeMap::new(),
        }
    }

    /// Build a map from parsed fields. Later entries overwrite earlier ones
    /// whose normalized key collides.
    pub fn from_fields(fields: &[(String, Value)], ignore_case: bool) -> Self {
        let mut map = Self::new(ignore_case);
        for (key, value) in fields {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    fn transform(&self, key: &str) -> String {
        if self.ignore_case {
            key.to_lowercase()
        } else {
            key.to_string()
        }
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        let key = self.transform(&key);
        self.data.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(&self.transform(key))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(&self.transform(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(&self.transform(key))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.data.values()
    }

    /// Fold `other` into this map. On key conflict the incoming value wins.
    /// Keys are renormalized through this map's own case flag.
    pub fn merge(&mut self, other: AttributeMap) {
        for (key, value) in other.data {
            self.insert(key, value);
        }
    }
}

impl PartialEq for AttributeMap {
    /// Two maps are equal iff their normalized key/value pairs match.
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let map = AttributeMap::from_fields(
            &fields(&[("SeriesName", Value::Text("Dexter".into()))]),
            true,
        );

        assert_eq!(
            map.get("seriesname").and_then(Value::as_str),
            Some("Dexter")
        );
        assert_eq!(
            map.get("SERIESNAME").and_then(Value::as_str),
            Some("Dexter")
        );
        assert!(map.contains_key("SeRiEsNaMe"));
    }

    #[test]
    fn test_case_sensitive_miss() {
        let map = AttributeMap::from_fields(
            &fields(&[("IMDB_ID", Value::Text("tt0773262".into()))]),
            false,
        );

        assert!(map.get("imdb_id").is_none());
        assert!(map.get("IMDB_ID").is_some());
    }

    #[test]
    fn test_insert_overwrites_on_equal_transformed_key() {
        let mut map = AttributeMap::new(true);
        map.insert("Rating".into(), Value::Float(7.5));
        map.insert("rating".into(), Value::Float(8.1));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("RATING").and_then(Value::as_float), Some(8.1));
    }

    #[test]
    fn test_remove_uses_transform() {
        let mut map = AttributeMap::new(true);
        map.insert("Network".into(), Value::Text("Showtime".into()));

        assert!(map.remove("NETWORK").is_some());
        assert!(map.is_empty());
    }

    #[test]
    fn test_merge_incoming_wins() {
        let mut base = AttributeMap::from_fields(
            &fields(&[
                ("SeriesName", Value::Text("Dexter".into())),
                ("Network", Value::Text("Showtime".into())),
            ]),
            false,
        );
        let update = AttributeMap::from_fields(
            &fields(&[
                ("Network", Value::Text("CBS".into())),
                ("Runtime", Value::Int(50)),
            ]),
            false,
        );

        base.merge(update);

        assert_eq!(base.get("Network").and_then(Value::as_str), Some("CBS"));
        assert_eq!(base.get("Runtime").and_then(Value::as_int), Some(50));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn test_equality_on_normalized_pairs() {
        let a = AttributeMap::from_fields(&fields(&[("Name", Value::Int(1))]), true);
        let b = AttributeMap::from_fields(&fields(&[("NAME", Value::Int(1))]), true);
        let c = AttributeMap::from_fields(&fields(&[("name", Value::Int(2))]), true);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&Value::Int(308834)).unwrap();
        assert_eq!(json, "308834");

        let json = serde_json::to_string(&Value::List(vec!["foo".into(), "bar".into()])).unwrap();
        assert_eq!(json, "[\"foo\",\"bar\"]");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Text("x".into()).to_string(), "x");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2006, 10, 29).unwrap()).to_string(),
            "2006-10-29"
        );
        assert_eq!(
            Value::List(vec!["foo".into(), "bar".into()]).to_string(),
            "foo|bar"
        );
    }
}
