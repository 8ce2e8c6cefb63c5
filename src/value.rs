/*!
# JSON Value

The in-memory tree produced by a successful parse, and [`Map`], the
insertion-ordered mapping used for objects.
*/
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ParseError;

/// Primary JSON value tree definition
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Represents a JSON object with string keys and values of any type
    Object(Map),
    /// Represents a JSON array containing values of any type
    Array(Vec<Value>),
    /// Represents a JSON string value, escapes resolved
    String(String),
    /// Represents a JSON number value
    Number(f64),
    /// Represents a JSON Boolean value
    Boolean(bool),
    /// Represents a JSON null value
    Null,
}

impl Value {
    /// Compute the depth of the JSON document. Scalars have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(map) => {
                let inner_depth =
                    map.values().map(Self::depth).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::Array(arr) => {
                let inner_depth = arr.iter().map(Self::depth).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::String(_) | Self::Number(_) | Self::Boolean(_) | Self::Null => {
                1
            }
        }
    }

    /// Name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string contents, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The members, if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl FromStr for Value {
    type Err = ParseError;

    /// Parses with the default [`ParseOptions`](crate::options::ParseOptions).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(number) => {
                Self::Number(number.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(str) => Self::String(str),
            serde_json::Value::Array(values) => {
                Self::Array(values.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// A string-keyed map that iterates in insertion order.
///
/// Equality ignores order: two maps are equal when they hold the same keys
/// bound to equal values.
#[derive(Clone, Debug, Default)]
pub struct Map {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Map {
    /// Construct an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert the given key-value pair. An existing key keeps its position
    /// and has its value replaced; the old value is returned.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        if let Some(&slot) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[slot].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Retrieve the value of a given key, if it exists.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Return whether the given key exists within the map.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let mut inner = Map::new();
        inner.insert("c".to_string(), Value::Array(vec![Value::Null]));
        let mut map = Map::new();
        map.insert("a".to_string(), Value::Number(1.0));
        map.insert("b".to_string(), Value::Object(inner));
        Value::Object(map)
    }

    #[test]
    fn depth() {
        assert_eq!(Value::Null.depth(), 1);
        assert_eq!(Value::Array(vec![]).depth(), 1);
        assert_eq!(sample().depth(), 4);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = Map::new();
        assert!(map.insert("x".into(), Value::Number(1.0)).is_none());
        map.insert("y".into(), Value::Number(2.0));
        let old = map.insert("x".into(), Value::Number(3.0));
        assert_eq!(old, Some(Value::Number(1.0)));
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["x", "y"]);
        assert_eq!(map.get("x"), Some(&Value::Number(3.0)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn map_equality_ignores_order() {
        let a: Map = [
            ("a".to_string(), Value::Null),
            ("b".to_string(), Value::Boolean(true)),
        ]
        .into_iter()
        .collect();
        let b: Map = [
            ("b".to_string(), Value::Boolean(true)),
            ("a".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn accessors() {
        let value = sample();
        assert_eq!(value.kind_name(), "object");
        assert_eq!(value.get("a").and_then(Value::as_f64), Some(1.0));
        let c = value.get("b").and_then(|b| b.get("c")).unwrap();
        assert!(c.as_array().unwrap()[0].is_null());
        assert_eq!(Value::String("s".into()).as_str(), Some("s"));
        assert_eq!(Value::Boolean(false).as_bool(), Some(false));
        assert!(Value::Null.get("a").is_none());
    }

    #[test]
    fn from_serde_json() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"a": 1, "b": {"c": [null]}}"#).unwrap();
        assert_eq!(Value::from(json), sample());
    }
}
