//! Core value types and operations.

use super::number::Number;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value represents a JSON/YAML value that can be any of the supported types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

/// Map represents a key-value map where keys are strings.
///
/// Keys keep their insertion order so a document written back out reads the
/// way its author wrote it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Map {
    pub fields: IndexMap<String, Value>,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }

    /// Looks up a nested value by following map keys.
    pub fn lookup(&self, keys: &[&str]) -> Option<&Value> {
        let mut current = self;
        for key in keys {
            current = current.as_map()?.get(key)?;
        }
        Some(current)
    }

    /// Returns the string at the nested location, if there is one.
    pub fn lookup_str(&self, keys: &[&str]) -> Option<&str> {
        self.lookup(keys).and_then(Value::as_str)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::from(f))
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            fields: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Removes a key, keeping the relative order of the remaining keys.
    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Parse a value from JSON.
pub fn from_json(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a value to JSON.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{from_yaml, to_yaml};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert!(Value::String("hello".into()).is_string());
        assert!(Value::List(vec![]).is_list());
        assert!(Value::Map(Map::new()).is_map());
        assert_eq!(Value::from(3i64).kind_name(), "number");
    }

    #[test]
    fn test_map_operations() {
        let mut map = Map::new();
        assert!(map.is_empty());

        map.set("key", Value::String("value".into()));
        assert!(!map.is_empty());
        assert_eq!(map.get("key"), Some(&Value::String("value".into())));

        map.set("other", Value::Null);
        assert_eq!(map.delete("key"), Some(Value::String("value".into())));
        assert_eq!(map.get("key"), None);
        assert_eq!(map.fields.keys().collect::<Vec<_>>(), vec!["other"]);
    }

    #[test]
    fn test_yaml_keeps_key_order() {
        let yaml = "kind: Pod\napiVersion: v1\nmetadata:\n  name: p\n";
        let value = from_yaml(yaml).unwrap();
        let keys: Vec<&String> = value.as_map().unwrap().fields.keys().collect();
        assert_eq!(keys, vec!["kind", "apiVersion", "metadata"]);
        assert_eq!(to_yaml(&value).unwrap(), yaml);
    }

    #[test]
    fn test_yaml_scalars() {
        let value = from_yaml("a: 1\nb: 1.5\nc: true\nd: ~\ne: text\n").unwrap();
        assert_eq!(value.lookup(&["a"]), Some(&Value::from(1i64)));
        assert_eq!(value.lookup(&["b"]), Some(&Value::from(1.5f64)));
        assert_eq!(value.lookup(&["c"]), Some(&Value::Bool(true)));
        assert_eq!(value.lookup(&["d"]), Some(&Value::Null));
        assert_eq!(value.lookup_str(&["e"]), Some("text"));
    }

    #[test]
    fn test_lookup_nested() {
        let value = from_json(r#"{"metadata":{"name":"web","labels":{"app":"x"}}}"#).unwrap();
        assert_eq!(value.lookup_str(&["metadata", "labels", "app"]), Some("x"));
        assert_eq!(value.lookup(&["metadata", "missing"]), None);
        assert_eq!(value.lookup_str(&["metadata", "labels"]), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let value = Value::Map({
            let mut m = Map::new();
            m.set("name", Value::String("test".into()));
            m.set("count", Value::from(42i64));
            m
        });

        let json = to_json(&value).unwrap();
        assert_eq!(json, r#"{"name":"test","count":42}"#);
        assert_eq!(from_json(&json).unwrap(), value);
    }
}
