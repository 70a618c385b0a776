//! YAML encoding that keeps numbers spelled the way they were written.
//!
//! Decoding a number yields its value only, so a document is read twice: once
//! into a [`Value`] and once more, guided by that value's shape, to record the
//! source text of every number. On the way out each number is swapped for a
//! placeholder string before serializing and the placeholder is then replaced
//! by the recorded text.

use super::{Map, Value};
use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse a value from YAML.
pub fn from_yaml(yaml: &str) -> Result<Value, serde_yaml::Error> {
    let mut value: Value = serde_yaml::from_str(yaml)?;
    restore_number_text(&mut value, yaml)?;
    Ok(value)
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    to_yaml_verbatim(value, |value, numbers| numbers.mask(value))
}

/// Re-reads `yaml` and records the source text of every number in `value`.
///
/// `value` must have been decoded from `yaml`, or be a mapping holding some
/// of the document's top-level entries; keys missing from `value` are
/// skipped.
pub fn restore_number_text(value: &mut Value, yaml: &str) -> Result<(), serde_yaml::Error> {
    if !contains_number(value) {
        return Ok(());
    }
    SourceText(value).deserialize(serde_yaml::Deserializer::from_str(yaml))
}

/// Serializes `target` to YAML. Numbers inside the values that `mask` hands
/// to [`VerbatimNumbers::mask`] are written as their source text.
pub fn to_yaml_verbatim<T, F>(target: &T, mask: F) -> Result<String, serde_yaml::Error>
where
    T: Serialize + Clone,
    F: FnOnce(&mut T, &mut VerbatimNumbers),
{
    let plain = serde_yaml::to_string(target)?;
    let mut numbers = VerbatimNumbers::new(&plain);
    let mut masked = target.clone();
    mask(&mut masked, &mut numbers);
    if numbers.texts.is_empty() {
        return Ok(plain);
    }
    Ok(numbers.restore(&serde_yaml::to_string(&masked)?))
}

/// VerbatimNumbers swaps numbers for placeholders and back.
#[derive(Debug)]
pub struct VerbatimNumbers {
    prefix: String,
    texts: Vec<String>,
}

impl VerbatimNumbers {
    // The prefix never occurs in `plain`, so every occurrence in the masked
    // output is a placeholder.
    fn new(plain: &str) -> Self {
        let mut salt = 0usize;
        let prefix = loop {
            let candidate = format!("__number{}_", salt);
            if !plain.contains(&candidate) {
                break candidate;
            }
            salt += 1;
        };
        VerbatimNumbers {
            prefix,
            texts: Vec::new(),
        }
    }

    /// Replaces every number under `value` with a placeholder.
    pub fn mask(&mut self, value: &mut Value) {
        match value {
            Value::Number(n) => {
                let token = format!("{}{}_", self.prefix, self.texts.len());
                self.texts.push(n.as_text().to_string());
                *value = Value::String(token);
            }
            Value::List(items) => {
                for item in items.iter_mut() {
                    self.mask(item);
                }
            }
            Value::Map(map) => {
                for field in map.fields.values_mut() {
                    self.mask(field);
                }
            }
            _ => {}
        }
    }

    fn restore(&self, yaml: &str) -> String {
        let mut out = String::with_capacity(yaml.len());
        let mut rest = yaml;
        while let Some(at) = rest.find(self.prefix.as_str()) {
            out.push_str(&rest[..at]);
            let tail = &rest[at + self.prefix.len()..];
            let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
            let text = tail[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|i| self.texts.get(i));
            match text {
                Some(text) if tail[digits..].starts_with('_') => {
                    out.push_str(text);
                    rest = &tail[digits + 1..];
                }
                _ => {
                    out.push_str(&self.prefix);
                    rest = tail;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

fn contains_number(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::List(items) => items.iter().any(contains_number),
        Value::Map(map) => map.fields.values().any(contains_number),
        _ => false,
    }
}

struct SourceText<'a>(&'a mut Value);

impl<'de, 'a> DeserializeSeed<'de> for SourceText<'a> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        match self.0 {
            Value::Number(n) => {
                n.set_text(String::deserialize(deserializer)?);
                Ok(())
            }
            Value::List(items) => deserializer.deserialize_seq(ListText(items)),
            Value::Map(map) => deserializer.deserialize_map(MapText(map)),
            _ => IgnoredAny::deserialize(deserializer).map(|_| ()),
        }
    }
}

struct ListText<'a>(&'a mut Vec<Value>);

impl<'de, 'a> Visitor<'de> for ListText<'a> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        let mut items = self.0.iter_mut();
        loop {
            let done = match items.next() {
                Some(item) => seq.next_element_seed(SourceText(item))?.is_none(),
                None => seq.next_element::<IgnoredAny>()?.is_none(),
            };
            if done {
                return Ok(());
            }
        }
    }
}

struct MapText<'a>(&'a mut Map);

impl<'de, 'a> Visitor<'de> for MapText<'a> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<(), A::Error> {
        while let Some(key) = access.next_key::<String>()? {
            match self.0.get_mut(&key) {
                Some(value) => access.next_value_seed(SourceText(value))?,
                None => {
                    access.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numbers_keep_their_spelling() {
        let yaml = "version: 1.10\ntimeout: 1e3\nreplicas: 3\nratio: 0.50\nports:\n- 8080\n- 0x1F\nname: '1.10'\n";
        let value = from_yaml(yaml).unwrap();
        assert_eq!(to_yaml(&value).unwrap(), yaml);
    }

    #[test]
    fn test_source_text_is_recorded() {
        let value = from_yaml("a: 1.20\nb:\n  c: [1.0, 2]\n").unwrap();
        let text = |v: Option<&Value>| match v {
            Some(Value::Number(n)) => n.as_text().to_string(),
            other => format!("{:?}", other),
        };
        assert_eq!(text(value.lookup(&["a"])), "1.20");
        let list = value.lookup(&["b", "c"]).and_then(Value::as_list).unwrap();
        assert_eq!(text(list.first()), "1.0");
        assert_eq!(text(list.get(1)), "2");
    }

    #[test]
    fn test_placeholder_prefix_avoids_document_text() {
        let yaml = "note: __number0_0_\ncount: 1.50\n";
        let value = from_yaml(yaml).unwrap();
        assert_eq!(to_yaml(&value).unwrap(), yaml);
    }

    #[test]
    fn test_partial_mapping_restore() {
        let yaml = "kind: List\nitems:\n- size: 2.50\nextra: 7.0\n";
        let mut items: Value = serde_yaml::from_str::<Value>(yaml)
            .unwrap()
            .lookup(&["items"])
            .cloned()
            .unwrap();
        let mut parts = Map::new();
        parts.set("items", items.clone());
        let mut parts = Value::Map(parts);
        restore_number_text(&mut parts, yaml).unwrap();
        items = parts.lookup(&["items"]).cloned().unwrap();
        assert_eq!(to_yaml(&items).unwrap(), "- size: 2.50\n");
    }
}
