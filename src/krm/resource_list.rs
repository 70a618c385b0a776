//! The ResourceList wire format exchanged with KRM function orchestrators.

use super::object::KubeObject;
use super::result::Results;
use crate::error::Result;
use crate::value::{restore_number_text, to_yaml_verbatim, Map, Value};
use serde::{Deserialize, Serialize};

pub const RESOURCE_LIST_API_VERSION: &str = "config.kubernetes.io/v1";
pub const RESOURCE_LIST_KIND: &str = "ResourceList";

fn default_api_version() -> String {
    RESOURCE_LIST_API_VERSION.to_string()
}

fn default_kind() -> String {
    RESOURCE_LIST_KIND.to_string()
}

/// ResourceList carries the input items, the function config and, on the way
/// out, the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<KubeObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_config: Option<Value>,
    #[serde(default, skip_serializing_if = "Results::is_empty")]
    pub results: Results,
}

impl ResourceList {
    pub fn new(items: Vec<KubeObject>, function_config: Option<Value>) -> Self {
        ResourceList {
            api_version: default_api_version(),
            kind: default_kind(),
            items,
            function_config,
            results: Results::new(),
        }
    }

    /// Decodes a ResourceList from YAML (JSON is accepted as well).
    ///
    /// Numbers in the items and the function config keep their source text.
    pub fn from_yaml(input: &str) -> Result<Self> {
        let mut list: ResourceList = serde_yaml::from_str(input)?;

        let mut parts = Map::new();
        let items = list.items.drain(..).map(KubeObject::into_value).collect();
        parts.set("items", Value::List(items));
        if let Some(config) = list.function_config.take() {
            parts.set("functionConfig", config);
        }
        let mut parts = Value::Map(parts);
        restore_number_text(&mut parts, input)?;

        if let Value::Map(mut parts) = parts {
            if let Some(Value::List(items)) = parts.delete("items") {
                list.items = items.into_iter().map(KubeObject::new).collect();
            }
            list.function_config = parts.delete("functionConfig");
        }
        Ok(list)
    }

    /// Encodes the ResourceList as YAML. Numbers are written as they were
    /// read.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(to_yaml_verbatim(self, |list, numbers| {
            for item in list.items.iter_mut() {
                numbers.mask(item.value_mut());
            }
            if let Some(config) = list.function_config.as_mut() {
                numbers.mask(config);
            }
        })?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::krm::Severity;
    use pretty_assertions::assert_eq;

    const INPUT: &str = r#"
apiVersion: config.kubernetes.io/v1
kind: ResourceList
items:
- apiVersion: v1
  kind: Pod
  metadata:
    name: web
functionConfig:
  apiVersion: v1
  kind: ConfigMap
  data:
    name: nginx
    newTag: 1.29.0
"#;

    #[test]
    fn test_decode() {
        let list = ResourceList::from_yaml(INPUT).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].name(), Some("web"));
        assert!(list.function_config.is_some());
        assert!(list.results.is_empty());
    }

    #[test]
    fn test_decode_json_and_defaults() {
        let list = ResourceList::from_yaml(r#"{"items": [{"apiVersion": "v1", "kind": "Pod"}]}"#).unwrap();
        assert_eq!(list.api_version, RESOURCE_LIST_API_VERSION);
        assert_eq!(list.kind, RESOURCE_LIST_KIND);
        assert_eq!(list.function_config, None);
    }

    #[test]
    fn test_encode_with_results() {
        let mut list = ResourceList::new(Vec::new(), None);
        list.results.info("summary: updated a total of 0 image(s)");
        let yaml = list.to_yaml().unwrap();
        assert!(yaml.starts_with("apiVersion: config.kubernetes.io/v1\nkind: ResourceList\n"));
        assert!(yaml.contains("severity: info"));
        assert!(!yaml.contains("functionConfig"));

        let back = ResourceList::from_yaml(&yaml).unwrap();
        assert_eq!(back.results.last().map(|r| r.severity), Some(Severity::Info));
        assert_eq!(
            back.results.last().map(|r| r.message.as_str()),
            Some("summary: updated a total of 0 image(s)")
        );
    }

    #[test]
    fn test_numbers_round_trip_verbatim() {
        let input = "apiVersion: config.kubernetes.io/v1\nkind: ResourceList\nitems:\n- apiVersion: example.com/v1\n  kind: Chart\n  spec:\n    version: 1.10\n    timeout: 1e3\n    replicas: 2\nfunctionConfig:\n  apiVersion: v1\n  kind: ConfigMap\n  data:\n    name: nginx\n    newTag: 1.20\n";
        let list = ResourceList::from_yaml(input).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.to_yaml().unwrap(), input);
    }
}
