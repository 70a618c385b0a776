//! Structured results reported back to the orchestrator of a KRM function.

use super::object::KubeObject;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", s)
    }
}

/// ResourceRef identifies the resource a result is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

/// Field points at a location inside the resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub path: String,
}

/// File locates the resource in its source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub path: String,
    #[serde(default)]
    pub index: usize,
}

/// ResultItem is a single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
}

impl ResultItem {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        ResultItem {
            message: message.into(),
            severity,
            resource_ref: None,
            field: None,
            file: None,
        }
    }

    /// Attaches the resource and file references of `object`.
    pub fn with_object(mut self, object: &KubeObject) -> Self {
        self.resource_ref = Some(object.resource_ref());
        self.file = object.file();
        self
    }

    pub fn with_field(mut self, path: impl Into<String>) -> Self {
        self.field = Some(Field { path: path.into() });
        self
    }
}

impl fmt::Display for ResultItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(r) = &self.resource_ref {
            write!(f, " ({}/{} {})", r.api_version, r.kind, r.name)?;
        }
        if let Some(field) = &self.field {
            write!(f, " field: {}", field.path)?;
        }
        Ok(())
    }
}

/// Results is the ordered list of diagnostics produced by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Results {
    items: Vec<ResultItem>,
}

impl Results {
    pub fn new() -> Self {
        Results { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Records an error, scoped to `object` when given.
    pub fn error(&mut self, message: impl Into<String>, object: Option<&KubeObject>) {
        self.push(scoped(ResultItem::new(Severity::Error, message), object));
    }

    pub fn warning(&mut self, message: impl Into<String>, object: Option<&KubeObject>) {
        self.push(scoped(ResultItem::new(Severity::Warning, message), object));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ResultItem::new(Severity::Info, message));
    }

    pub fn extend(&mut self, other: Results) {
        self.items.extend(other.items);
    }

    pub fn has_error(&self) -> bool {
        self.items.iter().any(|r| r.severity == Severity::Error)
    }

    /// Process exit code: 1 if any error was recorded.
    pub fn exit_code(&self) -> i32 {
        if self.has_error() {
            1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultItem> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&ResultItem> {
        self.items.last()
    }
}

fn scoped(item: ResultItem, object: Option<&KubeObject>) -> ResultItem {
    match object {
        Some(object) => item.with_object(object),
        None => item,
    }
}

impl IntoIterator for Results {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_yaml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exit_code() {
        let mut results = Results::new();
        results.info("summary: updated a total of 0 image(s)");
        results.warning("careful", None);
        assert_eq!(results.exit_code(), 0);

        results.error("boom", None);
        assert!(results.has_error());
        assert_eq!(results.exit_code(), 1);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_error_scoped_to_object() {
        let object = KubeObject::new(
            from_yaml(
                r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: prod
  annotations:
    config.kubernetes.io/path: deploy.yaml
    config.kubernetes.io/index: '2'
"#,
            )
            .unwrap(),
        );

        let mut results = Results::new();
        results.error("bad shape", Some(&object));
        let item = results.last().unwrap();
        assert_eq!(
            item.resource_ref,
            Some(ResourceRef {
                api_version: "apps/v1".into(),
                kind: "Deployment".into(),
                name: "web".into(),
                namespace: "prod".into(),
            })
        );
        assert_eq!(
            item.file,
            Some(File {
                path: "deploy.yaml".into(),
                index: 2,
            })
        );
    }

    #[test]
    fn test_serialize_shape() {
        let item = ResultItem::new(Severity::Error, "bad")
            .with_field("spec.containers[0].image");
        let yaml = serde_yaml::to_string(&item).unwrap();
        assert!(yaml.starts_with("message: bad\nseverity: error\nfield:\n"));
        assert!(!yaml.contains("resourceRef"));
        assert!(!yaml.contains("file"));

        let back: ResultItem = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, item);
    }
}
