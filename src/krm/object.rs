//! A single Kubernetes resource inside a ResourceList.

use super::result::{File, ResourceRef};
use crate::resid::Gvk;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PATH_ANNOTATION: &str = "config.kubernetes.io/path";
pub const INDEX_ANNOTATION: &str = "config.kubernetes.io/index";
pub const INTERNAL_PATH_ANNOTATION: &str = "internal.config.kubernetes.io/path";
pub const INTERNAL_INDEX_ANNOTATION: &str = "internal.config.kubernetes.io/index";

/// Reasons a document cannot be treated as a Kubernetes resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    #[error("resource must be a mapping, found {0}")]
    NotAMap(&'static str),

    #[error("resource is missing `{0}`")]
    MissingField(&'static str),
}

/// KubeObject wraps a decoded resource document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KubeObject {
    value: Value,
}

impl KubeObject {
    pub fn new(value: Value) -> Self {
        KubeObject { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn api_version(&self) -> Option<&str> {
        self.value.lookup_str(&["apiVersion"])
    }

    pub fn kind(&self) -> Option<&str> {
        self.value.lookup_str(&["kind"])
    }

    pub fn name(&self) -> Option<&str> {
        self.value.lookup_str(&["metadata", "name"])
    }

    pub fn namespace(&self) -> Option<&str> {
        self.value.lookup_str(&["metadata", "namespace"])
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.value.lookup_str(&["metadata", "annotations", key])
    }

    /// Returns the resource's type, or why it has none.
    pub fn gvk(&self) -> Result<Gvk, ObjectError> {
        if !self.value.is_map() {
            return Err(ObjectError::NotAMap(self.value.kind_name()));
        }
        let api_version = self
            .api_version()
            .filter(|s| !s.is_empty())
            .ok_or(ObjectError::MissingField("apiVersion"))?;
        let kind = self
            .kind()
            .filter(|s| !s.is_empty())
            .ok_or(ObjectError::MissingField("kind"))?;
        Ok(Gvk::from_api_version(api_version, kind))
    }

    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef {
            api_version: self.api_version().unwrap_or_default().to_string(),
            kind: self.kind().unwrap_or_default().to_string(),
            name: self.name().unwrap_or_default().to_string(),
            namespace: self.namespace().unwrap_or_default().to_string(),
        }
    }

    /// Source file of the resource, from the path/index annotations.
    pub fn file(&self) -> Option<File> {
        let path = self
            .annotation(PATH_ANNOTATION)
            .or_else(|| self.annotation(INTERNAL_PATH_ANNOTATION))?;
        let index = self
            .annotation(INDEX_ANNOTATION)
            .or_else(|| self.annotation(INTERNAL_INDEX_ANNOTATION))
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        Some(File {
            path: path.to_string(),
            index,
        })
    }
}

impl From<Value> for KubeObject {
    fn from(value: Value) -> Self {
        KubeObject::new(value)
    }
}
