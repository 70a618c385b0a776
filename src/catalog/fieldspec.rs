//! Field specs: a GVK gate paired with a selector path.

use crate::fieldpath::{walk_mut, FieldPath, LeafMut, WalkError};
use crate::resid::Gvk;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// FieldSpec selects the fields at `path` in every resource of one GVK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldSpec {
    #[serde(default)]
    pub group: String,
    pub version: String,
    pub kind: String,
    pub path: FieldPath,
    /// Synthesize missing intermediate nodes while walking.
    #[serde(default, alias = "createIfMissing", skip_serializing_if = "std::ops::Not::not")]
    pub create: bool,
}

/// FieldSpecId is the identity of a FieldSpec; `create` is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSpecId {
    pub gvk: Gvk,
    pub path: FieldPath,
}

impl FieldSpec {
    pub fn new(gvk: Gvk, path: FieldPath) -> Self {
        FieldSpec {
            group: gvk.group,
            version: gvk.version,
            kind: gvk.kind,
            path,
            create: false,
        }
    }

    pub fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    pub fn gvk(&self) -> Gvk {
        Gvk::new(self.group.as_str(), self.version.as_str(), self.kind.as_str())
    }

    pub fn id(&self) -> FieldSpecId {
        FieldSpecId {
            gvk: self.gvk(),
            path: self.path.clone(),
        }
    }

    /// Returns true if resources of `gvk` are subject to this spec.
    pub fn applies_to(&self, gvk: &Gvk) -> bool {
        self.group == gvk.group && self.version == gvk.version && self.kind == gvk.kind
    }

    /// Resolves the spec against a document of type `gvk`.
    ///
    /// A document of another type is never walked and yields no leaves.
    pub fn select<'a>(&self, gvk: &Gvk, root: &'a mut Value) -> Result<Vec<LeafMut<'a>>, WalkError> {
        if !self.applies_to(gvk) {
            return Ok(Vec::new());
        }
        walk_mut(root, &self.path, self.create)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.gvk(), self.path)
    }
}
