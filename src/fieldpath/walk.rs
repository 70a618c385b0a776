//! Structural walk of a document along a selector path.

use super::path::{Path, PathElement};
use super::selector::{FieldPath, PathSegment};
use crate::value::{Map, Value};
use thiserror::Error;

/// Errors raised when a document's shape contradicts the selector path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("{path}: expected mapping, found {found}")]
    ExpectedMap { path: Path, found: &'static str },

    #[error("{path}: expected sequence, found {found}")]
    ExpectedSequence { path: Path, found: &'static str },

    #[error("{path}: expected scalar, found {found}")]
    ExpectedScalar { path: Path, found: &'static str },
}

impl WalkError {
    /// Address of the offending node.
    pub fn path(&self) -> &Path {
        match self {
            WalkError::ExpectedMap { path, .. }
            | WalkError::ExpectedSequence { path, .. }
            | WalkError::ExpectedScalar { path, .. } => path,
        }
    }
}

/// LeafMut is a read/replace handle bound to one scalar slot of a document.
#[derive(Debug)]
pub struct LeafMut<'a> {
    path: Path,
    slot: &'a mut Value,
}

impl<'a> LeafMut<'a> {
    /// Concrete address of the slot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_str(&self) -> Option<&str> {
        self.slot.as_str()
    }

    /// Replaces the slot's value, returning the previous one.
    pub fn replace(&mut self, value: Value) -> Value {
        std::mem::replace(self.slot, value)
    }
}

/// Collects a handle for every scalar leaf `path` resolves to under `root`.
///
/// Missing keys and explicit nulls end the walk quietly. With `create` set,
/// missing intermediate nodes are synthesized (a mapping, or a sequence when
/// the next segment is a wildcard); the final field is never created.
/// Nothing is cached between calls.
pub fn walk_mut<'a>(
    root: &'a mut Value,
    path: &FieldPath,
    create: bool,
) -> Result<Vec<LeafMut<'a>>, WalkError> {
    let mut leaves = Vec::new();
    walk(root, path.segments(), Path::new(), create, &mut leaves)?;
    Ok(leaves)
}

fn walk<'a>(
    node: &'a mut Value,
    segments: &[PathSegment],
    at: Path,
    create: bool,
    out: &mut Vec<LeafMut<'a>>,
) -> Result<(), WalkError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(());
    };

    match segment {
        PathSegment::Literal(name) => {
            let found = node.kind_name();
            let map = match node {
                Value::Map(map) => map,
                _ => return Err(WalkError::ExpectedMap { path: at, found }),
            };
            let here = at.with(PathElement::field_name(name.as_str()));

            if rest.is_empty() {
                let Some(child) = map.get_mut(name) else {
                    return Ok(());
                };
                if child.is_null() {
                    return Ok(());
                }
                if child.is_map() || child.is_list() {
                    return Err(WalkError::ExpectedScalar {
                        path: here,
                        found: child.kind_name(),
                    });
                }
                out.push(LeafMut { path: here, slot: child });
                return Ok(());
            }

            if map.get(name).map_or(true, Value::is_null) {
                if !create {
                    return Ok(());
                }
                let empty = match rest.first() {
                    Some(PathSegment::EachElement) => Value::List(Vec::new()),
                    _ => Value::Map(Map::new()),
                };
                map.set(name.as_str(), empty);
            }

            match map.get_mut(name) {
                Some(child) => walk(child, rest, here, create, out),
                None => Ok(()),
            }
        }
        PathSegment::EachElement => match node {
            Value::List(items) => {
                for (i, item) in items.iter_mut().enumerate() {
                    walk(item, rest, at.with(PathElement::index(i)), create, out)?;
                }
                Ok(())
            }
            Value::Null => Ok(()),
            other => Err(WalkError::ExpectedSequence {
                path: at,
                found: other.kind_name(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_yaml;
    use pretty_assertions::assert_eq;

    const POD: &str = r#"
apiVersion: v1
kind: Pod
metadata:
  name: web
spec:
  initContainers:
  - name: init
    image: busybox:1.36.1
  containers:
  - name: app
    image: nginx:1.28.1
  - name: sidecar
    image: alpine:3.22
"#;

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    fn leaf_paths(leaves: &[LeafMut<'_>]) -> Vec<String> {
        leaves.iter().map(|l| l.path().to_string()).collect()
    }

    #[test]
    fn test_wildcard_forks_per_element() {
        let mut doc = from_yaml(POD).unwrap();
        let leaves = walk_mut(&mut doc, &path("spec/containers[]/image"), false).unwrap();
        assert_eq!(
            leaf_paths(&leaves),
            vec!["spec.containers[0].image", "spec.containers[1].image"]
        );
        assert_eq!(leaves[1].as_str(), Some("alpine:3.22"));
    }

    #[test]
    fn test_replace_writes_through() {
        let mut doc = from_yaml(POD).unwrap();
        {
            let mut leaves = walk_mut(&mut doc, &path("spec/initContainers[]/image"), false).unwrap();
            let old = leaves[0].replace(Value::from("busybox:1.37.0"));
            assert_eq!(old, Value::from("busybox:1.36.1"));
        }
        assert_eq!(
            doc.lookup(&["spec", "initContainers"]).unwrap().as_list().unwrap()[0].lookup_str(&["image"]),
            Some("busybox:1.37.0")
        );
    }

    #[test]
    fn test_missing_key_yields_nothing() {
        let mut doc = from_yaml(POD).unwrap();
        let leaves = walk_mut(&mut doc, &path("spec/template/spec/containers[]/image"), false).unwrap();
        assert!(leaves.is_empty());
    }

    #[test]
    fn test_null_sequence_yields_nothing() {
        let mut doc = from_yaml("spec:\n  initContainers: ~\n").unwrap();
        let leaves = walk_mut(&mut doc, &path("spec/initContainers[]/image"), false).unwrap();
        assert!(leaves.is_empty());
    }

    #[test]
    fn test_create_synthesizes_intermediates() {
        let mut doc = from_yaml("spec: {}\n").unwrap();
        let leaves = walk_mut(&mut doc, &path("spec/template/spec/containers[]/image"), true).unwrap();
        assert!(leaves.is_empty());
        assert_eq!(
            doc.lookup(&["spec", "template", "spec", "containers"]),
            Some(&Value::List(vec![]))
        );
    }

    #[test]
    fn test_create_does_not_create_leaf() {
        let mut doc = from_yaml("spec: {}\n").unwrap();
        let leaves = walk_mut(&mut doc, &path("spec/job/image"), true).unwrap();
        assert!(leaves.is_empty());
        assert_eq!(doc.lookup(&["spec", "job"]).and_then(Value::as_map).map(Map::len), Some(0));
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let mut doc = from_yaml("spec:\n  containers: not-a-list\n").unwrap();
        let err = walk_mut(&mut doc, &path("spec/containers[]/image"), false).unwrap_err();
        assert_eq!(err.to_string(), "spec.containers: expected sequence, found string");

        let mut doc = from_yaml("spec: 3\n").unwrap();
        let err = walk_mut(&mut doc, &path("spec/containers[]/image"), false).unwrap_err();
        assert!(matches!(err, WalkError::ExpectedMap { found: "number", .. }));

        let mut doc = from_yaml("spec:\n  image:\n    name: x\n").unwrap();
        let err = walk_mut(&mut doc, &path("spec/image"), false).unwrap_err();
        assert!(matches!(err, WalkError::ExpectedScalar { found: "mapping", .. }));
    }

    #[test]
    fn test_walk_is_recomputed_per_call() {
        let mut doc = from_yaml(POD).unwrap();
        let selector = path("spec/containers[]/image");
        assert_eq!(walk_mut(&mut doc, &selector, false).unwrap().len(), 2);

        let spec = doc.as_map_mut().unwrap().get_mut("spec").unwrap();
        let containers = spec.as_map_mut().unwrap().get_mut("containers").unwrap();
        containers.as_list_mut().unwrap().pop();

        assert_eq!(walk_mut(&mut doc, &selector, false).unwrap().len(), 1);
    }
}
