//! Concrete addresses of nodes inside a document.

use std::fmt;

/// PathElement represents one level of navigation to a concrete node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Field name for map fields.
    FieldName(String),
    /// Index of a sequence element.
    Index(usize),
}

impl PathElement {
    /// Creates a new field name path element.
    pub fn field_name(name: impl Into<String>) -> Self {
        PathElement::FieldName(name.into())
    }

    /// Creates a new index path element.
    pub fn index(i: usize) -> Self {
        PathElement::Index(i)
    }

    /// Returns the field name if this is a field name element.
    pub fn as_field_name(&self) -> Option<&str> {
        match self {
            PathElement::FieldName(name) => Some(name),
            _ => None,
        }
    }
}

/// Path is the address of a single node, e.g. `spec.containers[1].image`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Path {
            elements: Vec::new(),
        }
    }

    /// Creates a path from a vector of elements.
    pub fn from_elements(elements: Vec<PathElement>) -> Self {
        Path { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }

    /// Returns the last path element.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Creates a new path with the given element appended.
    pub fn with(&self, element: PathElement) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        elements.extend(self.elements.iter().cloned());
        elements.push(element);
        Path { elements }
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Path {
            elements: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            match element {
                PathElement::FieldName(name) if i == 0 => write!(f, "{}", name)?,
                PathElement::FieldName(name) => write!(f, ".{}", name)?,
                PathElement::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_element_field_name() {
        let pe = PathElement::field_name("foo");
        assert_eq!(pe.as_field_name(), Some("foo"));
        assert_eq!(PathElement::index(2).as_field_name(), None);
    }

    #[test]
    fn test_path_with() {
        let root = Path::new();
        assert!(root.is_empty());

        let spec = root.with(PathElement::field_name("spec"));
        let first = spec.with(PathElement::index(0));
        assert_eq!(spec.len(), 1);
        assert_eq!(first.len(), 2);
        assert_eq!(first.last(), Some(&PathElement::Index(0)));
    }

    #[test]
    fn test_path_display() {
        let path = Path::from_elements(vec![
            PathElement::field_name("spec"),
            PathElement::field_name("containers"),
            PathElement::index(1),
            PathElement::field_name("image"),
        ]);
        assert_eq!(path.to_string(), "spec.containers[1].image");
    }
}
