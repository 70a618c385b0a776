//! Selector paths such as `spec/template/spec/containers[]/image`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a selector path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldPathError {
    #[error("field path is empty")]
    Empty,

    #[error("field path {path:?}: empty segment at position {position}")]
    EmptySegment { path: String, position: usize },

    #[error("field path {path:?}: unsupported segment {segment:?}, only `name` and `name[]` are allowed")]
    UnsupportedSegment { path: String, segment: String },

    #[error("field path {path:?}: wildcard cannot be the last segment")]
    TrailingWildcard { path: String },
}

/// One step of a selector path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A map key.
    Literal(String),
    /// Every element of the sequence at this position.
    EachElement,
}

/// FieldPath is a parsed selector path.
///
/// The textual form separates segments with `/`; a segment written `name[]`
/// expands to `Literal(name)` followed by `EachElement`. A literal `/` inside a
/// key is written `\/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parses the textual form of a selector path.
    pub fn parse(path: &str) -> Result<FieldPath, FieldPathError> {
        if path.is_empty() {
            return Err(FieldPathError::Empty);
        }

        let mut segments = Vec::new();
        for (position, raw) in split_unescaped(path).into_iter().enumerate() {
            if raw.is_empty() {
                return Err(FieldPathError::EmptySegment {
                    path: path.to_string(),
                    position,
                });
            }
            if raw == "[]" {
                segments.push(PathSegment::EachElement);
                continue;
            }
            let (name, wildcard) = match raw.strip_suffix("[]") {
                Some(name) => (name, true),
                None => (raw.as_str(), false),
            };
            if name.contains('[') || name.contains(']') {
                return Err(FieldPathError::UnsupportedSegment {
                    path: path.to_string(),
                    segment: raw.clone(),
                });
            }
            segments.push(PathSegment::Literal(name.to_string()));
            if wildcard {
                segments.push(PathSegment::EachElement);
            }
        }

        if segments.last() == Some(&PathSegment::EachElement) {
            return Err(FieldPathError::TrailingWildcard {
                path: path.to_string(),
            });
        }

        Ok(FieldPath { segments })
    }

    /// Creates a path directly from segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        FieldPath { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn split_unescaped(path: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'/') => {
                current.push('/');
                chars.next();
            }
            '/' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = FieldPathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        FieldPath::parse(&s)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Literal(name) => {
                    if !first {
                        write!(f, "/")?;
                    }
                    write!(f, "{}", name.replace('/', "\\/"))?;
                }
                PathSegment::EachElement => write!(f, "[]")?,
            }
            first = false;
        }
        Ok(())
    }
}
