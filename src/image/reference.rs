//! Parsing and rendering of `name[:tag][@digest]` image references.

use super::substitution::ImageSubstitution;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors for strings that are not image references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageRefError {
    #[error("image reference is empty")]
    Empty,

    #[error("image reference {0:?} contains whitespace")]
    Whitespace(String),

    #[error("image reference {0:?} has no name")]
    EmptyName(String),

    #[error("image reference {0:?} has an empty tag")]
    EmptyTag(String),

    #[error("image reference {0:?} has an empty digest")]
    EmptyDigest(String),
}

/// ImageRef is a parsed image reference.
///
/// A registry port is part of the name: in `host:5000/app:1.0` the name is
/// `host:5000/app` and the tag is `1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub name: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        ImageRef {
            name: name.into(),
            tag: None,
            digest: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// Parses a reference. The digest follows the last `@`; the tag follows
    /// the last `:` that comes after the last `/`.
    pub fn parse(s: &str) -> Result<ImageRef, ImageRefError> {
        if s.is_empty() {
            return Err(ImageRefError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(ImageRefError::Whitespace(s.to_string()));
        }

        let (rest, digest) = match s.rsplit_once('@') {
            Some((_, "")) => return Err(ImageRefError::EmptyDigest(s.to_string())),
            Some((rest, digest)) => (rest, Some(digest)),
            None => (s, None),
        };

        let slash = rest.rfind('/');
        let (name, tag) = match rest.rfind(':') {
            Some(colon) if slash.map_or(true, |slash| colon > slash) => {
                let tag = &rest[colon + 1..];
                if tag.is_empty() {
                    return Err(ImageRefError::EmptyTag(s.to_string()));
                }
                (&rest[..colon], Some(tag))
            }
            _ => (rest, None),
        };

        if name.is_empty() {
            return Err(ImageRefError::EmptyName(s.to_string()));
        }

        Ok(ImageRef {
            name: name.to_string(),
            tag: tag.map(str::to_string),
            digest: digest.map(str::to_string),
        })
    }

    /// Returns true if this reference is selected by `pattern`.
    ///
    /// Names must be equal. A tag or digest on the pattern must be present
    /// and equal here; a bare pattern accepts any tag or digest.
    pub fn matches(&self, pattern: &ImageRef) -> bool {
        fn accepts(wanted: &Option<String>, actual: &Option<String>) -> bool {
            wanted.is_none() || wanted == actual
        }
        self.name == pattern.name
            && accepts(&pattern.tag, &self.tag)
            && accepts(&pattern.digest, &self.digest)
    }

    /// Renders the reference after applying `sub`.
    ///
    /// A digest wins over a tag; a new tag drops any digest; a lone new name
    /// keeps the original tag and digest.
    pub fn render(&self, sub: &ImageSubstitution) -> String {
        let name = sub.new_name().unwrap_or(&self.name);
        if let Some(digest) = sub.digest() {
            return format!("{}@{}", name, digest);
        }
        if let Some(tag) = sub.new_tag() {
            return format!("{}:{}", name, tag);
        }
        ImageRef {
            name: name.to_string(),
            tag: self.tag.clone(),
            digest: self.digest.clone(),
        }
        .to_string()
    }
}

impl FromStr for ImageRef {
    type Err = ImageRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageRef::parse(s)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}
