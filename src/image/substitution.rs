//! The requested image change.

use super::reference::{ImageRef, ImageRefError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with an [`ImageSubstitution`] that make it unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    #[error("must specify `name`")]
    MissingName,

    #[error("must specify one of `newName`, `newTag`, or `digest`")]
    MissingReplacement,

    #[error("invalid `name`: {0}")]
    InvalidName(#[from] ImageRefError),
}

/// ImageSubstitution describes which images to change and how.
///
/// `name` selects images; it may carry a tag or digest to select only that
/// exact version. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageSubstitution {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_tag: Option<String>,
    /// Replaces the tag; `new_tag` is ignored when this is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

impl ImageSubstitution {
    pub fn new(name: impl Into<String>) -> Self {
        ImageSubstitution {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_new_name(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }

    pub fn with_new_tag(mut self, new_tag: impl Into<String>) -> Self {
        self.new_tag = Some(new_tag.into());
        self
    }

    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    pub fn new_name(&self) -> Option<&str> {
        non_empty(&self.new_name)
    }

    pub fn new_tag(&self) -> Option<&str> {
        non_empty(&self.new_tag)
    }

    pub fn digest(&self) -> Option<&str> {
        non_empty(&self.digest)
    }

    /// Checks the substitution and returns the parsed `name` pattern.
    pub fn validate(&self) -> Result<ImageRef, SubstitutionError> {
        if self.name.is_empty() {
            return Err(SubstitutionError::MissingName);
        }
        if self.new_name().is_none() && self.new_tag().is_none() && self.digest().is_none() {
            return Err(SubstitutionError::MissingReplacement);
        }
        Ok(ImageRef::parse(&self.name)?)
    }
}
