//! Rewrites image references found at selected leaves.

use crate::fieldpath::LeafMut;
use crate::image::{ImageRef, ImageSubstitution, SubstitutionError};
use crate::value::Value;
use log::debug;

/// What happened to one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The leaf is not a matching image reference.
    NotMatched,
    /// The rule fired but rendered the text the leaf already held.
    Unchanged,
    /// The leaf was rewritten.
    Mutated { from: String, to: String },
}

impl Outcome {
    /// Whether the rule fired on this leaf, changed text or not.
    pub fn fired(&self) -> bool {
        !matches!(self, Outcome::NotMatched)
    }

    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Mutated { .. })
    }
}

/// ImageTransform applies one validated substitution to leaves.
#[derive(Debug, Clone)]
pub struct ImageTransform {
    substitution: ImageSubstitution,
    pattern: ImageRef,
}

impl ImageTransform {
    /// Validates `substitution` and prepares it for matching.
    pub fn new(substitution: ImageSubstitution) -> Result<Self, SubstitutionError> {
        let pattern = substitution.validate()?;
        Ok(ImageTransform {
            substitution,
            pattern,
        })
    }

    /// Computes the replacement for `current` without touching any document.
    /// Returns `None` when `current` is not selected.
    pub fn rewrite(&self, current: &str) -> Option<String> {
        let image = ImageRef::parse(current).ok()?;
        if !image.matches(&self.pattern) {
            return None;
        }
        Some(image.render(&self.substitution))
    }

    /// Applies the substitution to one leaf. Non-string leaves and malformed
    /// references are simply not matched.
    pub fn apply(&self, leaf: &mut LeafMut<'_>) -> Outcome {
        let Some(current) = leaf.as_str() else {
            return Outcome::NotMatched;
        };
        let Some(rendered) = self.rewrite(current) else {
            return Outcome::NotMatched;
        };
        if rendered == current {
            debug!("{}: {} already up to date", leaf.path(), current);
            return Outcome::Unchanged;
        }

        let from = current.to_string();
        debug!("{}: {} -> {}", leaf.path(), from, rendered);
        leaf.replace(Value::String(rendered.clone()));
        Outcome::Mutated { from, to: rendered }
    }
}
