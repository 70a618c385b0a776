//! Ordered, duplicate-free collections of field specs.

use super::fieldspec::{FieldSpec, FieldSpecId};
use crate::resid::Gvk;
use indexmap::IndexMap;

/// FieldSpecSet keeps field specs in insertion order, keyed by identity.
///
/// Inserting a spec whose identity is already present is a no-op: the
/// earlier copy, including its `create` flag, is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpecSet {
    specs: IndexMap<FieldSpecId, FieldSpec>,
}

impl FieldSpecSet {
    pub fn new() -> Self {
        FieldSpecSet {
            specs: IndexMap::new(),
        }
    }

    /// Adds a spec. Returns false if an identical spec was already present.
    pub fn insert(&mut self, spec: FieldSpec) -> bool {
        let id = spec.id();
        if self.specs.contains_key(&id) {
            return false;
        }
        self.specs.insert(id, spec);
        true
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.values()
    }

    /// Specs whose GVK gate admits `gvk`, in set order.
    pub fn applicable<'a>(&'a self, gvk: &'a Gvk) -> impl Iterator<Item = &'a FieldSpec> + 'a {
        self.iter().filter(move |spec| spec.applies_to(gvk))
    }

    /// Returns the union of both sets: every entry of `self` in order, followed
    /// by the entries of `other` whose identity is not already in `self`.
    pub fn merge(&self, other: &FieldSpecSet) -> FieldSpecSet {
        let mut merged = self.clone();
        merged.extend(other.iter().cloned());
        merged
    }
}

impl Extend<FieldSpec> for FieldSpecSet {
    fn extend<T: IntoIterator<Item = FieldSpec>>(&mut self, iter: T) {
        for spec in iter {
            self.insert(spec);
        }
    }
}

impl FromIterator<FieldSpec> for FieldSpecSet {
    fn from_iter<T: IntoIterator<Item = FieldSpec>>(iter: T) -> Self {
        let mut set = FieldSpecSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a FieldSpecSet {
    type Item = &'a FieldSpec;
    type IntoIter = indexmap::map::Values<'a, FieldSpecId, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.values()
    }
}
