//! Field path module - selector paths and the walk that resolves them.
//!
//! A [`FieldPath`] is the declarative form (`spec/containers[]/image`); a
//! [`Path`] is the concrete address of one node (`spec.containers[0].image`).
//! [`walk_mut`] turns the former into handles addressed by the latter.

mod path;
mod selector;
mod walk;

pub use path::*;
pub use selector::*;
pub use walk::*;
