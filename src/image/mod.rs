//! Image module - image references and the substitution applied to them.

mod reference;
mod substitution;

pub use reference::*;
pub use substitution::*;
