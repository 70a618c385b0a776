//! Catalog module - the field specs that say where image references live.

mod defaults;
mod fieldspec;
mod set;

pub use defaults::*;
pub use fieldspec::*;
pub use set::*;
