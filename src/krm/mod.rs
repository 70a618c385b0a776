//! KRM module - the Kubernetes Resource Model function interface.
//!
//! Input and output are a [`ResourceList`]; each item is a [`KubeObject`] and
//! diagnostics travel back as [`Results`].

mod object;
mod resource_list;
mod result;

pub use object::*;
pub use resource_list::*;
pub use result::*;
