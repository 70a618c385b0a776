//! Resource identity.

mod gvk;

pub use gvk::*;
