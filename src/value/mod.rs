//! Value module - In-memory representation of YAML/JSON documents.
//!
//! Maps preserve insertion order and numbers keep their source spelling, so
//! documents survive a decode/encode cycle without untouched parts changing.

mod number;
mod value;
mod yaml;

pub use number::*;
pub use value::*;
pub use yaml::*;
