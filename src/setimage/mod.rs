//! Set-image module - runs the image substitution over a batch of resources.

mod runner;


pub use runner::*;
