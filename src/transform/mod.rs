//! Transform module - per-leaf image rewriting and its bookkeeping.
//!
//! [`ImageTransform::apply`] returns an [`Outcome`] instead of bumping a
//! counter; callers fold outcomes into a [`MutationTracker`].

mod image;
mod tracker;

pub use image::*;
pub use tracker::*;
