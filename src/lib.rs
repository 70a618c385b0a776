//! # set-image
//!
//! A KRM function that rewrites container image references in Kubernetes
//! resources.
//!
//! Image fields are located through field specs: a group/version/kind gate
//! plus a path such as `spec/template/spec/containers[]/image`. A built-in
//! set covers Pods and the apps/v1 workloads; callers may add more. Every
//! selected leaf holding a matching `name[:tag][@digest]` reference is
//! rewritten according to an [`ImageSubstitution`].
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of YAML/JSON documents
//! - [`fieldpath`] - Selector paths and the walk that resolves them to leaves
//! - [`resid`] - Group/version/kind identifiers
//! - [`catalog`] - Field specs, their ordered sets and the defaults
//! - [`image`] - Image reference parsing, matching and rendering
//! - [`transform`] - Per-leaf rewriting and mutation counting
//! - [`krm`] - ResourceList, resources and results
//! - [`config`] - Function config decoding
//! - [`setimage`] - The batch run

pub mod catalog;
pub mod config;
pub mod error;
pub mod fieldpath;
pub mod image;
pub mod krm;
pub mod resid;
pub mod setimage;
pub mod transform;
pub mod value;

pub use catalog::{default_image_fields, FieldSpec, FieldSpecSet};
pub use config::{ConfigError, SetImageConfig};
pub use error::{Error, Result};
pub use fieldpath::{FieldPath, Path, PathSegment};
pub use image::{ImageRef, ImageSubstitution};
pub use krm::{KubeObject, ResourceList, Results};
pub use resid::Gvk;
pub use setimage::{process, RunReport, SetImage};
pub use transform::{ImageTransform, MutationTracker, Outcome};
pub use value::Value;
