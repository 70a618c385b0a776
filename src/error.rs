//! Crate-level error type for the ResourceList harness.
//!
//! Problems inside a run (bad config, malformed resources) are reported as
//! [`Results`](crate::krm::Results) entries rather than as errors; this type
//! covers what prevents a run from happening at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid ResourceList YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid ResourceList JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
