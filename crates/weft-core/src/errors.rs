//! Error types shared across the pipeline.

use thiserror::Error;

/// Errors raised while lowering design nodes into widgets.
///
/// Only invalid input is fatal. Unrecognized node tags, failing flags and
/// unsupported styles are recovered where they happen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("Node {id} ({name}) has no type tag")]
    MissingNodeType { id: String, name: String },

    #[error("Root node {id} produced no widget")]
    EmptyRoot { id: String },
}
