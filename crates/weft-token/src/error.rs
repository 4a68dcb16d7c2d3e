//! Error types for flag classification.

use thiserror::Error;

/// A flag on a node name could not be interpreted.
///
/// These never abort tokenization: the node is lowered as if it carried no
/// flags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    /// Flag value has the wrong shape.
    #[error("Invalid value '{value}' for flag '{flag}'")]
    InvalidValue { flag: String, value: String },

    /// Flag requires a value but none was given.
    #[error("Flag '{flag}' requires a value")]
    MissingValue { flag: String },

    /// Flag cannot apply to this kind of node.
    #[error("Flag '{flag}' does not apply to {tag} nodes")]
    NotApplicable { flag: String, tag: String },
}
