//! Core types for the weft design-to-code pipeline.
//!
//! This crate provides the foundational types shared by every other weft crate:
//! - Value types (colors, paints, gradients, effects)
//! - The design node tree consumed from the authoring tool
//! - The framework-independent widget IR produced by tokenization
//! - Error types

pub mod errors;
pub mod node;
pub mod types;
pub mod widget;

pub use errors::*;
pub use node::*;
pub use types::*;
pub use widget::*;
