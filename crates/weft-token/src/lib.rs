//! Tokenization: design nodes to widget IR.
//!
//! The [`tokenize`] entry point walks a [`DesignNode`](weft_core::DesignNode)
//! tree and produces a [`Widget`](weft_core::Widget) tree. Per node it tries,
//! in order: the flags gate, image detection, icon detection, the masking
//! merge, and finally plain type-based lowering. Every produced widget then
//! passes through the decorator pipeline ([`post_wrap`]).
//!
//! # Example
//!
//! ```ignore
//! use weft_token::{tokenize, TokenizerConfig};
//!
//! let widget = tokenize(&node, &TokenizerConfig::default())?;
//! println!("{}", widget.kind_name());
//! ```

pub mod config;
pub mod decorate;
pub mod detection;
pub mod error;
pub mod flags;
mod lower;
mod masking;
mod tokenizer;

pub use config::{FlagFilter, TokenizerConfig, WrappingProvider};
pub use decorate::{post_wrap, rotation_angle};
pub use detection::{Detect, Detectors, IconDetector, IconManifest, ImageDetector, ImageManifest};
pub use error::FlagError;
pub use flags::{Flag, FlagManifest};
pub use lower::{padded_text_width, UNHANDLED_NODE_MARKER};
pub use tokenizer::tokenize;
