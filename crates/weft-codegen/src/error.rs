//! Error types for code emission.

use thiserror::Error;
use weft_core::TokenizeError;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while turning a design into code.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The design could not be lowered to widgets.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// Framework with no emitter (or whose emitter is compiled out).
    #[error("Framework '{0}' is not supported")]
    UnsupportedFramework(String),

    /// Scaffold template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Template not found.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
