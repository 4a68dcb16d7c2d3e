//! Code emission for weft.
//!
//! This crate turns a tokenized [`Widget`] tree into framework source code:
//! - React (inline styles or styled components, TSX or JSX)
//! - Flutter (Dart)
//! - Vanilla HTML/CSS
//!
//! [`design_to_code`] runs the whole pipeline: tokenize, emit, render the
//! scaffold and finalize assets. [`emit`] and [`emit_many`] are the
//! synchronous parts for callers that already hold a widget tree.
//!
//! # Example
//!
//! ```ignore
//! use weft_codegen::{design_to_code, AssetConfig, BuildConfiguration, FrameworkConfig};
//!
//! let result = design_to_code(
//!     &node,
//!     &FrameworkConfig::React(Default::default()),
//!     &BuildConfiguration::default(),
//!     AssetConfig::default(),
//! )
//! .await?;
//! println!("{}", result.output.code.raw);
//! ```

pub mod assets;
pub mod config;
pub mod emitters;
pub mod error;
pub mod scaffold;
pub mod syntax;
pub mod templates;

pub use assets::{
    finalize_assets, reserved_keys, resolve_assets, substitute, AssetConfig, AssetError,
    AssetRepository, AssetTable,
};
pub use config::{
    BuildConfiguration, Exporting, FlutterConfig, FlutterLanguage, FrameworkConfig, ReactConfig,
    ReactLanguage, ReactStyling, StyledModule, VanillaConfig, VanillaStyling,
};
pub use emitters::{emitter_for, Emitter};
pub use error::{CodegenError, Result};
pub use syntax::{Language, Module};
pub use templates::TemplateEngine;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;
use weft_core::{DesignNode, Widget};
use weft_token::tokenize;

/// A block of generated source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Code {
    pub raw: String,
}

/// Generated code for one widget tree and one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeOutput {
    /// Id of the entry design node; callers match results to requests with it.
    pub id: String,
    /// Exported component name.
    pub name: String,
    pub framework: String,
    pub code: Code,
    /// Minimal runnable wrapper of `code`, for previews.
    pub scaffold: Code,
    pub dependencies: Vec<String>,
}

impl CodeOutput {
    /// Pretty JSON form, as handed to hosts that persist or display results.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Output of [`design_to_code`], together with the widget tree it came from.
#[derive(Debug, Clone)]
pub struct DesignToCodeResult {
    pub output: CodeOutput,
    pub widget: Widget,
}

/// Tokenize `node`, emit it for `framework` and finalize its assets.
pub async fn design_to_code(
    node: &DesignNode,
    framework: &FrameworkConfig,
    build: &BuildConfiguration,
    assets: AssetConfig<'_>,
) -> Result<DesignToCodeResult> {
    // fail before tokenizing when nothing can consume the result
    let emitter = emitter_for(framework)?;

    let widget = tokenize(node, &build.tokenizer_config())?;
    let mut output = emit_with(emitter.as_ref(), &widget)?;

    if !assets.skip_asset_replacement {
        let texts = [output.code.raw.as_str(), output.scaffold.raw.as_str()];
        let finalized = finalize_assets(&texts, assets.repository).await;
        if let [code, scaffold] = finalized.as_slice() {
            output.code.raw = code.clone();
            output.scaffold.raw = scaffold.clone();
        }
    }

    Ok(DesignToCodeResult { output, widget })
}

/// Emit code for an already tokenized widget tree.
///
/// Image sources stay reserved references; see [`assets`].
pub fn emit(widget: &Widget, framework: &FrameworkConfig) -> Result<CodeOutput> {
    let emitter = emitter_for(framework)?;
    emit_with(emitter.as_ref(), widget)
}

/// Emit one widget tree for several frameworks in parallel.
///
/// Each emission owns its namer and style repository. Results keep the
/// order of `frameworks`.
pub fn emit_many(widget: &Widget, frameworks: &[FrameworkConfig]) -> Vec<Result<CodeOutput>> {
    frameworks
        .par_iter()
        .map(|framework| emit(widget, framework))
        .collect()
}

fn emit_with(emitter: &dyn Emitter, widget: &Widget) -> Result<CodeOutput> {
    let module = emitter.emit(widget)?;
    let scaffold = scaffold::scaffold(&module)?;

    let id = widget.unwrapped().key.id.clone();
    debug!(
        id = %id,
        framework = emitter.framework_name(),
        "Code emitted"
    );

    Ok(CodeOutput {
        id,
        name: module.name.clone(),
        framework: emitter.framework_name().to_string(),
        code: Code {
            raw: module.to_source(),
        },
        scaffold: Code { raw: scaffold },
        dependencies: module.dependencies,
    })
}
