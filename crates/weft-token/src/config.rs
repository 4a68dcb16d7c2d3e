//! Tokenizer configuration.

use crate::detection::Detectors;
use std::fmt;
use std::sync::Arc;
use weft_core::{DesignNode, Widget};

/// Substitutes the final widget of a node. Called with `(widget, node, depth)`
/// after the decorator pipeline; returns the widget to use.
pub type WrappingProvider = Arc<dyn Fn(Widget, &DesignNode, usize) -> Widget + Send + Sync>;

/// Returns `true` for nodes whose flags must not be interpreted.
pub type FlagFilter = Arc<dyn Fn(&DesignNode) -> bool + Send + Sync>;

/// Options threaded through every recursive tokenizer call.
#[derive(Clone)]
pub struct TokenizerConfig {
    /// Skip icon detection. Image detection always runs.
    pub disable_detection: bool,
    /// Skip the flags gate entirely.
    pub disable_flags_support: bool,
    /// Do not record main-component names on widget keys.
    pub disable_components: bool,
    /// Excludes individual nodes from the flags gate.
    pub should_ignore_flag: Option<FlagFilter>,
    /// Mask shapes only contribute clip geometry and are not painted.
    pub sanitizer_ignore_masking_node: bool,
    pub custom_wrapping_provider: Option<WrappingProvider>,
    pub detectors: Detectors,
}

impl TokenizerConfig {
    pub fn with_wrapping_provider(mut self, provider: WrappingProvider) -> Self {
        self.custom_wrapping_provider = Some(provider);
        self
    }

    pub fn with_flag_filter(mut self, filter: FlagFilter) -> Self {
        self.should_ignore_flag = Some(filter);
        self
    }

    pub(crate) fn flags_enabled_for(&self, node: &DesignNode) -> bool {
        !self.disable_flags_support
            && !self
                .should_ignore_flag
                .as_ref()
                .is_some_and(|ignore| ignore(node))
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            disable_detection: false,
            disable_flags_support: false,
            disable_components: false,
            should_ignore_flag: None,
            sanitizer_ignore_masking_node: true,
            custom_wrapping_provider: None,
            detectors: Detectors::default(),
        }
    }
}

impl fmt::Debug for TokenizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerConfig")
            .field("disable_detection", &self.disable_detection)
            .field("disable_flags_support", &self.disable_flags_support)
            .field("disable_components", &self.disable_components)
            .field("should_ignore_flag", &self.should_ignore_flag.is_some())
            .field("sanitizer_ignore_masking_node", &self.sanitizer_ignore_masking_node)
            .field("custom_wrapping_provider", &self.custom_wrapping_provider.is_some())
            .finish_non_exhaustive()
    }
}
