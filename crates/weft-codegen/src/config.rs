//! Build and framework configuration.
//!
//! Both records are plain data that callers usually deserialize from JSON:
//!
//! ```json
//! { "framework": "react", "language": "tsx",
//!   "styling": { "type": "styled-components", "module": "@emotion/styled" } }
//! ```

use crate::syntax::{ExportStyle, Language};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use weft_core::{DesignNode, Widget, WidgetKind};
use weft_token::TokenizerConfig;

/// Switches applied to one design-to-code run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfiguration {
    /// Do not name widgets after their main components.
    pub disable_components: bool,
    /// Skip icon detection.
    pub disable_detection: bool,
    /// Do not interpret `--flag` tokens in layer names.
    pub disable_flags_support: bool,
    /// Pin the root widget to its design size and clip overflow.
    pub force_root_widget_fixed_size_no_scroll: bool,
}

impl BuildConfiguration {
    /// Tokenizer options for this build.
    pub fn tokenizer_config(&self) -> TokenizerConfig {
        let config = TokenizerConfig {
            disable_components: self.disable_components,
            disable_detection: self.disable_detection,
            disable_flags_support: self.disable_flags_support,
            ..TokenizerConfig::default()
        };
        if !self.force_root_widget_fixed_size_no_scroll {
            return config;
        }
        config.with_wrapping_provider(Arc::new(|widget: Widget, node: &DesignNode, depth: usize| {
            if depth > 0 {
                return widget;
            }
            let key = widget.key.derived("fixed");
            Widget::wrap(
                key.clone(),
                WidgetKind::SizedBox {
                    width: node.width,
                    height: node.height,
                    child: Box::new(Widget::wrap(
                        key.derived("overflow"),
                        WidgetKind::OverflowBox {
                            child: Box::new(widget),
                        },
                    )),
                },
            )
        }))
    }
}

/// Target framework with its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "framework", rename_all = "kebab-case")]
pub enum FrameworkConfig {
    React(ReactConfig),
    Flutter(FlutterConfig),
    Vanilla(VanillaConfig),
    /// Accepted in configuration, rejected at emission.
    ReactNative,
    /// Accepted in configuration, rejected at emission.
    Vue,
}

impl FrameworkConfig {
    pub fn name(&self) -> &'static str {
        match self {
            FrameworkConfig::React(_) => "react",
            FrameworkConfig::Flutter(_) => "flutter",
            FrameworkConfig::Vanilla(_) => "vanilla",
            FrameworkConfig::ReactNative => "react-native",
            FrameworkConfig::Vue => "vue",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactConfig {
    pub language: ReactLanguage,
    pub styling: ReactStyling,
    pub exporting: Exporting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactLanguage {
    #[default]
    Tsx,
    Jsx,
}

impl From<ReactLanguage> for Language {
    fn from(language: ReactLanguage) -> Self {
        match language {
            ReactLanguage::Tsx => Language::Tsx,
            ReactLanguage::Jsx => Language::Jsx,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReactStyling {
    /// One `style={{...}}` object per element.
    InlineCss,
    /// One styled component per unique style.
    StyledComponents {
        #[serde(default)]
        module: StyledModule,
    },
}

impl Default for ReactStyling {
    fn default() -> Self {
        ReactStyling::StyledComponents {
            module: StyledModule::default(),
        }
    }
}

impl ReactStyling {
    /// Module the `styled` factory is imported from, for shared-style modes.
    pub fn styled_module(&self) -> Option<StyledModule> {
        match self {
            ReactStyling::InlineCss => None,
            ReactStyling::StyledComponents { module } => Some(*module),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyledModule {
    #[default]
    #[serde(rename = "@emotion/styled")]
    Emotion,
    #[serde(rename = "styled-components")]
    StyledComponents,
}

impl StyledModule {
    pub fn package(&self) -> &'static str {
        match self {
            StyledModule::Emotion => "@emotion/styled",
            StyledModule::StyledComponents => "styled-components",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exporting {
    /// `export default function Name()`
    #[default]
    Default,
    Named,
}

impl From<Exporting> for ExportStyle {
    fn from(exporting: Exporting) -> Self {
        match exporting {
            Exporting::Default => ExportStyle::Default,
            Exporting::Named => ExportStyle::Named,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlutterConfig {
    pub language: FlutterLanguage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlutterLanguage {
    #[default]
    Dart,
}

impl From<FlutterLanguage> for Language {
    fn from(language: FlutterLanguage) -> Self {
        match language {
            FlutterLanguage::Dart => Language::Dart,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VanillaConfig {
    pub styling: VanillaStyling,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VanillaStyling {
    /// Class rules in a `<style>` block.
    #[default]
    Css,
    InlineCss,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_framework_config_from_json() {
        let config: FrameworkConfig = serde_json::from_value(json!({
            "framework": "react",
            "language": "jsx",
            "styling": { "type": "styled-components", "module": "styled-components" },
            "exporting": "named"
        }))
        .unwrap();

        let FrameworkConfig::React(react) = config else {
            panic!("expected react config");
        };
        assert_eq!(react.language, ReactLanguage::Jsx);
        assert_eq!(react.styling.styled_module(), Some(StyledModule::StyledComponents));
        assert_eq!(react.exporting, Exporting::Named);
    }

    #[test]
    fn test_react_defaults_to_emotion() {
        let config: FrameworkConfig = serde_json::from_value(json!({
            "framework": "react",
            "styling": { "type": "styled-components" }
        }))
        .unwrap();
        let FrameworkConfig::React(react) = config else {
            panic!("expected react config");
        };
        assert_eq!(react.styling.styled_module(), Some(StyledModule::Emotion));
        assert_eq!(react.language, ReactLanguage::Tsx);
    }

    #[test]
    fn test_unsupported_frameworks_parse() {
        let config: FrameworkConfig = serde_json::from_value(json!({ "framework": "vue" })).unwrap();
        assert_eq!(config.name(), "vue");
        let config: FrameworkConfig =
            serde_json::from_value(json!({ "framework": "react-native" })).unwrap();
        assert_eq!(config, FrameworkConfig::ReactNative);
    }

    #[test]
    fn test_build_configuration_defaults() {
        let build: BuildConfiguration = serde_json::from_value(json!({})).unwrap();
        assert_eq!(build, BuildConfiguration::default());
        assert!(build.tokenizer_config().custom_wrapping_provider.is_none());
    }
}
