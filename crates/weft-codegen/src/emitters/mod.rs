//! Backend emitters, one per target framework.

#[cfg(feature = "flutter")]
mod flutter;
#[cfg(feature = "react")]
mod react;
#[cfg(feature = "vanilla")]
mod vanilla;
#[cfg(any(feature = "react", feature = "vanilla"))]
mod web;

#[cfg(feature = "flutter")]
pub use flutter::FlutterEmitter;
#[cfg(feature = "react")]
pub use react::ReactEmitter;
#[cfg(feature = "vanilla")]
pub use vanilla::VanillaEmitter;

use crate::config::FrameworkConfig;
use crate::error::{CodegenError, Result};
use crate::syntax::Module;
use weft_core::Widget;

/// Common trait for emitters.
///
/// An emitter is a pure function of the widget tree: every call builds its
/// own namer and style repository, so one emitter can serve concurrent
/// emissions.
pub trait Emitter: Send + Sync {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Lower a widget tree into a source module.
    fn emit(&self, entry: &Widget) -> Result<Module>;
}

/// The emitter for `framework`, or `UnsupportedFramework`.
pub fn emitter_for(framework: &FrameworkConfig) -> Result<Box<dyn Emitter>> {
    match framework {
        #[cfg(feature = "react")]
        FrameworkConfig::React(config) => Ok(Box::new(ReactEmitter::new(config.clone()))),
        #[cfg(feature = "flutter")]
        FrameworkConfig::Flutter(config) => Ok(Box::new(FlutterEmitter::new(config.clone()))),
        #[cfg(feature = "vanilla")]
        FrameworkConfig::Vanilla(config) => Ok(Box::new(VanillaEmitter::new(config.clone()))),
        #[allow(unreachable_patterns)]
        other => Err(CodegenError::UnsupportedFramework(other.name().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_frameworks() {
        for framework in [FrameworkConfig::Vue, FrameworkConfig::ReactNative] {
            match emitter_for(&framework) {
                Err(CodegenError::UnsupportedFramework(name)) => {
                    assert_eq!(name, framework.name())
                }
                _ => panic!("{} must be unsupported", framework.name()),
            }
        }
    }

    #[test]
    fn test_emitter_names() {
        let react = emitter_for(&FrameworkConfig::React(Default::default())).unwrap();
        assert_eq!(react.framework_name(), "react");
        let flutter = emitter_for(&FrameworkConfig::Flutter(Default::default())).unwrap();
        assert_eq!(flutter.framework_name(), "flutter");
    }
}
