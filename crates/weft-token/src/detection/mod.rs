//! Heuristic classifiers that reinterpret raw nodes as semantic widgets.
//!
//! Detectors are total and side-effect free. The tokenizer only looks at the
//! returned manifest, never at how a detector reached its verdict, so any
//! strategy can be swapped in through [`Detectors`].

mod icon;
mod image;

pub use icon::{IconDetector, IconManifest};
pub use image::{ImageDetector, ImageManifest};

use std::fmt;
use std::sync::Arc;
use weft_core::DesignNode;

/// A node classifier.
pub trait Detect: Send + Sync {
    /// Data describing a positive match.
    type Manifest;

    /// `Some` if the node belongs to this class.
    fn detect(&self, node: &DesignNode) -> Option<Self::Manifest>;
}

/// The detector set used by the tokenizer.
#[derive(Clone)]
pub struct Detectors {
    pub image: Arc<dyn Detect<Manifest = ImageManifest>>,
    pub icon: Arc<dyn Detect<Manifest = IconManifest>>,
}

impl Default for Detectors {
    fn default() -> Self {
        Self {
            image: Arc::new(ImageDetector::new()),
            icon: Arc::new(IconDetector::new()),
        }
    }
}

impl fmt::Debug for Detectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detectors").finish_non_exhaustive()
    }
}
