//! Image detection.

use super::Detect;
use weft_core::{
    primary_paint, BoxFit, DesignNode, ImageRef, NodeKind, PaintKind, ScaleMode,
};

/// What an image widget should show.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageManifest {
    pub src: ImageRef,
    pub fit: BoxFit,
    /// The node is a vector illustration that gets rasterized as a whole.
    pub illustration: bool,
}

/// Classifies image boxes and vector-dense illustrations.
#[derive(Debug, Clone)]
pub struct ImageDetector {
    /// Minimum number of vector leaves for a subtree to count as illustration.
    pub illustration_min_vectors: usize,
    /// Minimum longest side of an illustration.
    pub illustration_min_size: f64,
}

impl ImageDetector {
    pub fn new() -> Self {
        Self {
            illustration_min_vectors: 8,
            illustration_min_size: 96.0,
        }
    }

    /// A rectangle (or childless frame) painted with nothing but an image.
    fn detect_image_box(&self, node: &DesignNode) -> Option<ImageManifest> {
        let boxlike = match node.kind.as_ref()? {
            NodeKind::Rectangle => true,
            NodeKind::Frame => node.children.is_empty(),
            _ => false,
        };
        if !boxlike || primary_stroke_visible(node) {
            return None;
        }

        let visible: Vec<_> = node.fills.iter().filter(|p| p.visible).collect();
        if visible.len() != 1 {
            return None;
        }

        match &primary_paint(&node.fills)?.kind {
            PaintKind::Image {
                image_ref,
                scale_mode,
            } => Some(ImageManifest {
                src: if image_ref.is_empty() {
                    ImageRef::placeholder()
                } else {
                    ImageRef::reserved(image_ref.clone())
                },
                fit: fit_for(*scale_mode),
                illustration: false,
            }),
            _ => None,
        }
    }

    /// A group or frame built only from many vector shapes.
    fn detect_illustration(&self, node: &DesignNode) -> Option<ImageManifest> {
        if !matches!(node.kind.as_ref()?, NodeKind::Frame | NodeKind::Group) {
            return None;
        }
        if node.width.max(node.height) < self.illustration_min_size {
            return None;
        }

        let mut vectors = 0;
        for descendant in node.descendants().skip(1) {
            match descendant.kind.as_ref() {
                Some(NodeKind::Vector(_) | NodeKind::BooleanOperation(_) | NodeKind::Ellipse(_)) => {
                    vectors += 1
                }
                Some(NodeKind::Group | NodeKind::Frame | NodeKind::Rectangle) => {}
                // text and anything unusual disqualify the subtree
                _ => return None,
            }
            if descendant.fills.iter().any(|p| p.is_image()) {
                return None;
            }
        }

        (vectors >= self.illustration_min_vectors).then(|| ImageManifest {
            src: ImageRef::reserved(node.id.clone()),
            fit: BoxFit::Cover,
            illustration: true,
        })
    }
}

impl Default for ImageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detect for ImageDetector {
    type Manifest = ImageManifest;

    fn detect(&self, node: &DesignNode) -> Option<ImageManifest> {
        self.detect_image_box(node)
            .or_else(|| self.detect_illustration(node))
    }
}

fn primary_stroke_visible(node: &DesignNode) -> bool {
    node.stroke_weight > 0.0 && primary_paint(&node.strokes).is_some()
}

fn fit_for(mode: ScaleMode) -> BoxFit {
    match mode {
        ScaleMode::Fit => BoxFit::Contain,
        ScaleMode::Fill | ScaleMode::Crop | ScaleMode::Tile => BoxFit::Cover,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{Color, Paint, VectorPath};

    #[test]
    fn test_image_filled_rectangle() {
        let node = DesignNode::rectangle("1:1", "photo")
            .with_size(120.0, 80.0)
            .with_fill(Paint::image("abc123"));

        let manifest = ImageDetector::new().detect(&node).unwrap();
        assert_eq!(manifest.src, ImageRef::reserved("abc123"));
        assert!(!manifest.illustration);
    }

    #[test]
    fn test_empty_image_ref_uses_placeholder() {
        let node = DesignNode::rectangle("1:1", "photo").with_fill(Paint::image(""));
        let manifest = ImageDetector::new().detect(&node).unwrap();
        assert_eq!(manifest.src, ImageRef::placeholder());
    }

    #[test]
    fn test_solid_rectangle_is_not_image() {
        let node = DesignNode::rectangle("1:1", "box").with_fill(Paint::solid(Color::WHITE));
        assert!(ImageDetector::new().detect(&node).is_none());
    }

    #[test]
    fn test_vector_dense_group_is_illustration() {
        let vectors = (0..8).map(|i| {
            DesignNode::vector(format!("v{i}"), "path", vec![VectorPath::new("M0 0L1 1")])
        });
        let node = DesignNode::group("g", "hero art")
            .with_size(300.0, 200.0)
            .with_children(vectors);

        let manifest = ImageDetector::new().detect(&node).unwrap();
        assert!(manifest.illustration);
        assert_eq!(manifest.src, ImageRef::reserved("g"));
    }

    #[test]
    fn test_text_disqualifies_illustration() {
        let vectors = (0..8).map(|i| {
            DesignNode::vector(format!("v{i}"), "path", vec![VectorPath::new("M0 0L1 1")])
        });
        let node = DesignNode::group("g", "card")
            .with_size(300.0, 200.0)
            .with_children(vectors)
            .with_child(DesignNode::text("t", "label", "Hello"));

        assert!(ImageDetector::new().detect(&node).is_none());
    }
}
