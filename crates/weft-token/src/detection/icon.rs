//! Icon detection.

use super::Detect;
use convert_case::{Case, Casing};
use regex::Regex;
use std::sync::OnceLock;
use weft_core::{primary_paint, Color, DesignNode, ImageRef, NodeKind};

/// What an icon widget should show.
#[derive(Debug, Clone, PartialEq)]
pub struct IconManifest {
    /// Stock glyph name derived from the node name, e.g. `arrow_back`.
    pub glyph: Option<String>,
    pub size: f64,
    pub color: Option<Color>,
    /// Rasterized rendition of the node.
    pub src: ImageRef,
}

/// Classifies small vector-only nodes as icons.
pub struct IconDetector {
    /// Icons are never larger than this on either side.
    pub max_size: f64,
    /// Name fragments that mark a node as an icon.
    keywords: Vec<&'static str>,
}

impl IconDetector {
    pub fn new() -> Self {
        Self {
            max_size: 64.0,
            keywords: vec!["icon", "ic_", "ico-", "glyph", "symbol"],
        }
    }

    fn named_like_icon(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        self.keywords.iter().any(|k| name_lower.contains(k))
    }

    /// Roughly square, and built from nothing but vector shapes.
    fn shaped_like_icon(&self, node: &DesignNode) -> bool {
        let ratio = node.width / node.height;
        if !(0.75..=1.34).contains(&ratio) {
            return false;
        }

        let mut vectors = 0;
        for descendant in node.descendants() {
            if descendant.fills.iter().any(|p| p.is_image()) {
                return false;
            }
            match descendant.kind.as_ref() {
                Some(kind) if kind.is_vector_like() => vectors += 1,
                Some(NodeKind::Frame | NodeKind::Group | NodeKind::Ellipse(_)) => {}
                _ => return false,
            }
        }
        vectors > 0
    }
}

impl Default for IconDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detect for IconDetector {
    type Manifest = IconManifest;

    fn detect(&self, node: &DesignNode) -> Option<IconManifest> {
        if matches!(node.kind, Some(NodeKind::Text(_)) | None) {
            return None;
        }
        if node.width <= 0.0 || node.height <= 0.0 {
            return None;
        }
        if node.width > self.max_size || node.height > self.max_size {
            return None;
        }
        if !self.named_like_icon(&node.name) && !self.shaped_like_icon(node) {
            return None;
        }

        Some(IconManifest {
            glyph: glyph_name(&node.name),
            size: node.width.max(node.height),
            color: first_solid_fill(node),
            src: ImageRef::reserved(node.id.clone()),
        })
    }
}

/// Derive a stock glyph name from names like `icon/arrow-back` or `ic_menu`.
///
/// Names without an icon prefix yield `None`.
pub(crate) fn glyph_name(name: &str) -> Option<String> {
    static PREFIX: OnceLock<Option<Regex>> = OnceLock::new();
    let prefix = PREFIX
        .get_or_init(|| Regex::new(r"(?i)^\s*(?:icons?|ic)\s*[/_:\-\s]\s*(.+)$").ok())
        .as_ref()?;

    let rest = prefix.captures(name)?.get(1)?.as_str().trim();
    // nested variants such as `icon/arrow/back` keep the last two segments
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    let joined = match segments.as_slice() {
        [] => return None,
        [only] => only.to_string(),
        [.., a, b] => format!("{a} {b}"),
    };
    let glyph = joined.to_case(Case::Snake);
    (!glyph.is_empty()).then_some(glyph)
}

fn first_solid_fill(node: &DesignNode) -> Option<Color> {
    node.descendants()
        .find_map(|n| primary_paint(&n.fills).and_then(|p| p.solid_color()))
}
