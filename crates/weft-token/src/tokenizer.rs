//! The recursive lowering pass.

use crate::config::TokenizerConfig;
use crate::decorate::post_wrap;
use crate::detection::IconManifest;
use crate::flags::{self, FlagManifest};
use crate::{lower, masking};
use tracing::{debug, warn};
use weft_core::{
    primary_paint, DesignNode, ImageRef, LayoutChild, NodeKind, TokenizeError, Widget, WidgetKey,
    WidgetKind,
};

/// Lower a design node tree into a widget tree.
///
/// Invisible and `--ignore`d nodes yield no widget. When that happens to the
/// root itself the result is [`TokenizeError::EmptyRoot`].
pub fn tokenize(node: &DesignNode, config: &TokenizerConfig) -> Result<Widget, TokenizeError> {
    debug!(node_id = %node.id, name = %node.name, "Tokenizing design node");

    Tokenizer { config }
        .node(node, 0)?
        .ok_or_else(|| TokenizeError::EmptyRoot {
            id: node.id.clone(),
        })
}

pub(crate) struct Tokenizer<'c> {
    pub(crate) config: &'c TokenizerConfig,
}

impl Tokenizer<'_> {
    /// Tokenize one node, including decorators and the wrapping provider.
    pub(crate) fn node(
        &self,
        node: &DesignNode,
        depth: usize,
    ) -> Result<Option<Widget>, TokenizeError> {
        if !node.visible {
            return Ok(None);
        }

        let Some(widget) = self.handle(node, depth)? else {
            return Ok(None);
        };

        Ok(Some(match &self.config.custom_wrapping_provider {
            Some(provider) => provider(widget, node, depth),
            None => widget,
        }))
    }

    pub(crate) fn key(&self, node: &DesignNode) -> WidgetKey {
        let mut key = WidgetKey::new(node.id.clone(), node.name.clone());
        if !self.config.disable_components {
            key.component = node.main_component.clone();
        }
        key
    }

    fn handle(&self, node: &DesignNode, depth: usize) -> Result<Option<Widget>, TokenizeError> {
        let Some(kind) = node.kind.as_ref() else {
            return Err(TokenizeError::MissingNodeType {
                id: node.id.clone(),
                name: node.name.clone(),
            });
        };
        let key = self.key(node);

        let mut modifiers = None;
        if self.config.flags_enabled_for(node) {
            match flags::gate(node) {
                Ok(None) => {}
                Ok(Some(FlagManifest::Ignore)) => return Ok(None),
                Ok(Some(FlagManifest::Artwork)) => {
                    return Ok(Some(post_wrap(node, lower::rasterized(node, key))));
                }
                Ok(Some(FlagManifest::Icon(glyph))) => {
                    let manifest = IconManifest {
                        glyph: Some(glyph),
                        size: node.width.max(node.height),
                        color: primary_paint(&node.fills).and_then(|p| p.solid_color()),
                        src: ImageRef::reserved(node.id.clone()),
                    };
                    return Ok(Some(post_wrap(node, lower::icon(node, manifest, key))));
                }
                Ok(Some(manifest @ FlagManifest::Modify { .. })) => modifiers = Some(manifest),
                Err(err) => {
                    warn!(node_id = %node.id, error = %err, "Failed to interpret flags, skipping");
                }
            }
        }

        let detectors = &self.config.detectors;
        let widget = if let Some(manifest) = detectors.image.detect(node) {
            lower::image(node, manifest, key)
        } else if let Some(manifest) = (!self.config.disable_detection)
            .then(|| detectors.icon.detect(node))
            .flatten()
        {
            lower::icon(node, manifest, key)
        } else if node.contains_masking() {
            masking::merge(self, node, depth, key)?
        } else {
            self.by_type(node, kind, depth, key)?
        };

        let widget = match modifiers {
            Some(manifest) => modify(widget, manifest),
            None => widget,
        };

        Ok(Some(post_wrap(node, widget)))
    }

    fn by_type(
        &self,
        node: &DesignNode,
        kind: &NodeKind,
        depth: usize,
        key: WidgetKey,
    ) -> Result<Widget, TokenizeError> {
        Ok(match kind {
            NodeKind::Text(data) => lower::text(node, data, key),
            NodeKind::Rectangle => lower::rectangle(node, key),
            NodeKind::Ellipse(arc) => lower::ellipse(node, arc, key),
            NodeKind::Line => lower::line(node, key),
            NodeKind::Vector(data) => lower::vector(node, data, key),
            NodeKind::BooleanOperation(data) => lower::boolean(node, data, key),
            NodeKind::Frame => lower::frame(node, self.children(node, depth)?, key),
            NodeKind::Group => lower::group(node, self.children(node, depth)?, key),
            NodeKind::Unrecognized(tag) => lower::unhandled(node, tag, key),
        })
    }

    /// Tokenized children in painter's order. Mask layers and children that
    /// produce nothing are skipped.
    fn children(&self, node: &DesignNode, depth: usize) -> Result<Vec<LayoutChild>, TokenizeError> {
        let (ox, oy) = origin(node);
        let mut children = Vec::with_capacity(node.children.len());
        for child in node.children.iter().filter(|c| !c.is_mask) {
            if let Some(widget) = self.node(child, depth + 1)? {
                children.push(LayoutChild {
                    x: child.x - ox,
                    y: child.y - oy,
                    widget,
                });
            }
        }
        Ok(children)
    }
}

/// Offset of the coordinate space of `node`'s children.
///
/// Children of frames are positioned relative to the frame, but children of
/// groups share the coordinates of the enclosing frame.
pub(crate) fn origin(node: &DesignNode) -> (f64, f64) {
    match node.kind {
        Some(NodeKind::Group) => (node.x, node.y),
        _ => (0.0, 0.0),
    }
}

/// Apply `--as-*` and width flags to a lowered widget.
fn modify(mut widget: Widget, manifest: FlagManifest) -> Widget {
    let FlagManifest::Modify {
        tag,
        min_width,
        max_width,
    } = manifest
    else {
        return widget;
    };

    if let (Some(tag), WidgetKind::Text(spec)) = (tag, &mut widget.kind) {
        spec.tag = Some(tag);
    }
    if min_width.is_some() {
        widget.style.min_width = min_width;
    }
    if max_width.is_some() {
        widget.style.max_width = max_width;
    }
    widget
}
