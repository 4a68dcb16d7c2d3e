//! Mask compositing.
//!
//! In the design tool a mask layer clips every sibling painted above it, up
//! to the next mask. Here each mask becomes a clipping container holding
//! those siblings, positioned relative to the mask.

use crate::decorate::post_wrap;
use crate::lower::box_style;
use crate::tokenizer::{origin, Tokenizer};
use weft_core::{
    BoxShape, ContainerSpec, DesignNode, FinalStyle, LayoutChild, NodeKind, TokenizeError,
    Widget, WidgetKey, WidgetKind,
};

/// Tokenize a node whose direct children include masks.
pub(crate) fn merge(
    tokenizer: &Tokenizer<'_>,
    node: &DesignNode,
    depth: usize,
    key: WidgetKey,
) -> Result<Widget, TokenizeError> {
    let (ox, oy) = origin(node);
    let mut children: Vec<LayoutChild> = Vec::new();
    let mut current: Option<(&DesignNode, Vec<LayoutChild>)> = None;

    for child in &node.children {
        if child.is_mask {
            if let Some((mask, maskees)) = current.take() {
                children.push(clip(tokenizer, mask, maskees, (ox, oy)));
            }
            current = Some((child, Vec::new()));
            continue;
        }

        let Some(widget) = tokenizer.node(child, depth + 1)? else {
            continue;
        };
        match current.as_mut() {
            Some((mask, maskees)) => maskees.push(LayoutChild {
                x: child.x - mask.x,
                y: child.y - mask.y,
                widget,
            }),
            None => children.push(LayoutChild {
                x: child.x - ox,
                y: child.y - oy,
                widget,
            }),
        }
    }
    if let Some((mask, maskees)) = current {
        children.push(clip(tokenizer, mask, maskees, (ox, oy)));
    }

    Ok(Widget::new(
        key,
        box_style(node),
        WidgetKind::Container(ContainerSpec {
            shape: BoxShape::Rectangle,
            clip: false,
            children,
        }),
    ))
}

fn clip(
    tokenizer: &Tokenizer<'_>,
    mask: &DesignNode,
    maskees: Vec<LayoutChild>,
    (ox, oy): (f64, f64),
) -> LayoutChild {
    let mut style = if tokenizer.config.sanitizer_ignore_masking_node {
        FinalStyle::sized(mask.width, mask.height)
    } else {
        box_style(mask)
    };
    if !mask.corner_radius.is_zero() {
        style.border_radius = Some(mask.corner_radius);
    }

    let shape = match mask.kind {
        Some(NodeKind::Ellipse(_)) => BoxShape::Circle,
        _ => BoxShape::Rectangle,
    };

    let widget = Widget::new(
        tokenizer.key(mask),
        style,
        WidgetKind::Container(ContainerSpec {
            shape,
            clip: true,
            children: maskees,
        }),
    );

    LayoutChild {
        x: mask.x - ox,
        y: mask.y - oy,
        widget: post_wrap(mask, widget),
    }
}

#[cfg(test)]
mod tests {
    use crate::{tokenize, TokenizerConfig};
    use weft_core::{Background, Color, DesignNode, Paint, WidgetKind};

    fn masked_card() -> DesignNode {
        DesignNode::frame("m", "avatar")
            .with_size(100.0, 100.0)
            .with_child(DesignNode::rectangle("bg", "under").with_size(100.0, 100.0))
            .with_child(
                DesignNode::ellipse("mask", "mask")
                    .at(10.0, 10.0)
                    .with_size(80.0, 80.0)
                    .with_fill(Paint::solid(Color::BLACK))
                    .as_mask(),
            )
            .with_child(
                DesignNode::rectangle("photo", "photo")
                    .at(20.0, 30.0)
                    .with_size(60.0, 60.0)
                    .with_fill(Paint::solid(Color::WHITE)),
            )
    }

    #[test]
    fn test_mask_clips_following_siblings() {
        let widget = tokenize(&masked_card(), &TokenizerConfig::default()).unwrap();

        let WidgetKind::Container(spec) = &widget.kind else {
            panic!("masking must produce a container, got {}", widget.kind_name());
        };
        assert_eq!(spec.children.len(), 2);
        assert_eq!(spec.children[0].widget.key.id, "bg");

        let clip = &spec.children[1];
        assert_eq!((clip.x, clip.y), (10.0, 10.0));
        let WidgetKind::Container(clip_spec) = &clip.widget.kind else {
            panic!("expected clip container");
        };
        assert!(clip_spec.clip);
        assert_eq!(clip_spec.children[0].widget.key.id, "photo");
        assert_eq!((clip_spec.children[0].x, clip_spec.children[0].y), (10.0, 20.0));
    }

    #[test]
    fn test_sanitized_mask_is_not_painted() {
        let widget = tokenize(&masked_card(), &TokenizerConfig::default()).unwrap();
        let clip = &widget.layout_children()[1].widget;
        assert_eq!(clip.style.background, None);

        let config = TokenizerConfig {
            sanitizer_ignore_masking_node: false,
            ..TokenizerConfig::default()
        };
        let widget = tokenize(&masked_card(), &config).unwrap();
        let clip = &widget.layout_children()[1].widget;
        assert_eq!(clip.style.background, Some(Background::Color(Color::BLACK)));
    }
}
