//! The decorator pipeline.
//!
//! Cross-cutting effects are not styles on the lowered widget; they are
//! single-child wrappers layered around it. The layering order is fixed:
//!
//! ```text
//! Rotation > Blurred (one per blur, list order) > Opacity > Expanded > Stretched > widget
//! ```
//!
//! Reordering changes rendered bounds, so [`post_wrap`] is the only place
//! wrappers are added.

use std::f64::consts::PI;
use weft_core::{
    Constraint, DesignNode, LayoutAlign, StretchAxis, Widget, WidgetKey, WidgetKind,
};

/// Wrap `widget` with every effect `node` asks for.
pub fn post_wrap(node: &DesignNode, widget: Widget) -> Widget {
    let key = WidgetKey::new(node.id.clone(), node.name.clone());
    let mut widget = widget;

    if let Some(axis) = stretch_axis(node) {
        widget = Widget::wrap(
            key.derived("stretched"),
            WidgetKind::Stretched {
                axis,
                child: Box::new(widget),
            },
        );
    }

    if node.layout.grow > 0.0 {
        widget = Widget::wrap(
            key.derived("expanded"),
            WidgetKind::Expanded {
                flex: (node.layout.grow.round() as u32).max(1),
                child: Box::new(widget),
            },
        );
    }

    if node.opacity != 1.0 {
        widget = Widget::wrap(
            key.derived("opacity"),
            WidgetKind::Opacity {
                opacity: node.opacity,
                child: Box::new(widget),
            },
        );
    }

    for (i, blur) in node.effects.iter().filter_map(|e| e.blur()).enumerate() {
        widget = Widget::wrap(
            key.derived(&format!("blur-{i}")),
            WidgetKind::Blurred {
                blur,
                child: Box::new(widget),
            },
        );
    }

    if node.rotation.round() != 0.0 {
        widget = Widget::wrap(
            key.derived("rotation"),
            WidgetKind::Rotation {
                angle: rotation_angle(node.rotation),
                child: Box::new(widget),
            },
        );
    }

    widget
}

/// Design rotation (degrees, clockwise) to renderer radians.
#[inline]
pub fn rotation_angle(degrees: f64) -> f64 {
    degrees * (-PI / 180.0)
}

fn stretch_axis(node: &DesignNode) -> Option<StretchAxis> {
    if node.layout.align == LayoutAlign::Stretch {
        return Some(StretchAxis::Cross);
    }

    let constraints = node.layout.constraints;
    match (
        constraints.horizontal == Constraint::Stretch,
        constraints.vertical == Constraint::Stretch,
    ) {
        (true, true) => Some(StretchAxis::Both),
        (true, false) => Some(StretchAxis::Horizontal),
        (false, true) => Some(StretchAxis::Vertical),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{ContainerSpec, Effect, FinalStyle, NodeLayout};

    fn base(node: &DesignNode) -> Widget {
        Widget::new(
            WidgetKey::new(node.id.clone(), node.name.clone()),
            FinalStyle::sized(node.width, node.height),
            WidgetKind::Container(ContainerSpec::default()),
        )
    }

    #[test]
    fn test_undecorated_node_is_untouched() {
        let node = DesignNode::rectangle("1", "plain").with_size(10.0, 10.0);
        let widget = base(&node);
        assert_eq!(post_wrap(&node, widget.clone()), widget);
    }

    #[test]
    fn test_full_wrapper_order() {
        let layout = NodeLayout {
            align: LayoutAlign::Stretch,
            grow: 1.0,
            ..NodeLayout::default()
        };
        let node = DesignNode::rectangle("1", "all")
            .with_size(10.0, 10.0)
            .with_layout(layout)
            .with_opacity(0.5)
            .with_effect(Effect::LayerBlur { radius: 4.0 })
            .with_rotation(90.0);

        let wrapped = post_wrap(&node, base(&node));

        let mut chain = Vec::new();
        let mut current = &wrapped;
        loop {
            chain.push(current.kind_name());
            match current.wrapped() {
                Some(child) => current = child,
                None => break,
            }
        }
        assert_eq!(
            chain,
            ["Rotation", "Blurred", "Opacity", "Expanded", "Stretched", "Container"]
        );
    }

    #[test]
    fn test_rotation_angle_sign() {
        let node = DesignNode::rectangle("1", "r").with_rotation(90.0);
        let wrapped = post_wrap(&node, base(&node));
        match wrapped.kind {
            WidgetKind::Rotation { angle, .. } => assert_eq!(angle, 90.0 * (-PI / 180.0)),
            other => panic!("expected rotation, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_degree_rotation_is_skipped() {
        let node = DesignNode::rectangle("1", "r").with_rotation(0.4);
        assert!(!post_wrap(&node, base(&node)).is_wrapper());
    }

    #[test]
    fn test_blurs_nest_in_list_order() {
        let node = DesignNode::rectangle("1", "b")
            .with_effect(Effect::LayerBlur { radius: 2.0 })
            .with_effect(Effect::BackgroundBlur { radius: 8.0 });

        let wrapped = post_wrap(&node, base(&node));
        assert_eq!(wrapped.key.id, "1.blur-1");
        match (&wrapped.kind, wrapped.wrapped().map(|w| &w.kind)) {
            (
                WidgetKind::Blurred { blur: outer, .. },
                Some(WidgetKind::Blurred { blur: inner, .. }),
            ) => {
                assert_eq!(outer.radius, 8.0);
                assert_eq!(inner.radius, 2.0);
            }
            other => panic!("unexpected nesting {other:?}"),
        }
    }

    #[test]
    fn test_constraint_stretch_axes() {
        let mut layout = NodeLayout::default();
        layout.constraints.horizontal = Constraint::Stretch;
        let node = DesignNode::rectangle("1", "s").with_layout(layout);
        assert!(matches!(
            post_wrap(&node, base(&node)).kind,
            WidgetKind::Stretched {
                axis: StretchAxis::Horizontal,
                ..
            }
        ));
    }
}
