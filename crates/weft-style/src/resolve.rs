//! Computed CSS of a widget.
//!
//! Web targets render a widget and all wrappers above it as one element, so
//! styles are resolved per chain: the content widget's own declarations,
//! then each wrapper's contribution, then the placement inside the parent.

use crate::css::{self, CssProperties};
use tracing::warn;
use weft_core::{
    Arrangement, AxisAlignment, Background, BlurKind, BoxFit, BoxShape, Direction, FinalStyle,
    StretchAxis, TextAlign, TextDecoration, Widget, WidgetKind,
};

/// Where an element sits within its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The top-level element of an emission.
    Root,
    /// Positioned at an offset inside a stack, group or clip container.
    Absolute { x: f64, y: f64 },
    /// An item of a flex layout.
    Flex(Direction),
}

/// Placement of each positioned child of `content`.
pub fn child_placements(content: &Widget) -> Vec<Placement> {
    let flex = match &content.kind {
        WidgetKind::Layout(spec) => match spec.arrangement {
            Arrangement::Flex(flex) => Some(flex.direction),
            Arrangement::Stack => None,
        },
        _ => None,
    };
    content
        .layout_children()
        .iter()
        .map(|child| match flex {
            Some(direction) => Placement::Flex(direction),
            None => Placement::Absolute {
                x: child.x,
                y: child.y,
            },
        })
        .collect()
}

/// Computed style of the element for the chain starting at `head`.
///
/// `None` means the element must not be styled at all (it carries its own
/// presentation attributes); an empty record means "styled, but with nothing
/// to declare".
pub fn css_of(head: &Widget, placement: Placement) -> Option<CssProperties> {
    let content = head.unwrapped();
    let own = content_css(content);

    let mut extra = CssProperties::new();
    let mut current = head;
    while let Some(child) = current.wrapped() {
        wrapper_css(current, placement, &mut extra);
        current = child;
    }
    if let Placement::Absolute { x, y } = placement {
        extra.set("position", "absolute");
        extra.set("left", css::px(x));
        extra.set("top", css::px(y));
    }

    match own {
        None if extra.is_empty() => None,
        own => {
            let mut css = own.unwrap_or_default();
            for (k, v) in extra.iter() {
                css.set(k, v);
            }
            Some(css)
        }
    }
}

fn content_css(widget: &Widget) -> Option<CssProperties> {
    let mut css = CssProperties::new();
    match &widget.kind {
        WidgetKind::Vector(_) | WidgetKind::BooleanOperation(_) => return None,
        WidgetKind::Text(spec) => {
            size(&widget.style, &mut css);
            if let Some(color) = &spec.color {
                css.set("color", css::color(color));
            }
            let text = &spec.style;
            css.set("font-family", format!("\"{}\"", text.font_family));
            css.set("font-size", css::px(text.font_size));
            css.set("font-weight", text.font_weight.to_string());
            if let Some(line_height) = text.line_height {
                css.set("line-height", css::px(line_height));
            }
            if let Some(spacing) = text.letter_spacing {
                css.set("letter-spacing", css::px(spacing));
            }
            match text.align {
                TextAlign::Left => {}
                TextAlign::Center => css.set("text-align", "center"),
                TextAlign::Right => css.set("text-align", "right"),
                TextAlign::Justified => css.set("text-align", "justify"),
            }
            match text.decoration {
                TextDecoration::None => {}
                TextDecoration::Underline => css.set("text-decoration", "underline"),
                TextDecoration::Strikethrough => css.set("text-decoration", "line-through"),
            }
        }
        WidgetKind::Container(spec) => {
            box_css(widget, &mut css);
            if spec.shape == BoxShape::Circle {
                css.set("border-radius", "50%");
            }
            if spec.clip {
                css.set("overflow", "hidden");
            }
            if !spec.children.is_empty() {
                css.set("position", "relative");
            }
        }
        WidgetKind::Layout(spec) => {
            box_css(widget, &mut css);
            match spec.arrangement {
                Arrangement::Flex(flex) => {
                    css.set("display", "flex");
                    css.set(
                        "flex-direction",
                        match flex.direction {
                            Direction::Row => "row",
                            Direction::Column => "column",
                        },
                    );
                    css.set("justify-content", justify(flex.main_axis));
                    css.set("align-items", align(flex.cross_axis));
                    if flex.gap > 0.0 {
                        css.set("gap", css::px(flex.gap));
                    }
                }
                Arrangement::Stack => css.set("position", "relative"),
            }
            if spec.is_root {
                css.set("overflow", "hidden");
            }
        }
        WidgetKind::Group(_) => {
            size(&widget.style, &mut css);
            css.set("position", "relative");
        }
        WidgetKind::Image(spec) => {
            size(&widget.style, &mut css);
            css.set(
                "object-fit",
                match spec.fit {
                    BoxFit::Cover => "cover",
                    BoxFit::Contain => "contain",
                    BoxFit::Fill => "fill",
                },
            );
            if let Some(radius) = &widget.style.border_radius {
                css.set("border-radius", css::border_radius(radius));
            }
            if !widget.style.shadows.is_empty() {
                css.set("box-shadow", css::box_shadow(&widget.style.shadows));
            }
        }
        WidgetKind::Icon(_) => size(&widget.style, &mut css),
        WidgetKind::Opacity { .. }
        | WidgetKind::Stretched { .. }
        | WidgetKind::Expanded { .. }
        | WidgetKind::Blurred { .. }
        | WidgetKind::Rotation { .. }
        | WidgetKind::SizedBox { .. }
        | WidgetKind::OverflowBox { .. } => {}
    }
    Some(css)
}

fn size(style: &FinalStyle, css: &mut CssProperties) {
    if let Some(width) = style.width {
        css.set("width", css::px(width));
    }
    if let Some(height) = style.height {
        css.set("height", css::px(height));
    }
    if let Some(min) = style.min_width {
        css.set("min-width", css::px(min));
    }
    if let Some(max) = style.max_width {
        css.set("max-width", css::px(max));
    }
}

fn box_css(widget: &Widget, css: &mut CssProperties) {
    let style = &widget.style;
    size(style, css);

    match &style.background {
        Some(Background::Color(color)) => css.set("background-color", css::color(color)),
        Some(Background::Gradient(gradient)) => match css::gradient(gradient) {
            Some(value) => css.set("background", value),
            None => warn!(
                widget = %widget.key.id,
                "Gradient kind has no CSS form, background dropped"
            ),
        },
        Some(Background::Image(src)) => {
            css.set("background-image", format!("url({})", src.source()));
            css.set("background-size", "cover");
            css.set("background-position", "center");
        }
        None => {}
    }
    if let Some(border) = &style.border {
        css.set(
            "border",
            format!("{} solid {}", css::px(border.width), css::color(&border.color)),
        );
    }
    if let Some(radius) = &style.border_radius {
        css.set("border-radius", css::border_radius(radius));
    }
    if !style.shadows.is_empty() {
        css.set("box-shadow", css::box_shadow(&style.shadows));
    }
    if let Some(padding) = &style.padding {
        css.set("padding", css::padding(padding));
        css.set("box-sizing", "border-box");
    }
}

fn wrapper_css(wrapper: &Widget, placement: Placement, css: &mut CssProperties) {
    match &wrapper.kind {
        WidgetKind::Opacity { opacity, .. } => css.set("opacity", css::number(*opacity)),
        WidgetKind::Stretched { axis, .. } => match (axis, placement) {
            (StretchAxis::Horizontal, _) => css.set("width", "100%"),
            (StretchAxis::Vertical, _) => css.set("height", "100%"),
            (StretchAxis::Both, _) => {
                css.set("width", "100%");
                css.set("height", "100%");
            }
            (StretchAxis::Cross, Placement::Flex(_)) => css.set("align-self", "stretch"),
            (StretchAxis::Cross, _) => {}
        },
        WidgetKind::Expanded { flex, .. } => css.set("flex-grow", flex.to_string()),
        WidgetKind::Blurred { blur, .. } => {
            let property = match blur.kind {
                BlurKind::Layer => "filter",
                BlurKind::Background => "backdrop-filter",
            };
            let value = format!("blur({})", css::px(blur.radius));
            // nested blurs of one kind chain into a single filter list
            let merged = match css.get(property) {
                Some(existing) => format!("{existing} {value}"),
                None => value,
            };
            css.set(property, merged);
        }
        WidgetKind::Rotation { angle, .. } => {
            css.set("transform", format!("rotate({}rad)", radians(*angle)));
        }
        WidgetKind::SizedBox { width, height, .. } => {
            css.set("width", css::px(*width));
            css.set("height", css::px(*height));
        }
        WidgetKind::OverflowBox { .. } => css.set("overflow", "hidden"),
        _ => {}
    }
}

fn radians(angle: f64) -> String {
    let s = format!("{angle:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn justify(axis: AxisAlignment) -> &'static str {
    match axis {
        AxisAlignment::Min => "flex-start",
        AxisAlignment::Center => "center",
        AxisAlignment::Max => "flex-end",
        AxisAlignment::SpaceBetween => "space-between",
    }
}

fn align(axis: AxisAlignment) -> &'static str {
    match axis {
        AxisAlignment::Min | AxisAlignment::SpaceBetween => "flex-start",
        AxisAlignment::Center => "center",
        AxisAlignment::Max => "flex-end",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{
        Color, ContainerSpec, Gradient, VectorPath, VectorSpec, WidgetKey,
    };

    fn boxed(style: FinalStyle) -> Widget {
        Widget::new(
            WidgetKey::new("b", "box"),
            style,
            WidgetKind::Container(ContainerSpec::default()),
        )
    }

    fn vector() -> Widget {
        Widget::new(
            WidgetKey::new("v", "Vector"),
            FinalStyle::sized(10.0, 10.0),
            WidgetKind::Vector(VectorSpec {
                paths: vec![VectorPath::new("M0 0")],
                fill: None,
                stroke: None,
                width: 10.0,
                height: 10.0,
            }),
        )
    }

    #[test]
    fn test_container_css() {
        let mut style = FinalStyle::sized(100.0, 40.0);
        style.background = Some(Background::Color(Color::WHITE));
        let css = css_of(&boxed(style), Placement::Root).unwrap();
        insta::assert_snapshot!(
            css.to_inline(),
            @"width: 100px; height: 40px; background-color: #FFFFFF;"
        );
    }

    #[test]
    fn test_vector_is_unstyled_unless_positioned() {
        assert_eq!(css_of(&vector(), Placement::Root), None);
        assert_eq!(css_of(&vector(), Placement::Flex(Direction::Row)), None);

        let css = css_of(&vector(), Placement::Absolute { x: 4.0, y: 8.0 }).unwrap();
        assert_eq!(css.get("left"), Some("4px"));
    }

    #[test]
    fn test_unsized_container_is_empty_not_none() {
        let css = css_of(&boxed(FinalStyle::default()), Placement::Root).unwrap();
        assert!(css.is_empty());
    }

    #[test]
    fn test_wrappers_merge_into_element() {
        let base = boxed(FinalStyle::sized(10.0, 10.0));
        let head = Widget::wrap(
            base.key.derived("rotation"),
            WidgetKind::Rotation {
                angle: -std::f64::consts::FRAC_PI_2,
                child: Box::new(Widget::wrap(
                    base.key.derived("opacity"),
                    WidgetKind::Opacity {
                        opacity: 0.5,
                        child: Box::new(base),
                    },
                )),
            },
        );
        let css = css_of(&head, Placement::Root).unwrap();
        assert_eq!(css.get("opacity"), Some("0.5"));
        assert_eq!(css.get("transform"), Some("rotate(-1.5708rad)"));
    }

    #[test]
    fn test_diamond_background_is_dropped() {
        let mut style = FinalStyle::sized(10.0, 10.0);
        style.background = Some(Background::Gradient(Gradient::Diamond(vec![])));
        let css = css_of(&boxed(style), Placement::Root).unwrap();
        assert_eq!(css.get("background"), None);
        assert_eq!(css.get("width"), Some("10px"));
    }
}
