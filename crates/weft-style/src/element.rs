//! The HTML element each widget renders as.

use crate::css::{self, CssProperties};
use weft_core::{BooleanOp, Color, VectorPath, Widget, WidgetKind, WindingRule};

/// Value of an element attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    /// A style record that is already bound to the element.
    Css(CssProperties),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

impl Attribute {
    pub fn str(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: AttrValue::Str(value.into()),
        }
    }
}

/// Tag, attributes and fixed content of a widget's element.
///
/// Widget children are not part of this; emitters walk them separately and
/// append them after `children`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub text: Option<String>,
    /// Static child elements such as svg paths.
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::str(name, value));
        self
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Elements without text or children may be written self-closing.
    pub fn is_void(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }
}

/// Element for the content widget of a chain (wrappers already stripped).
pub fn element_of(widget: &Widget) -> ElementSpec {
    match &widget.kind {
        WidgetKind::Text(spec) => {
            let tag = spec.tag.map_or("span", |t| t.html());
            let mut element = ElementSpec::new(tag);
            element.text = Some(spec.data.clone());
            element
        }
        WidgetKind::Image(spec) => ElementSpec::new("img")
            .attr("src", spec.src.source())
            .attr("alt", spec.alt.clone()),
        WidgetKind::Icon(spec) => ElementSpec::new("img")
            .attr("src", spec.src.source())
            .attr("alt", spec.glyph.clone().unwrap_or_else(|| widget.key.origin_name.clone())),
        WidgetKind::Vector(spec) => svg(
            spec.width,
            spec.height,
            spec.paths.iter().map(|p| path(p, spec.fill, None)).collect(),
            spec.stroke.map(|b| (b.color, b.width)),
        ),
        WidgetKind::BooleanOperation(spec) => {
            let rule = match spec.operation {
                BooleanOp::Subtract | BooleanOp::Exclude => Some(WindingRule::EvenOdd),
                BooleanOp::Union | BooleanOp::Intersect => None,
            };
            svg(
                spec.width,
                spec.height,
                spec.paths.iter().map(|p| path(p, spec.fill, rule)).collect(),
                None,
            )
        }
        WidgetKind::Container(_) | WidgetKind::Group(_) | WidgetKind::Layout(_) => {
            ElementSpec::new("div")
        }
        // wrappers merge into their content element
        WidgetKind::Opacity { child, .. }
        | WidgetKind::Stretched { child, .. }
        | WidgetKind::Expanded { child, .. }
        | WidgetKind::Blurred { child, .. }
        | WidgetKind::Rotation { child, .. }
        | WidgetKind::SizedBox { child, .. }
        | WidgetKind::OverflowBox { child } => element_of(child),
    }
}

fn svg(
    width: f64,
    height: f64,
    paths: Vec<ElementSpec>,
    stroke: Option<(Color, f64)>,
) -> ElementSpec {
    let mut overflow = CssProperties::new();
    overflow.set("overflow", "visible");

    let mut element = ElementSpec::new("svg")
        .attr("width", css::number(width))
        .attr("height", css::number(height))
        .attr("viewBox", format!("0 0 {} {}", css::number(width), css::number(height)))
        .attr("fill", "none")
        .attr("xmlns", "http://www.w3.org/2000/svg");
    element.attributes.push(Attribute {
        name: "style".to_string(),
        value: AttrValue::Css(overflow),
    });
    element.children = paths;

    if let Some((color, width)) = stroke {
        for child in &mut element.children {
            child.attributes.push(Attribute::str("stroke", css::color(&color)));
            child
                .attributes
                .push(Attribute::str("stroke-width", css::number(width)));
        }
    }
    element
}

fn path(path: &VectorPath, fill: Option<Color>, rule: Option<WindingRule>) -> ElementSpec {
    let mut element = ElementSpec::new("path").attr("d", path.data.clone());
    if rule.unwrap_or(path.winding) == WindingRule::EvenOdd {
        element = element
            .attr("fill-rule", "evenodd")
            .attr("clip-rule", "evenodd");
    }
    element.attr("fill", fill.map_or_else(|| "none".to_string(), |c| css::color(&c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{FinalStyle, ImageRef, ImageSpec, BoxFit, TextSpec, TextStyle, TextTag, VectorSpec, WidgetKey};

    #[test]
    fn test_text_tag_override() {
        let widget = Widget::new(
            WidgetKey::new("t", "Title"),
            FinalStyle::default(),
            WidgetKind::Text(TextSpec {
                data: "Hello".into(),
                style: TextStyle::default(),
                color: None,
                tag: Some(TextTag::H2),
            }),
        );
        let element = element_of(&widget);
        assert_eq!(element.tag, "h2");
        assert_eq!(element.text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_image_source_is_reserved() {
        let widget = Widget::new(
            WidgetKey::new("i", "photo"),
            FinalStyle::default(),
            WidgetKind::Image(ImageSpec {
                src: ImageRef::reserved("abc"),
                fit: BoxFit::Cover,
                alt: "photo".into(),
            }),
        );
        let element = element_of(&widget);
        assert_eq!(
            element.attributes[0].value,
            AttrValue::Str("weft://assets-reservation/images/abc".into())
        );
        assert!(element.is_void());
    }

    #[test]
    fn test_vector_carries_style_attribute() {
        let widget = Widget::new(
            WidgetKey::new("v", "Vector"),
            FinalStyle::default(),
            WidgetKind::Vector(VectorSpec {
                paths: vec![VectorPath::new("M0 0L10 10")],
                fill: Some(Color::BLACK),
                stroke: None,
                width: 10.0,
                height: 10.0,
            }),
        );
        let element = element_of(&widget);
        assert_eq!(element.tag, "svg");
        assert!(element.has_attribute("style"));
        assert_eq!(element.children.len(), 1);
    }
}
