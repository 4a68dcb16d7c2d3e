//! Framework-independent widget IR.
//!
//! Tokenization lowers a [`DesignNode`](crate::node::DesignNode) tree into a
//! [`Widget`] tree. Every widget carries a stable [`WidgetKey`] and a
//! [`FinalStyle`] that does not depend on any target framework. Wrapper
//! variants (`Opacity`, `Stretched`, `Expanded`, `Blurred`, `Rotation`,
//! `SizedBox`, `OverflowBox`) own exactly one child.

use crate::node::{AxisAlignment, BooleanOp, TextStyle, VectorPath};
use crate::types::{Blur, Color, CornerRadius, EdgeInsets, Gradient, Shadow};

/// Scheme prefix of image references that are resolved after emission.
pub const ASSET_RESERVATION_PREFIX: &str = "weft://assets-reservation/images/";

/// Static image shown for image paints that carry no image reference.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://static.weft.dev/placeholders/image-512.png";

/// Value substituted for reserved assets that could not be fetched (a 1x1 transparent GIF).
pub const FALLBACK_IMAGE_SOURCE: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Reference to image content used while emitting code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageRef {
    /// Synthetic key, substituted with real asset data after emission.
    Reserved(String),
    /// A literal URL.
    Static(String),
}

impl ImageRef {
    pub fn reserved(key: impl Into<String>) -> Self {
        ImageRef::Reserved(key.into())
    }

    pub fn placeholder() -> Self {
        ImageRef::Static(PLACEHOLDER_IMAGE_URL.to_string())
    }

    /// The string written into generated source.
    pub fn source(&self) -> String {
        match self {
            ImageRef::Reserved(key) => format!("{}{}", ASSET_RESERVATION_PREFIX, key),
            ImageRef::Static(url) => url.clone(),
        }
    }
}

/// Identity of a widget: a unique id plus the human-readable origin name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetKey {
    pub id: String,
    pub origin_name: String,
    /// Main component this widget was instantiated from.
    pub component: Option<String>,
}

impl WidgetKey {
    pub fn new(id: impl Into<String>, origin_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            origin_name: origin_name.into(),
            component: None,
        }
    }

    /// Key of a wrapper derived from a node, e.g. `1:2.opacity`.
    pub fn derived(&self, suffix: &str) -> Self {
        Self {
            id: format!("{}.{}", self.id, suffix),
            origin_name: format!("{} {}", self.origin_name, suffix),
            component: None,
        }
    }

    /// Preferred name for generated identifiers.
    pub fn name(&self) -> &str {
        self.component.as_deref().unwrap_or(&self.origin_name)
    }
}

/// Background paint of a box.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Background {
    Color(Color),
    Gradient(Gradient),
    Image(ImageRef),
}

/// Solid border.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Border {
    pub width: f64,
    pub color: Color,
}

/// Resolved visual style of a widget, independent of the target framework.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalStyle {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub background: Option<Background>,
    pub border: Option<Border>,
    pub border_radius: Option<CornerRadius>,
    pub shadows: Vec<Shadow>,
    pub padding: Option<EdgeInsets>,
}

impl FinalStyle {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

/// A widget IR node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Widget {
    pub key: WidgetKey,
    pub style: FinalStyle,
    pub kind: WidgetKind,
}

/// The closed set of widget variants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WidgetKind {
    Text(TextSpec),
    Container(ContainerSpec),
    Image(ImageSpec),
    Icon(IconSpec),
    Vector(VectorSpec),
    /// Transparent grouping; children keep coordinates of the enclosing frame.
    Group(Vec<LayoutChild>),
    Layout(LayoutSpec),
    BooleanOperation(BooleanSpec),

    Opacity { opacity: f64, child: Box<Widget> },
    Stretched { axis: StretchAxis, child: Box<Widget> },
    Expanded { flex: u32, child: Box<Widget> },
    Blurred { blur: Blur, child: Box<Widget> },
    /// `angle` is in radians, already converted to the renderer's convention.
    Rotation { angle: f64, child: Box<Widget> },
    SizedBox { width: f64, height: f64, child: Box<Widget> },
    OverflowBox { child: Box<Widget> },
}

/// Semantic tag override for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Span,
}

impl TextTag {
    pub fn html(&self) -> &'static str {
        match self {
            TextTag::H1 => "h1",
            TextTag::H2 => "h2",
            TextTag::H3 => "h3",
            TextTag::H4 => "h4",
            TextTag::H5 => "h5",
            TextTag::H6 => "h6",
            TextTag::P => "p",
            TextTag::Span => "span",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSpec {
    pub data: String,
    pub style: TextStyle,
    pub color: Option<Color>,
    pub tag: Option<TextTag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoxShape {
    #[default]
    Rectangle,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerSpec {
    pub shape: BoxShape,
    /// Clip children to the container's shape (mask compositing).
    pub clip: bool,
    pub children: Vec<LayoutChild>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoxFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSpec {
    pub src: ImageRef,
    pub fit: BoxFit,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IconSpec {
    /// Named glyph from a stock icon set, when one was recognized.
    pub glyph: Option<String>,
    pub size: f64,
    pub color: Option<Color>,
    /// Rasterized fallback.
    pub src: ImageRef,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorSpec {
    pub paths: Vec<VectorPath>,
    pub fill: Option<Color>,
    pub stroke: Option<Border>,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooleanSpec {
    pub operation: BooleanOp,
    pub paths: Vec<VectorPath>,
    pub fill: Option<Color>,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlexSpec {
    pub direction: Direction,
    pub main_axis: AxisAlignment,
    pub cross_axis: AxisAlignment,
    pub gap: f64,
}

/// How a layout places its children.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arrangement {
    Flex(FlexSpec),
    /// Children are positioned absolutely at their `x`/`y`.
    Stack,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSpec {
    pub arrangement: Arrangement,
    pub children: Vec<LayoutChild>,
    pub is_root: bool,
}

/// A child together with its offset in the parent's coordinate space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutChild {
    pub x: f64,
    pub y: f64,
    pub widget: Widget,
}

/// Axis along which a stretched widget fills its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StretchAxis {
    Horizontal,
    Vertical,
    Both,
    /// The cross axis of the enclosing flex layout, resolved at emission.
    Cross,
}

impl Widget {
    pub fn new(key: WidgetKey, style: FinalStyle, kind: WidgetKind) -> Self {
        Self { key, style, kind }
    }

    /// Wrap `child` in a style-less wrapper widget.
    pub fn wrap(key: WidgetKey, kind: WidgetKind) -> Self {
        Self {
            key,
            style: FinalStyle::default(),
            kind,
        }
    }

    /// The single child of a wrapper widget.
    pub fn wrapped(&self) -> Option<&Widget> {
        match &self.kind {
            WidgetKind::Opacity { child, .. }
            | WidgetKind::Stretched { child, .. }
            | WidgetKind::Expanded { child, .. }
            | WidgetKind::Blurred { child, .. }
            | WidgetKind::Rotation { child, .. }
            | WidgetKind::SizedBox { child, .. }
            | WidgetKind::OverflowBox { child } => Some(child),
            WidgetKind::Text(_)
            | WidgetKind::Container(_)
            | WidgetKind::Image(_)
            | WidgetKind::Icon(_)
            | WidgetKind::Vector(_)
            | WidgetKind::Group(_)
            | WidgetKind::Layout(_)
            | WidgetKind::BooleanOperation(_) => None,
        }
    }

    pub fn is_wrapper(&self) -> bool {
        self.wrapped().is_some()
    }

    /// Positioned children of multi-child widgets.
    pub fn layout_children(&self) -> &[LayoutChild] {
        match &self.kind {
            WidgetKind::Group(children) => children,
            WidgetKind::Layout(spec) => &spec.children,
            WidgetKind::Container(spec) => &spec.children,
            _ => &[],
        }
    }

    /// All direct children, wrapper child included.
    pub fn children(&self) -> Vec<&Widget> {
        match self.wrapped() {
            Some(child) => vec![child],
            None => self.layout_children().iter().map(|c| &c.widget).collect(),
        }
    }

    /// Pre-order walk over this widget and its descendants.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Widget)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// The innermost widget beneath any chain of wrappers.
    pub fn unwrapped(&self) -> &Widget {
        let mut current = self;
        while let Some(child) = current.wrapped() {
            current = child;
        }
        current
    }

    /// Short variant name, used in logs and generated identifiers.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            WidgetKind::Text(_) => "Text",
            WidgetKind::Container(_) => "Container",
            WidgetKind::Image(_) => "Image",
            WidgetKind::Icon(_) => "Icon",
            WidgetKind::Vector(_) => "Vector",
            WidgetKind::Group(_) => "Group",
            WidgetKind::Layout(_) => "Layout",
            WidgetKind::BooleanOperation(_) => "BooleanOperation",
            WidgetKind::Opacity { .. } => "Opacity",
            WidgetKind::Stretched { .. } => "Stretched",
            WidgetKind::Expanded { .. } => "Expanded",
            WidgetKind::Blurred { .. } => "Blurred",
            WidgetKind::Rotation { .. } => "Rotation",
            WidgetKind::SizedBox { .. } => "SizedBox",
            WidgetKind::OverflowBox { .. } => "OverflowBox",
        }
    }

    /// Every image reference used anywhere in this subtree.
    pub fn image_refs(&self) -> Vec<&ImageRef> {
        let mut refs = Vec::new();
        self.walk(&mut |w| {
            if let Some(Background::Image(r)) = &w.style.background {
                refs.push(r);
            }
            match &w.kind {
                WidgetKind::Image(spec) => refs.push(&spec.src),
                WidgetKind::Icon(spec) if spec.glyph.is_none() => refs.push(&spec.src),
                _ => {}
            }
        });
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> Widget {
        Widget::new(
            WidgetKey::new(id, id),
            FinalStyle::sized(10.0, 10.0),
            WidgetKind::Container(ContainerSpec::default()),
        )
    }

    #[test]
    fn test_unwrapped_through_chain() {
        let base = leaf("a");
        let wrapped = Widget::wrap(
            base.key.derived("rotation"),
            WidgetKind::Rotation {
                angle: 1.0,
                child: Box::new(Widget::wrap(
                    base.key.derived("opacity"),
                    WidgetKind::Opacity {
                        opacity: 0.5,
                        child: Box::new(base.clone()),
                    },
                )),
            },
        );

        assert!(wrapped.is_wrapper());
        assert_eq!(wrapped.unwrapped(), &base);
        assert_eq!(wrapped.key.id, "a.rotation");
    }

    #[test]
    fn test_walk_preorder() {
        let layout = Widget::new(
            WidgetKey::new("root", "root"),
            FinalStyle::default(),
            WidgetKind::Layout(LayoutSpec {
                arrangement: Arrangement::Stack,
                children: vec![
                    LayoutChild { x: 0.0, y: 0.0, widget: leaf("a") },
                    LayoutChild { x: 5.0, y: 5.0, widget: leaf("b") },
                ],
                is_root: true,
            }),
        );

        let mut ids = Vec::new();
        layout.walk(&mut |w| ids.push(w.key.id.clone()));
        assert_eq!(ids, ["root", "a", "b"]);
    }

    #[test]
    fn test_image_ref_source() {
        assert_eq!(
            ImageRef::reserved("1:9").source(),
            "weft://assets-reservation/images/1:9"
        );
    }
}
