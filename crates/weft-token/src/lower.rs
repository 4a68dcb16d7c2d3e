//! Type-directed lowering of single design nodes.
//!
//! Each function here builds the widget for one node kind from data that has
//! already been gathered (children are tokenized by the caller).

use crate::detection::{IconManifest, ImageManifest};
use tracing::error;
use weft_core::{
    primary_paint, Arrangement, ArcData, Background, BooleanData, BooleanSpec, BoxFit, BoxShape,
    Border, Color, ContainerSpec, DesignNode, Direction, Effect, FinalStyle, FlexSpec, IconSpec,
    ImageRef, ImageSpec, LayoutChild, LayoutMode, LayoutSpec, NodeKind, PaintKind, Shadow,
    TextData, TextSpec, VectorData, VectorSpec, Widget, WidgetKey, WidgetKind,
};

/// Appended to the origin name of widgets produced for node tags the
/// tokenizer has no handling for.
pub const UNHANDLED_NODE_MARKER: &str = "[unhandled node rasterized]";

/// Width of a text box after padding against premature line breaks.
///
/// Renderers measure glyphs slightly differently from the design tool, so
/// short multi-word labels get a little slack. Single words never wrap and
/// are left as is. Length is counted in UTF-16 units, the way the design
/// tool measures strings.
pub fn padded_text_width(text: &str, width: f64) -> f64 {
    let words = text.split(' ').count();
    let len = text.encode_utf16().count();

    if words <= 1 {
        width
    } else if len <= 6 && words <= 2 {
        width + 1.0
    } else if len < 30 {
        width + 2.0
    } else {
        width
    }
}

/// Size, paint, border, corners and shadows of a box-like node.
pub(crate) fn box_style(node: &DesignNode) -> FinalStyle {
    let mut style = FinalStyle::sized(node.width, node.height);
    style.background = background(node);
    style.border = border(node);
    if !node.corner_radius.is_zero() {
        style.border_radius = Some(node.corner_radius);
    }
    style.shadows = node
        .effects
        .iter()
        .filter_map(|effect| match *effect {
            Effect::DropShadow(s) => Some(s),
            Effect::InnerShadow(s) => Some(Shadow { inset: true, ..s }),
            Effect::LayerBlur { .. } | Effect::BackgroundBlur { .. } => None,
        })
        .collect();
    style
}

fn background(node: &DesignNode) -> Option<Background> {
    let paint = primary_paint(&node.fills)?;
    match &paint.kind {
        PaintKind::Solid(_) => paint.solid_color().map(Background::Color),
        PaintKind::Gradient(gradient) => Some(Background::Gradient(gradient.clone())),
        PaintKind::Image { image_ref, .. } if image_ref.is_empty() => {
            Some(Background::Image(ImageRef::placeholder()))
        }
        PaintKind::Image { image_ref, .. } => {
            Some(Background::Image(ImageRef::reserved(image_ref.clone())))
        }
    }
}

fn border(node: &DesignNode) -> Option<Border> {
    if node.stroke_weight <= 0.0 {
        return None;
    }
    let color = primary_paint(&node.strokes)?.solid_color()?;
    Some(Border {
        width: node.stroke_weight,
        color,
    })
}

fn fill_color(node: &DesignNode) -> Option<Color> {
    primary_paint(&node.fills).and_then(|p| p.solid_color())
}

pub(crate) fn text(node: &DesignNode, data: &TextData, key: WidgetKey) -> Widget {
    let mut style = FinalStyle::sized(
        padded_text_width(&data.characters, node.width),
        node.height,
    );
    style.shadows = box_style(node).shadows;

    Widget::new(
        key,
        style,
        WidgetKind::Text(TextSpec {
            data: data.characters.clone(),
            style: data.style.clone(),
            color: fill_color(node),
            tag: None,
        }),
    )
}

pub(crate) fn rectangle(node: &DesignNode, key: WidgetKey) -> Widget {
    Widget::new(
        key,
        box_style(node),
        WidgetKind::Container(ContainerSpec::default()),
    )
}

pub(crate) fn ellipse(node: &DesignNode, arc: &ArcData, key: WidgetKey) -> Widget {
    if !arc.is_standard() {
        // arcs and rings have no box representation
        return rasterized(node, key);
    }
    Widget::new(
        key,
        box_style(node),
        WidgetKind::Container(ContainerSpec {
            shape: BoxShape::Circle,
            ..ContainerSpec::default()
        }),
    )
}

/// Lines are drawn by their stroke; they become a box as thick as the stroke.
pub(crate) fn line(node: &DesignNode, key: WidgetKey) -> Widget {
    let thickness = node.stroke_weight.max(1.0);
    let mut style = FinalStyle::sized(node.width, thickness);
    style.background = primary_paint(&node.strokes)
        .and_then(|p| p.solid_color())
        .map(Background::Color);

    Widget::new(key, style, WidgetKind::Container(ContainerSpec::default()))
}

pub(crate) fn vector(node: &DesignNode, data: &VectorData, key: WidgetKey) -> Widget {
    Widget::new(
        key,
        FinalStyle::sized(node.width, node.height),
        WidgetKind::Vector(VectorSpec {
            paths: data.paths.clone(),
            fill: fill_color(node),
            stroke: border(node),
            width: node.width,
            height: node.height,
        }),
    )
}

/// Boolean operations flatten the paths of every vector beneath them.
pub(crate) fn boolean(node: &DesignNode, data: &BooleanData, key: WidgetKey) -> Widget {
    let paths = node
        .descendants()
        .filter_map(|n| match &n.kind {
            Some(NodeKind::Vector(v)) => Some(v.paths.iter().cloned()),
            _ => None,
        })
        .flatten()
        .collect();

    Widget::new(
        key,
        FinalStyle::sized(node.width, node.height),
        WidgetKind::BooleanOperation(BooleanSpec {
            operation: data.operation,
            paths,
            fill: fill_color(node),
            width: node.width,
            height: node.height,
        }),
    )
}

pub(crate) fn frame(node: &DesignNode, children: Vec<LayoutChild>, key: WidgetKey) -> Widget {
    let mut style = box_style(node);
    if !node.layout.padding.is_zero() {
        style.padding = Some(node.layout.padding);
    }

    let flex = |direction| {
        Arrangement::Flex(FlexSpec {
            direction,
            main_axis: node.layout.primary_axis,
            cross_axis: node.layout.counter_axis,
            gap: node.layout.item_spacing,
        })
    };
    let arrangement = match node.layout.mode {
        LayoutMode::None => Arrangement::Stack,
        LayoutMode::Horizontal => flex(Direction::Row),
        LayoutMode::Vertical => flex(Direction::Column),
    };

    Widget::new(
        key,
        style,
        WidgetKind::Layout(LayoutSpec {
            arrangement,
            children,
            is_root: node.is_root,
        }),
    )
}

pub(crate) fn group(node: &DesignNode, children: Vec<LayoutChild>, key: WidgetKey) -> Widget {
    Widget::new(
        key,
        FinalStyle::sized(node.width, node.height),
        WidgetKind::Group(children),
    )
}

pub(crate) fn image(node: &DesignNode, manifest: ImageManifest, key: WidgetKey) -> Widget {
    let mut style = FinalStyle::sized(node.width, node.height);
    if !manifest.illustration {
        let boxed = box_style(node);
        style.border_radius = boxed.border_radius;
        style.shadows = boxed.shadows;
    }

    Widget::new(
        key,
        style,
        WidgetKind::Image(ImageSpec {
            src: manifest.src,
            fit: manifest.fit,
            alt: alt_text(node),
        }),
    )
}

pub(crate) fn icon(node: &DesignNode, manifest: IconManifest, key: WidgetKey) -> Widget {
    Widget::new(
        key,
        FinalStyle::sized(node.width, node.height),
        WidgetKind::Icon(IconSpec {
            glyph: manifest.glyph,
            size: manifest.size,
            color: manifest.color,
            src: manifest.src,
        }),
    )
}

/// Whole-node raster, keyed by the node id.
pub(crate) fn rasterized(node: &DesignNode, key: WidgetKey) -> Widget {
    Widget::new(
        key,
        FinalStyle::sized(node.width, node.height),
        WidgetKind::Image(ImageSpec {
            src: ImageRef::reserved(node.id.clone()),
            fit: BoxFit::Fill,
            alt: alt_text(node),
        }),
    )
}

/// Fallback for node tags without dedicated handling.
pub(crate) fn unhandled(node: &DesignNode, tag: &str, mut key: WidgetKey) -> Widget {
    error!(
        node_id = %node.id,
        tag,
        "Unhandled node tag, falling back to a rasterized image"
    );
    key.origin_name = format!("{} {}", key.origin_name, UNHANDLED_NODE_MARKER);
    rasterized(node, key)
}

fn alt_text(node: &DesignNode) -> String {
    crate::flags::strip_flags(&node.name)
}
