//! Design node tree, as handed over by the authoring tool.
//!
//! Nodes are read-only input to the pipeline. Geometry and paint fields are
//! always present (possibly empty) and `children` is in painter's order:
//! later children draw on top of earlier ones.

use crate::types::{CornerRadius, EdgeInsets, Effect, Paint};
use smallvec::SmallVec;

/// A node of the design scene graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignNode {
    pub id: String,
    pub name: String,
    /// The node type tag. `None` means the input is malformed.
    pub kind: Option<NodeKind>,
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: f64,
    pub corner_radius: CornerRadius,
    pub opacity: f64,
    pub effects: SmallVec<[Effect; 2]>,
    pub layout: NodeLayout,
    /// This node masks the siblings painted after it.
    pub is_mask: bool,
    /// This node is the root frame of a screen.
    pub is_root: bool,
    /// Name of the main component this node is an instance of.
    pub main_component: Option<String>,
    pub children: Vec<DesignNode>,
}

impl DesignNode {
    /// Create a new node with empty geometry and paints.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: Some(kind),
            visible: true,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: 0.0,
            corner_radius: CornerRadius::default(),
            opacity: 1.0,
            effects: SmallVec::new(),
            layout: NodeLayout::default(),
            is_mask: false,
            is_root: false,
            main_component: None,
            children: Vec::new(),
        }
    }

    pub fn frame(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Frame)
    }

    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Group)
    }

    pub fn rectangle(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Rectangle)
    }

    pub fn ellipse(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Ellipse(ArcData::default()))
    }

    pub fn text(id: impl Into<String>, name: impl Into<String>, characters: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            NodeKind::Text(TextData {
                characters: characters.into(),
                style: TextStyle::default(),
            }),
        )
    }

    pub fn vector(id: impl Into<String>, name: impl Into<String>, paths: Vec<VectorPath>) -> Self {
        Self::new(id, name, NodeKind::Vector(VectorData { paths }))
    }

    /// Set position relative to the parent frame.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    pub fn with_stroke(mut self, paint: Paint, weight: f64) -> Self {
        self.strokes.push(paint);
        self.stroke_weight = weight;
        self
    }

    pub fn with_corner_radius(mut self, radius: CornerRadius) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_layout(mut self, layout: NodeLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_child(mut self, child: DesignNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = DesignNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn as_mask(mut self) -> Self {
        self.is_mask = true;
        self
    }

    pub fn as_root(mut self) -> Self {
        self.is_root = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn instance_of(mut self, component: impl Into<String>) -> Self {
        self.main_component = Some(component.into());
        self
    }

    /// The text payload, if this is a text node.
    pub fn text_data(&self) -> Option<&TextData> {
        match &self.kind {
            Some(NodeKind::Text(data)) => Some(data),
            _ => None,
        }
    }

    /// Whether any direct child is a mask.
    pub fn contains_masking(&self) -> bool {
        self.children.iter().any(|c| c.is_mask)
    }

    /// Depth-first iterator over this node and all descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &DesignNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// The node type tag, with the per-type payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Frame,
    Group,
    Rectangle,
    Line,
    Ellipse(ArcData),
    Text(TextData),
    Vector(VectorData),
    BooleanOperation(BooleanData),
    /// A tag the pipeline has no dedicated handling for (stars, polygons, slices...).
    Unrecognized(String),
}

impl NodeKind {
    /// The tag name as the authoring tool spells it.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Line => "LINE",
            NodeKind::Ellipse(_) => "ELLIPSE",
            NodeKind::Text(_) => "TEXT",
            NodeKind::Vector(_) => "VECTOR",
            NodeKind::BooleanOperation(_) => "BOOLEAN_OPERATION",
            NodeKind::Unrecognized(tag) => tag,
        }
    }

    pub fn is_vector_like(&self) -> bool {
        matches!(self, NodeKind::Vector(_) | NodeKind::BooleanOperation(_))
    }
}

/// Arc parameters of an ellipse, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcData {
    pub starting_angle: f64,
    pub ending_angle: f64,
    /// Inner radius ratio (0 = solid, >0 = ring).
    pub inner_radius: f64,
}

impl ArcData {
    /// Starts at zero and is not hollow. The sweep may stop short of a
    /// full turn.
    pub fn is_standard(&self) -> bool {
        self.starting_angle == 0.0 && self.inner_radius == 0.0
    }
}

impl Default for ArcData {
    fn default() -> Self {
        Self {
            starting_angle: 0.0,
            ending_angle: std::f64::consts::TAU,
            inner_radius: 0.0,
        }
    }
}

/// Text payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextData {
    pub characters: String,
    pub style: TextStyle,
}

/// Typography of a single-style text run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub align: TextAlign,
    pub decoration: TextDecoration,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Roboto".to_string(),
            font_size: 14.0,
            font_weight: 400,
            line_height: None,
            letter_spacing: None,
            align: TextAlign::Left,
            decoration: TextDecoration::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// Vector payload.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorData {
    pub paths: Vec<VectorPath>,
}

/// One SVG path of a vector network.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorPath {
    /// SVG path data (`d` attribute).
    pub data: String,
    pub winding: WindingRule,
}

impl VectorPath {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            winding: WindingRule::NonZero,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Boolean operation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooleanData {
    pub operation: BooleanOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanOp {
    #[default]
    Union,
    Subtract,
    Intersect,
    Exclude,
}

/// Auto-layout properties of a node, both as a container and as a child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeLayout {
    /// Own auto-layout direction (containers only).
    pub mode: LayoutMode,
    /// Alignment inside an auto-layout parent.
    pub align: LayoutAlign,
    /// Flex grow inside an auto-layout parent (0 = fixed).
    pub grow: f64,
    pub item_spacing: f64,
    pub padding: EdgeInsets,
    pub primary_axis: AxisAlignment,
    pub counter_axis: AxisAlignment,
    pub constraints: Constraints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutMode {
    /// Children are absolutely positioned.
    #[default]
    None,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutAlign {
    #[default]
    Inherit,
    /// Fill the parent's cross axis.
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisAlignment {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
}

/// Resizing constraints relative to the parent frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub horizontal: Constraint,
    pub vertical: Constraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    #[default]
    Min,
    Max,
    Center,
    /// Pinned to both edges; the node stretches with its parent.
    Stretch,
    Scale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = DesignNode::frame("1:1", "Card")
            .with_size(100.0, 50.0)
            .with_child(DesignNode::rectangle("1:2", "bg").as_mask());

        assert_eq!(node.kind.as_ref().map(NodeKind::tag), Some("FRAME"));
        assert!(node.contains_masking());
        assert_eq!(node.opacity, 1.0);
    }

    #[test]
    fn test_descendants_preorder() {
        let node = DesignNode::frame("a", "a")
            .with_child(DesignNode::group("b", "b").with_child(DesignNode::rectangle("c", "c")))
            .with_child(DesignNode::rectangle("d", "d"));

        let ids: Vec<&str> = node.descendants().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_arc_standard() {
        assert!(ArcData::default().is_standard());
        let ring = ArcData {
            inner_radius: 0.5,
            ..ArcData::default()
        };
        assert!(!ring.is_standard());
        let half = ArcData {
            ending_angle: std::f64::consts::PI,
            ..ArcData::default()
        };
        assert!(half.is_standard());
        let offset = ArcData {
            starting_angle: 0.5,
            ..ArcData::default()
        };
        assert!(!offset.is_standard());
    }
}
