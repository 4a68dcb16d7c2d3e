//! Per-element style entries of one emission.

use crate::css::CssProperties;
use crate::element::{element_of, Attribute};
use crate::naming::{legal_identifier, ScopedVariableNamer};
use crate::resolve::{child_placements, css_of, Placement};
use indexmap::IndexMap;
use weft_core::Widget;

/// A named, shareable style declaration (a styled component or CSS class).
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDeclaration {
    pub name: String,
    /// HTML tag the declaration styles.
    pub html_tag: String,
    pub style: CssProperties,
}

/// How one element is styled.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEntry {
    /// Bare element, no style of any kind.
    NoStyle {
        tag: String,
        attributes: Vec<Attribute>,
    },
    Styled {
        tag: String,
        attributes: Vec<Attribute>,
        style: CssProperties,
        declaration: StyleDeclaration,
    },
}

impl StyleEntry {
    pub fn tag(&self) -> &str {
        match self {
            StyleEntry::NoStyle { tag, .. } | StyleEntry::Styled { tag, .. } => tag,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            StyleEntry::NoStyle { attributes, .. } | StyleEntry::Styled { attributes, .. } => {
                attributes
            }
        }
    }

    pub fn style(&self) -> Option<&CssProperties> {
        match self {
            StyleEntry::NoStyle { .. } => None,
            StyleEntry::Styled { style, .. } => Some(style),
        }
    }

    pub fn declaration(&self) -> Option<&StyleDeclaration> {
        match self {
            StyleEntry::NoStyle { .. } => None,
            StyleEntry::Styled { declaration, .. } => Some(declaration),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MapPreferences {
    /// Replace the element tag with the declaration name (`div` to `Wrapper`).
    pub rename_tag: bool,
    /// Name the root declaration `RootWrapper<Name>`.
    pub transform_root_name: bool,
}

/// Builds the style entry of every element under an entry widget.
///
/// Entries are keyed by the id of each chain's content widget and kept in
/// document (pre-order) order.
pub struct StyleMapBuilder {
    map: IndexMap<String, StyleEntry>,
}

impl StyleMapBuilder {
    pub fn new(
        entry: &Widget,
        namer: &mut ScopedVariableNamer,
        preferences: MapPreferences,
    ) -> Self {
        let mut builder = Self {
            map: IndexMap::new(),
        };
        builder.visit(entry, Placement::Root, namer, preferences);
        builder
    }

    pub fn map(&self) -> &IndexMap<String, StyleEntry> {
        &self.map
    }

    pub fn into_map(self) -> IndexMap<String, StyleEntry> {
        self.map
    }

    fn visit(
        &mut self,
        head: &Widget,
        placement: Placement,
        namer: &mut ScopedVariableNamer,
        preferences: MapPreferences,
    ) {
        let content = head.unwrapped();
        let element = element_of(content);

        let entry = match css_of(head, placement) {
            None => StyleEntry::NoStyle {
                tag: element.tag,
                attributes: element.attributes,
            },
            Some(style) => {
                let name = if placement == Placement::Root && preferences.transform_root_name {
                    let name = legal_identifier(&format!("root wrapper {}", content.key.name()));
                    namer.name_it(&name)
                } else {
                    namer.name_it(content.key.name())
                };
                let declaration = StyleDeclaration {
                    name: name.clone(),
                    html_tag: element.tag.clone(),
                    style: style.clone(),
                };
                StyleEntry::Styled {
                    tag: if preferences.rename_tag { name } else { element.tag },
                    attributes: element.attributes,
                    style,
                    declaration,
                }
            }
        };
        self.map.insert(content.key.id.clone(), entry);

        let placements = child_placements(content);
        for (child, placement) in content.layout_children().iter().zip(placements) {
            self.visit(&child.widget, placement, namer, preferences);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::ReservedWords;
    use weft_core::{
        Arrangement, ContainerSpec, FinalStyle, LayoutChild, LayoutSpec, VectorPath, VectorSpec,
        WidgetKey, WidgetKind,
    };

    fn tree() -> Widget {
        let vector = Widget::new(
            WidgetKey::new("v", "glyph"),
            FinalStyle::sized(8.0, 8.0),
            WidgetKind::Vector(VectorSpec {
                paths: vec![VectorPath::new("M0 0")],
                fill: None,
                stroke: None,
                width: 8.0,
                height: 8.0,
            }),
        );
        let empty = Widget::new(
            WidgetKey::new("e", "spacer"),
            FinalStyle::default(),
            WidgetKind::Container(ContainerSpec::default()),
        );
        Widget::new(
            WidgetKey::new("root", "Card"),
            FinalStyle::sized(100.0, 100.0),
            WidgetKind::Layout(LayoutSpec {
                arrangement: Arrangement::Flex(weft_core::FlexSpec {
                    direction: weft_core::Direction::Row,
                    main_axis: Default::default(),
                    cross_axis: Default::default(),
                    gap: 0.0,
                }),
                children: vec![
                    LayoutChild { x: 0.0, y: 0.0, widget: vector },
                    LayoutChild { x: 0.0, y: 0.0, widget: empty },
                ],
                is_root: true,
            }),
        )
    }

    #[test]
    fn test_null_and_empty_styles_are_distinct() {
        let mut namer = ScopedVariableNamer::new("root", ReservedWords::React);
        let map = StyleMapBuilder::new(&tree(), &mut namer, MapPreferences::default()).into_map();

        assert!(matches!(map["v"], StyleEntry::NoStyle { ref tag, .. } if tag == "svg"));
        let spacer = &map["e"];
        assert_eq!(spacer.style().map(CssProperties::is_empty), Some(true));
        assert_eq!(spacer.declaration().map(|d| d.name.as_str()), Some("Spacer"));
    }

    #[test]
    fn test_root_wrapper_name_and_tag_rename() {
        let mut namer = ScopedVariableNamer::new("root", ReservedWords::React);
        let prefs = MapPreferences {
            rename_tag: true,
            transform_root_name: true,
        };
        let map = StyleMapBuilder::new(&tree(), &mut namer, prefs).into_map();
        assert_eq!(map["root"].tag(), "RootWrapperCard");
        assert_eq!(map["e"].tag(), "Spacer");
        assert_eq!(map["v"].tag(), "svg");
    }
}
