//! React emitter.
//!
//! Inline mode binds each element's computed style as a `style={{...}}`
//! object. Styled mode turns every unique style into a styled component
//! (`const Title = styled.span\`...\``) and renames elements to use it.

use super::web::{element_tree, WebStyling};
use super::Emitter;
use crate::config::ReactConfig;
use crate::error::Result;
use crate::syntax::{Attr, AttrExpr, Declaration, Expr, Import, Module, Statement};
use convert_case::{Case, Casing};
use tracing::{debug, warn};
use weft_core::Widget;
use weft_style::{
    AttrValue, Attribute, CssProperties, MapPreferences, ReservedWords, ScopedVariableNamer,
    StyleEntry, StyleMapBuilder, StyleRepository,
};

/// React code generator.
pub struct ReactEmitter {
    config: ReactConfig,
}

impl ReactEmitter {
    pub fn new(config: ReactConfig) -> Self {
        Self { config }
    }
}

impl Emitter for ReactEmitter {
    fn framework_name(&self) -> &'static str {
        "react"
    }

    fn emit(&self, entry: &Widget) -> Result<Module> {
        let mut namer = ScopedVariableNamer::new(entry.key.id.clone(), ReservedWords::React);
        let name = namer.name_it(entry.unwrapped().key.name());

        let mut module = Module::new(name.clone(), self.config.language.into());
        module.export_member(&name);
        module.export = self.config.exporting.into();
        module.import(Import::default_from("React", "react"));
        module.depend("react");

        let root = match self.config.styling.styled_module() {
            None => {
                let map = StyleMapBuilder::new(entry, &mut namer, MapPreferences::default());
                let repository = StyleRepository::new(map.into_map(), false);
                element_tree(entry, &repository, &InlineStyle)
            }
            Some(styled) => {
                let preferences = MapPreferences {
                    rename_tag: true,
                    transform_root_name: true,
                };
                let map = StyleMapBuilder::new(entry, &mut namer, preferences);
                let repository = StyleRepository::new(map.into_map(), true);

                module.import(Import::default_from("styled", styled.package()));
                module.depend(styled.package());
                module.declarations = repository
                    .uniques()
                    .iter()
                    .map(|d| Declaration::StyledComponent {
                        name: d.name.clone(),
                        tag: d.html_tag.clone(),
                        style: d.style.clone(),
                    })
                    .collect();
                element_tree(entry, &repository, &SharedStyle)
            }
        };
        module.body.push(Statement::Return(Expr::Markup(root)));

        debug!(
            scope = namer.scope(),
            component = %module.name,
            declarations = module.declarations.len(),
            "Emitted React module"
        );
        Ok(module)
    }
}

struct InlineStyle;

struct SharedStyle;

impl WebStyling for InlineStyle {
    fn attribute(&self, attribute: &Attribute) -> Attr {
        jsx_attribute(attribute)
    }

    fn style_attributes(&self, id: &str, entry: &StyleEntry) -> Vec<Attr> {
        let Some(style) = entry.style().filter(|s| !s.is_empty()) else {
            return Vec::new();
        };
        if entry.attributes().iter().any(|a| a.name == "style") {
            warn!(
                node_id = %id,
                tag = %entry.tag(),
                "Element already carries a style attribute, computed style dropped"
            );
            return Vec::new();
        }
        vec![Attr {
            name: "style".to_string(),
            value: style_object(style),
        }]
    }
}

impl WebStyling for SharedStyle {
    fn attribute(&self, attribute: &Attribute) -> Attr {
        jsx_attribute(attribute)
    }

    fn style_attributes(&self, _id: &str, _entry: &StyleEntry) -> Vec<Attr> {
        Vec::new()
    }
}

fn style_object(style: &CssProperties) -> AttrExpr {
    AttrExpr::StyleObject(
        style
            .camel_cased()
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect(),
    )
}

fn jsx_attribute(attribute: &Attribute) -> Attr {
    let name = jsx_name(&attribute.name);
    match &attribute.value {
        AttrValue::Str(value) => Attr::str(name, value.clone()),
        AttrValue::Css(style) => Attr {
            name,
            value: style_object(style),
        },
    }
}

/// DOM attribute names as JSX spells them.
fn jsx_name(name: &str) -> String {
    match name {
        "class" => "className".to_string(),
        "for" => "htmlFor".to_string(),
        _ if name.starts_with("data-") || name.starts_with("aria-") => name.to_string(),
        _ if name.contains('-') => name.to_case(Case::Camel),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ReactLanguage, ReactStyling, StyledModule};
    use weft_core::{
        Arrangement, Color, ContainerSpec, Direction, FinalStyle, FlexSpec, LayoutChild,
        LayoutSpec, TextSpec, TextStyle, VectorPath, VectorSpec, WidgetKey, WidgetKind,
    };

    fn chip(id: &str, color: Color) -> LayoutChild {
        let mut style = FinalStyle::sized(20.0, 20.0);
        style.background = Some(weft_core::Background::Color(color));
        LayoutChild {
            x: 0.0,
            y: 0.0,
            widget: Widget::new(
                WidgetKey::new(id, "chip"),
                style,
                WidgetKind::Container(ContainerSpec::default()),
            ),
        }
    }

    fn row(children: Vec<LayoutChild>) -> Widget {
        Widget::new(
            WidgetKey::new("root", "Chips"),
            FinalStyle::sized(100.0, 20.0),
            WidgetKind::Layout(LayoutSpec {
                arrangement: Arrangement::Flex(FlexSpec {
                    direction: Direction::Row,
                    main_axis: Default::default(),
                    cross_axis: Default::default(),
                    gap: 4.0,
                }),
                children,
                is_root: false,
            }),
        )
    }

    fn styled() -> ReactEmitter {
        ReactEmitter::new(ReactConfig {
            language: ReactLanguage::Tsx,
            styling: ReactStyling::StyledComponents {
                module: StyledModule::Emotion,
            },
            ..ReactConfig::default()
        })
    }

    fn inline() -> ReactEmitter {
        ReactEmitter::new(ReactConfig {
            styling: ReactStyling::InlineCss,
            ..ReactConfig::default()
        })
    }

    #[test]
    fn test_styled_dedup_shares_declaration() {
        let module = styled()
            .emit(&row(vec![chip("a", Color::WHITE), chip("b", Color::WHITE)]))
            .unwrap();
        let names: Vec<_> = module
            .declarations
            .iter()
            .map(|d| match d {
                Declaration::StyledComponent { name, .. } => name.as_str(),
                Declaration::CssRule { selector, .. } => selector.as_str(),
            })
            .collect();
        assert_eq!(names, ["RootWrapperChips", "Chip"]);

        let source = module.to_source();
        assert_eq!(source.matches("<Chip />").count(), 2);
        assert!(source.contains("import styled from \"@emotion/styled\";"));
        assert_eq!(module.dependencies, ["react", "@emotion/styled"]);
    }

    #[test]
    fn test_styled_distinct_colors_keep_two_declarations() {
        let module = styled()
            .emit(&row(vec![chip("a", Color::WHITE), chip("b", Color::BLACK)]))
            .unwrap();
        assert_eq!(module.declarations.len(), 3);
        let source = module.to_source();
        assert!(source.contains("<Chip />"));
        assert!(source.contains("<Chip1 />"));
    }

    #[test]
    fn test_inline_style_object() {
        let module = inline().emit(&row(vec![chip("a", Color::WHITE)])).unwrap();
        assert!(module.declarations.is_empty());
        let source = module.to_source();
        assert!(source.contains(
            "<div style={{ width: \"20px\", height: \"20px\", backgroundColor: \"#FFFFFF\" }} />"
        ));
        assert_eq!(module.dependencies, ["react"]);
    }

    #[test]
    fn test_inline_svg_keeps_own_style() {
        let vector = Widget::new(
            WidgetKey::new("v", "glyph"),
            FinalStyle::sized(8.0, 8.0),
            WidgetKind::Vector(VectorSpec {
                paths: vec![VectorPath::new("M0 0L8 8")],
                fill: Some(Color::BLACK),
                stroke: None,
                width: 8.0,
                height: 8.0,
            }),
        );
        // absolutely placed inside a stack, so the svg gets a computed style
        let stack = Widget::new(
            WidgetKey::new("root", "Frame"),
            FinalStyle::sized(20.0, 20.0),
            WidgetKind::Container(ContainerSpec {
                children: vec![LayoutChild { x: 2.0, y: 2.0, widget: vector }],
                ..ContainerSpec::default()
            }),
        );
        let source = inline().emit(&stack).unwrap().to_source();
        assert!(source.contains("style={{ overflow: \"visible\" }}"));
        assert!(!source.contains("position: \"absolute\""));
    }

    #[test]
    fn test_text_element_and_named_export() {
        let text = Widget::new(
            WidgetKey::new("t", "Title"),
            FinalStyle::default(),
            WidgetKind::Text(TextSpec {
                data: "Hello".into(),
                style: TextStyle::default(),
                color: None,
                tag: None,
            }),
        );
        let emitter = ReactEmitter::new(ReactConfig {
            language: ReactLanguage::Jsx,
            styling: ReactStyling::InlineCss,
            exporting: crate::config::Exporting::Named,
        });
        let module = emitter.emit(&text).unwrap();
        let source = module.to_source();
        assert!(source.starts_with("import React from \"react\";\n\nexport function Title() {"));
        assert!(source.contains(">Hello</span>"));
    }

    #[test]
    fn test_jsx_attribute_names() {
        assert_eq!(jsx_name("fill-rule"), "fillRule");
        assert_eq!(jsx_name("viewBox"), "viewBox");
        assert_eq!(jsx_name("class"), "className");
        assert_eq!(jsx_name("aria-label"), "aria-label");
    }
}
