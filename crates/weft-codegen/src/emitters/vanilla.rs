//! Vanilla HTML/CSS emitter.

use super::web::{element_tree, WebStyling};
use super::Emitter;
use crate::config::{VanillaConfig, VanillaStyling};
use crate::error::Result;
use crate::syntax::{Attr, Declaration, Expr, Language, Module, Statement};
use convert_case::{Case, Casing};
use tracing::{debug, warn};
use weft_core::Widget;
use weft_style::{
    AttrValue, Attribute, MapPreferences, ReservedWords, ScopedVariableNamer, StyleEntry,
    StyleMapBuilder, StyleRepository,
};

/// Plain HTML code generator.
pub struct VanillaEmitter {
    config: VanillaConfig,
}

impl VanillaEmitter {
    pub fn new(config: VanillaConfig) -> Self {
        Self { config }
    }
}

impl Emitter for VanillaEmitter {
    fn framework_name(&self) -> &'static str {
        "vanilla"
    }

    fn emit(&self, entry: &Widget) -> Result<Module> {
        let mut namer = ScopedVariableNamer::new(entry.key.id.clone(), ReservedWords::None);
        let name = namer.name_it(entry.unwrapped().key.name());
        let mut module = Module::new(name.clone(), Language::Html);
        module.export_member(&name);

        let root = match self.config.styling {
            VanillaStyling::Css => {
                let preferences = MapPreferences {
                    rename_tag: false,
                    transform_root_name: true,
                };
                let map = StyleMapBuilder::new(entry, &mut namer, preferences);
                let repository = StyleRepository::new(map.into_map(), true);
                module.declarations = repository
                    .uniques()
                    .iter()
                    .map(|d| Declaration::CssRule {
                        selector: format!(".{}", class_name(&d.name)),
                        style: d.style.clone(),
                    })
                    .collect();
                element_tree(entry, &repository, &ClassStyle)
            }
            VanillaStyling::InlineCss => {
                let map = StyleMapBuilder::new(entry, &mut namer, MapPreferences::default());
                let repository = StyleRepository::new(map.into_map(), false);
                element_tree(entry, &repository, &InlineStyle)
            }
        };
        module.body.push(Statement::Return(Expr::Markup(root)));

        debug!(
            scope = namer.scope(),
            component = %module.name,
            rules = module.declarations.len(),
            "Emitted vanilla module"
        );
        Ok(module)
    }
}

fn class_name(declaration: &str) -> String {
    declaration.to_case(Case::Kebab)
}

fn html_attribute(attribute: &Attribute) -> Attr {
    match &attribute.value {
        AttrValue::Str(value) => Attr::str(attribute.name.clone(), value.clone()),
        AttrValue::Css(style) => Attr::str(attribute.name.clone(), style.to_inline()),
    }
}

struct ClassStyle;

struct InlineStyle;

impl WebStyling for ClassStyle {
    fn attribute(&self, attribute: &Attribute) -> Attr {
        html_attribute(attribute)
    }

    fn style_attributes(&self, _id: &str, entry: &StyleEntry) -> Vec<Attr> {
        entry
            .declaration()
            .map(|d| vec![Attr::str("class", class_name(&d.name))])
            .unwrap_or_default()
    }
}

impl WebStyling for InlineStyle {
    fn attribute(&self, attribute: &Attribute) -> Attr {
        html_attribute(attribute)
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
        vec![Attr::str("style", style.to_inline())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{
        Arrangement, ContainerSpec, FinalStyle, ImageRef, ImageSpec, LayoutChild, LayoutSpec,
        TextSpec, TextStyle, WidgetKey, WidgetKind, BoxFit,
    };

    fn card() -> Widget {
        let title = Widget::new(
            WidgetKey::new("t", "Title"),
            FinalStyle::default(),
            WidgetKind::Text(TextSpec {
                data: "Fish & Chips".into(),
                style: TextStyle::default(),
                color: None,
                tag: Some(weft_core::TextTag::H1),
            }),
        );
        let photo = Widget::new(
            WidgetKey::new("p", "Photo"),
            FinalStyle::sized(40.0, 40.0),
            WidgetKind::Image(ImageSpec {
                src: ImageRef::reserved("p"),
                fit: BoxFit::Cover,
                alt: "Photo".into(),
            }),
        );
        Widget::new(
            WidgetKey::new("root", "Card"),
            FinalStyle::sized(200.0, 100.0),
            WidgetKind::Layout(LayoutSpec {
                arrangement: Arrangement::Stack,
                children: vec![
                    LayoutChild { x: 0.0, y: 0.0, widget: title },
                    LayoutChild { x: 0.0, y: 50.0, widget: photo },
                ],
                is_root: true,
            }),
        )
    }

    #[test]
    fn test_class_rules_and_markup() {
        let module = VanillaEmitter::new(VanillaConfig::default()).emit(&card()).unwrap();
        let source = module.to_source();

        assert!(source.starts_with("<style>\n  .root-wrapper-card {\n"));
        assert!(source.contains("<div class=\"root-wrapper-card\">"));
        assert!(source.contains("<h1 class=\"title\">Fish &amp; Chips</h1>"));
        assert!(source.contains(
            "<img src=\"weft://assets-reservation/images/p\" alt=\"Photo\" class=\"photo\" />"
        ));
        assert!(module.dependencies.is_empty());
    }

    #[test]
    fn test_inline_styles() {
        let config = VanillaConfig {
            styling: VanillaStyling::InlineCss,
        };
        let module = VanillaEmitter::new(config).emit(&card()).unwrap();
        assert!(module.declarations.is_empty());
        let source = module.to_source();
        assert!(source.starts_with("<div style=\"width: 200px; height: 100px;"));
        assert!(!source.contains("<style>"));
    }

    #[test]
    fn test_empty_container_class_rule() {
        let empty = Widget::new(
            WidgetKey::new("e", "Spacer"),
            FinalStyle::default(),
            WidgetKind::Container(ContainerSpec::default()),
        );
        let module = VanillaEmitter::new(VanillaConfig::default()).emit(&empty).unwrap();
        assert_eq!(module.declarations.len(), 1);
        assert!(module.to_source().contains("<div class=\"root-wrapper-spacer\"></div>"));
    }
}
