//! Element tree shared by the React and vanilla emitters.

use crate::syntax::{Attr, Element, Markup};
use weft_core::Widget;
use weft_style::{element_of, Attribute, ElementSpec, StyleEntry, StyleRepository};

/// Per-target attribute spelling and style binding.
pub(crate) trait WebStyling {
    /// A fixed attribute of the element, in the target's syntax.
    fn attribute(&self, attribute: &Attribute) -> Attr;

    /// Attributes that bind the element's computed style, if any.
    fn style_attributes(&self, id: &str, entry: &StyleEntry) -> Vec<Attr>;
}

/// Build the element for a widget chain and, recursively, its children.
pub(crate) fn element_tree(
    head: &Widget,
    repository: &StyleRepository,
    styling: &impl WebStyling,
) -> Element {
    let content = head.unwrapped();
    let spec = element_of(content);

    let (tag, attributes) = match repository.get(&content.key.id) {
        Some(entry) => {
            let mut attributes: Vec<Attr> =
                entry.attributes().iter().map(|a| styling.attribute(a)).collect();
            attributes.extend(styling.style_attributes(&content.key.id, entry));
            (entry.tag().to_string(), attributes)
        }
        None => {
            let attributes = spec.attributes.iter().map(|a| styling.attribute(a)).collect();
            (spec.tag.clone(), attributes)
        }
    };

    let mut children: Vec<Markup> = Vec::new();
    if let Some(text) = &spec.text {
        children.push(Markup::Text(text.clone()));
    }
    children.extend(
        spec.children
            .iter()
            .map(|child| Markup::Element(static_element(child, styling))),
    );
    children.extend(
        content
            .layout_children()
            .iter()
            .map(|child| Markup::Element(element_tree(&child.widget, repository, styling))),
    );

    Element {
        tag,
        attributes,
        children,
    }
}

fn static_element(spec: &ElementSpec, styling: &impl WebStyling) -> Element {
    let mut children: Vec<Markup> = spec.text.iter().cloned().map(Markup::Text).collect();
    children.extend(
        spec.children
            .iter()
            .map(|child| Markup::Element(static_element(child, styling))),
    );
    Element {
        tag: spec.tag.clone(),
        attributes: spec.attributes.iter().map(|a| styling.attribute(a)).collect(),
        children,
    }
}
