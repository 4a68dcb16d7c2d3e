//! CSS property records and value formatting.

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use std::fmt::Write;
use weft_core::{Color, CornerRadius, EdgeInsets, Gradient, GradientStop, Shadow};

/// An ordered set of CSS declarations (`kebab-case` property names).
///
/// Insertion order is kept for output; equality of two records for
/// deduplication goes through [`CssProperties::canonical_key`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssProperties(IndexMap<String, String>);

impl CssProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value in place.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.0.insert(property.to_string(), value.into());
    }

    /// Set a property only if it is not present yet.
    pub fn set_default(&mut self, property: &str, value: impl Into<String>) {
        self.0.entry(property.to_string()).or_insert_with(|| value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.0.shift_remove(property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Order-independent identity of the declarations.
    pub fn canonical_key(&self) -> String {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable();
        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Declaration block body, one `prop: value;` per line.
    pub fn to_block(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let mut out = String::new();
        for (k, v) in self.iter() {
            let _ = writeln!(out, "{pad}{k}: {v};");
        }
        out
    }

    /// Single-line form for `style="..."` attributes.
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Properties with camelCase names, as React's `style` object expects.
    pub fn camel_cased(&self) -> Vec<(String, &str)> {
        self.iter().map(|(k, v)| (k.to_case(Case::Camel), v)).collect()
    }
}

impl FromIterator<(String, String)> for CssProperties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A number without trailing zeros, at most two decimals.
pub fn number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_string()
    }
}

pub fn px(value: f64) -> String {
    format!("{}px", number(value))
}

pub fn color(color: &Color) -> String {
    color.to_css()
}

pub fn border_radius(radius: &CornerRadius) -> String {
    if radius.is_uniform() {
        px(radius.top_left)
    } else {
        format!(
            "{} {} {} {}",
            px(radius.top_left),
            px(radius.top_right),
            px(radius.bottom_right),
            px(radius.bottom_left)
        )
    }
}

pub fn padding(insets: &EdgeInsets) -> String {
    if insets.top == insets.bottom && insets.left == insets.right {
        if insets.top == insets.left {
            px(insets.top)
        } else {
            format!("{} {}", px(insets.top), px(insets.right))
        }
    } else {
        format!(
            "{} {} {} {}",
            px(insets.top),
            px(insets.right),
            px(insets.bottom),
            px(insets.left)
        )
    }
}

pub fn box_shadow(shadows: &[Shadow]) -> String {
    shadows
        .iter()
        .map(|s| {
            format!(
                "{}{} {} {} {} {}",
                if s.inset { "inset " } else { "" },
                px(s.offset_x),
                px(s.offset_y),
                px(s.blur),
                px(s.spread),
                color(&s.color)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn stops(stops: &[GradientStop]) -> String {
    stops
        .iter()
        .map(|s| format!("{} {}%", color(&s.color), number(s.position * 100.0)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// CSS image function for a gradient. Diamond gradients have no CSS form.
pub fn gradient(gradient: &Gradient) -> Option<String> {
    match gradient {
        Gradient::Linear(g) => Some(format!(
            "linear-gradient({}deg, {})",
            number(g.angle),
            stops(&g.stops)
        )),
        Gradient::Radial(g) => Some(format!(
            "radial-gradient(circle at {}% {}%, {})",
            number(g.center_x * 100.0),
            number(g.center_y * 100.0),
            stops(&g.stops)
        )),
        Gradient::Angular(g) => Some(format!(
            "conic-gradient(from {}deg at 50% 50%, {})",
            number(g.start_angle),
            stops(&g.stops)
        )),
        Gradient::Diamond(_) => None,
    }
}
