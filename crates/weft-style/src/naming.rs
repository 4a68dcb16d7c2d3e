//! Identifier naming for generated declarations.

use convert_case::{Case, Casing};
use std::collections::{HashMap, HashSet};

/// Reserved words per target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedWords {
    /// JavaScript keywords plus identifiers React code relies on.
    React,
    Dart,
    None,
}

impl ReservedWords {
    fn words(self) -> &'static [&'static str] {
        match self {
            ReservedWords::React => &[
                "React", "Fragment", "Component", "styled", "css", "default", "export",
                "import", "function", "return", "class", "const", "let", "var", "new",
                "this", "super", "null", "undefined", "true", "false", "Object", "Array",
                "String", "Number", "Image", "Text", "Node", "Element", "Window", "Document",
            ],
            ReservedWords::Dart => &[
                "Widget", "Container", "Text", "Image", "Icon", "Row", "Column", "Stack",
                "Positioned", "Opacity", "Expanded", "SizedBox", "Padding", "Center",
                "class", "const", "final", "var", "new", "return", "this", "super", "null",
                "true", "false", "void", "dynamic", "Object", "String", "Function",
            ],
            ReservedWords::None => &[],
        }
    }
}

/// Hands out unique PascalCase identifiers within one scope.
///
/// The same requested name yields `Name`, `Name1`, `Name2`, ... and reserved
/// words are never returned as is.
#[derive(Debug)]
pub struct ScopedVariableNamer {
    scope: String,
    reserved: HashSet<&'static str>,
    taken: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl ScopedVariableNamer {
    pub fn new(scope: impl Into<String>, reserved: ReservedWords) -> Self {
        Self {
            scope: scope.into(),
            reserved: reserved.words().iter().copied().collect(),
            taken: HashSet::new(),
            counters: HashMap::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// A fresh identifier derived from `name`.
    pub fn name_it(&mut self, name: &str) -> String {
        let base = legal_identifier(name);
        let mut candidate = base.clone();

        loop {
            if !self.reserved.contains(candidate.as_str()) && !self.taken.contains(&candidate) {
                self.taken.insert(candidate.clone());
                return candidate;
            }
            let counter = self.counters.entry(base.clone()).or_insert(0);
            *counter += 1;
            candidate = format!("{base}{counter}");
        }
    }
}

/// PascalCase identifier that is valid in JavaScript and Dart.
pub fn legal_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let ident = cleaned.to_case(Case::Pascal);

    match ident.chars().next() {
        None => "Wrapper".to_string(),
        Some(c) if c.is_ascii_digit() => format!("N{ident}"),
        Some(_) => ident,
    }
}
