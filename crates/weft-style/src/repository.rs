//! Style deduplication.

use crate::mapping::{StyleDeclaration, StyleEntry};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Style entries with structurally equal declarations collapsed.
///
/// Two declarations are equal when they style the same HTML tag with the same
/// set of properties, regardless of property order. The first one seen is
/// canonical; later entries are rewritten to refer to it.
#[derive(Debug)]
pub struct StyleRepository {
    entries: IndexMap<String, StyleEntry>,
    uniques: Vec<StyleDeclaration>,
}

impl StyleRepository {
    /// `dedup = false` keeps one declaration per styled element.
    pub fn new(map: IndexMap<String, StyleEntry>, dedup: bool) -> Self {
        let mut canonical: HashMap<String, usize> = HashMap::new();
        let mut uniques: Vec<StyleDeclaration> = Vec::new();
        let mut entries = IndexMap::with_capacity(map.len());

        for (id, mut entry) in map {
            if let StyleEntry::Styled {
                tag, declaration, ..
            } = &mut entry
            {
                let key = format!("{}|{}", declaration.html_tag, declaration.style.canonical_key());
                match canonical.get(&key).filter(|_| dedup) {
                    Some(&index) => {
                        let shared = &uniques[index];
                        if *tag == declaration.name {
                            *tag = shared.name.clone();
                        }
                        *declaration = shared.clone();
                    }
                    None => {
                        canonical.entry(key).or_insert(uniques.len());
                        uniques.push(declaration.clone());
                    }
                }
            }
            entries.insert(id, entry);
        }

        Self { entries, uniques }
    }

    pub fn get(&self, id: &str) -> Option<&StyleEntry> {
        self.entries.get(id)
    }

    /// Canonical declarations in first-seen order.
    pub fn uniques(&self) -> &[StyleDeclaration] {
        &self.uniques
    }
}
