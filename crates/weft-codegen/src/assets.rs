//! Asset finalization.
//!
//! Emitters write image sources as reserved references
//! (`weft://assets-reservation/images/<key>`). Once code exists, every key
//! found in the text is fetched from an [`AssetRepository`] concurrently,
//! the results are frozen into an [`AssetTable`], and a single substitution
//! pass rewrites the text. Keys that fail to resolve become
//! [`FALLBACK_IMAGE_SOURCE`], so no reserved reference survives.
//!
//! A key runs from the prefix to the first whitespace, quote, backslash,
//! parenthesis or angle bracket, which is where every emitter ends a source
//! string or `url()` value.

use async_trait::async_trait;
use futures::future::join_all;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};
use weft_core::{ASSET_RESERVATION_PREFIX, FALLBACK_IMAGE_SOURCE};

/// Per-key fetch failures. These never fail an emission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Asset '{0}' not found")]
    NotFound(String),

    #[error("Failed to fetch asset '{key}': {reason}")]
    Fetch { key: String, reason: String },
}

/// Source of final image data (URLs or data URIs) for reserved keys.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    fn is_empty(&self) -> bool;

    async fn fetch(&self, key: &str) -> Result<String, AssetError>;

    /// Fetch every key concurrently. Results keep the order of `keys`.
    async fn fetch_all(&self, keys: &[String]) -> IndexMap<String, Result<String, AssetError>> {
        let results = join_all(keys.iter().map(|key| self.fetch(key))).await;
        keys.iter().cloned().zip(results).collect()
    }
}

/// Options of the asset pass.
#[derive(Clone, Copy, Default)]
pub struct AssetConfig<'a> {
    pub repository: Option<&'a dyn AssetRepository>,
    /// Leave reserved references in the output (fast preview pass).
    pub skip_asset_replacement: bool,
}

/// Immutable key to value table used for substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetTable(IndexMap<String, String>);

impl AssetTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
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
}

impl FromIterator<(String, String)> for AssetTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn reservation() -> Option<&'static Regex> {
    static RESERVATION: OnceLock<Option<Regex>> = OnceLock::new();
    RESERVATION
        .get_or_init(|| {
            Regex::new(&format!(
                r#"{}([^\s"'`<>()\\]+)"#,
                regex::escape(ASSET_RESERVATION_PREFIX)
            ))
            .ok()
        })
        .as_ref()
}

/// Reserved keys referenced in `text`, unique, in order of appearance.
pub fn reserved_keys(text: &str) -> Vec<String> {
    let Some(pattern) = reservation() else {
        return Vec::new();
    };
    let mut keys: Vec<String> = Vec::new();
    for captures in pattern.captures_iter(text) {
        let key = &captures[1];
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Resolve `keys` to final values. Every key gets an entry; failures map to
/// the fallback image.
pub async fn resolve_assets(repository: Option<&dyn AssetRepository>, keys: &[String]) -> AssetTable {
    let mut results = match repository {
        Some(repository) if !repository.is_empty() && !keys.is_empty() => {
            repository.fetch_all(keys).await
        }
        _ => IndexMap::new(),
    };

    let table: AssetTable = keys
        .iter()
        .map(|key| {
            let value = match results.swap_remove(key) {
                Some(Ok(value)) => value,
                Some(Err(err)) => {
                    warn!(key = %key, error = %err, "Asset unresolved, using fallback image");
                    FALLBACK_IMAGE_SOURCE.to_string()
                }
                None => {
                    warn!(key = %key, "No asset source for key, using fallback image");
                    FALLBACK_IMAGE_SOURCE.to_string()
                }
            };
            (key.clone(), value)
        })
        .collect();

    debug!(assets = table.len(), "Resolved assets");
    table
}

/// Replace every reserved reference in `text` with its table value, or the
/// fallback image when the table has none.
pub fn substitute(text: &str, table: &AssetTable) -> String {
    let Some(pattern) = reservation() else {
        return text.to_string();
    };
    pattern
        .replace_all(text, |captures: &Captures| {
            table
                .get(&captures[1])
                .unwrap_or(FALLBACK_IMAGE_SOURCE)
                .to_string()
        })
        .into_owned()
}

/// Collect, resolve and substitute the reserved references of several texts
/// sharing one table.
pub async fn finalize_assets(texts: &[&str], repository: Option<&dyn AssetRepository>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for text in texts {
        for key in reserved_keys(text) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    let table = resolve_assets(repository, &keys).await;
    texts.iter().map(|text| substitute(text, &table)).collect()
}
