//! Name-embedded flags.
//!
//! Designers steer code generation by appending `--flag` tokens to layer
//! names, e.g. `Hero title --as-h1 --max-width=640`. Tokens that do not start
//! with `--` are ordinary name text, and unknown flags are ignored so that
//! names written for other tools do not break tokenization.

use crate::error::FlagError;
use weft_core::{DesignNode, NodeKind, TextTag};

/// A single recognized flag.
#[derive(Debug, Clone, PartialEq)]
pub enum Flag {
    Ignore,
    /// `--artwork` or `--as-image`.
    Artwork,
    AsText(TextTag),
    MaxWidth(f64),
    MinWidth(f64),
    AsIcon(String),
}

/// The override a node's flags ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagManifest {
    /// Produce no widget at all.
    Ignore,
    /// Rasterize the node as an image.
    Artwork,
    /// Force an icon with the given glyph.
    Icon(String),
    /// Tokenize normally, then adjust the result.
    Modify {
        tag: Option<TextTag>,
        min_width: Option<f64>,
        max_width: Option<f64>,
    },
}

/// Parse every flag in a layer name.
pub fn parse_flags(name: &str) -> Result<Vec<Flag>, FlagError> {
    let mut flags = Vec::new();

    for token in name.split_whitespace() {
        let Some(body) = token.strip_prefix("--") else {
            continue;
        };
        let (key, value) = match body.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (body, None),
        };

        let flag = match key {
            "ignore" => Flag::Ignore,
            "artwork" | "as-image" => Flag::Artwork,
            "as-h1" => Flag::AsText(TextTag::H1),
            "as-h2" => Flag::AsText(TextTag::H2),
            "as-h3" => Flag::AsText(TextTag::H3),
            "as-h4" => Flag::AsText(TextTag::H4),
            "as-h5" => Flag::AsText(TextTag::H5),
            "as-h6" => Flag::AsText(TextTag::H6),
            "as-p" => Flag::AsText(TextTag::P),
            "as-span" => Flag::AsText(TextTag::Span),
            "max-width" => Flag::MaxWidth(length(key, value)?),
            "min-width" => Flag::MinWidth(length(key, value)?),
            "as-icon" => match value {
                Some(glyph) if !glyph.is_empty() => Flag::AsIcon(glyph.to_string()),
                _ => {
                    return Err(FlagError::MissingValue {
                        flag: key.to_string(),
                    })
                }
            },
            _ => continue,
        };
        flags.push(flag);
    }

    Ok(flags)
}

/// Accepts `640` and `640px`.
fn length(flag: &str, value: Option<&str>) -> Result<f64, FlagError> {
    let flag = flag.to_string();
    let raw = value.ok_or_else(|| FlagError::MissingValue { flag: flag.clone() })?;

    raw.trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| FlagError::InvalidValue {
            flag,
            value: raw.to_string(),
        })
}

/// Classify a node's flags into a single override.
///
/// `Ok(None)` means the node carries no flags. Precedence is
/// ignore, artwork, icon, then modifiers.
pub fn gate(node: &DesignNode) -> Result<Option<FlagManifest>, FlagError> {
    let flags = parse_flags(&node.name)?;
    if flags.is_empty() {
        return Ok(None);
    }

    if flags.contains(&Flag::Ignore) {
        return Ok(Some(FlagManifest::Ignore));
    }
    if flags.contains(&Flag::Artwork) {
        return Ok(Some(FlagManifest::Artwork));
    }
    if let Some(glyph) = flags.iter().find_map(|f| match f {
        Flag::AsIcon(glyph) => Some(glyph.clone()),
        _ => None,
    }) {
        return Ok(Some(FlagManifest::Icon(glyph)));
    }

    let mut tag = None;
    let mut min_width = None;
    let mut max_width = None;
    for flag in flags {
        match flag {
            Flag::AsText(t) => {
                if !matches!(node.kind, Some(NodeKind::Text(_))) {
                    return Err(FlagError::NotApplicable {
                        flag: format!("as-{}", t.html()),
                        tag: node.kind.as_ref().map_or("untyped", |k| k.tag()).to_string(),
                    });
                }
                tag = Some(t);
            }
            Flag::MinWidth(w) => min_width = Some(w),
            Flag::MaxWidth(w) => max_width = Some(w),
            Flag::Ignore | Flag::Artwork | Flag::AsIcon(_) => {}
        }
    }

    Ok(Some(FlagManifest::Modify {
        tag,
        min_width,
        max_width,
    }))
}

/// Layer name with all flag tokens removed.
pub fn strip_flags(name: &str) -> String {
    name.split_whitespace()
        .filter(|token| !token.starts_with("--"))
        .collect::<Vec<_>>()
        .join(" ")
}
