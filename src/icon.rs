//! Icon resolution, recoloring, and the deduplication registry.
//!
//! Every marker carries two icons, one per [`Role`]: the normal state and the
//! selected (popup open) state. For each role the icon *value* is resolved
//! through a cascade, first non-empty wins:
//!
//! ```text
//! marker role icon → marker icon → defaults role icon → defaults icon → "placeholder"
//! ```
//!
//! The same cascade resolves the icon *color*, with per-role terminal
//! defaults (blue for normal, red for selected). Color only applies to
//! vector icons: each bundled SVG carries exactly one `__FILL__` token that
//! is substituted with the resolved color, which is how one file serves
//! every color. Raster icons are embedded byte-for-byte.
//!
//! A resolved value is tried as a literal file path first, then as the name
//! of a bundled icon. Bundled icons are embedded at compile time, so the
//! binary resolves them without any install-time file layout.
//!
//! The resulting payload is base64-encoded and paired with its media type to
//! form an [`IconAsset`], which the page script turns into a `data:` URL.
//! Assets are interned in an [`IconRegistry`] so that a document with a
//! hundred markers sharing one icon embeds that icon once.

use crate::input::{Marker, MarkerDefaults};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Default fill for normal-state icons (medium blue).
pub const DEFAULT_NORMAL_COLOR: &str = "#2A81CB";
/// Default fill for selected-state icons (red).
pub const DEFAULT_SELECTED_COLOR: &str = "#CB2B3E";

/// The recolor token inside every bundled SVG.
const FILL_TOKEN: &str = "__FILL__";

/// Bundled icon used when no icon is specified anywhere in the cascade.
const FALLBACK_ICON: &str = "placeholder";

const BUILTIN_ICONS: &[(&str, &str)] = &[
    ("placeholder", include_str!("../static/icons/placeholder.svg")),
    ("circle", include_str!("../static/icons/circle.svg")),
    ("star", include_str!("../static/icons/star.svg")),
    ("flag", include_str!("../static/icons/flag.svg")),
    ("home", include_str!("../static/icons/home.svg")),
];

#[derive(Error, Debug)]
pub enum IconError {
    #[error("marker ({lat}, {lng}): icon '{value}' is neither a readable file nor a bundled icon name")]
    UnknownIcon { lat: f64, lng: f64, value: String },
    #[error("marker ({lat}, {lng}): icon '{value}' has an unsupported media type")]
    UnsupportedMedia { lat: f64, lng: f64, value: String },
    #[error("marker ({lat}, {lng}): failed to read icon '{value}': {source}")]
    Read {
        lat: f64,
        lng: f64,
        value: String,
        #[source]
        source: std::io::Error,
    },
}

/// The two visual states a marker's icon can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Normal,
    Selected,
}

impl Role {
    fn default_color(self) -> &'static str {
        match self {
            Role::Normal => DEFAULT_NORMAL_COLOR,
            Role::Selected => DEFAULT_SELECTED_COLOR,
        }
    }
}

/// A resolved, embeddable icon: media type plus base64 payload.
///
/// Identity is structural — two assets with the same mime and payload are
/// the same asset, which is what the registry dedups on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconAsset {
    pub mime: String,
    pub data: String,
}

/// Ordered, append-only collection of unique icon assets.
///
/// Markers reference assets by position, so indices must stay stable once
/// assigned: entries are only ever appended, never reordered or removed.
#[derive(Debug, Default)]
pub struct IconRegistry {
    assets: Vec<IconAsset>,
}

impl IconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of a structurally equal asset, appending if none
    /// exists. Linear scan — registries hold a handful of distinct icons.
    pub fn intern(&mut self, asset: IconAsset) -> usize {
        match self.assets.iter().position(|existing| *existing == asset) {
            Some(index) => index,
            None => {
                self.assets.push(asset);
                self.assets.len() - 1
            }
        }
    }

    pub fn assets(&self) -> &[IconAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// First set value in priority order.
///
/// The single cascade helper behind icon values, colors, and sizes. String
/// call sites pass their sources through [`non_empty`] first, so an
/// explicitly empty override is skipped the same as an absent one.
pub fn cascade<T>(sources: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    sources.into_iter().flatten().next()
}

/// Treat blank strings as unset for cascade purposes.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn role_icon<'a>(marker: &'a Marker, role: Role) -> Option<&'a str> {
    match role {
        // The generic `icon` field doubles as the normal-state value.
        Role::Normal => None,
        Role::Selected => marker.selected_icon.as_deref(),
    }
}

fn role_default_icon<'a>(defaults: &'a MarkerDefaults, role: Role) -> Option<&'a str> {
    match role {
        Role::Normal => None,
        Role::Selected => defaults.selected_icon.as_deref(),
    }
}

fn role_color<'a>(marker: &'a Marker, role: Role) -> Option<&'a str> {
    match role {
        Role::Normal => None,
        Role::Selected => marker.selected_icon_color.as_deref(),
    }
}

fn role_default_color<'a>(defaults: &'a MarkerDefaults, role: Role) -> Option<&'a str> {
    match role {
        Role::Normal => None,
        Role::Selected => defaults.selected_icon_color.as_deref(),
    }
}

/// Resolve one marker's icon for one role into an embeddable asset.
pub fn resolve(
    marker: &Marker,
    defaults: &MarkerDefaults,
    role: Role,
) -> Result<IconAsset, IconError> {
    let value = cascade([
        non_empty(role_icon(marker, role)),
        non_empty(marker.icon.as_deref()),
        non_empty(role_default_icon(defaults, role)),
        non_empty(defaults.icon.as_deref()),
    ])
    .unwrap_or(FALLBACK_ICON);

    let color = cascade([
        non_empty(role_color(marker, role)),
        non_empty(marker.icon_color.as_deref()),
        non_empty(role_default_color(defaults, role)),
        non_empty(defaults.icon_color.as_deref()),
    ])
    .unwrap_or(role.default_color());

    // Literal path wins over a bundled name of the same spelling.
    let path = Path::new(value);
    if path.is_file() {
        return load_file(path, color, marker, value);
    }

    if let Some((_, svg)) = BUILTIN_ICONS.iter().find(|(name, _)| *name == value) {
        return Ok(recolor_svg(svg, color));
    }

    Err(IconError::UnknownIcon {
        lat: marker.latitude,
        lng: marker.longitude,
        value: value.to_string(),
    })
}

fn load_file(
    path: &Path,
    color: &str,
    marker: &Marker,
    value: &str,
) -> Result<IconAsset, IconError> {
    let read_err = |source| IconError::Read {
        lat: marker.latitude,
        lng: marker.longitude,
        value: value.to_string(),
        source,
    };

    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let text = std::fs::read_to_string(path).map_err(read_err)?;
        return Ok(recolor_svg(&text, color));
    }

    // Raster icon: embed bytes verbatim, sniff the media type from content.
    let bytes = std::fs::read(path).map_err(read_err)?;
    let format = image::guess_format(&bytes).map_err(|_| IconError::UnsupportedMedia {
        lat: marker.latitude,
        lng: marker.longitude,
        value: value.to_string(),
    })?;

    Ok(IconAsset {
        mime: format.to_mime_type().to_string(),
        data: STANDARD.encode(&bytes),
    })
}

/// Flatten an SVG to one line and substitute the fill token with the
/// resolved color. Icons without the token pass through unchanged apart
/// from line-break removal.
fn recolor_svg(text: &str, color: &str) -> IconAsset {
    let flat: String = text
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let recolored = flat.replace(FILL_TOKEN, color);

    IconAsset {
        mime: "image/svg+xml".to_string(),
        data: STANDARD.encode(recolored.as_bytes()),
    }
}
