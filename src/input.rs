//! Map document parsing.
//!
//! The input is a YAML document with three optional top-level sections:
//!
//! ```text
//! map_settings:                  # display options for the page
//!   title: Coffee in Lisbon
//!   zoom_control_position: top right
//!   external_css: [extra.css]
//! default_marker_settings:       # fallback values for any marker attribute
//!   icon: star
//!   icon_color: "#8800cc"
//! markers:                       # ordered list of points of interest
//!   - latitude: 38.7169
//!     longitude: -9.1399
//!     popup: "<b>Fábrica</b>"
//!   - latitude: 38.7223
//!     longitude: -9.1393
//!     icon: photos/shop.png
//! ```
//!
//! Typed deserialization doubles as the structural schema check: unknown keys
//! are rejected and type mismatches surface as parse errors with the
//! offending location. Semantic checks (coordinate ranges, uniqueness) live
//! in [`crate::validate`].
//!
//! Empty or whitespace-only input is valid and parses to the all-default
//! document: no markers, default settings.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root of the map document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapDocument {
    #[serde(default)]
    pub map_settings: MapSettings,
    #[serde(default)]
    pub default_marker_settings: MarkerDefaults,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

/// Display options for the generated page. Every field is optional; defaults
/// are applied during projection, not here, so the raw document round-trips
/// losslessly.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapSettings {
    pub title: Option<String>,
    /// BCP 47 tag for the `<html lang>` attribute
    pub language: Option<String>,
    pub show_zoom_control: Option<bool>,
    /// Corner for the zoom control, e.g. `top left`. Internal whitespace is
    /// stripped during projection to form the compact position token.
    pub zoom_control_position: Option<String>,
    /// Initial view center `[lat, lng]`. When absent the view fits the markers.
    pub center: Option<[f64; 2]>,
    pub zoom: Option<u8>,
    /// Extra stylesheet files inlined into the page, in order.
    #[serde(default)]
    pub external_css: Vec<PathBuf>,
    /// Extra script files inlined into the page, in order.
    #[serde(default)]
    pub external_js: Vec<PathBuf>,
}

/// Fallback values for any per-marker attribute.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerDefaults {
    pub icon: Option<String>,
    pub selected_icon: Option<String>,
    pub icon_color: Option<String>,
    pub selected_icon_color: Option<String>,
    pub icon_size: Option<[u32; 2]>,
    pub selected_icon_size: Option<[u32; 2]>,
}

/// A point of interest. Only the coordinates are required; every icon
/// attribute cascades to the document defaults and then to fixed fallbacks.
///
/// `icon` values are either a path to an image file or the name of a bundled
/// icon (see [`crate::icon`]).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub icon: Option<String>,
    pub selected_icon: Option<String>,
    pub icon_color: Option<String>,
    pub selected_icon_color: Option<String>,
    pub icon_size: Option<[u32; 2]>,
    pub selected_icon_size: Option<[u32; 2]>,
    /// Free HTML shown when the marker is selected.
    pub popup: Option<String>,
}

/// Parse a YAML map document. Empty input is the empty document.
pub fn parse(source: &str) -> Result<MapDocument, InputError> {
    if source.trim().is_empty() {
        return Ok(MapDocument::default());
    }
    Ok(serde_yaml::from_str(source)?)
}
