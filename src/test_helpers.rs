//! Shared test utilities for the pinmap test suite.

use crate::icon::{IconAsset, IconRegistry};
use crate::input::{MapSettings, Marker};
use crate::project::{Projection, project_settings};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// A marker with coordinates only; icon attributes via struct update.
pub fn marker_at(latitude: f64, longitude: f64) -> Marker {
    Marker {
        latitude,
        longitude,
        ..Default::default()
    }
}

/// Projection of the empty document: default settings, no markers.
pub fn empty_projection() -> Projection {
    Projection {
        settings: project_settings(&MapSettings::default()),
        markers: Vec::new(),
        registry: IconRegistry::new(),
    }
}

/// Decode an asset payload back to text for content assertions.
pub fn decode_payload(asset: &IconAsset) -> String {
    String::from_utf8(STANDARD.decode(&asset.data).unwrap()).unwrap()
}
