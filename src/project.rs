//! Projection of the validated document into the flat shapes the page
//! script consumes.
//!
//! For every marker, in document order: resolve and intern the normal icon,
//! then the selected icon, then emit a [`ProjectedMarker`] holding the two
//! registry indices alongside the resolved sizes and popup. Settings are
//! normalized here too — defaults applied, the zoom-control position reduced
//! to its compact token.
//!
//! Precondition: [`crate::validate`] has passed. Projection does not
//! re-check coordinates.

use crate::icon::{self, IconError, IconRegistry, Role, cascade};
use crate::input::{MapDocument, MapSettings, Marker, MarkerDefaults};
use serde::Serialize;

/// Icon dimensions used when no size is specified anywhere in the cascade.
pub const DEFAULT_ICON_SIZE: [u32; 2] = [40, 40];
pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_ZOOM_POSITION: &str = "topleft";
pub const DEFAULT_ZOOM: u8 = 10;

/// One marker as the page script sees it. Icon fields are indices into the
/// icon registry, which is embedded as an ordered array.
#[derive(Debug, Serialize)]
pub struct ProjectedMarker {
    pub lat: f64,
    pub lng: f64,
    pub popup: String,
    pub icon_size: [u32; 2],
    pub selected_icon_size: [u32; 2],
    pub icon: usize,
    pub selected_icon: usize,
}

/// Normalized display settings. All fields are concrete; defaults have been
/// applied.
#[derive(Debug, Serialize)]
pub struct ProjectedSettings {
    pub title: String,
    pub language: String,
    pub show_zoom_control: bool,
    pub zoom_control_position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    pub zoom: u8,
}

/// Output of the projection stage: everything the assembler needs except
/// the external asset file lists, which stay on the raw settings.
#[derive(Debug)]
pub struct Projection {
    pub settings: ProjectedSettings,
    pub markers: Vec<ProjectedMarker>,
    pub registry: IconRegistry,
}

pub fn project(doc: &MapDocument) -> Result<Projection, IconError> {
    let defaults = &doc.default_marker_settings;
    let mut registry = IconRegistry::new();
    let mut markers = Vec::with_capacity(doc.markers.len());

    for marker in &doc.markers {
        // Normal first, then selected: index assignment order is part of
        // the output contract.
        let normal = registry.intern(icon::resolve(marker, defaults, Role::Normal)?);
        let selected = registry.intern(icon::resolve(marker, defaults, Role::Selected)?);

        markers.push(ProjectedMarker {
            lat: marker.latitude,
            lng: marker.longitude,
            popup: marker.popup.clone().unwrap_or_default(),
            icon_size: resolve_size(marker, defaults, Role::Normal),
            selected_icon_size: resolve_size(marker, defaults, Role::Selected),
            icon: normal,
            selected_icon: selected,
        });
    }

    Ok(Projection {
        settings: project_settings(&doc.map_settings),
        markers,
        registry,
    })
}

fn resolve_size(marker: &Marker, defaults: &MarkerDefaults, role: Role) -> [u32; 2] {
    let role_size = match role {
        Role::Normal => None,
        Role::Selected => marker.selected_icon_size,
    };
    let role_default = match role {
        Role::Normal => None,
        Role::Selected => defaults.selected_icon_size,
    };
    cascade([role_size, marker.icon_size, role_default, defaults.icon_size])
        .unwrap_or(DEFAULT_ICON_SIZE)
}

pub fn project_settings(settings: &MapSettings) -> ProjectedSettings {
    let position = settings
        .zoom_control_position
        .as_deref()
        .map(strip_whitespace)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_ZOOM_POSITION.to_string());

    ProjectedSettings {
        title: icon::non_empty(settings.title.as_deref())
            .unwrap_or(DEFAULT_TITLE)
            .to_string(),
        language: icon::non_empty(settings.language.as_deref())
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string(),
        show_zoom_control: settings.show_zoom_control.unwrap_or(true),
        zoom_control_position: position,
        center: settings.center,
        zoom: settings.zoom.unwrap_or(DEFAULT_ZOOM),
    }
}

/// The rendering layer expects a compact corner token (`topleft`), not a
/// human-readable label (`top left`).
fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse;
    use crate::test_helpers::marker_at;

    // =========================================================================
    // Settings normalization
    // =========================================================================

    #[test]
    fn all_default_settings() {
        let settings = project_settings(&MapSettings::default());
        assert_eq!(settings.title, "Untitled");
        assert_eq!(settings.language, "en");
        assert!(settings.show_zoom_control);
        assert_eq!(settings.zoom_control_position, "topleft");
        assert_eq!(settings.center, None);
        assert_eq!(settings.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn zoom_position_whitespace_is_stripped() {
        let settings = project_settings(&MapSettings {
            zoom_control_position: Some("bottom  right".to_string()),
            ..Default::default()
        });
        assert_eq!(settings.zoom_control_position, "bottomright");
    }

    #[test]
    fn blank_title_falls_back_to_untitled() {
        let settings = project_settings(&MapSettings {
            title: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(settings.title, "Untitled");
    }

    #[test]
    fn explicit_settings_survive() {
        let settings = project_settings(&MapSettings {
            title: Some("Trip".to_string()),
            language: Some("pt".to_string()),
            show_zoom_control: Some(false),
            center: Some([38.7, -9.1]),
            zoom: Some(13),
            ..Default::default()
        });
        assert_eq!(settings.title, "Trip");
        assert_eq!(settings.language, "pt");
        assert!(!settings.show_zoom_control);
        assert_eq!(settings.center, Some([38.7, -9.1]));
        assert_eq!(settings.zoom, 13);
    }

    // =========================================================================
    // Size cascade
    // =========================================================================

    #[test]
    fn size_falls_back_to_40x40() {
        let marker = marker_at(1.0, 2.0);
        let size = resolve_size(&marker, &MarkerDefaults::default(), Role::Normal);
        assert_eq!(size, DEFAULT_ICON_SIZE);
    }

    #[test]
    fn selected_size_beats_generic_size() {
        let marker = Marker {
            icon_size: Some([20, 20]),
            selected_icon_size: Some([50, 50]),
            ..marker_at(1.0, 2.0)
        };
        let defaults = MarkerDefaults::default();
        assert_eq!(resolve_size(&marker, &defaults, Role::Normal), [20, 20]);
        assert_eq!(resolve_size(&marker, &defaults, Role::Selected), [50, 50]);
    }

    #[test]
    fn default_size_fills_in_for_marker() {
        let marker = marker_at(1.0, 2.0);
        let defaults = MarkerDefaults {
            icon_size: Some([32, 48]),
            ..Default::default()
        };
        assert_eq!(resolve_size(&marker, &defaults, Role::Selected), [32, 48]);
    }

    // =========================================================================
    // Marker projection and interning
    // =========================================================================

    #[test]
    fn markers_sharing_an_icon_share_an_index() {
        let doc = parse(
            "markers:\n\
             \x20 - latitude: 1.0\n\
             \x20   longitude: 2.0\n\
             \x20 - latitude: 3.0\n\
             \x20   longitude: 4.0\n",
        )
        .unwrap();
        let projection = project(&doc).unwrap();

        // Both markers resolve to the placeholder: blue normal, red selected.
        assert_eq!(projection.registry.len(), 2);
        assert_eq!(projection.markers[0].icon, 0);
        assert_eq!(projection.markers[0].selected_icon, 1);
        assert_eq!(projection.markers[1].icon, 0);
        assert_eq!(projection.markers[1].selected_icon, 1);
    }

    #[test]
    fn indices_follow_first_seen_order() {
        let doc = parse(
            "markers:\n\
             \x20 - latitude: 1.0\n\
             \x20   longitude: 2.0\n\
             \x20   icon: star\n\
             \x20 - latitude: 3.0\n\
             \x20   longitude: 4.0\n\
             \x20   icon: circle\n\
             \x20 - latitude: 5.0\n\
             \x20   longitude: 6.0\n\
             \x20   icon: star\n",
        )
        .unwrap();
        let projection = project(&doc).unwrap();

        // star-normal, star-selected, circle-normal, circle-selected
        assert_eq!(projection.registry.len(), 4);
        assert_eq!(projection.markers[0].icon, 0);
        assert_eq!(projection.markers[1].icon, 2);
        assert_eq!(projection.markers[2].icon, 0);
        assert_eq!(projection.markers[2].selected_icon, 1);
    }

    #[test]
    fn differing_color_means_a_distinct_asset() {
        let doc = parse(
            "markers:\n\
             \x20 - latitude: 1.0\n\
             \x20   longitude: 2.0\n\
             \x20   icon: star\n\
             \x20 - latitude: 3.0\n\
             \x20   longitude: 4.0\n\
             \x20   icon: star\n\
             \x20   icon_color: \"#00ff00\"\n",
        )
        .unwrap();
        let projection = project(&doc).unwrap();
        assert_ne!(projection.markers[0].icon, projection.markers[1].icon);
    }

    #[test]
    fn popup_defaults_to_empty_string() {
        let doc = parse("markers:\n  - latitude: 1.0\n    longitude: 2.0\n").unwrap();
        let projection = project(&doc).unwrap();
        assert_eq!(projection.markers[0].popup, "");
    }

    #[test]
    fn empty_document_projects_to_empty_registry() {
        let projection = project(&MapDocument::default()).unwrap();
        assert!(projection.markers.is_empty());
        assert!(projection.registry.is_empty());
    }

    #[test]
    fn unknown_icon_aborts_projection() {
        let doc = parse(
            "markers:\n\
             \x20 - latitude: 1.0\n\
             \x20   longitude: 2.0\n\
             \x20   icon: bogus-name\n",
        )
        .unwrap();
        assert!(project(&doc).is_err());
    }
}
