//! Semantic validation of a parsed map document.
//!
//! Structural correctness (keys, types) is already enforced by typed
//! deserialization in [`crate::input`]. This module checks what the schema
//! cannot express:
//!
//! - latitude within [-90, 90], longitude within [-180, 180]
//! - coordinate pairs unique across the document
//!
//! All violations are marker-scoped: the message leads with the offending
//! marker's coordinate pair so the user can find it in a long document.
//! Downstream stages assume validation has passed and do not re-check.

use crate::input::MapDocument;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("marker ({0}, {1}): latitude out of range, must be within -90..90")]
    LatitudeRange(f64, f64),
    #[error("marker ({0}, {1}): longitude out of range, must be within -180..180")]
    LongitudeRange(f64, f64),
    #[error("marker ({0}, {1}): duplicate coordinates")]
    DuplicateCoordinates(f64, f64),
}

pub fn validate(doc: &MapDocument) -> Result<(), ValidateError> {
    let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(doc.markers.len());

    for marker in &doc.markers {
        let (lat, lng) = (marker.latitude, marker.longitude);
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidateError::LatitudeRange(lat, lng));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ValidateError::LongitudeRange(lat, lng));
        }
        // Bit-exact identity: markers count as duplicates only when their
        // written coordinates match exactly.
        if !seen.insert((lat.to_bits(), lng.to_bits())) {
            return Err(ValidateError::DuplicateCoordinates(lat, lng));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse;

    fn doc_with_coords(coords: &[(f64, f64)]) -> MapDocument {
        let mut yaml = String::from("markers:\n");
        for (lat, lng) in coords {
            yaml.push_str(&format!("  - latitude: {lat}\n    longitude: {lng}\n"));
        }
        parse(&yaml).unwrap()
    }

    #[test]
    fn accepts_valid_markers() {
        let doc = doc_with_coords(&[(0.0, 0.0), (-90.0, 180.0), (90.0, -180.0)]);
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn accepts_empty_document() {
        assert!(validate(&MapDocument::default()).is_ok());
    }

    #[test]
    fn rejects_latitude_above_range() {
        let doc = doc_with_coords(&[(91.0, 10.0)]);
        let err = validate(&doc).unwrap_err();
        assert!(matches!(err, ValidateError::LatitudeRange(lat, _) if lat == 91.0));
        assert!(err.to_string().contains("(91, 10)"));
    }

    #[test]
    fn rejects_longitude_below_range() {
        let doc = doc_with_coords(&[(10.0, -180.5)]);
        assert!(matches!(
            validate(&doc).unwrap_err(),
            ValidateError::LongitudeRange(_, _)
        ));
    }

    #[test]
    fn rejects_duplicate_coordinates() {
        let doc = doc_with_coords(&[(1.0, 2.0), (3.0, 4.0), (1.0, 2.0)]);
        let err = validate(&doc).unwrap_err();
        assert!(matches!(
            err,
            ValidateError::DuplicateCoordinates(lat, lng) if lat == 1.0 && lng == 2.0
        ));
        assert!(err.to_string().starts_with("marker (1, 2)"));
    }

    #[test]
    fn range_check_runs_before_duplicate_check() {
        let doc = doc_with_coords(&[(200.0, 0.0), (200.0, 0.0)]);
        assert!(matches!(
            validate(&doc).unwrap_err(),
            ValidateError::LatitudeRange(_, _)
        ));
    }
}
