//! Listing coordinates.

use crate::api::GeoPoint;
use serde::{Deserialize, Serialize};

/// Default coordinates (Bengaluru city centre)
pub const DEFAULT_LOCATION: GeoPoint = GeoPoint {
    lat: 12.9716,
    lng: 77.5946,
};

/// Source of the coordinates attached to a new listing
pub trait LocationProvider: Send + Sync {
    fn current_location(&self) -> Option<GeoPoint>;
}

/// `[location]` table of the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub lat: f64,
    pub lng: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            lat: DEFAULT_LOCATION.lat,
            lng: DEFAULT_LOCATION.lng,
        }
    }
}

/// Fixed location taken from the config
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredLocation {
    point: Option<GeoPoint>,
}

impl ConfiguredLocation {
    pub fn new(config: Option<LocationConfig>) -> Self {
        let point = config
            .filter(|c| is_valid_coordinate(c.lat, c.lng))
            .map(|c| GeoPoint { lat: c.lat, lng: c.lng });
        Self { point }
    }

    pub fn fixed(point: GeoPoint) -> Self {
        Self { point: Some(point) }
    }
}

impl LocationProvider for ConfiguredLocation {
    fn current_location(&self) -> Option<GeoPoint> {
        self.point
    }
}

fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location() {
        let provider = ConfiguredLocation::new(Some(LocationConfig::default()));
        assert_eq!(provider.current_location(), Some(DEFAULT_LOCATION));
    }

    #[test]
    fn test_missing_or_invalid_location() {
        assert_eq!(ConfiguredLocation::new(None).current_location(), None);

        let bad = LocationConfig { lat: 91.0, lng: 0.0 };
        assert_eq!(ConfiguredLocation::new(Some(bad)).current_location(), None);
    }
}
