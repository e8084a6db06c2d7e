//! Great-circle distance between store coordinates.
//!
//! Distances are in miles throughout; the distance sort and the per-row
//! "x mi away" display both measure from [`NYC_CENTER`].

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Manhattan city-hall area; the fixed reference point for distance sorting
/// and the default camera center.
pub const NYC_CENTER: Coordinate = Coordinate {
    lat: 40.7128,
    lng: -74.0060,
};

/// Default camera zoom for the city-wide view.
pub const DEFAULT_ZOOM: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// True when both components are finite numbers usable for map placement.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Haversine great-circle distance in miles.
///
/// Pure and total for finite inputs; callers filter out invalid coordinates
/// via [`Coordinate::is_valid`] before sorting on the result.
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_miles(NYC_CENTER, NYC_CENTER), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let soho = Coordinate {
            lat: 40.7233,
            lng: -74.0030,
        };
        let williamsburg = Coordinate {
            lat: 40.7081,
            lng: -73.9571,
        };
        let ab = distance_miles(soho, williamsburg);
        let ba = distance_miles(williamsburg, soho);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn known_crosstown_distance() {
        // City hall to the Williamsburg waterfront is roughly 2.6 miles.
        let williamsburg = Coordinate {
            lat: 40.7081,
            lng: -73.9571,
        };
        let d = distance_miles(NYC_CENTER, williamsburg);
        assert!(d > 2.0 && d < 3.5, "got {d}");
    }

    #[test]
    fn farther_point_yields_larger_distance() {
        let near = Coordinate {
            lat: 40.72,
            lng: -74.00,
        };
        let far = Coordinate {
            lat: 40.90,
            lng: -73.80,
        };
        assert!(distance_miles(NYC_CENTER, far) > distance_miles(NYC_CENTER, near));
    }

    #[test]
    fn non_finite_coordinate_is_invalid() {
        let bad = Coordinate {
            lat: f64::NAN,
            lng: -74.0,
        };
        assert!(!bad.is_valid());
        assert!(NYC_CENTER.is_valid());
    }
}
