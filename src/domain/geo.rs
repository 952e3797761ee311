//! Great-circle distance between last-known courier positions and order
//! drop-off points.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;

/// Orders farther than this from the courier are never offered.
/// The boundary is inclusive: `distance <= 10.0` km is in range.
pub const MAX_ASSIGNMENT_RADIUS_KM: f64 = 10.0;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidInput(format!(
                "latitude {latitude} out of range [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidInput(format!(
                "longitude {longitude} out of range [-180, 180]"
            )));
        }
        Ok(GeoPoint { latitude, longitude })
    }
}

/// Haversine distance in kilometres between two points on the sphere.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint { latitude, longitude }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = point(9.0300, 38.7400);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = point(9.0300, 38.7400);
        let b = point(9.2000, 38.9000);
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn nearby_order_is_under_a_kilometre() {
        let courier = point(9.0300, 38.7400);
        let order = point(9.0350, 38.7420);
        let d = haversine_km(courier, order);
        assert!(d > 0.4 && d < 1.0, "expected ~0.6 km, got {d}");
    }

    #[test]
    fn distant_order_is_well_outside_the_radius() {
        let courier = point(9.0300, 38.7400);
        let order = point(9.2000, 38.9000);
        let d = haversine_km(courier, order);
        assert!(d > 20.0 && d < 30.0, "expected ~25 km, got {d}");
    }

    #[test]
    fn closer_points_yield_strictly_smaller_distances() {
        let courier = point(9.0300, 38.7400);
        let near = point(9.0350, 38.7420);
        let far = point(9.1000, 38.8000);
        assert!(haversine_km(courier, near) < haversine_km(courier, far));
    }

    #[test]
    fn validated_rejects_out_of_range_coordinates() {
        assert!(GeoPoint::validated(91.0, 0.0).is_err());
        assert!(GeoPoint::validated(-91.0, 0.0).is_err());
        assert!(GeoPoint::validated(0.0, 181.0).is_err());
        assert!(GeoPoint::validated(0.0, -181.0).is_err());
        assert!(GeoPoint::validated(90.0, 180.0).is_ok());
    }
}
