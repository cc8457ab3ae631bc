//! Geo primitives shared by the geo queries

use serde::Serialize;
use serde_json::{json, Value};

/// A latitude/longitude pair, serialized as `{"lat": …, "lon": …}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for GeoPoint {
    /// `(lat, lon)` tuple order.
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<GeoPoint> for Value {
    fn from(point: GeoPoint) -> Self {
        json!({"lat": point.lat, "lon": point.lon})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geo_point_wire_form() {
        let point = GeoPoint::new(40.5, -73.75);
        assert_eq!(
            serde_json::to_value(point).unwrap(),
            json!({"lat": 40.5, "lon": -73.75})
        );
    }

    #[test]
    fn test_geo_point_from_tuple_is_lat_lon() {
        let point = GeoPoint::from((40.5, -73.75));
        assert_eq!(point.lat, 40.5);
        assert_eq!(point.lon, -73.75);
    }
}
