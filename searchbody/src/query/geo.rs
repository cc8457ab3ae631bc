//! Geo query builders

use crate::geo::GeoPoint;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// How distances are computed on the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceType {
    Arc,
    Plane,
}

/// Matches documents within `distance` of an origin point.
///
/// The distance expression (`"12km"`, `"200m"`) is stored verbatim and left
/// for the search service to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDistanceQuery {
    field: String,
    distance: String,
    origin: GeoPoint,
    distance_type: Option<DistanceType>,
    boost: Option<f32>,
}

impl GeoDistanceQuery {
    pub fn new(
        field: impl Into<String>,
        distance: impl Into<String>,
        origin: impl Into<GeoPoint>,
    ) -> Self {
        Self {
            field: field.into(),
            distance: distance.into(),
            origin: origin.into(),
            distance_type: None,
            boost: None,
        }
    }

    pub fn distance_type(mut self, distance_type: DistanceType) -> Self {
        self.distance_type = Some(distance_type);
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Serialize for GeoDistanceQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // The origin sits under the field name, next to the fixed keys.
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("distance", &self.distance)?;
        if let Some(distance_type) = self.distance_type {
            map.serialize_entry("distance_type", &distance_type)?;
        }
        map.serialize_entry(&self.field, &self.origin)?;
        if let Some(boost) = self.boost {
            map.serialize_entry("boost", &boost)?;
        }
        map.end()
    }
}

/// Matches documents inside a rectangle of two corner points.
///
/// Both corners are required at construction; there is no partially-set
/// state to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoBoundingBoxQuery {
    field: String,
    bounds: BoundingBox,
    boost: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct BoundingBox {
    top_left: GeoPoint,
    bottom_right: GeoPoint,
}

impl GeoBoundingBoxQuery {
    pub fn new(
        field: impl Into<String>,
        top_left: impl Into<GeoPoint>,
        bottom_right: impl Into<GeoPoint>,
    ) -> Self {
        Self {
            field: field.into(),
            bounds: BoundingBox {
                top_left: top_left.into(),
                bottom_right: bottom_right.into(),
            },
            boost: None,
        }
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Serialize for GeoBoundingBoxQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = if self.boost.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry(&self.field, &self.bounds)?;
        if let Some(boost) = self.boost {
            map.serialize_entry("boost", &boost)?;
        }
        map.end()
    }
}
