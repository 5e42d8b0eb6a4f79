use std::fmt;

use thiserror::Error;

const LAT_DEG_MAX: f64 = 90.0;
const LAT_DEG_MIN: f64 = -90.0;
const LNG_DEG_MAX: f64 = 180.0;
const LNG_DEG_MIN: f64 = -180.0;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MapPointError {
    #[error("Latitude out of range")]
    Latitude,
    #[error("Longitude out of range")]
    Longitude,
}

/// A geographical position given as latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Result<Self, MapPointError> {
        if !(LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat) {
            return Err(MapPointError::Latitude);
        }
        if !(LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng) {
            return Err(MapPointError::Longitude);
        }
        Ok(Self::from_lat_lng_deg(lat, lng))
    }

    pub const fn lat_deg(self) -> f64 {
        self.lat
    }

    pub const fn lng_deg(self) -> f64 {
        self.lng
    }

    /// Euclidean distance in degrees.
    ///
    /// Latitude and longitude are treated as planar coordinates,
    /// i.e. neither the curvature of the earth nor the shrinking
    /// width of longitude degrees towards the poles is considered.
    pub fn planar_distance_to(self, other: MapPoint) -> f64 {
        (self.lat - other.lat).hypot(self.lng - other.lng)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
