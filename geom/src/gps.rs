use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D, EPSILON_DEGREES};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Junctions found from different pairs of segments are deduplicated at this precision.
const HASH_PRECISION: f64 = 1e8;

// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    pub fn x(&self) -> f64 {
        self.longitude
    }

    pub fn y(&self) -> f64 {
        self.latitude
    }

    /// Great-circle distance, using the haversine formula.
    pub fn gps_dist(self, other: LonLat) -> Distance {
        let lon1 = self.longitude.to_radians();
        let lon2 = other.longitude.to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        // Rounding near antipodes (or latitudes out of range) can push this outside [0, 1]
        let a = ((delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos())
        .clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(EARTH_RADIUS_METERS * c)
    }

    pub fn center(pts: &[LonLat]) -> LonLat {
        let mut lon = 0.0;
        let mut lat = 0.0;
        for pt in pts {
            lon += pt.longitude;
            lat += pt.latitude;
        }
        let len = pts.len() as f64;
        LonLat {
            longitude: lon / len,
            latitude: lat / len,
        }
    }

    /// A real point on the globe: finite, latitude within [-90, 90] and longitude within
    /// [-180, 180]. Anything else is degenerate input and must not reach distance or projection
    /// calculations, where it overflows into NaN.
    pub fn is_valid(self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    pub fn approx_eq(self, other: LonLat) -> bool {
        (self.longitude - other.longitude).abs() < EPSILON_DEGREES
            && (self.latitude - other.latitude).abs() < EPSILON_DEGREES
    }

    /// Equirectangular projection into meters. Only meaningful near `ref_lat_radians`.
    pub fn to_local_pt(self, ref_lat_radians: f64) -> Pt2D {
        Pt2D::new(
            EARTH_RADIUS_METERS * self.longitude.to_radians() * ref_lat_radians.cos(),
            EARTH_RADIUS_METERS * self.latitude.to_radians(),
        )
    }

    /// Inverse of `to_local_pt`.
    pub fn from_local_pt(pt: Pt2D, ref_lat_radians: f64) -> LonLat {
        LonLat::new(
            (pt.x() / (EARTH_RADIUS_METERS * ref_lat_radians.cos())).to_degrees(),
            (pt.y() / EARTH_RADIUS_METERS).to_degrees(),
        )
    }

    pub fn to_hashable(self) -> HashableLonLat {
        HashableLonLat {
            lon: (self.longitude * HASH_PRECISION).round() as i64,
            lat: (self.latitude * HASH_PRECISION).round() as i64,
        }
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

/// A `LonLat` rounded to 8 decimal places, usable as a map key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct HashableLonLat {
    lon: i64,
    lat: i64,
}
