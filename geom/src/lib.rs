//! Geometry primitives for routing over hand-drawn street networks. Everything is expressed in
//! WGS84 degrees; `Pt2D` is only used transiently, in a local planar frame around the points being
//! compared.

mod distance;
mod gps;
mod line;
mod pt;

pub use crate::distance::Distance;
pub use crate::gps::{HashableLonLat, LonLat, EARTH_RADIUS_METERS};
pub use crate::line::{GPSLine, SegmentProjection};
pub use crate::pt::Pt2D;

/// Two coordinates closer than this many degrees on both axes are considered the same point.
pub const EPSILON_DEGREES: f64 = 1e-9;
