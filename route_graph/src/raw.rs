//! Records owned by the street and property repositories. The routing graph only reads these.

use serde::{Deserialize, Serialize};

use geom::LonLat;

use crate::{PropertyID, StreetID};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawStreet {
    pub id: StreetID,
    #[serde(default)]
    pub name: String,
    /// Ordered by `sequence`, although the builder doesn't trust that.
    pub nodes: Vec<RawStreetNode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawStreetNode {
    pub latitude: f64,
    pub longitude: f64,
    pub sequence: usize,
}

impl RawStreetNode {
    pub fn pt(&self) -> LonLat {
        LonLat::new(self.longitude, self.latitude)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawProperty {
    pub id: PropertyID,
    /// The house number or other label
    #[serde(default)]
    pub number: Option<String>,
    /// The street this property is listed on. Routing ignores this and attaches to whatever is
    /// geometrically closest.
    #[serde(default)]
    pub street: Option<StreetID>,
    pub latitude: f64,
    pub longitude: f64,
}

impl RawProperty {
    pub fn pt(&self) -> LonLat {
        LonLat::new(self.longitude, self.latitude)
    }
}

impl RawStreet {
    /// Builds a street from (longitude, latitude) pairs, numbering them in order. Handy for tests
    /// and tools.
    pub fn from_lon_lats(id: StreetID, name: &str, pts: &[(f64, f64)]) -> RawStreet {
        RawStreet {
            id,
            name: name.to_string(),
            nodes: pts
                .iter()
                .enumerate()
                .map(|(sequence, (lon, lat))| RawStreetNode {
                    latitude: *lat,
                    longitude: *lon,
                    sequence,
                })
                .collect(),
        }
    }
}
