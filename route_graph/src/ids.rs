use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct StreetID(pub usize);

impl fmt::Display for StreetID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Street #{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PropertyID(pub usize);

impl fmt::Display for PropertyID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Property #{}", self.0)
    }
}

/// Every node in the routing graph is one of these.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum NodeID {
    /// A point as drawn on a street
    Street { street: StreetID, seq: usize },
    /// Inserted where two street segments cross without sharing a point. Numbered from 1 per
    /// build.
    Junction(usize),
    /// Inserted into a per-query graph to attach an origin or destination to the middle of an
    /// edge.
    Attachment(usize),
}

impl NodeID {
    pub fn street(self) -> Option<StreetID> {
        match self {
            NodeID::Street { street, .. } => Some(street),
            NodeID::Junction(_) | NodeID::Attachment(_) => None,
        }
    }

    pub fn seq(self) -> Option<usize> {
        match self {
            NodeID::Street { seq, .. } => Some(seq),
            NodeID::Junction(_) | NodeID::Attachment(_) => None,
        }
    }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeID::Street { street, seq } => write!(f, "{}:{}", street.0, seq),
            NodeID::Junction(x) => write!(f, "X:{}", x),
            NodeID::Attachment(x) => write!(f, "A:{}", x),
        }
    }
}
