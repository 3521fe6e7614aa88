use std::{error, fmt};

use geom::LonLat;

use crate::PropertyID;

/// Conditions a caller of the router may want to tell apart from ordinary faults. These travel
/// inside `anyhow::Error`; use `downcast_ref::<RouteError>()` to recover them.
///
/// Note "no route" isn't here -- that's a successful answer with `found: false`.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteError {
    PropertyNotFound(PropertyID),
    InvalidCoordinate(LonLat),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteError::PropertyNotFound(id) => write!(f, "{} not found", id),
            RouteError::InvalidCoordinate(pt) => write!(f, "{} isn't a valid coordinate", pt),
        }
    }
}

impl error::Error for RouteError {}
