use super::ParcelId;
use geo::Point;
use serde::{Deserialize, Serialize};

/// a parcel centroid submitted to the nearest node search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelQuery {
    pub parcel_id: ParcelId,
    pub location: Point<f64>,
}

impl ParcelQuery {
    pub fn new<I: Into<ParcelId>>(parcel_id: I, x: f64, y: f64) -> ParcelQuery {
        ParcelQuery {
            parcel_id: parcel_id.into(),
            location: Point::new(x, y),
        }
    }
}
