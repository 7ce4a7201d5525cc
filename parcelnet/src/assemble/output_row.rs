use parcelnet_core::model::NearestMatch;
use serde::{Deserialize, Serialize};

/// a row type written to CSV. the header is written even when no rows follow.
pub trait CsvRow: Serialize {
    const HEADER: &'static [&'static str];
}

/// a parcel with its census block and nearest network node
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParcelOutputRow {
    pub parcel_id: String,
    /// empty when the parcel is missing from the block lookup
    pub block_id: Option<String>,
    pub node_id: i64,
    pub distance: f64,
}

impl CsvRow for ParcelOutputRow {
    const HEADER: &'static [&'static str] = &["parcel_id", "block_id", "node_id", "distance"];
}

impl ParcelOutputRow {
    pub fn new(nearest: NearestMatch, block_id: Option<String>) -> ParcelOutputRow {
        ParcelOutputRow {
            parcel_id: nearest.parcel_id.0,
            block_id,
            node_id: nearest.node_id.0,
            distance: nearest.distance,
        }
    }
}

/// a parcel excluded from the output
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RejectedParcelRow {
    pub parcel_id: String,
    pub reason: String,
}

impl CsvRow for RejectedParcelRow {
    const HEADER: &'static [&'static str] = &["parcel_id", "reason"];
}
