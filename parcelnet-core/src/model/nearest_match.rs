use super::{NodeId, ParcelId};
use serde::{Deserialize, Serialize};

/// the result of a nearest node search for a single parcel.
///
/// `distance` is in the units of the metric the index was built with:
/// coordinate units for planar search, meters for geodesic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestMatch {
    pub parcel_id: ParcelId,
    pub node_id: NodeId,
    pub distance: f64,
}
