use crate::{
    metric::MetricType,
    model::{NearestMatch, NodeId, ParcelQuery},
    CoordinateError, NearestError, RecordKind,
};
use geo::Point;

/// read-only nearest node lookup shared across query worker threads.
pub trait NearestNodeSearch: Sync {
    fn metric_type(&self) -> MetricType;

    /// number of nodes in the index
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// finds the closest node to a location along with its distance in metric units.
    /// ties are broken by the lowest [`NodeId`]. returns None only for an empty index.
    fn nearest_node(
        &self,
        location: &Point<f64>,
    ) -> Result<Option<(NodeId, f64)>, CoordinateError>;

    /// runs a nearest node search for a single parcel.
    fn query(&self, parcel: &ParcelQuery) -> Result<NearestMatch, NearestError> {
        let (node_id, distance) = self
            .nearest_node(&parcel.location)
            .map_err(|source| {
                NearestError::invalid_coordinate(
                    RecordKind::Parcel,
                    &parcel.parcel_id,
                    &parcel.location,
                    source,
                )
            })?
            .ok_or_else(|| {
                NearestError::InternalError(format!(
                    "spatial index is empty while searching for parcel '{}'",
                    parcel.parcel_id
                ))
            })?;
        Ok(NearestMatch {
            parcel_id: parcel.parcel_id.clone(),
            node_id,
            distance,
        })
    }
}
