use super::{NearestNodeSearch, SpatialIndex};
use crate::{
    metric::{Geodesic, MetricType, Planar},
    model::{NodeId, NodeRecord},
    CoordinateError, NearestError,
};
use geo::Point;

/// a spatial index whose metric is chosen at runtime. exactly one index is built
/// per run, the variant is fixed at construction.
pub enum NodeIndex {
    Planar(SpatialIndex<Planar>),
    Geodesic(SpatialIndex<Geodesic>),
}

impl NodeIndex {
    pub fn build(nodes: &[NodeRecord], metric: MetricType) -> Result<NodeIndex, NearestError> {
        match metric {
            MetricType::Planar => SpatialIndex::build(nodes, Planar).map(NodeIndex::Planar),
            MetricType::Geodesic => SpatialIndex::build(nodes, Geodesic).map(NodeIndex::Geodesic),
        }
    }
}

impl NearestNodeSearch for NodeIndex {
    fn metric_type(&self) -> MetricType {
        match self {
            NodeIndex::Planar(index) => index.metric_type(),
            NodeIndex::Geodesic(index) => index.metric_type(),
        }
    }

    fn len(&self) -> usize {
        match self {
            NodeIndex::Planar(index) => index.len(),
            NodeIndex::Geodesic(index) => index.len(),
        }
    }

    fn nearest_node(
        &self,
        location: &Point<f64>,
    ) -> Result<Option<(NodeId, f64)>, CoordinateError> {
        match self {
            NodeIndex::Planar(index) => index.nearest_node(location),
            NodeIndex::Geodesic(index) => index.nearest_node(location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParcelQuery;

    #[test]
    fn test_build_selects_metric() {
        let nodes = vec![NodeRecord::new(1, -105.0, 40.0), NodeRecord::new(2, -104.0, 40.0)];
        let planar = NodeIndex::build(&nodes, MetricType::Planar).unwrap();
        let geodesic = NodeIndex::build(&nodes, MetricType::Geodesic).unwrap();
        assert!(matches!(planar, NodeIndex::Planar(_)));
        assert!(matches!(geodesic, NodeIndex::Geodesic(_)));
        assert_eq!(planar.metric_type(), MetricType::Planar);
        assert_eq!(geodesic.metric_type(), MetricType::Geodesic);
        assert_eq!(geodesic.len(), 2);
    }

    #[test]
    fn test_distance_units_follow_metric() {
        let nodes = vec![NodeRecord::new(1, 0.0, 0.0)];
        let parcel = ParcelQuery::new("p", 0.0, 1.0);
        let planar = NodeIndex::build(&nodes, MetricType::Planar).unwrap();
        let geodesic = NodeIndex::build(&nodes, MetricType::Geodesic).unwrap();
        let planar_match = planar.query(&parcel).unwrap();
        let geodesic_match = geodesic.query(&parcel).unwrap();
        assert!((planar_match.distance - 1.0).abs() < 1e-12);
        // one degree of latitude is roughly 111km
        assert!((geodesic_match.distance - 111_195.0).abs() < 100.0);
    }

    #[test]
    fn test_empty_rejected_for_both_metrics() {
        assert!(matches!(
            NodeIndex::build(&[], MetricType::Planar),
            Err(NearestError::EmptyInput)
        ));
        assert!(matches!(
            NodeIndex::build(&[], MetricType::Geodesic),
            Err(NearestError::EmptyInput)
        ));
    }
}
