use super::NearestNodeSearch;
use crate::{
    metric::{DistanceMetric, MetricType},
    model::{NodeId, NodeRecord},
    CoordinateError, NearestError, RecordKind,
};
use geo::Point;
use itertools::Itertools;
use rstar::{primitives::GeomWithData, RTree};

/// a node stored in the R-tree under its metric key
pub type IndexedNode<K> = GeomWithData<K, NodeRecord>;

/// static nearest node index over a fixed node set under a single metric.
///
/// the tree is bulk loaded once and never modified, so shared references
/// can be queried from any number of threads.
pub struct SpatialIndex<M: DistanceMetric> {
    metric: M,
    rtree: RTree<IndexedNode<M::Key>>,
}

impl<M: DistanceMetric> SpatialIndex<M> {
    /// builds the index. node ids must be unique and every coordinate must be valid
    /// under the metric, otherwise the build fails.
    ///
    /// nodes are sorted by id before bulk loading so the tree layout does not depend
    /// on the order the nodes were supplied in.
    pub fn build(nodes: &[NodeRecord], metric: M) -> Result<SpatialIndex<M>, NearestError> {
        if nodes.is_empty() {
            return Err(NearestError::EmptyInput);
        }
        let sorted = nodes.iter().sorted_by_key(|n| n.node_id).collect_vec();
        if let Some((dup, _)) = sorted
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.node_id == b.node_id)
        {
            return Err(NearestError::DuplicateKey {
                kind: RecordKind::Node,
                id: dup.node_id.to_string(),
            });
        }

        let entries = sorted
            .into_iter()
            .map(|node| {
                let key = metric.to_key(&node.location).map_err(|source| {
                    NearestError::invalid_coordinate(
                        RecordKind::Node,
                        node.node_id,
                        &node.location,
                        source,
                    )
                })?;
                Ok(GeomWithData::new(key, *node))
            })
            .collect::<Result<Vec<_>, NearestError>>()?;

        let rtree = RTree::bulk_load(entries);
        log::debug!(
            "built {} spatial index over {} nodes",
            metric.metric_type(),
            rtree.size()
        );
        Ok(SpatialIndex { metric, rtree })
    }
}

impl<M: DistanceMetric> NearestNodeSearch for SpatialIndex<M> {
    fn metric_type(&self) -> MetricType {
        self.metric.metric_type()
    }

    fn len(&self) -> usize {
        self.rtree.size()
    }

    fn nearest_node(
        &self,
        location: &Point<f64>,
    ) -> Result<Option<(NodeId, f64)>, CoordinateError> {
        let key = self.metric.to_key(location)?;
        let mut candidates = self.rtree.nearest_neighbor_iter_with_distance_2(&key);
        let (first, best) = match candidates.next() {
            Some(c) => c,
            None => return Ok(None),
        };
        // candidates arrive in increasing distance order, so all ties follow the first hit
        let winner = candidates
            .take_while(|(_, d2)| *d2 <= best)
            .map(|(entry, _)| entry)
            .fold(first, |acc, entry| {
                if entry.data.node_id < acc.data.node_id {
                    entry
                } else {
                    acc
                }
            });
        let distance = self.metric.distance(location, &winner.data.location);
        Ok(Some((winner.data.node_id, distance)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Geodesic, Planar};
    use crate::model::ParcelQuery;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_nodes(rng: &mut StdRng, n: usize, x: (f64, f64), y: (f64, f64)) -> Vec<NodeRecord> {
        (0..n)
            .map(|i| {
                NodeRecord::new(
                    i as i64,
                    rng.random_range(x.0..x.1),
                    rng.random_range(y.0..y.1),
                )
            })
            .collect_vec()
    }

    fn nearest<I: NearestNodeSearch>(index: &I, location: &Point<f64>) -> (NodeId, f64) {
        index
            .nearest_node(location)
            .unwrap()
            .expect("index should not be empty")
    }

    /// linear scan reference used to validate the index
    fn brute_force<M: DistanceMetric>(
        metric: &M,
        nodes: &[NodeRecord],
        location: &Point<f64>,
    ) -> f64 {
        nodes
            .iter()
            .map(|n| metric.distance(location, &n.location))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = SpatialIndex::build(&[], Planar);
        assert!(matches!(result, Err(NearestError::EmptyInput)));
        let result = SpatialIndex::build(&[], Geodesic);
        assert!(matches!(result, Err(NearestError::EmptyInput)));
    }

    #[test]
    fn test_duplicate_node_ids_rejected() {
        let nodes = vec![
            NodeRecord::new(7, 0.0, 0.0),
            NodeRecord::new(3, 1.0, 1.0),
            NodeRecord::new(7, 2.0, 2.0),
        ];
        match SpatialIndex::build(&nodes, Planar) {
            Err(NearestError::DuplicateKey { kind, id }) => {
                assert_eq!(kind, RecordKind::Node);
                assert_eq!(id, "7");
            }
            other => panic!("expected duplicate key error, found {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_node_coordinate_rejected() {
        let nodes = vec![NodeRecord::new(1, 0.0, 0.0), NodeRecord::new(2, 10.0, 95.0)];
        match SpatialIndex::build(&nodes, Geodesic) {
            Err(NearestError::InvalidCoordinate { kind, id, source, .. }) => {
                assert_eq!(kind, RecordKind::Node);
                assert_eq!(id, "2");
                assert_eq!(source, CoordinateError::LatitudeOutOfRange(95.0));
            }
            other => panic!("expected invalid coordinate, found {:?}", other.map(|_| ())),
        }
        // the same node is fine under the planar metric
        assert!(SpatialIndex::build(&nodes, Planar).is_ok());
    }

    #[test]
    fn test_two_node_scenario() {
        let nodes = vec![NodeRecord::new(1, 0.0, 0.0), NodeRecord::new(2, 10.0, 10.0)];
        let index = SpatialIndex::build(&nodes, Planar).unwrap();
        let (near, _) = nearest(&index, &Point::new(0.1, 0.1));
        assert_eq!(near, NodeId(1));

        // (5, 5) is equidistant, the lowest id wins every time
        let expected = nearest(&index, &Point::new(5.0, 5.0));
        assert_eq!(expected.0, NodeId(1));
        for _ in 0..50 {
            assert_eq!(nearest(&index, &Point::new(5.0, 5.0)), expected);
        }
    }

    #[test]
    fn test_tie_break_independent_of_input_order() {
        // four nodes at equal distance from the origin, supplied in different orders
        let mut nodes = vec![
            NodeRecord::new(40, 1.0, 0.0),
            NodeRecord::new(12, -1.0, 0.0),
            NodeRecord::new(33, 0.0, 1.0),
            NodeRecord::new(25, 0.0, -1.0),
        ];
        for _ in 0..4 {
            nodes.rotate_left(1);
            let index = SpatialIndex::build(&nodes, Planar).unwrap();
            let (node_id, distance) = nearest(&index, &Point::new(0.0, 0.0));
            assert_eq!(node_id, NodeId(12));
            assert!((distance - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_colocated_nodes_tie_break() {
        let nodes = vec![
            NodeRecord::new(9, -104.9, 39.7),
            NodeRecord::new(4, -104.9, 39.7),
            NodeRecord::new(6, -104.0, 39.0),
        ];
        let index = SpatialIndex::build(&nodes, Geodesic).unwrap();
        for _ in 0..10 {
            let (node_id, distance) = nearest(&index, &Point::new(-104.9, 39.7));
            assert_eq!(node_id, NodeId(4));
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn test_reflexive_planar() {
        let mut rng = StdRng::seed_from_u64(42);
        let nodes = random_nodes(&mut rng, 500, (0.0, 10_000.0), (0.0, 10_000.0));
        let index = SpatialIndex::build(&nodes, Planar).unwrap();
        for node in nodes.iter() {
            let (node_id, distance) = nearest(&index, &node.location);
            assert_eq!(node_id, node.node_id);
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn test_reflexive_geodesic() {
        let mut rng = StdRng::seed_from_u64(7);
        let nodes = random_nodes(&mut rng, 500, (-180.0, 180.0), (-85.0, 85.0));
        let index = SpatialIndex::build(&nodes, Geodesic).unwrap();
        for node in nodes.iter() {
            let (node_id, distance) = nearest(&index, &node.location);
            assert_eq!(node_id, node.node_id);
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn test_planar_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(1234);
        let nodes = random_nodes(&mut rng, 1000, (-50.0, 50.0), (-50.0, 50.0));
        let index = SpatialIndex::build(&nodes, Planar).unwrap();
        for _ in 0..2000 {
            let q = Point::new(rng.random_range(-60.0..60.0), rng.random_range(-60.0..60.0));
            let (_, distance) = nearest(&index, &q);
            let expected = brute_force(&Planar, &nodes, &q);
            assert!((distance - expected).abs() <= 1e-9 * expected.max(1.0));
        }
    }

    #[test]
    fn test_geodesic_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(99);
        // a regional extent plus a handful of far away nodes
        let mut nodes = random_nodes(&mut rng, 900, (-110.0, -100.0), (35.0, 45.0));
        nodes.extend(random_nodes(&mut rng, 100, (-180.0, 180.0), (-89.0, 89.0)));
        let nodes = nodes
            .into_iter()
            .enumerate()
            .map(|(i, n)| NodeRecord::new(i as i64, n.location.x(), n.location.y()))
            .collect_vec();
        let index = SpatialIndex::build(&nodes, Geodesic).unwrap();
        for _ in 0..2000 {
            let q = Point::new(
                rng.random_range(-180.0..180.0),
                rng.random_range(-90.0..90.0),
            );
            let (node_id, distance) = nearest(&index, &q);
            let expected = brute_force(&Geodesic, &nodes, &q);
            // one meter of slack for floating point in the chord/haversine conversion
            assert!(
                (distance - expected).abs() <= 1.0,
                "query {q:?} matched node {node_id} at {distance}m, brute force found {expected}m"
            );
        }
    }

    #[test]
    fn test_high_latitude_distortion_changes_assignment() {
        // at 60N one degree of longitude is ~55.6km and one degree of latitude ~111km.
        // the eastern node is 0.9 degrees away but ~50km, the northern node is
        // 0.6 degrees away but ~67km.
        let nodes = vec![
            NodeRecord::new(1, 0.9, 60.0),
            NodeRecord::new(2, 0.0, 60.6),
            NodeRecord::new(3, 1.0, 62.0),
        ];
        let q = Point::new(0.0, 60.0);
        let planar = SpatialIndex::build(&nodes, Planar).unwrap();
        let geodesic = SpatialIndex::build(&nodes, Geodesic).unwrap();
        let (planar_id, planar_dist) = nearest(&planar, &q);
        let (geodesic_id, geodesic_dist) = nearest(&geodesic, &q);
        assert_eq!(planar_id, NodeId(2));
        assert_eq!(geodesic_id, NodeId(1));
        assert!((planar_dist - 0.6).abs() < 1e-9);
        assert!((geodesic_dist - 50_000.0).abs() < 1_000.0);
    }

    #[test]
    fn test_planar_nearest_at_large_magnitudes() {
        // squared differences near the limit must not overflow into ties
        let nodes = vec![
            NodeRecord::new(1, -1e149, 0.0),
            NodeRecord::new(2, 1.5e149, 0.0),
        ];
        let index = SpatialIndex::build(&nodes, Planar).unwrap();
        let (node_id, distance) = nearest(&index, &Point::new(1e149, 0.0));
        assert_eq!(node_id, NodeId(2));
        assert!((distance / 5e148 - 1.0).abs() < 1e-12);

        let huge = vec![
            NodeRecord::new(1, -1e200, 0.0),
            NodeRecord::new(2, 1.5e200, 0.0),
        ];
        assert!(matches!(
            SpatialIndex::build(&huge, Planar),
            Err(NearestError::InvalidCoordinate {
                kind: RecordKind::Node,
                source: CoordinateError::MagnitudeTooLarge { .. },
                ..
            })
        ));
        let parcel = ParcelQuery::new("far", 1e200, 0.0);
        assert!(matches!(
            index.query(&parcel),
            Err(NearestError::InvalidCoordinate {
                kind: RecordKind::Parcel,
                ..
            })
        ));
    }

    #[test]
    fn test_query_reports_invalid_parcel() {
        let nodes = vec![NodeRecord::new(1, 0.0, 0.0)];
        let index = SpatialIndex::build(&nodes, Geodesic).unwrap();
        let parcel = ParcelQuery::new("R-0001", 200.0, 10.0);
        match index.query(&parcel) {
            Err(NearestError::InvalidCoordinate { kind, id, .. }) => {
                assert_eq!(kind, RecordKind::Parcel);
                assert_eq!(id, "R-0001");
            }
            other => panic!("expected invalid coordinate, found {other:?}"),
        }
        let parcel = ParcelQuery::new("R-0002", f64::NAN, 0.0);
        assert!(index.query(&parcel).is_err());
    }

    #[test]
    fn test_per_query_cost_is_sublinear() {
        use std::time::Instant;

        fn time_queries(index: &SpatialIndex<Planar>, queries: &[Point<f64>]) -> f64 {
            let start = Instant::now();
            for q in queries.iter() {
                let _ = nearest(index, q);
            }
            start.elapsed().as_secs_f64() / queries.len() as f64
        }

        let mut rng = StdRng::seed_from_u64(5);
        let small = random_nodes(&mut rng, 1_000, (0.0, 1.0), (0.0, 1.0));
        let large = random_nodes(&mut rng, 100_000, (0.0, 1.0), (0.0, 1.0));
        let queries = (0..20_000)
            .map(|_| Point::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
            .collect_vec();
        let small_index = SpatialIndex::build(&small, Planar).unwrap();
        let large_index = SpatialIndex::build(&large, Planar).unwrap();

        // warm up caches before timing
        let _ = time_queries(&small_index, &queries[..1000]);
        let _ = time_queries(&large_index, &queries[..1000]);
        let t_small = time_queries(&small_index, &queries);
        let t_large = time_queries(&large_index, &queries);

        // a linear scan would be ~100x slower on the large set
        let ratio = t_large / t_small;
        assert!(ratio < 25.0, "per query time grew by {ratio:.1}x for 100x nodes");
    }
}
