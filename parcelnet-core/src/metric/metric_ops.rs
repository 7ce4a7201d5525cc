use super::MetricType;
use crate::model::NodeRecord;
use itertools::{Itertools, MinMaxResult};

/// the range of y values of the node set, when every coordinate could be a
/// longitude/latitude pair in degrees. returns None for projected coordinates
/// or an empty node set.
pub fn degree_latitude_span(nodes: &[NodeRecord]) -> Option<f64> {
    let looks_like_degrees = nodes.iter().all(|n| {
        let (x, y) = n.location.x_y();
        (-180.0..=180.0).contains(&x) && (-90.0..=90.0).contains(&y)
    });
    if !looks_like_degrees {
        return None;
    }
    match nodes.iter().map(|n| n.location.y()).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(_) => Some(0.0),
        MinMaxResult::MinMax(min, max) => Some(max - min),
    }
}

/// produces a warning message when planar search is about to run on degree
/// coordinates spanning more than `max_span` degrees of latitude.
pub fn planar_distortion_warning(
    metric: MetricType,
    nodes: &[NodeRecord],
    max_span: f64,
) -> Option<String> {
    if metric != MetricType::Planar {
        return None;
    }
    let span = degree_latitude_span(nodes)?;
    if span > max_span {
        Some(format!(
            "planar metric selected for degree coordinates spanning {span:.2} degrees of latitude \
             (limit {max_span:.2}); nearest node assignments will be distorted, consider the geodesic metric"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_of_degree_coordinates() {
        let nodes = vec![
            NodeRecord::new(1, -105.0, 39.5),
            NodeRecord::new(2, -104.0, 40.25),
            NodeRecord::new(3, -104.5, 39.75),
        ];
        let span = degree_latitude_span(&nodes).unwrap();
        assert!((span - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_projected_coordinates_have_no_span() {
        let nodes = vec![
            NodeRecord::new(1, 500_000.0, 4_400_000.0),
            NodeRecord::new(2, 501_000.0, 4_401_000.0),
        ];
        assert_eq!(degree_latitude_span(&nodes), None);
    }

    #[test]
    fn test_warning_only_for_wide_planar_degree_inputs() {
        let nodes = vec![
            NodeRecord::new(1, -122.0, 32.5),
            NodeRecord::new(2, -122.0, 48.9),
        ];
        assert!(planar_distortion_warning(MetricType::Planar, &nodes, 5.0).is_some());
        assert!(planar_distortion_warning(MetricType::Geodesic, &nodes, 5.0).is_none());
        assert!(planar_distortion_warning(MetricType::Planar, &nodes, 20.0).is_none());
    }
}
