use super::MetricType;
use crate::CoordinateError;
use geo::Point;

/// a distance function paired with the coordinate transform that places points
/// into the key space of the spatial index.
///
/// the index orders candidates by squared Euclidean distance between keys, so
/// implementations must produce keys whose Euclidean ordering matches the ordering
/// of [`DistanceMetric::distance`].
pub trait DistanceMetric: Send + Sync {
    /// point type stored in the spatial index
    type Key: rstar::Point<Scalar = f64> + Send + Sync;

    fn metric_type(&self) -> MetricType;

    /// validates a coordinate and converts it into the key space of the index.
    fn to_key(&self, point: &Point<f64>) -> Result<Self::Key, CoordinateError>;

    /// distance between two validated points in the units of this metric.
    fn distance(&self, a: &Point<f64>, b: &Point<f64>) -> f64;
}
