use super::{DistanceMetric, MetricType};
use crate::CoordinateError;
use geo::{Distance, Haversine, Point};

/// great-circle distance on longitude/latitude degrees, reported in meters.
///
/// coordinates are converted to radians of (latitude, longitude) and placed on the
/// unit sphere. chord length between two unit vectors is `2 sin(θ/2)` for central
/// angle θ, which is strictly increasing on [0, π], so nearest by chord is nearest
/// by haversine distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geodesic;

impl Geodesic {
    /// validates a longitude/latitude pair in degrees and returns (latitude, longitude)
    /// in radians.
    pub fn to_radians(point: &Point<f64>) -> Result<(f64, f64), CoordinateError> {
        let (lon, lat) = point.x_y();
        if !lon.is_finite() || !lat.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok((lat.to_radians(), lon.to_radians()))
    }
}

impl DistanceMetric for Geodesic {
    type Key = [f64; 3];

    fn metric_type(&self) -> MetricType {
        MetricType::Geodesic
    }

    fn to_key(&self, point: &Point<f64>) -> Result<Self::Key, CoordinateError> {
        let (lat, lon) = Geodesic::to_radians(point)?;
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        Ok([cos_lat * cos_lon, cos_lat * sin_lon, sin_lat])
    }

    fn distance(&self, a: &Point<f64>, b: &Point<f64>) -> f64 {
        Haversine.distance(*a, *b)
    }
}
