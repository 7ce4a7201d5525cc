use super::{DistanceMetric, MetricType};
use crate::CoordinateError;
use geo::{Distance, Euclidean, Point};

/// largest absolute coordinate accepted by [`Planar`]. squared distances between keys
/// within this bound stay finite in f64.
pub const MAX_PLANAR_MAGNITUDE: f64 = 1e150;

/// straight-line distance on x/y as supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planar;

impl DistanceMetric for Planar {
    type Key = [f64; 2];

    fn metric_type(&self) -> MetricType {
        MetricType::Planar
    }

    fn to_key(&self, point: &Point<f64>) -> Result<Self::Key, CoordinateError> {
        let (x, y) = point.x_y();
        if !x.is_finite() || !y.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        for value in [x, y] {
            if value.abs() > MAX_PLANAR_MAGNITUDE {
                return Err(CoordinateError::MagnitudeTooLarge {
                    value,
                    limit: MAX_PLANAR_MAGNITUDE,
                });
            }
        }
        Ok([x, y])
    }

    fn distance(&self, a: &Point<f64>, b: &Point<f64>) -> f64 {
        Euclidean.distance(*a, *b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_rejected() {
        let result = Planar.to_key(&Point::new(f64::NAN, 1.0));
        assert_eq!(result, Err(CoordinateError::NonFinite));
        let result = Planar.to_key(&Point::new(0.0, f64::INFINITY));
        assert_eq!(result, Err(CoordinateError::NonFinite));
    }

    #[test]
    fn test_unbounded_coordinates_accepted() {
        // projected coordinates (e.g. state plane feet) are far outside degree bounds
        let key = Planar.to_key(&Point::new(3_075_000.5, 1_700_250.25)).unwrap();
        assert_eq!(key, [3_075_000.5, 1_700_250.25]);
    }

    #[test]
    fn test_huge_coordinates_rejected() {
        let result = Planar.to_key(&Point::new(1e200, 0.0));
        assert_eq!(
            result,
            Err(CoordinateError::MagnitudeTooLarge {
                value: 1e200,
                limit: MAX_PLANAR_MAGNITUDE
            })
        );
        let result = Planar.to_key(&Point::new(0.0, -1.5e151));
        assert!(matches!(
            result,
            Err(CoordinateError::MagnitudeTooLarge { .. })
        ));
        assert!(Planar.to_key(&Point::new(-1e150, 1e150)).is_ok());
    }

    #[test]
    fn test_distance() {
        let d = Planar.distance(&Point::new(0.0, 0.0), &Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
