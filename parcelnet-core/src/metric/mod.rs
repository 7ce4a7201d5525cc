mod distance_metric;
mod geodesic;
pub mod metric_ops;
mod metric_type;
mod planar;

pub use distance_metric::DistanceMetric;
pub use geodesic::Geodesic;
pub use metric_type::MetricType;
pub use planar::{Planar, MAX_PLANAR_MAGNITUDE};
