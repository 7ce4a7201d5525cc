//! nearest network node assignment for parcel centroids.
//!
//! builds a static spatial index over network node coordinates under a chosen
//! [`metric::MetricType`] and answers exact k=1 nearest node queries for
//! batches of parcel centroids.
pub mod error;
pub mod index;
pub mod metric;
pub mod model;
pub mod query;

pub use error::{CoordinateError, NearestError, RecordKind};
