use std::fmt::Display;
use thiserror::Error;

/// the kind of record a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    Parcel,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Node => write!(f, "node"),
            RecordKind::Parcel => write!(f, "parcel"),
        }
    }
}

/// reasons a coordinate cannot be placed into a metric's coordinate space
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate is not finite")]
    NonFinite,
    #[error("latitude {0} outside of [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside of [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("coordinate {value} exceeds the planar limit of +/-{limit}")]
    MagnitudeTooLarge { value: f64, limit: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NearestError {
    #[error("cannot build a spatial index from an empty node set")]
    EmptyInput,
    #[error("invalid {kind} coordinate ({x}, {y}) for id '{id}': {source}")]
    InvalidCoordinate {
        kind: RecordKind,
        id: String,
        x: f64,
        y: f64,
        source: CoordinateError,
    },
    #[error("duplicate {kind} id '{id}'")]
    DuplicateKey { kind: RecordKind, id: String },
    #[error("batch cancelled after {completed} of {total} queries")]
    Cancelled { completed: usize, total: usize },
    #[error("{0}")]
    InternalError(String),
}

impl NearestError {
    pub fn invalid_coordinate<I: Display>(
        kind: RecordKind,
        id: I,
        point: &geo::Point<f64>,
        source: CoordinateError,
    ) -> NearestError {
        NearestError::InvalidCoordinate {
            kind,
            id: id.to_string(),
            x: point.x(),
            y: point.y(),
            source,
        }
    }
}
