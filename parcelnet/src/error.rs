use parcelnet_core::NearestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParcelnetError {
    #[error("invalid parcelnet configuration: {0}")]
    ConfigurationError(String),
    #[error("nearest node search failed: {source}")]
    NearestError {
        #[from]
        source: NearestError,
    },
    #[error("failure reading file {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("failure writing to file {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("failure reading shapefile {0}: {1}")]
    ShapefileError(String, shapefile::Error),
    #[error("invalid row {row} in file {file}: {message}")]
    InvalidRow {
        file: String,
        row: usize,
        message: String,
    },
    #[error("output file {0} already exists, set overwrite to replace it")]
    OutputExists(String),
    #[error("i/o failure: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("{0}")]
    InternalError(String),
}
