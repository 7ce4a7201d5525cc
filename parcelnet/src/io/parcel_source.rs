use super::{csv_ops, GeometryFormat};
use crate::ParcelnetError;
use geo::{Centroid, MultiPolygon, Point};
use kdam::tqdm;
use parcelnet_core::model::{ParcelId, ParcelQuery};
use serde::{Deserialize, Serialize};
use shapefile::{dbase::FieldValue, Shape};

fn default_id_column() -> String {
    String::from("parcel_id")
}

/// source of parcel geometries. each parcel is reduced to a single
/// representative point (its centroid).
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ParcelSource {
    /// reads parcels from a CSV file with an id column and point or WKT geometry
    Csv {
        file: String,
        #[serde(default = "default_id_column")]
        id_column: String,
        #[serde(default)]
        geometry_format: GeometryFormat,
    },
    /// reads parcel polygons from a shapefile with an id field
    Shapefile { file: String, id_field: String },
}

/// parcels read from a source. parcels without a usable geometry are not
/// dropped silently, they are listed in `missing_geometry`.
#[derive(Debug, Clone, Default)]
pub struct ParcelRead {
    pub parcels: Vec<ParcelQuery>,
    pub missing_geometry: Vec<ParcelId>,
}

impl ParcelRead {
    fn push(&mut self, parcel_id: ParcelId, centroid: Option<Point<f64>>) {
        match centroid {
            Some(location) => self.parcels.push(ParcelQuery {
                parcel_id,
                location,
            }),
            None => {
                log::warn!("parcel '{parcel_id}' has no geometry");
                self.missing_geometry.push(parcel_id);
            }
        }
    }
}

impl ParcelSource {
    pub fn new_csv(file: String) -> ParcelSource {
        ParcelSource::Csv {
            file,
            id_column: default_id_column(),
            geometry_format: GeometryFormat::default(),
        }
    }

    pub fn file(&self) -> &str {
        match self {
            ParcelSource::Csv { file, .. } => file,
            ParcelSource::Shapefile { file, .. } => file,
        }
    }

    pub fn read(&self) -> Result<ParcelRead, ParcelnetError> {
        let result = match self {
            ParcelSource::Csv {
                file,
                id_column,
                geometry_format,
            } => read_parcel_csv(file, id_column, geometry_format),
            ParcelSource::Shapefile { file, id_field } => read_parcel_shapefile(file, id_field),
        }?;
        log::info!(
            "read {} parcels from {} ({} without geometry)",
            result.parcels.len() + result.missing_geometry.len(),
            self.file(),
            result.missing_geometry.len()
        );
        Ok(result)
    }
}

/// reads parcel ids and centroids from a CSV source
fn read_parcel_csv(
    file: &str,
    id_column: &str,
    geometry_format: &GeometryFormat,
) -> Result<ParcelRead, ParcelnetError> {
    let mut reader = csv_ops::open_reader(file)?;
    let headers = csv_ops::header_lookup(&mut reader, file)?;
    let id_idx = csv_ops::column_index(&headers, id_column, file)?;

    let mut result = ParcelRead::default();
    let iter = tqdm!(reader.records().enumerate(), desc = "read parcels");
    for (row, record) in iter {
        let record = record.map_err(|e| ParcelnetError::CsvReadError(String::from(file), e))?;
        let invalid_row = |message: String| ParcelnetError::InvalidRow {
            file: String::from(file),
            row,
            message,
        };
        let id = csv_ops::get_field(&record, id_idx, id_column).map_err(invalid_row)?;
        if id.is_empty() {
            return Err(invalid_row(String::from("parcel id is empty")));
        }
        let centroid = geometry_format
            .get_point(&record, &headers)
            .map_err(invalid_row)?;
        result.push(ParcelId::from(id), centroid);
    }
    eprintln!();
    Ok(result)
}

/// reads parcel ids and polygon centroids from a shapefile source
fn read_parcel_shapefile(file: &str, id_field: &str) -> Result<ParcelRead, ParcelnetError> {
    let rows = shapefile::read(file)
        .map_err(|e| ParcelnetError::ShapefileError(String::from(file), e))?;

    let mut result = ParcelRead::default();
    let n_rows = rows.len();
    let iter = tqdm!(rows.into_iter().enumerate(), total = n_rows, desc = "read parcels");
    for (row, (shape, record)) in iter {
        let invalid_row = |message: String| ParcelnetError::InvalidRow {
            file: String::from(file),
            row,
            message,
        };
        let field = record
            .get(id_field)
            .ok_or_else(|| invalid_row(format!("field {id_field} missing from shapefile record")))?;
        let parcel_id = match field {
            FieldValue::Character(Some(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            FieldValue::Numeric(Some(n)) => numeric_parcel_id(*n)
                .ok_or_else(|| invalid_row(format!("field '{id_field}' is not a finite number"))),
            FieldValue::Integer(i) => Ok(i.to_string()),
            _ => Err(invalid_row(format!(
                "field '{}' has unexpected field type '{}' or is empty",
                id_field,
                field.field_type()
            ))),
        }?;
        let centroid = match shape {
            Shape::NullShape => None,
            Shape::Point(p) => Some(Point::new(p.x, p.y)),
            Shape::Polygon(generic_polygon) => {
                let mp: MultiPolygon<f64> = generic_polygon.try_into().map_err(|e| {
                    invalid_row(format!("failed to convert shapefile polygon: {e}"))
                })?;
                mp.centroid()
            }
            Shape::PolygonM(generic_polygon) => {
                let mp: MultiPolygon<f64> = generic_polygon.try_into().map_err(|e| {
                    invalid_row(format!("failed to convert shapefile polygon: {e}"))
                })?;
                mp.centroid()
            }
            _ => {
                return Err(invalid_row(format!(
                    "unexpected shape type {}, must be polygonal",
                    shape.shapetype()
                )))
            }
        };
        result.push(ParcelId::from(parcel_id), centroid);
    }
    eprintln!();
    Ok(result)
}

/// renders a numeric dbase id. whole numbers are written without a fraction at full
/// width, so ids beyond the i64 range stay distinct.
fn numeric_parcel_id(n: f64) -> Option<String> {
    if !n.is_finite() {
        None
    } else if n.fract() == 0.0 {
        Some(format!("{n:.0}"))
    } else {
        Some(n.to_string())
    }
}
