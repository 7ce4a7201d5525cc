use super::csv_ops;
use csv::StringRecord;
use geo::{Centroid, Geometry, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wkt::TryFromWkt;

/// how a row of a CSV file carries its location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum GeometryFormat {
    /// a WKT geometry; non-point geometries are reduced to their centroid
    WktColumn { column_name: String },
    XYColumns { x_column: String, y_column: String },
}

impl Default for GeometryFormat {
    fn default() -> Self {
        GeometryFormat::new_xy_format(String::from("x"), String::from("y"))
    }
}

impl GeometryFormat {
    pub fn new_wkt_format(column_name: String) -> GeometryFormat {
        GeometryFormat::WktColumn { column_name }
    }

    pub fn new_xy_format(x_column: String, y_column: String) -> GeometryFormat {
        GeometryFormat::XYColumns { x_column, y_column }
    }

    /// reads the representative point of a row: the point itself, or the centroid of
    /// any other geometry. returns None when the row has no geometry (empty cells, an
    /// empty WKT geometry, or a geometry without a centroid).
    pub fn get_point(
        &self,
        row: &StringRecord,
        column_index_lookup: &HashMap<String, usize>,
    ) -> Result<Option<Point<f64>>, String> {
        match self {
            GeometryFormat::WktColumn { column_name } => {
                let idx = column_index_lookup
                    .get(column_name)
                    .ok_or_else(|| format!("file does not contain column '{column_name}'"))?;
                let value = csv_ops::get_field(row, *idx, column_name)?;
                if value.is_empty() {
                    return Ok(None);
                }
                let g: Geometry<f64> = Geometry::try_from_wkt_str(value).map_err(|e| {
                    format!("failure reading geometry at column '{column_name}': {e}")
                })?;
                Ok(g.centroid())
            }
            GeometryFormat::XYColumns { x_column, y_column } => {
                let x_idx = column_index_lookup
                    .get(x_column)
                    .ok_or_else(|| format!("file does not contain column '{x_column}'"))?;
                let y_idx = column_index_lookup
                    .get(y_column)
                    .ok_or_else(|| format!("file does not contain column '{y_column}'"))?;
                let x_str = csv_ops::get_field(row, *x_idx, x_column)?;
                let y_str = csv_ops::get_field(row, *y_idx, y_column)?;
                if x_str.is_empty() || y_str.is_empty() {
                    return Ok(None);
                }
                let x = x_str
                    .parse::<f64>()
                    .map_err(|e| format!("failure reading number in column '{x_column}': {e}"))?;
                let y = y_str
                    .parse::<f64>()
                    .map_err(|e| format!("failure reading number in column '{y_column}': {e}"))?;
                Ok(Some(Point::new(x, y)))
            }
        }
    }
}
