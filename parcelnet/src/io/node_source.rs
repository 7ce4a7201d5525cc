use super::{csv_ops, GeometryFormat};
use crate::ParcelnetError;
use kdam::tqdm;
use parcelnet_core::model::{NodeId, NodeRecord};
use serde::{Deserialize, Serialize};

fn default_id_column() -> String {
    String::from("osmid")
}

/// a CSV file of network nodes, such as an OSMnx nodes export
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct NodeSource {
    pub file: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default)]
    pub geometry_format: GeometryFormat,
}

impl NodeSource {
    pub fn new(file: String) -> NodeSource {
        NodeSource {
            file,
            id_column: default_id_column(),
            geometry_format: GeometryFormat::default(),
        }
    }

    /// reads every node. any unreadable row fails the whole read since the
    /// spatial index cannot be built from a partial node set.
    pub fn read(&self) -> Result<Vec<NodeRecord>, ParcelnetError> {
        let file = self.file.as_str();
        let mut reader = csv_ops::open_reader(file)?;
        let headers = csv_ops::header_lookup(&mut reader, file)?;
        let id_idx = csv_ops::column_index(&headers, &self.id_column, file)?;

        let iter = tqdm!(reader.records().enumerate(), desc = "read network nodes");
        let mut nodes = vec![];
        for (row, record) in iter {
            let record = record.map_err(|e| ParcelnetError::CsvReadError(String::from(file), e))?;
            let invalid_row = |message: String| ParcelnetError::InvalidRow {
                file: String::from(file),
                row,
                message,
            };
            let id_str = csv_ops::get_field(&record, id_idx, &self.id_column).map_err(invalid_row)?;
            let node_id = id_str
                .parse::<i64>()
                .map_err(|e| invalid_row(format!("node id '{id_str}' is not an integer: {e}")))?;
            let location = self
                .geometry_format
                .get_point(&record, &headers)
                .map_err(invalid_row)?
                .ok_or_else(|| invalid_row(format!("node {node_id} has no geometry")))?;
            nodes.push(NodeRecord {
                node_id: NodeId(node_id),
                location,
            });
        }
        eprintln!();
        log::info!("read {} network nodes from {file}", nodes.len());
        Ok(nodes)
    }
}
