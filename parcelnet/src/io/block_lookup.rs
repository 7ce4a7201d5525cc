use super::csv_ops;
use crate::ParcelnetError;
use kdam::tqdm;
use parcelnet_core::{model::ParcelId, NearestError, RecordKind};
use serde::{Deserialize, Serialize};
use std::collections::{hash_map::Entry, HashMap};

mod default {
    pub fn parcel_id_column() -> String {
        String::from("parcel_id")
    }

    pub fn block_id_column() -> String {
        String::from("block_id")
    }
}

/// a precomputed parcel to census block table
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct BlockLookupSource {
    pub file: String,
    #[serde(default = "default::parcel_id_column")]
    pub parcel_id_column: String,
    #[serde(default = "default::block_id_column")]
    pub block_id_column: String,
}

impl BlockLookupSource {
    pub fn new(file: String) -> BlockLookupSource {
        BlockLookupSource {
            file,
            parcel_id_column: default::parcel_id_column(),
            block_id_column: default::block_id_column(),
        }
    }
}

/// exact-match lookup from parcel id to block id. block ids are kept as
/// strings since census GEOIDs carry leading zeros.
#[derive(Debug, Clone, Default)]
pub struct BlockLookup(HashMap<ParcelId, String>);

impl BlockLookup {
    pub fn get(&self, parcel_id: &ParcelId) -> Option<&str> {
        self.0.get(parcel_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&BlockLookupSource> for BlockLookup {
    type Error = ParcelnetError;

    fn try_from(source: &BlockLookupSource) -> Result<Self, Self::Error> {
        let file = source.file.as_str();
        let mut reader = csv_ops::open_reader(file)?;
        let headers = csv_ops::header_lookup(&mut reader, file)?;
        let parcel_idx = csv_ops::column_index(&headers, &source.parcel_id_column, file)?;
        let block_idx = csv_ops::column_index(&headers, &source.block_id_column, file)?;

        let mut lookup = HashMap::new();
        let iter = tqdm!(reader.records().enumerate(), desc = "read block lookup");
        for (row, record) in iter {
            let record = record.map_err(|e| ParcelnetError::CsvReadError(String::from(file), e))?;
            let invalid_row = |message: String| ParcelnetError::InvalidRow {
                file: String::from(file),
                row,
                message,
            };
            let parcel_id = csv_ops::get_field(&record, parcel_idx, &source.parcel_id_column)
                .map_err(invalid_row)?;
            let block_id = csv_ops::get_field(&record, block_idx, &source.block_id_column)
                .map_err(invalid_row)?;
            if parcel_id.is_empty() {
                return Err(invalid_row(String::from("parcel id is empty")));
            }
            if block_id.is_empty() {
                return Err(invalid_row(format!("block id is empty for parcel {parcel_id}")));
            }
            match lookup.entry(ParcelId::from(parcel_id)) {
                Entry::Occupied(entry) => {
                    return Err(ParcelnetError::from(NearestError::DuplicateKey {
                        kind: RecordKind::Parcel,
                        id: entry.key().to_string(),
                    }));
                }
                Entry::Vacant(entry) => {
                    entry.insert(block_id.to_string());
                }
            }
        }
        eprintln!();
        log::info!("read {} parcel block assignments from {file}", lookup.len());
        Ok(BlockLookup(lookup))
    }
}

impl FromIterator<(ParcelId, String)> for BlockLookup {
    fn from_iter<T: IntoIterator<Item = (ParcelId, String)>>(iter: T) -> Self {
        BlockLookup(iter.into_iter().collect())
    }
}
