use super::{CsvRow, ParcelOutputRow};
use crate::{
    io::{
        csv_ops::{self, OutputSink},
        BlockLookup,
    },
    ParcelnetError,
};
use parcelnet_core::model::NearestMatch;
use std::marker::PhantomData;

/// output rows along with the number of parcels that had no block assignment
#[derive(Debug, Clone, Default)]
pub struct AssembledRows {
    pub rows: Vec<ParcelOutputRow>,
    pub missing_block: usize,
}

/// joins nearest node matches with block ids keyed on parcel id. the join is a
/// left join: parcels absent from the lookup are kept with an empty block id.
/// without a lookup every block id is empty and nothing is counted as missing.
pub fn assemble(matches: Vec<NearestMatch>, blocks: Option<&BlockLookup>) -> AssembledRows {
    let mut missing_block = 0;
    let rows = matches
        .into_iter()
        .map(|nearest| {
            let block_id = match blocks {
                None => None,
                Some(lookup) => match lookup.get(&nearest.parcel_id) {
                    Some(block_id) => Some(block_id.to_string()),
                    None => {
                        log::debug!("parcel {} has no block assignment", nearest.parcel_id);
                        missing_block += 1;
                        None
                    }
                },
            };
            ParcelOutputRow::new(nearest, block_id)
        })
        .collect();
    AssembledRows {
        rows,
        missing_block,
    }
}

/// writes rows of one type to a CSV file as they are produced.
pub struct RowWriter<T: CsvRow> {
    file: String,
    writer: csv::Writer<OutputSink>,
    rows: usize,
    row_type: PhantomData<T>,
}

impl<T: CsvRow> RowWriter<T> {
    /// creates the file and writes the header row.
    pub fn create(file: &str, overwrite: bool) -> Result<RowWriter<T>, ParcelnetError> {
        let writer = csv_ops::create_writer(file, T::HEADER, overwrite)?;
        Ok(RowWriter {
            file: String::from(file),
            writer,
            rows: 0,
            row_type: PhantomData,
        })
    }

    pub fn write(&mut self, row: &T) -> Result<(), ParcelnetError> {
        self.writer
            .serialize(row)
            .map_err(|e| ParcelnetError::CsvWriteError(self.file.clone(), e))?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, rows: I) -> Result<(), ParcelnetError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for row in rows {
            self.write(row)?;
        }
        Ok(())
    }

    /// flushes the file and returns the number of rows written.
    pub fn finish(self) -> Result<usize, ParcelnetError> {
        csv_ops::finish_writer(self.writer, &self.file)?;
        log::info!("wrote {} rows to {}", self.rows, self.file);
        Ok(self.rows)
    }
}
