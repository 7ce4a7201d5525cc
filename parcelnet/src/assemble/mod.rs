mod output_row;
mod result_assembler;

pub use output_row::{CsvRow, ParcelOutputRow, RejectedParcelRow};
pub use result_assembler::{assemble, AssembledRows, RowWriter};
