mod block_lookup;
pub mod csv_ops;
mod geometry_format;
mod node_source;
mod parcel_source;

pub use block_lookup::{BlockLookup, BlockLookupSource};
pub use geometry_format::GeometryFormat;
pub use node_source::NodeSource;
pub use parcel_source::{ParcelRead, ParcelSource};
