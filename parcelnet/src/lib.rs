//! parcel enrichment workflow: reads network nodes, parcel centroids and a parcel to
//! census block lookup, assigns every parcel its nearest network node and writes
//! the combined `parcel_id,block_id,node_id,distance` table.
pub mod app;
pub mod assemble;
pub mod config;
mod error;
pub mod io;

pub use error::ParcelnetError;
