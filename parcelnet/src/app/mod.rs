pub mod join_ops;
mod join_summary;
mod operation;
mod parcelnet_app;

pub use join_summary::JoinSummary;
pub use operation::ParcelnetOperation;
pub use parcelnet_app::ParcelnetApp;
