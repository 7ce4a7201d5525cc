mod nearest_match;
mod node_id;
mod node_record;
mod parcel_id;
mod parcel_query;

pub use nearest_match::NearestMatch;
pub use node_id::NodeId;
pub use node_record::NodeRecord;
pub use parcel_id::ParcelId;
pub use parcel_query::ParcelQuery;
