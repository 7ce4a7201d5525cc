mod nearest_node_search;
mod node_index;
mod spatial_index;

pub use nearest_node_search::NearestNodeSearch;
pub use node_index::NodeIndex;
pub use spatial_index::{IndexedNode, SpatialIndex};
