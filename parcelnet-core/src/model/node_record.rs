use super::NodeId;
use geo::Point;
use serde::{Deserialize, Serialize};

/// a network node with its location. x/y are either projected units or
/// longitude/latitude in degrees, depending on the metric the index is built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: NodeId,
    pub location: Point<f64>,
}

impl NodeRecord {
    pub fn new(node_id: i64, x: f64, y: f64) -> NodeRecord {
        NodeRecord {
            node_id: NodeId(node_id),
            location: Point::new(x, y),
        }
    }
}
