//! Room generation pipeline
//!
//! Samples rooms, merges overlapping rooms into clusters and wraps each
//! cluster root as a triangulation node.

mod collision;
mod rooms;

pub use collision::{cluster_rooms, find_overlaps, merge_overlaps, Collision};
pub use rooms::generate_rooms;

use crate::cluster::ClusterForest;
use crate::error::Result;
use crate::room::Room;
use crate::triangulation::RoomNode;

/// Wrap every cluster root as a node sized by its cluster area
///
/// Nodes come out in ascending root identity.
pub fn cluster_nodes(rooms: &[Room], forest: &ClusterForest) -> Result<Vec<RoomNode>> {
    let nodes = forest
        .roots()
        .map(|root| -> Result<RoomNode> {
            let size = forest.cluster_area(rooms, root)?;
            Ok(RoomNode::new(&rooms[root.index()], size))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(nodes)
}
