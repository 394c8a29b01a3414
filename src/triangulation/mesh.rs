//! Final triangle mesh over real rooms
//!
//! Produced by [`Triangulation::build`](super::Triangulation::build) after
//! every support-touching triangle has been discarded. The edge list and
//! adjacency map are the input for spanning-tree extraction.

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec2;

use crate::error::GeometryError;
use crate::geometry::distance;
use crate::room::RoomId;

use super::node::RoomNode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle between three real rooms
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTriangle {
    /// Vertex rooms in ascending identity order
    pub rooms: [RoomId; 3],
    /// Circumcircle center
    pub center: DVec2,
    /// Circumcircle radius
    pub radius: f64,
}

impl MeshTriangle {
    /// Check whether a room is a vertex of this triangle
    #[inline]
    pub fn contains(&self, room: RoomId) -> bool {
        self.rooms.contains(&room)
    }

    /// The three undirected edges, smaller identity first
    pub fn edges(&self) -> [(RoomId, RoomId); 3] {
        let [a, b, c] = self.rooms;
        [(a, b), (b, c), (a, c)]
    }
}

/// An undirected mesh edge weighted by center distance
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshEdge {
    /// Smaller room identity
    pub a: RoomId,
    /// Larger room identity
    pub b: RoomId,
    /// Euclidean distance between the two room centers
    pub length: f64,
}

/// A cavity triangle dropped because it had no circumcircle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkippedTriangle {
    /// Room being inserted when the triangle was formed
    pub inserting: RoomId,
    /// The two rooms of the cavity boundary edge
    pub edge: (RoomId, RoomId),
    pub error: GeometryError,
}

/// Triangle mesh over the real nodes
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    nodes: Vec<RoomNode>,
    triangles: Vec<MeshTriangle>,
    isolated: Vec<RoomId>,
    #[cfg_attr(feature = "serde", serde(skip))]
    skipped: Vec<SkippedTriangle>,
}

impl Mesh {
    pub(crate) fn new(
        nodes: Vec<RoomNode>,
        mut triangles: Vec<MeshTriangle>,
        skipped: Vec<SkippedTriangle>,
    ) -> Self {
        triangles.sort_by(|a, b| a.rooms.cmp(&b.rooms));

        let covered: BTreeSet<RoomId> = triangles
            .iter()
            .flat_map(|triangle| triangle.rooms)
            .collect();
        let isolated = nodes
            .iter()
            .map(|node| node.room)
            .filter(|room| !covered.contains(room))
            .collect();

        Self {
            nodes,
            triangles,
            isolated,
            skipped,
        }
    }

    /// Real nodes, in ascending identity order
    #[inline]
    pub fn nodes(&self) -> &[RoomNode] {
        &self.nodes
    }

    /// Look up a node by room identity
    pub fn node(&self, room: RoomId) -> Option<&RoomNode> {
        self.nodes
            .binary_search_by_key(&room, |node| node.room)
            .ok()
            .map(|index| &self.nodes[index])
    }

    /// Surviving triangles, sorted by vertex identities
    #[inline]
    pub fn triangles(&self) -> &[MeshTriangle] {
        &self.triangles
    }

    /// Get the number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Real nodes that ended up in no surviving triangle
    ///
    /// Happens when fewer than three nodes exist, when every node is
    /// collinear, or when a node's only triangles touched a support node.
    #[inline]
    pub fn isolated(&self) -> &[RoomId] {
        &self.isolated
    }

    /// Cavity triangles dropped for degenerate geometry
    #[inline]
    pub fn skipped(&self) -> &[SkippedTriangle] {
        &self.skipped
    }

    /// Unique undirected edges, sorted, each weighted by center distance
    pub fn edges(&self) -> Vec<MeshEdge> {
        let pairs: BTreeSet<(RoomId, RoomId)> = self
            .triangles
            .iter()
            .flat_map(MeshTriangle::edges)
            .collect();

        pairs
            .into_iter()
            .filter_map(|(a, b)| {
                let length = distance(self.node(a)?.position, self.node(b)?.position);
                Some(MeshEdge { a, b, length })
            })
            .collect()
    }

    /// Neighbor sets keyed by room identity
    ///
    /// Every real node has an entry; isolated nodes map to an empty set.
    pub fn adjacency(&self) -> BTreeMap<RoomId, BTreeSet<RoomId>> {
        let mut adjacency: BTreeMap<RoomId, BTreeSet<RoomId>> = self
            .nodes
            .iter()
            .map(|node| (node.room, BTreeSet::new()))
            .collect();

        for (a, b) in self.triangles.iter().flat_map(MeshTriangle::edges) {
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        adjacency
    }

    /// Rooms sharing a mesh edge with `room`, ascending
    pub fn neighbors(&self, room: RoomId) -> Vec<RoomId> {
        let neighbors: BTreeSet<RoomId> = self
            .triangles
            .iter()
            .filter(|triangle| triangle.contains(room))
            .flat_map(|triangle| triangle.rooms)
            .filter(|&other| other != room)
            .collect();
        neighbors.into_iter().collect()
    }
}
