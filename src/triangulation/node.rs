//! Triangulation nodes
//!
//! A node is either a real cluster root or one of the three synthetic support
//! points that bound the mesh during construction. Support nodes never reach
//! the final [`Mesh`](super::Mesh): its triangles store [`RoomId`]s only.

use glam::DVec2;

use crate::room::{Room, RoomId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cluster root wrapped for triangulation
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomNode {
    /// Root room of the cluster
    pub room: RoomId,
    /// Center of the root room
    pub position: DVec2,
    /// Summed `4 * w * l` over the whole cluster (overlap counted twice)
    pub size: u64,
}

impl RoomNode {
    /// Wrap a root room with its cluster size
    pub fn new(root: &Room, size: u64) -> Self {
        Self {
            room: root.id,
            position: root.position(),
            size,
        }
    }
}

/// Vertex of a live triangle during construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    Room(RoomNode),
    Support(DVec2),
}

impl Node {
    #[inline]
    pub fn position(&self) -> DVec2 {
        match self {
            Node::Room(node) => node.position,
            Node::Support(position) => *position,
        }
    }

    /// Room identity, `None` for support nodes
    #[inline]
    pub fn room(&self) -> Option<RoomId> {
        match self {
            Node::Room(node) => Some(node.room),
            Node::Support(_) => None,
        }
    }

    #[inline]
    pub fn is_support(&self) -> bool {
        matches!(self, Node::Support(_))
    }
}

/// Inradius of [`SupportTriangle::enclosing`] in multiples of the box extent
const SUPPORT_MARGIN: f64 = 1000.0;

/// Three support points forming a triangle around every real node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportTriangle {
    pub points: [DVec2; 3],
}

impl SupportTriangle {
    /// Use explicit support coordinates
    pub fn new(points: [DVec2; 3]) -> Self {
        Self { points }
    }

    /// Equilateral triangle whose incircle holds the box `min..=max` with
    /// a margin of a thousand box extents.
    ///
    /// Supports must sit outside the circumcircle of every hull triangle of
    /// the real nodes, or those triangles keep a support vertex and are lost
    /// when supports are stripped. Thin hull triangles have large circumcircles.
    pub fn enclosing(min: DVec2, max: DVec2) -> Self {
        let center = (min + max) * 0.5;
        let extent = (max - min).abs().max_element().max(1.0);
        let inradius = SUPPORT_MARGIN * extent + 1.0;
        let half_base = 3f64.sqrt() * inradius;

        Self {
            points: [
                DVec2::new(center.x, center.y + 2.0 * inradius),
                DVec2::new(center.x - half_base, center.y - inradius),
                DVec2::new(center.x + half_base, center.y - inradius),
            ],
        }
    }

    /// Strict point-in-triangle test, either winding
    pub fn strictly_contains(&self, point: DVec2) -> bool {
        let [a, b, c] = self.points;
        let s1 = (b - a).perp_dot(point - a);
        let s2 = (c - b).perp_dot(point - b);
        let s3 = (a - c).perp_dot(point - c);
        (s1 > 0.0 && s2 > 0.0 && s3 > 0.0) || (s1 < 0.0 && s2 < 0.0 && s3 < 0.0)
    }
}
