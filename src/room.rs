//! Room Structure
//!
//! Axis-aligned rectangular rooms on the integer grid and the pairwise overlap test.

use std::fmt;

use glam::{DVec2, IVec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of a room
///
/// Assigned at creation in sampling order and equal to the room's index in
/// the registry. Cluster chains are sorted by this value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(pub usize);

impl RoomId {
    /// Index of this room in the registry
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single rectangular room
///
/// The room covers the inclusive cell range `center ± (half_width, half_length)`:
/// `half_width` extends along x and `half_length` along y. The outermost ring
/// of cells is wall, the rest is floor.
///
/// Rooms never change after sampling. Cluster membership is tracked separately
/// by [`ClusterForest`](crate::cluster::ClusterForest).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    /// Identity (0 to room_count-1)
    pub id: RoomId,
    /// Half extent along x
    pub half_width: u32,
    /// Half extent along y
    pub half_length: u32,
    /// Center cell; x grows right, y grows down
    pub center: IVec2,
}

/// How two rooms collide
///
/// All variants are merged the same way; the distinction is kept for logging
/// and for callers that want to treat touching rooms differently later.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlap {
    /// Rectangles overlap past the corrected edge on both axes
    Interior,
    /// Exactly one axis sits on the corrected edge
    EdgeTouch,
    /// Both axes sit on the corrected edge
    CornerTouch,
}

/// Per-axis collision result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisContact {
    Apart,
    Edge,
    Crossing,
}

/// Classify one axis given two centers and half extents.
///
/// The gap is measured from the far room's low edge to one cell inside the
/// near room's high edge, so rooms whose walls merely coincide are apart and
/// a gap of exactly zero is an edge contact. Equal centers always cross.
fn axis_contact(c1: i32, h1: u32, c2: i32, h2: u32) -> AxisContact {
    if c1 == c2 {
        return AxisContact::Crossing;
    }
    let ((near, near_half), (far, far_half)) = if c1 < c2 {
        ((c1, h1 as i32), (c2, h2 as i32))
    } else {
        ((c2, h2 as i32), (c1, h1 as i32))
    };
    let gap = (far - far_half) - (near + near_half - 1);
    match gap {
        g if g < 0 => AxisContact::Crossing,
        0 => AxisContact::Edge,
        _ => AxisContact::Apart,
    }
}

impl Room {
    /// Create a new room
    pub fn new(id: RoomId, half_width: u32, half_length: u32, center: IVec2) -> Self {
        Self {
            id,
            half_width,
            half_length,
            center,
        }
    }

    /// Rasterized area counted for cluster sizing: `4 * w * l`
    #[inline]
    pub fn area(&self) -> u64 {
        4 * u64::from(self.half_width) * u64::from(self.half_length)
    }

    /// Top-left cell of the room rectangle (inclusive)
    #[inline]
    pub fn min_corner(&self) -> IVec2 {
        self.center - IVec2::new(self.half_width as i32, self.half_length as i32)
    }

    /// Bottom-right cell of the room rectangle (inclusive)
    #[inline]
    pub fn max_corner(&self) -> IVec2 {
        self.center + IVec2::new(self.half_width as i32, self.half_length as i32)
    }

    /// Center as a real-valued coordinate
    #[inline]
    pub fn position(&self) -> DVec2 {
        self.center.as_dvec2()
    }

    /// Axis-aligned overlap test against another room
    ///
    /// Returns `None` when the rooms do not collide. O(1).
    pub fn overlap(&self, other: &Room) -> Option<Overlap> {
        let x = axis_contact(
            self.center.x,
            self.half_width,
            other.center.x,
            other.half_width,
        );
        let y = axis_contact(
            self.center.y,
            self.half_length,
            other.center.y,
            other.half_length,
        );

        match (x, y) {
            (AxisContact::Apart, _) | (_, AxisContact::Apart) => None,
            (AxisContact::Edge, AxisContact::Edge) => Some(Overlap::CornerTouch),
            (AxisContact::Edge, _) | (_, AxisContact::Edge) => Some(Overlap::EdgeTouch),
            (AxisContact::Crossing, AxisContact::Crossing) => Some(Overlap::Interior),
        }
    }

    /// Check whether two rooms collide
    #[inline]
    pub fn overlaps(&self, other: &Room) -> bool {
        self.overlap(other).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: usize, w: u32, l: u32, x: i32, y: i32) -> Room {
        Room::new(RoomId(id), w, l, IVec2::new(x, y))
    }

    #[test]
    fn test_room_area() {
        assert_eq!(room(0, 3, 4, 20, 20).area(), 48);
        assert_eq!(room(0, 0, 7, 20, 20).area(), 0);
    }

    #[test]
    fn test_room_corners() {
        let r = room(0, 3, 5, 20, 10);
        assert_eq!(r.min_corner(), IVec2::new(17, 5));
        assert_eq!(r.max_corner(), IVec2::new(23, 15));
    }

    #[test]
    fn test_separated_rooms_do_not_overlap() {
        let a = room(0, 3, 3, 10, 10);
        let b = room(1, 3, 3, 30, 10);
        assert_eq!(a.overlap(&b), None);
        assert_eq!(b.overlap(&a), None);
    }

    #[test]
    fn test_shared_wall_is_not_an_overlap() {
        // a spans x 7..=13, b spans x 13..=19
        let a = room(0, 3, 3, 10, 10);
        let b = room(1, 3, 3, 16, 10);
        assert_eq!(a.overlap(&b), None);
    }

    #[test]
    fn test_edge_touch() {
        // a spans x 7..=13, b spans x 12..=18: gap is exactly zero
        let a = room(0, 3, 3, 10, 10);
        let b = room(1, 3, 3, 15, 10);
        assert_eq!(a.overlap(&b), Some(Overlap::EdgeTouch));
        assert_eq!(b.overlap(&a), Some(Overlap::EdgeTouch));
    }

    #[test]
    fn test_corner_touch() {
        let a = room(0, 3, 3, 10, 10);
        let b = room(1, 3, 3, 15, 15);
        assert_eq!(a.overlap(&b), Some(Overlap::CornerTouch));
    }

    #[test]
    fn test_interior_overlap() {
        let a = room(0, 5, 5, 10, 10);
        let b = room(1, 3, 3, 13, 12);
        assert_eq!(a.overlap(&b), Some(Overlap::Interior));
    }

    #[test]
    fn test_equal_centers_always_cross() {
        let a = room(0, 0, 0, 10, 10);
        let b = room(1, 0, 0, 10, 10);
        assert_eq!(a.overlap(&b), Some(Overlap::Interior));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        // x ranges cross, y ranges far apart
        let a = room(0, 5, 3, 10, 10);
        let b = room(1, 5, 3, 12, 40);
        assert!(!a.overlaps(&b));
    }
}
