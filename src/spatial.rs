//! Spatial indexing for fast position-to-cluster lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::room::RoomId;

/// Wrapper around a 2D KD-tree of cluster-root centers
///
/// Answers "which cluster is nearest to this point" in O(log n), e.g. to map
/// a clicked cell or a corridor endpoint to a room cluster.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
    rooms: Vec<RoomId>,
}

impl SpatialIndex {
    /// Build the index from `(room, center)` pairs
    ///
    /// Returns `None` for an empty input.
    ///
    /// # Example
    ///
    /// ```
    /// use dungeon_layout::*;
    /// use glam::DVec2;
    ///
    /// let index = SpatialIndex::new(&[
    ///     (RoomId(0), DVec2::new(10.0, 10.0)),
    ///     (RoomId(4), DVec2::new(90.0, 30.0)),
    /// ])
    /// .unwrap();
    /// assert_eq!(index.find_nearest(DVec2::new(80.0, 25.0)), RoomId(4));
    /// ```
    pub fn new(centers: &[(RoomId, DVec2)]) -> Option<Self> {
        if centers.is_empty() {
            return None;
        }

        // kiddo works on fixed-size arrays
        let points: Vec<[f32; 2]> = centers
            .iter()
            .map(|(_, c)| [c.x as f32, c.y as f32])
            .collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            rooms: centers.iter().map(|(room, _)| *room).collect(),
        })
    }

    /// Room whose center is nearest to `position`
    pub fn find_nearest(&self, position: DVec2) -> RoomId {
        let query = [position.x as f32, position.y as f32];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        self.rooms[result.item as usize]
    }

    /// Number of indexed rooms
    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
