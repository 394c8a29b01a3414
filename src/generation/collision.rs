//! Pairwise collision detection and cluster merging
//!
//! Every unordered room pair is tested once, O(N²) over the registry, which is
//! fine for tens to low hundreds of rooms. Merges are applied afterwards in
//! the same `(i, j > i)` order.

use tracing::{debug, trace};

use crate::cluster::{ClusterForest, MergeOutcome};
use crate::error::ClusterError;
use crate::room::{Overlap, Room, RoomId};

/// One overlapping room pair, `first < second`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub first: RoomId,
    pub second: RoomId,
    pub kind: Overlap,
}

/// Find every overlapping pair in `(i, j > i)` order
pub fn find_overlaps(rooms: &[Room]) -> Vec<Collision> {
    let mut collisions = Vec::new();

    for (i, first) in rooms.iter().enumerate() {
        for second in &rooms[i + 1..] {
            if let Some(kind) = first.overlap(second) {
                if kind == Overlap::CornerTouch {
                    trace!(
                        first = first.id.index(),
                        second = second.id.index(),
                        "rooms touch at a corner"
                    );
                }
                collisions.push(Collision {
                    first: first.id,
                    second: second.id,
                    kind,
                });
            }
        }
    }

    collisions
}

/// Apply collisions to the forest in order, then check its invariants
///
/// Returns the number of merges that joined two distinct clusters.
pub fn merge_overlaps(
    forest: &mut ClusterForest,
    collisions: &[Collision],
) -> Result<usize, ClusterError> {
    let mut joined = 0;
    for collision in collisions {
        if let MergeOutcome::Merged(_) = forest.merge(collision.first, collision.second)? {
            joined += 1;
        }
    }
    forest.validate()?;

    debug!(
        collisions = collisions.len(),
        joined,
        clusters = forest.cluster_count(),
        "collision merge complete"
    );
    Ok(joined)
}

/// Build the cluster forest for a room registry
pub fn cluster_rooms(rooms: &[Room]) -> Result<ClusterForest, ClusterError> {
    let mut forest = ClusterForest::new(rooms.len());
    let collisions = find_overlaps(rooms);
    merge_overlaps(&mut forest, &collisions)?;
    Ok(forest)
}
