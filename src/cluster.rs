//! Cluster forest for overlapping rooms
//!
//! Each cluster of transitively overlapping rooms is a singly-linked chain
//! sorted by ascending [`RoomId`], rooted at its smallest member. Links are
//! stored by index in an arena parallel to the room registry, so rooms never
//! reference each other directly.
//!
//! Merging two clusters interleaves their chains in identity order. This keeps
//! every chain sorted without re-sorting and costs O(size of both clusters).

use tracing::debug;

use crate::error::ClusterError;
use crate::room::{Room, RoomId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cluster links for one room
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterLink {
    /// Previous room in the chain; `None` for a cluster root
    pub parent: Option<RoomId>,
    /// Next room in the chain
    pub child: Option<RoomId>,
}

/// Outcome of a [`ClusterForest::merge`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both rooms were already in the same cluster; nothing changed
    AlreadyJoined(RoomId),
    /// Two clusters became one with the given root
    Merged(RoomId),
}

impl MergeOutcome {
    /// Root of the cluster containing both merged rooms
    pub fn root(self) -> RoomId {
        match self {
            MergeOutcome::AlreadyJoined(root) | MergeOutcome::Merged(root) => root,
        }
    }
}

/// Forest of sorted cluster chains over a fixed set of rooms
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterForest {
    links: Vec<ClusterLink>,
}

impl ClusterForest {
    /// Create a forest where every room is its own single-member cluster
    pub fn new(room_count: usize) -> Self {
        Self {
            links: vec![ClusterLink::default(); room_count],
        }
    }

    /// Number of rooms tracked
    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Check if the forest tracks no rooms
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links for a room, if it exists
    #[inline]
    pub fn link(&self, room: RoomId) -> Option<&ClusterLink> {
        self.links.get(room.index())
    }

    fn get(&self, room: RoomId) -> Result<&ClusterLink, ClusterError> {
        self.links
            .get(room.index())
            .ok_or(ClusterError::UnknownRoom(room))
    }

    /// Check if a room is currently a cluster root
    pub fn is_root(&self, room: RoomId) -> Result<bool, ClusterError> {
        Ok(self.get(room)?.parent.is_none())
    }

    /// Walk parent links to the cluster root
    ///
    /// Resolving a root returns the root itself.
    pub fn root_of(&self, room: RoomId) -> Result<RoomId, ClusterError> {
        let mut current = room;
        // A chain can be at most as long as the forest.
        for _ in 0..=self.links.len() {
            match self.get(current)?.parent {
                Some(parent) => current = parent,
                None => return Ok(current),
            }
        }
        Err(ClusterError::Cycle(room))
    }

    /// Merge the clusters containing `a` and `b`
    ///
    /// Both chains are resolved to their roots first; if the roots are equal
    /// the call is a no-op. Otherwise the chains are interleaved in identity
    /// order and the smaller root becomes the root of the union.
    ///
    /// Both chains are walked and checked before any link is rewritten, so an
    /// `Err` leaves the forest exactly as it was.
    pub fn merge(&mut self, a: RoomId, b: RoomId) -> Result<MergeOutcome, ClusterError> {
        let root_a = self.root_of(a)?;
        let root_b = self.root_of(b)?;
        if root_a == root_b {
            return Ok(MergeOutcome::AlreadyJoined(root_a));
        }

        let (head, other) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        let left = self.chain(head)?;
        let right = self.chain(other)?;

        let mut merged = Vec::with_capacity(left.len() + right.len());
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            if left[i] < right[j] {
                merged.push(left[i]);
                i += 1;
            } else {
                merged.push(right[j]);
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);

        // A room on both chains means the links were already corrupt.
        if let Some(pair) = merged.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ClusterError::Unsorted {
                prev: pair[0],
                next: pair[1],
            });
        }

        for pair in merged.windows(2) {
            self.links[pair[0].index()].child = Some(pair[1]);
            self.links[pair[1].index()].parent = Some(pair[0]);
        }

        debug!(
            a = a.index(),
            b = b.index(),
            root = head.index(),
            absorbed = other.index(),
            size = merged.len(),
            "merged room clusters"
        );
        Ok(MergeOutcome::Merged(head))
    }

    /// Collect the chain starting at `start`, checking that it only names
    /// known rooms in strictly increasing order (which also rules out cycles).
    fn chain(&self, start: RoomId) -> Result<Vec<RoomId>, ClusterError> {
        let mut rooms = vec![start];
        let mut next = self.get(start)?.child;

        while let Some(current) = next {
            let prev = rooms[rooms.len() - 1];
            if current <= prev {
                return Err(ClusterError::Unsorted {
                    prev,
                    next: current,
                });
            }
            next = self.get(current)?.child;
            rooms.push(current);
        }
        Ok(rooms)
    }

    /// Iterate a chain starting at `start`, following child links
    ///
    /// Pass a root to visit its whole cluster in ascending identity order.
    pub fn members(&self, start: RoomId) -> ClusterMembers<'_> {
        ClusterMembers {
            forest: self,
            next: self.link(start).map(|_| start),
            remaining: self.links.len(),
        }
    }

    /// Iterate every cluster root in ascending identity order
    pub fn roots(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.parent.is_none())
            .map(|(index, _)| RoomId(index))
    }

    /// Number of clusters
    pub fn cluster_count(&self) -> usize {
        self.roots().count()
    }

    /// Sum of `4 * w * l` over the chain starting at `root`
    ///
    /// Overlap between rooms of the same cluster is counted twice; this is the
    /// node weight handed to triangulation, not a true floor area.
    pub fn cluster_area(&self, rooms: &[Room], root: RoomId) -> Result<u64, ClusterError> {
        self.get(root)?;
        self.members(root)
            .map(|id| {
                rooms
                    .get(id.index())
                    .map(Room::area)
                    .ok_or(ClusterError::UnknownRoom(id))
            })
            .sum()
    }

    /// Verify every structural invariant of the forest
    ///
    /// Chains must be strictly increasing, parent/child links must agree,
    /// no chain may cycle and every room must be reachable from exactly one root.
    pub fn validate(&self) -> Result<(), ClusterError> {
        let mut seen = vec![false; self.links.len()];

        for root in self.roots() {
            let mut prev = root;
            seen[root.index()] = true;
            let mut next = self.links[root.index()].child;

            while let Some(current) = next {
                let link = self.get(current)?;
                if seen[current.index()] {
                    return Err(ClusterError::Cycle(root));
                }
                if current <= prev {
                    return Err(ClusterError::Unsorted {
                        prev,
                        next: current,
                    });
                }
                if link.parent != Some(prev) {
                    return Err(ClusterError::BrokenLink {
                        room: current,
                        parent: prev,
                    });
                }
                seen[current.index()] = true;
                prev = current;
                next = link.child;
            }
        }

        match seen.iter().position(|visited| !visited) {
            Some(index) => Err(ClusterError::Orphaned(RoomId(index))),
            None => Ok(()),
        }
    }
}

/// Iterator over one cluster chain
pub struct ClusterMembers<'a> {
    forest: &'a ClusterForest,
    next: Option<RoomId>,
    remaining: usize,
}

impl Iterator for ClusterMembers<'_> {
    type Item = RoomId;

    fn next(&mut self) -> Option<RoomId> {
        // Bounded by forest size so a corrupted cycle cannot spin forever.
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.forest.link(current).and_then(|link| link.child);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn chain(forest: &ClusterForest, root: usize) -> Vec<usize> {
        forest.members(RoomId(root)).map(RoomId::index).collect()
    }

    #[test]
    fn test_new_forest_is_all_roots() {
        let forest = ClusterForest::new(4);
        assert_eq!(forest.cluster_count(), 4);
        for i in 0..4 {
            assert!(forest.is_root(RoomId(i)).unwrap());
            assert_eq!(forest.root_of(RoomId(i)).unwrap(), RoomId(i));
        }
        forest.validate().unwrap();
    }

    #[test]
    fn test_merge_pair() {
        let mut forest = ClusterForest::new(3);
        let outcome = forest.merge(RoomId(0), RoomId(2)).unwrap();
        assert_eq!(outcome, MergeOutcome::Merged(RoomId(0)));
        assert_eq!(chain(&forest, 0), vec![0, 2]);
        assert!(!forest.is_root(RoomId(2)).unwrap());
        assert_eq!(forest.cluster_count(), 2);
        forest.validate().unwrap();
    }

    #[test]
    fn test_merge_argument_order_does_not_matter() {
        let mut forest = ClusterForest::new(3);
        forest.merge(RoomId(2), RoomId(0)).unwrap();
        assert_eq!(chain(&forest, 0), vec![0, 2]);
        assert_eq!(forest.root_of(RoomId(2)).unwrap(), RoomId(0));
    }

    #[test]
    fn test_merge_same_cluster_is_noop() {
        let mut forest = ClusterForest::new(3);
        forest.merge(RoomId(0), RoomId(1)).unwrap();
        let before = forest.clone();
        let outcome = forest.merge(RoomId(1), RoomId(0)).unwrap();
        assert_eq!(outcome, MergeOutcome::AlreadyJoined(RoomId(0)));
        assert_eq!(forest, before);
    }

    #[test]
    fn test_merge_interleaves_chains() {
        let mut forest = ClusterForest::new(7);
        forest.merge(RoomId(1), RoomId(4)).unwrap();
        forest.merge(RoomId(4), RoomId(6)).unwrap();
        forest.merge(RoomId(0), RoomId(3)).unwrap();
        forest.merge(RoomId(3), RoomId(5)).unwrap();
        assert_eq!(chain(&forest, 1), vec![1, 4, 6]);
        assert_eq!(chain(&forest, 0), vec![0, 3, 5]);

        // Merge via non-root members of each chain
        let outcome = forest.merge(RoomId(6), RoomId(5)).unwrap();
        assert_eq!(outcome.root(), RoomId(0));
        assert_eq!(chain(&forest, 0), vec![0, 1, 3, 4, 5, 6]);
        assert_eq!(forest.cluster_count(), 2);
        forest.validate().unwrap();
    }

    #[test]
    fn test_chain_of_four() {
        let mut forest = ClusterForest::new(4);
        for (a, b) in [(0, 1), (1, 2), (2, 3)] {
            forest.merge(RoomId(a), RoomId(b)).unwrap();
        }
        assert_eq!(chain(&forest, 0), vec![0, 1, 2, 3]);
        for i in 0..4 {
            assert_eq!(forest.root_of(RoomId(i)).unwrap(), RoomId(0));
        }
    }

    #[test]
    fn test_cluster_area_double_counts() {
        let rooms = vec![
            Room::new(RoomId(0), 3, 3, IVec2::new(20, 20)),
            Room::new(RoomId(1), 3, 3, IVec2::new(20, 20)),
            Room::new(RoomId(2), 4, 5, IVec2::new(60, 20)),
        ];
        let mut forest = ClusterForest::new(rooms.len());
        forest.merge(RoomId(0), RoomId(1)).unwrap();

        assert_eq!(forest.cluster_area(&rooms, RoomId(0)).unwrap(), 72);
        assert_eq!(forest.cluster_area(&rooms, RoomId(2)).unwrap(), 80);
    }

    #[test]
    fn test_unknown_room() {
        let mut forest = ClusterForest::new(2);
        assert_eq!(
            forest.root_of(RoomId(5)),
            Err(ClusterError::UnknownRoom(RoomId(5)))
        );
        assert!(forest.merge(RoomId(0), RoomId(9)).is_err());
    }

    #[test]
    fn test_validate_detects_unsorted_chain() {
        let mut forest = ClusterForest::new(3);
        forest.links[2].child = Some(RoomId(1));
        forest.links[1].parent = Some(RoomId(2));
        assert_eq!(
            forest.validate(),
            Err(ClusterError::Unsorted {
                prev: RoomId(2),
                next: RoomId(1)
            })
        );
    }

    #[test]
    fn test_failed_merge_leaves_forest_untouched() {
        let mut forest = ClusterForest::new(4);
        forest.merge(RoomId(0), RoomId(2)).unwrap();
        // Root 1 points back down at room 0
        forest.links[1].child = Some(RoomId(0));
        let before = forest.clone();

        assert_eq!(
            forest.merge(RoomId(2), RoomId(1)),
            Err(ClusterError::Unsorted {
                prev: RoomId(1),
                next: RoomId(0)
            })
        );
        assert_eq!(forest, before);
    }

    #[test]
    fn test_merge_rejects_shared_member() {
        let mut forest = ClusterForest::new(4);
        forest.merge(RoomId(0), RoomId(3)).unwrap();
        // Room 3 also hangs off root 1 without a matching parent link
        forest.links[1].child = Some(RoomId(3));
        let before = forest.clone();

        assert_eq!(
            forest.merge(RoomId(1), RoomId(0)),
            Err(ClusterError::Unsorted {
                prev: RoomId(3),
                next: RoomId(3)
            })
        );
        assert_eq!(forest, before);
    }

    #[test]
    fn test_root_of_detects_cycle() {
        let mut forest = ClusterForest::new(2);
        forest.links[0].parent = Some(RoomId(1));
        forest.links[1].parent = Some(RoomId(0));
        assert_eq!(forest.root_of(RoomId(0)), Err(ClusterError::Cycle(RoomId(0))));
    }

    #[test]
    fn test_validate_detects_orphan() {
        let mut forest = ClusterForest::new(3);
        forest.links[0].parent = Some(RoomId(1));
        forest.links[1].parent = Some(RoomId(0));
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_members_of_unknown_room_is_empty() {
        let forest = ClusterForest::new(2);
        assert_eq!(forest.members(RoomId(7)).count(), 0);
    }
}
