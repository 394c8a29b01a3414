//! Property-based tests for collision merging.
//!
//! Rooms are drawn on a small board so that overlaps, chains and corner
//! contacts are common.

use dungeon_layout::*;
use proptest::prelude::*;

/// Strategy for a room list with identities equal to indices
fn rooms(max_rooms: usize) -> impl Strategy<Value = Vec<Room>> {
    prop::collection::vec((0u32..8, 0u32..8, 10i32..90, 10i32..50), 1..max_rooms).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(id, (w, l, x, y))| Room::new(RoomId(id), w, l, IVec2::new(x, y)))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_overlapping_rooms_share_a_root(rooms in rooms(40)) {
        let forest = cluster_rooms(&rooms).unwrap();
        for collision in find_overlaps(&rooms) {
            prop_assert_eq!(
                forest.root_of(collision.first).unwrap(),
                forest.root_of(collision.second).unwrap()
            );
        }
    }

    #[test]
    fn prop_chains_are_sorted_and_partition_rooms(rooms in rooms(40)) {
        let forest = cluster_rooms(&rooms).unwrap();
        prop_assert!(forest.validate().is_ok());

        let mut seen = vec![0usize; rooms.len()];
        for root in forest.roots() {
            let members: Vec<RoomId> = forest.members(root).collect();
            prop_assert_eq!(members[0], root);
            prop_assert!(members.windows(2).all(|pair| pair[0] < pair[1]));
            for member in members {
                seen[member.index()] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn prop_cluster_area_sums_members(rooms in rooms(40)) {
        let forest = cluster_rooms(&rooms).unwrap();
        for root in forest.roots() {
            let expected: u64 = forest
                .members(root)
                .map(|id| {
                    let room = &rooms[id.index()];
                    4 * u64::from(room.half_width) * u64::from(room.half_length)
                })
                .sum();
            prop_assert_eq!(forest.cluster_area(&rooms, root).unwrap(), expected);
        }
    }

    #[test]
    fn prop_merge_order_does_not_change_clusters(rooms in rooms(30)) {
        let collisions = find_overlaps(&rooms);

        let mut forward = ClusterForest::new(rooms.len());
        merge_overlaps(&mut forward, &collisions).unwrap();

        let mut reversed = ClusterForest::new(rooms.len());
        let backwards: Vec<Collision> = collisions.iter().rev().copied().collect();
        merge_overlaps(&mut reversed, &backwards).unwrap();

        // Sorted chains make the final structure independent of merge order
        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn prop_overlap_is_symmetric(
        a in (0u32..8, 0u32..8, 0i32..40, 0i32..40),
        b in (0u32..8, 0u32..8, 0i32..40, 0i32..40),
    ) {
        let first = Room::new(RoomId(0), a.0, a.1, IVec2::new(a.2, a.3));
        let second = Room::new(RoomId(1), b.0, b.1, IVec2::new(b.2, b.3));
        prop_assert_eq!(first.overlap(&second), second.overlap(&first));
    }
}
