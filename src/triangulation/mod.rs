//! Incremental Delaunay triangulation of cluster roots
//!
//! Bowyer–Watson insertion over a fixed node set bounded by three support
//! nodes:
//!
//! 1. Start from the single support triangle.
//! 2. Insert real nodes in ascending room identity. For each node, every live
//!    triangle whose circumcircle strictly contains it is removed.
//! 3. The cavity left behind is re-triangulated by joining the node to each
//!    boundary edge, i.e. each edge used by exactly one removed triangle.
//! 4. Triangles still touching a support node are discarded at the end.
//!
//! Triangles live in an arena addressed by index with an `alive` flag, so a
//! removed triangle never invalidates the indices of its successors.

mod mesh;
mod node;

pub use mesh::{Mesh, MeshEdge, MeshTriangle, SkippedTriangle};
pub use node::{Node, RoomNode, SupportTriangle};

use std::collections::{BTreeMap, HashMap};

use glam::DVec2;
use tracing::{debug, info, warn};

use crate::error::TriangulationError;
use crate::geometry::Circumcircle;
use crate::room::RoomId;

/// Index into the node arena; supports occupy 0..3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct NodeId(usize);

impl NodeId {
    /// Undirected edge key, smaller index first
    fn edge(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Triangle {
    nodes: [NodeId; 3],
    circle: Circumcircle,
    alive: bool,
}

impl Triangle {
    fn edges(&self) -> [(NodeId, NodeId); 3] {
        let [a, b, c] = self.nodes;
        [NodeId::edge(a, b), NodeId::edge(b, c), NodeId::edge(c, a)]
    }
}

/// Triangulation state during construction
pub struct Triangulation {
    nodes: Vec<Node>,
    triangles: Vec<Triangle>,
    skipped: Vec<SkippedTriangle>,
}

impl Triangulation {
    /// Triangulate cluster roots inside a support triangle
    ///
    /// # Arguments
    ///
    /// * `rooms` - One node per cluster root; sorted by identity before insertion
    /// * `supports` - Triangle strictly enclosing every room position
    ///
    /// # Errors
    ///
    /// - `DuplicateRoom` if a room identity appears twice (checked before insertion)
    /// - `DuplicatePosition` if two rooms share a center (checked before insertion)
    /// - `OutsideSupports` if a room is not strictly inside the support triangle
    /// - `DegenerateSupport` if a triangle touching a support node has no circumcircle
    /// - `Uncontained` if a room lies in no live circumcircle during insertion
    ///
    /// Degenerate triangles between three real rooms are skipped, logged and
    /// reported through [`Mesh::skipped`] instead of failing the build.
    pub fn build(
        mut rooms: Vec<RoomNode>,
        supports: SupportTriangle,
    ) -> Result<Mesh, TriangulationError> {
        rooms.sort_by_key(|node| node.room);
        validate_nodes(&rooms, &supports)?;

        let mut triangulation = Self::new(&rooms, supports)?;
        for (offset, node) in rooms.iter().enumerate() {
            triangulation.insert(NodeId(offset + 3), node.room)?;
        }

        Ok(triangulation.into_mesh(rooms))
    }

    fn new(rooms: &[RoomNode], supports: SupportTriangle) -> Result<Self, TriangulationError> {
        let [a, b, c] = supports.points;
        let circle = Circumcircle::from_points(a, b, c)
            .map_err(|source| TriangulationError::DegenerateSupport { room: None, source })?;

        let nodes = supports
            .points
            .iter()
            .map(|&point| Node::Support(point))
            .chain(rooms.iter().map(|&node| Node::Room(node)))
            .collect();

        Ok(Self {
            nodes,
            triangles: vec![Triangle {
                nodes: [NodeId(0), NodeId(1), NodeId(2)],
                circle,
                alive: true,
            }],
            skipped: Vec::new(),
        })
    }

    fn position(&self, id: NodeId) -> DVec2 {
        self.nodes[id.0].position()
    }

    fn room_of(&self, id: NodeId) -> Option<RoomId> {
        self.nodes[id.0].room()
    }

    fn insert(&mut self, id: NodeId, room: RoomId) -> Result<(), TriangulationError> {
        let point = self.position(id);

        let cavity: Vec<usize> = self
            .triangles
            .iter()
            .enumerate()
            .filter(|(_, triangle)| triangle.alive && triangle.circle.contains(point))
            .map(|(index, _)| index)
            .collect();

        if cavity.is_empty() {
            return Err(TriangulationError::Uncontained {
                room,
                position: point,
            });
        }

        // Edges shared by two cavity triangles are interior to the cavity.
        let mut edge_uses: BTreeMap<(NodeId, NodeId), usize> = BTreeMap::new();
        for &index in &cavity {
            self.triangles[index].alive = false;
            for edge in self.triangles[index].edges() {
                *edge_uses.entry(edge).or_insert(0) += 1;
            }
        }
        let boundary: Vec<(NodeId, NodeId)> = edge_uses
            .into_iter()
            .filter(|&(_, uses)| uses == 1)
            .map(|(edge, _)| edge)
            .collect();

        debug!(
            room = room.index(),
            cavity = cavity.len(),
            boundary = boundary.len(),
            "inserting node"
        );

        // A strict cavity is star-shaped from `point`, so every boundary edge
        // faces it with nonzero area and the error arm below is unreachable in
        // exact arithmetic. It only guards against rounding in `contains`.
        for (a, b) in boundary {
            match Circumcircle::from_points(self.position(a), self.position(b), point) {
                Ok(circle) => self.triangles.push(Triangle {
                    nodes: [a, b, id],
                    circle,
                    alive: true,
                }),
                Err(source) => {
                    let (Some(first), Some(second)) = (self.room_of(a), self.room_of(b)) else {
                        return Err(TriangulationError::DegenerateSupport {
                            room: Some(room),
                            source,
                        });
                    };
                    warn!(
                        room = room.index(),
                        edge = ?(first.index(), second.index()),
                        error = %source,
                        "skipping degenerate triangle"
                    );
                    self.skipped.push(SkippedTriangle {
                        inserting: room,
                        edge: (first, second),
                        error: source,
                    });
                }
            }
        }

        Ok(())
    }

    /// Drop support-touching triangles and hand the rest to [`Mesh`].
    fn into_mesh(self, rooms: Vec<RoomNode>) -> Mesh {
        let created = self.triangles.len();
        let triangles: Vec<MeshTriangle> = self
            .triangles
            .iter()
            .filter(|triangle| triangle.alive)
            .filter_map(|triangle| {
                let [a, b, c] = triangle.nodes;
                let mut vertices = [self.room_of(a)?, self.room_of(b)?, self.room_of(c)?];
                vertices.sort();
                Some(MeshTriangle {
                    rooms: vertices,
                    center: triangle.circle.center,
                    radius: triangle.circle.radius,
                })
            })
            .collect();

        let mesh = Mesh::new(rooms, triangles, self.skipped);
        if !mesh.isolated().is_empty() {
            warn!(isolated = ?mesh.isolated(), "rooms left out of every triangle");
        }
        info!(
            nodes = mesh.nodes().len(),
            triangles = mesh.triangle_count(),
            created,
            skipped = mesh.skipped().len(),
            "triangulation complete"
        );
        mesh
    }
}

/// Reject repeated rooms, duplicate positions and nodes outside the supports
/// before inserting. `rooms` must already be sorted by identity.
fn validate_nodes(
    rooms: &[RoomNode],
    supports: &SupportTriangle,
) -> Result<(), TriangulationError> {
    if let Some(pair) = rooms.windows(2).find(|pair| pair[0].room == pair[1].room) {
        return Err(TriangulationError::DuplicateRoom { room: pair[0].room });
    }

    let mut seen: HashMap<(u64, u64), RoomId> = HashMap::with_capacity(rooms.len());

    for node in rooms {
        // Adding zero folds -0.0 into 0.0 so both hash alike.
        let key = (
            (node.position.x + 0.0).to_bits(),
            (node.position.y + 0.0).to_bits(),
        );
        if let Some(&first) = seen.get(&key) {
            return Err(TriangulationError::DuplicatePosition {
                first,
                second: node.room,
                position: node.position,
            });
        }
        seen.insert(key, node.room);

        if !supports.strictly_contains(node.position) {
            return Err(TriangulationError::OutsideSupports {
                room: node.room,
                position: node.position,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance;

    fn node(id: usize, x: f64, y: f64) -> RoomNode {
        RoomNode {
            room: RoomId(id),
            position: DVec2::new(x, y),
            size: 36,
        }
    }

    fn supports() -> SupportTriangle {
        SupportTriangle::enclosing(DVec2::ZERO, DVec2::new(149.0, 49.0))
    }

    fn ids(triangle: &MeshTriangle) -> [usize; 3] {
        triangle.rooms.map(RoomId::index)
    }

    #[test]
    fn test_three_rooms_make_one_triangle() {
        let rooms = vec![
            node(0, 20.0, 20.0),
            node(1, 60.0, 20.0),
            node(2, 40.0, 45.0),
        ];
        let mesh = Triangulation::build(rooms, supports()).unwrap();

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(ids(&mesh.triangles()[0]), [0, 1, 2]);
        assert!(mesh.isolated().is_empty());
        assert!(mesh.skipped().is_empty());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let rooms = vec![
            node(3, 100.0, 10.0),
            node(0, 20.0, 20.0),
            node(2, 40.0, 45.0),
            node(1, 60.0, 20.0),
        ];
        let mut reversed = rooms.clone();
        reversed.reverse();

        let a = Triangulation::build(rooms, supports()).unwrap();
        let b = Triangulation::build(reversed, supports()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.nodes()[0].room, RoomId(0));
    }

    #[test]
    fn test_square_splits_into_two_triangles() {
        let rooms = vec![
            node(0, 20.0, 10.0),
            node(1, 50.0, 10.0),
            node(2, 50.0, 40.0),
            node(3, 20.0, 41.0),
        ];
        let mesh = Triangulation::build(rooms, supports()).unwrap();

        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.edges().len(), 5);
        assert!(mesh.isolated().is_empty());
    }

    #[test]
    fn test_surviving_triangles_are_delaunay() {
        let rooms = vec![
            node(0, 15.0, 12.0),
            node(1, 42.0, 30.0),
            node(2, 77.0, 14.0),
            node(3, 120.0, 38.0),
            node(4, 63.0, 41.0),
            node(5, 98.0, 22.0),
            node(6, 30.0, 40.0),
        ];
        let positions: Vec<DVec2> = rooms.iter().map(|n| n.position).collect();
        let mesh = Triangulation::build(rooms, supports()).unwrap();

        assert!(mesh.triangle_count() >= 4);
        for triangle in mesh.triangles() {
            for &p in &positions {
                assert!(distance(triangle.center, p) >= triangle.radius - 1e-9);
            }
        }
        assert!(mesh.isolated().is_empty());
    }

    #[test]
    fn test_support_nodes_never_survive() {
        let rooms = vec![node(0, 10.0, 10.0), node(1, 30.0, 25.0)];
        let mesh = Triangulation::build(rooms, supports()).unwrap();

        assert!(mesh.is_empty());
        assert_eq!(mesh.isolated(), &[RoomId(0), RoomId(1)]);
    }

    #[test]
    fn test_collinear_rooms_are_isolated() {
        let rooms = vec![
            node(0, 10.0, 20.0),
            node(1, 40.0, 20.0),
            node(2, 70.0, 20.0),
        ];
        let mesh = Triangulation::build(rooms, supports()).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.isolated().len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let mesh = Triangulation::build(Vec::new(), supports()).unwrap();
        assert!(mesh.is_empty());
        assert!(mesh.nodes().is_empty());
    }

    #[test]
    fn test_duplicate_positions_rejected() {
        let rooms = vec![node(0, 20.0, 20.0), node(1, 20.0, 20.0), node(2, 5.0, 9.0)];
        let result = Triangulation::build(rooms, supports());
        assert_eq!(
            result,
            Err(TriangulationError::DuplicatePosition {
                first: RoomId(0),
                second: RoomId(1),
                position: DVec2::new(20.0, 20.0),
            })
        );
    }

    #[test]
    fn test_duplicate_room_ids_rejected() {
        let rooms = vec![
            node(0, 20.0, 20.0),
            node(1, 60.0, 20.0),
            node(1, 40.0, 45.0),
            node(2, 90.0, 30.0),
        ];
        let result = Triangulation::build(rooms, supports());
        assert_eq!(
            result,
            Err(TriangulationError::DuplicateRoom { room: RoomId(1) })
        );
    }

    #[test]
    fn test_room_outside_supports_rejected() {
        let tight = SupportTriangle::new([
            DVec2::new(0.0, 0.0),
            DVec2::new(100.0, 0.0),
            DVec2::new(0.0, 100.0),
        ]);
        let rooms = vec![node(0, 10.0, 10.0), node(1, 90.0, 90.0)];
        let result = Triangulation::build(rooms, tight);
        assert!(matches!(
            result,
            Err(TriangulationError::OutsideSupports { room: RoomId(1), .. })
        ));
    }

    #[test]
    fn test_degenerate_supports_rejected() {
        let flat = SupportTriangle::new([
            DVec2::new(-100.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(100.0, 0.0),
        ]);
        let result = Triangulation::build(Vec::new(), flat);
        assert!(matches!(
            result,
            Err(TriangulationError::DegenerateSupport { room: None, .. })
        ));
    }
}
