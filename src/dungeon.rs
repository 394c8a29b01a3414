//! Dungeon main structure

use std::time::Instant;

use glam::DVec2;
use tracing::info;

use crate::board::Board;
use crate::cluster::ClusterForest;
use crate::config::DungeonConfig;
use crate::error::{DungeonError, Result};
use crate::generation::{cluster_nodes, cluster_rooms, generate_rooms};
use crate::room::{Room, RoomId};
use crate::triangulation::{Mesh, RoomNode, SupportTriangle, Triangulation};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A generated dungeon layout
///
/// Holds the sampled rooms, their cluster forest, the rasterized board and
/// the triangle mesh over cluster roots.
///
/// # Examples
///
/// ```
/// use dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new().seed(42).build().unwrap();
/// let dungeon = Dungeon::generate(config).unwrap();
///
/// println!("{} rooms in {} clusters", dungeon.rooms().len(), dungeon.cluster_count());
/// for edge in dungeon.mesh().edges() {
///     println!("{} -- {} ({:.1})", edge.a, edge.b, edge.length);
/// }
/// ```
#[derive(Clone)]
pub struct Dungeon {
    /// Configuration used to generate this dungeon
    config: DungeonConfig,

    /// Every sampled room, indexed by room ID
    rooms: Vec<Room>,

    /// Cluster membership for `rooms`
    forest: ClusterForest,

    /// All rooms drawn onto the board
    board: Board,

    /// Triangulation over cluster roots
    mesh: Mesh,

    /// Nearest-cluster lookup (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl Dungeon {
    /// Generate a dungeon from a configuration
    ///
    /// Runs every phase in order: sampling, rasterization, collision merging
    /// and triangulation. The support triangle is placed well outside the board.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` before any sampling if the configuration is invalid
    /// - `Cluster` if the forest fails its invariant check after merging
    /// - `Triangulation` if triangulation hits a fatal condition
    pub fn generate(config: DungeonConfig) -> Result<Self> {
        let start = Instant::now();

        let rooms = generate_rooms(&config)?;
        let mut board = Board::new(config.width(), config.height());
        board.draw_rooms(&rooms);

        let forest = cluster_rooms(&rooms)?;
        let nodes = cluster_nodes(&rooms, &forest)?;
        info!(
            seed = config.seed,
            rooms = rooms.len(),
            clusters = nodes.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "rooms generated and merged"
        );

        let supports = SupportTriangle::enclosing(
            DVec2::ZERO,
            DVec2::new(
                f64::from(config.width().saturating_sub(1)),
                f64::from(config.height().saturating_sub(1)),
            ),
        );

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<(RoomId, DVec2)> =
                nodes.iter().map(|node| (node.room, node.position)).collect();
            SpatialIndex::new(&centers)
        };

        let mesh = Triangulation::build(nodes, supports)?;
        info!(
            triangles = mesh.triangle_count(),
            edges = mesh.edges().len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "dungeon layout complete"
        );

        Ok(Self {
            config,
            rooms,
            forest,
            board,
            mesh,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this dungeon
    #[inline]
    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// All sampled rooms, cluster roots and absorbed rooms alike
    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Get a room by ID
    #[inline]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// Cluster membership of every room
    #[inline]
    pub fn forest(&self) -> &ClusterForest {
        &self.forest
    }

    /// Rasterized board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Triangle mesh over cluster roots
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Cluster-root nodes in ascending identity
    #[inline]
    pub fn nodes(&self) -> &[RoomNode] {
        self.mesh.nodes()
    }

    /// Number of clusters left after merging
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.mesh.nodes().len()
    }

    /// Rooms of the cluster containing `room`, root first
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` if the room ID is out of range.
    pub fn cluster_members(&self, room: RoomId) -> Result<Vec<RoomId>> {
        if self.room(room).is_none() {
            return Err(DungeonError::RoomNotFound(room));
        }
        let root = self.forest.root_of(room)?;
        Ok(self.forest.members(root).collect())
    }

    /// Cluster roots sharing a mesh edge with the cluster containing `room`
    ///
    /// Returns an empty list for invalid IDs.
    pub fn neighbors(&self, room: RoomId) -> Vec<RoomId> {
        match self.forest.root_of(room) {
            Ok(root) => self.mesh.neighbors(root),
            Err(_) => Vec::new(),
        }
    }

    /// The `count` largest clusters by size, ties broken by identity
    pub fn largest_clusters(&self, count: usize) -> Vec<RoomNode> {
        let mut nodes = self.mesh.nodes().to_vec();
        nodes.sort_by(|a, b| b.size.cmp(&a.size).then(a.room.cmp(&b.room)));
        nodes.truncate(count);
        nodes
    }

    /// Find the cluster root nearest to a position (requires spatial-index feature)
    ///
    /// # Example
    ///
    /// ```
    /// # use dungeon_layout::*;
    /// # use glam::DVec2;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let dungeon = Dungeon::generate(DungeonConfig::default()).unwrap();
    /// let root = dungeon.find_cluster_at(DVec2::new(75.0, 25.0)).unwrap();
    /// assert!(dungeon.forest().is_root(root).unwrap());
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_cluster_at(&self, position: DVec2) -> Option<RoomId> {
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
    }
}
