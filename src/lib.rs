//! Procedural dungeon layout
//!
//! Samples rectangular rooms on a bounded grid, merges overlapping rooms into
//! clusters, and triangulates the cluster roots into a connectivity mesh that
//! a corridor-routing stage can extract a spanning tree from.
//!
//! # Quick Start
//!
//! ```rust
//! use dungeon_layout::*;
//!
//! let config = DungeonConfigBuilder::new()
//!     .seed(42)
//!     .size(DungeonSize::Standard)
//!     .build()
//!     .unwrap();
//!
//! let dungeon = Dungeon::generate(config).unwrap();
//!
//! // ASCII rendering: ' ' blank, '#' wall, '.' floor
//! println!("{}", dungeon.board());
//!
//! // Room adjacency for the spanning-tree stage
//! for (room, neighbors) in dungeon.mesh().adjacency() {
//!     println!("{} -> {:?}", room, neighbors);
//! }
//! ```
//!
//! # Pipeline
//!
//! 1. [`generate_rooms`]: seeded sampling of room extents and centers
//! 2. [`cluster_rooms`]: pairwise overlap test and sorted-chain cluster merging
//! 3. [`cluster_nodes`]: one [`RoomNode`] per cluster root, sized by cluster area
//! 4. [`Triangulation::build`]: incremental Delaunay triangulation inside a
//!    support triangle, support triangles stripped at the end
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cluster lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, rooms and meshes

// Modules
pub mod error;
pub mod config;
pub mod room;
pub mod cluster;
pub mod geometry;
pub mod generation;
pub mod triangulation;
pub mod board;
pub mod dungeon;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{ClusterError, DungeonError, GeometryError, Result, TriangulationError};
pub use config::{Bounds, DungeonConfig, DungeonConfigBuilder, DungeonSize};
pub use room::{Overlap, Room, RoomId};
pub use cluster::{ClusterForest, ClusterLink, MergeOutcome};
pub use geometry::{circumcenter, circumradius, distance, Circumcircle};
pub use generation::{
    cluster_nodes, cluster_rooms, find_overlaps, generate_rooms, merge_overlaps, Collision,
};
pub use triangulation::{
    Mesh, MeshEdge, MeshTriangle, Node, RoomNode, SkippedTriangle, SupportTriangle,
    Triangulation,
};
pub use board::{Board, BLANK, FLOOR, WALL};
pub use dungeon::Dungeon;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vector types for convenience
pub use glam::{DVec2, IVec2};
