//! Error types for dungeon layout generation

use glam::DVec2;
use thiserror::Error;

use crate::room::RoomId;

/// Errors that can occur during dungeon generation or queries
#[derive(Debug, Clone, Error)]
pub enum DungeonError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Circumcircle computation failed
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The cluster forest is structurally broken
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// Triangulation could not be completed
    #[error(transparent)]
    Triangulation(#[from] TriangulationError),

    /// Requested room ID does not exist
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),
}

/// Degenerate input to the geometry kernel.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Two of the three points are the same, so one chord has no bisector.
    #[error("coincident points {a} and {b} have no perpendicular bisector")]
    CoincidentPoints { a: DVec2, b: DVec2 },

    /// The two bisectors are parallel and never intersect.
    #[error("points {a}, {b}, {c} are collinear; bisectors do not intersect")]
    Collinear { a: DVec2, b: DVec2, c: DVec2 },

    /// An input or the solved center is NaN or infinite.
    #[error("non-finite coordinate in circumcircle of {a}, {b}, {c}")]
    NonFinite { a: DVec2, b: DVec2, c: DVec2 },
}

/// Structural invariant violations in the cluster forest.
///
/// None of these occur when merges go through
/// [`ClusterForest::merge`](crate::cluster::ClusterForest::merge); they
/// indicate corrupted links.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("room {0} is not part of the cluster forest")]
    UnknownRoom(RoomId),

    #[error("cycle detected in cluster links starting at room {0}")]
    Cycle(RoomId),

    #[error("cluster chain not sorted: room {next} follows room {prev}")]
    Unsorted { prev: RoomId, next: RoomId },

    #[error("room {room} has parent {parent} but {parent} does not link back to it")]
    BrokenLink { room: RoomId, parent: RoomId },

    #[error("room {0} is not reachable from any cluster root")]
    Orphaned(RoomId),
}

/// Failures of the incremental triangulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    /// The same room was handed in as two nodes; rejected before insertion starts.
    #[error("room {room} appears more than once in the node set")]
    DuplicateRoom { room: RoomId },

    /// Two real nodes share a position; rejected before insertion starts.
    #[error("rooms {first} and {second} share position {position}")]
    DuplicatePosition {
        first: RoomId,
        second: RoomId,
        position: DVec2,
    },

    /// A real node does not lie strictly inside the support triangle.
    #[error("room {room} at {position} is not strictly inside the support triangle")]
    OutsideSupports { room: RoomId, position: DVec2 },

    /// No live triangle's circumcircle contains the node being inserted.
    #[error("room {room} at {position} is not contained by any live triangle")]
    Uncontained { room: RoomId, position: DVec2 },

    /// A triangle touching a support node has no circumcircle; the bounding
    /// invariant can no longer be checked.
    #[error("support triangle is degenerate while inserting {room:?}: {source}")]
    DegenerateSupport {
        room: Option<RoomId>,
        #[source]
        source: GeometryError,
    },
}

/// Result type alias for dungeon operations
pub type Result<T> = std::result::Result<T, DungeonError>;
