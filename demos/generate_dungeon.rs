//! Example: Generate a dungeon layout
//!
//! Demonstrates the full pipeline and prints the board.
//! Set `RUST_LOG=dungeon_layout=debug` to see per-merge and per-insertion logs.

use dungeon_layout::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Dungeon Layout Generation Example");
    println!("=================================\n");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let config = DungeonConfigBuilder::new()
        .seed(seed)
        .size(DungeonSize::Standard)
        .build()
        .expect("Invalid configuration");

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Size: {} ({}x{})", config.size.name(), config.width(), config.height());
    println!("  Rooms: {}", config.room_count());
    println!();

    let dungeon = Dungeon::generate(config).expect("Failed to generate dungeon");

    let mut board = dungeon.board().clone();
    board.draw_room_ids(dungeon.rooms());
    print!("{}", board);

    println!("\nNum rooms post generation and collision: {}", dungeon.cluster_count());

    println!("\nLargest clusters:");
    for node in dungeon.largest_clusters(5) {
        let members = dungeon.cluster_members(node.room).expect("root exists");
        println!("  Root {}: size={}, members={:?}", node.room, node.size, members);
    }

    println!("\nMesh edges ({} triangles):", dungeon.mesh().triangle_count());
    for edge in dungeon.mesh().edges() {
        println!("  {} -- {}  length={:.2}", edge.a, edge.b, edge.length);
    }

    if !dungeon.mesh().isolated().is_empty() {
        println!("\nIsolated rooms: {:?}", dungeon.mesh().isolated());
    }
}
