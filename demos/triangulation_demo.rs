//! Example: Triangulate hand-placed rooms
//!
//! Runs collision merging and triangulation on a fixed room set.

use dungeon_layout::*;

fn main() {
    tracing_subscriber::fmt().init();

    let rooms = vec![
        Room::new(RoomId(0), 4, 3, IVec2::new(15, 10)),
        Room::new(RoomId(1), 3, 3, IVec2::new(19, 12)),
        Room::new(RoomId(2), 5, 4, IVec2::new(60, 12)),
        Room::new(RoomId(3), 3, 5, IVec2::new(35, 30)),
        Room::new(RoomId(4), 4, 4, IVec2::new(80, 35)),
        Room::new(RoomId(5), 3, 3, IVec2::new(110, 15)),
    ];

    for collision in find_overlaps(&rooms) {
        println!(
            "Rooms {} and {} collide ({:?})",
            collision.first, collision.second, collision.kind
        );
    }

    let forest = cluster_rooms(&rooms).expect("forest is consistent");
    let nodes = cluster_nodes(&rooms, &forest).expect("roots exist");
    println!("{} clusters", nodes.len());

    let supports = SupportTriangle::enclosing(DVec2::ZERO, DVec2::new(119.0, 49.0));
    let mesh = Triangulation::build(nodes, supports).expect("triangulation succeeds");

    for triangle in mesh.triangles() {
        println!(
            "Triangle {:?}: center=({:.2}, {:.2}) radius={:.2}",
            triangle.rooms.map(|room| room.index()),
            triangle.center.x,
            triangle.center.y,
            triangle.radius
        );
    }

    let mut board = Board::new(120, 50);
    board.draw_rooms(&rooms);
    board.draw_room_ids(&rooms);
    print!("{}", board);
}
