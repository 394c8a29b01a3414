//! Seeded room sampling
//!
//! Each room draws its half length, half width and center independently from
//! the configured [`Bounds`]. Draws below a minimum are raised to it rather
//! than re-rolled, which skews sizes toward the minimum.

use glam::IVec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{Bounds, DungeonConfig};
use crate::error::Result;
use crate::room::{Room, RoomId};

/// Draw one value from `0..max`, floored to `min`
fn sample_bounded<R: Rng>(rng: &mut R, bounds: Bounds) -> u32 {
    rng.gen_range(0..bounds.max).max(bounds.min)
}

/// Sample the room registry for a configuration
///
/// Room `i` gets identity `RoomId(i)`. The configuration is validated first,
/// so an invalid configuration fails before any sampling.
///
/// # Arguments
///
/// * `config` - Dungeon configuration (seed, size, bounds)
///
/// # Returns
///
/// `config.room_count()` rooms, all of which fit on the board
pub fn generate_rooms(config: &DungeonConfig) -> Result<Vec<Room>> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let rooms = (0..config.room_count())
        .map(|index| {
            let half_length = sample_bounded(&mut rng, config.half_length);
            let half_width = sample_bounded(&mut rng, config.half_width);
            let x = sample_bounded(&mut rng, config.center_x);
            let y = sample_bounded(&mut rng, config.center_y);
            Room::new(
                RoomId(index),
                half_width,
                half_length,
                IVec2::new(x as i32, y as i32),
            )
        })
        .collect();

    Ok(rooms)
}
