//! ASCII board rasterization
//!
//! Rooms are drawn into a fixed grid of characters: untouched cells are
//! [`BLANK`], room perimeters are [`WALL`] and room interiors are [`FLOOR`].
//! Walls never overwrite another room's floor; floors overwrite everything,
//! so overlapping rooms read as one open area.

use std::fmt;

use glam::IVec2;
use tracing::warn;

use crate::room::Room;

/// Cell no room touches
pub const BLANK: char = ' ';
/// Room perimeter
pub const WALL: char = '#';
/// Room interior
pub const FLOOR: char = '.';

/// Fixed-size character grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Board {
    /// Create a blank board
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        let (x, y) = (usize::try_from(cell.x).ok()?, usize::try_from(cell.y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Character at a cell, `None` off the board
    pub fn get(&self, cell: IVec2) -> Option<char> {
        self.index(cell).map(|index| self.cells[index])
    }

    fn set(&mut self, cell: IVec2, glyph: char) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = glyph;
        }
    }

    fn set_if_blank(&mut self, cell: IVec2, glyph: char) {
        if self.get(cell) == Some(BLANK) {
            self.set(cell, glyph);
        }
    }

    /// Rasterize one room
    ///
    /// Cells falling off the board are clipped.
    pub fn draw_room(&mut self, room: &Room) {
        let min = room.min_corner();
        let max = room.max_corner();

        if self.index(min).is_none() || self.index(max).is_none() {
            warn!(
                room = room.id.index(),
                min = %min,
                max = %max,
                "room extends past the board; clipping"
            );
        }

        for x in min.x..=max.x {
            self.set_if_blank(IVec2::new(x, min.y), WALL);
            self.set_if_blank(IVec2::new(x, max.y), WALL);
        }
        for y in min.y + 1..max.y {
            self.set_if_blank(IVec2::new(min.x, y), WALL);
            self.set_if_blank(IVec2::new(max.x, y), WALL);
        }
        for y in min.y + 1..max.y {
            for x in min.x + 1..max.x {
                self.set(IVec2::new(x, y), FLOOR);
            }
        }
    }

    /// Rasterize rooms in order
    pub fn draw_rooms<'a>(&mut self, rooms: impl IntoIterator<Item = &'a Room>) {
        for room in rooms {
            self.draw_room(room);
        }
    }

    /// Stamp each room's identity on its center cell, in base 36
    ///
    /// Identities past 35 are drawn as `?`.
    pub fn draw_room_ids<'a>(&mut self, rooms: impl IntoIterator<Item = &'a Room>) {
        for room in rooms {
            let glyph = u32::try_from(room.id.index())
                .ok()
                .and_then(|id| char::from_digit(id, 36))
                .map_or('?', |c| c.to_ascii_uppercase());
            self.set(room.center, glyph);
        }
    }

    /// One row as a string
    pub fn row(&self, y: usize) -> Option<String> {
        (y < self.height).then(|| {
            self.cells[y * self.width..(y + 1) * self.width]
                .iter()
                .collect()
        })
    }

    /// Count cells holding a given glyph
    pub fn count(&self, glyph: char) -> usize {
        self.cells.iter().filter(|&&c| c == glyph).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
