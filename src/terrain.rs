use crate::constants::*;
use crate::location::*;
use bitflags::*;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TerrainFlags: u8 {
        const NONE = 0;
        const WALL = 1;
        const SWAMP = 2;
    }
}

#[derive(Clone)]
pub struct FastRoomTerrain {
    buffer: Vec<u8>,
}

impl FastRoomTerrain {
    /// Wrap a raw 50x50 terrain buffer in row-major order (the game's
    /// `getRawBuffer` layout). `None` if the buffer is not exactly one room.
    pub fn new(buffer: Vec<u8>) -> Option<FastRoomTerrain> {
        if buffer.len() == ROOM_WIDTH as usize * ROOM_HEIGHT as usize {
            Some(FastRoomTerrain { buffer })
        } else {
            None
        }
    }

    /// A room with no walls or swamps.
    pub fn plains() -> FastRoomTerrain {
        FastRoomTerrain {
            buffer: vec![0; ROOM_WIDTH as usize * ROOM_HEIGHT as usize],
        }
    }

    /// Build a terrain by evaluating `f` for every tile.
    pub fn from_fn<F>(f: F) -> FastRoomTerrain
    where
        F: Fn(u8, u8) -> TerrainFlags,
    {
        let mut buffer = Vec::with_capacity(ROOM_WIDTH as usize * ROOM_HEIGHT as usize);
        for y in 0..ROOM_HEIGHT {
            for x in 0..ROOM_WIDTH {
                buffer.push(f(x, y).bits());
            }
        }
        FastRoomTerrain { buffer }
    }

    pub fn set_xy(&mut self, x: u8, y: u8, flags: TerrainFlags) {
        let index = (y as usize * ROOM_WIDTH as usize) + (x as usize);
        self.buffer[index] = flags.bits();
    }

    pub fn get_xy(&self, x: u8, y: u8) -> TerrainFlags {
        let index = (y as usize * ROOM_WIDTH as usize) + (x as usize);
        TerrainFlags::from_bits_truncate(self.buffer[index])
    }

    pub fn is_wall(&self, x: u8, y: u8) -> bool {
        self.get_xy(x, y).contains(TerrainFlags::WALL)
    }

    pub fn is_wall_at(&self, loc: Location) -> bool {
        self.is_wall(loc.x(), loc.y())
    }

    /// Wall test for signed coordinates. Tiles outside the room are not walls.
    pub fn is_wall_signed(&self, x: i16, y: i16) -> bool {
        in_room_bounds(x, y) && self.is_wall(x as u8, y as u8)
    }

    pub fn is_swamp(&self, x: u8, y: u8) -> bool {
        self.get_xy(x, y).contains(TerrainFlags::SWAMP)
    }

    /// True if every tile of the square with the given centre and half extent
    /// is inside the room and free of walls.
    pub fn is_clear_square(&self, center_x: i16, center_y: i16, half: i16) -> bool {
        let (min_x, max_x) = (center_x - half, center_x + half);
        let (min_y, max_y) = (center_y - half, center_y + half);

        if !in_room_bounds(min_x, min_y) || !in_room_bounds(max_x, max_y) {
            return false;
        }

        (min_y..=max_y).all(|y| (min_x..=max_x).all(|x| !self.is_wall(x as u8, y as u8)))
    }
}

/// Neighbor offsets for 8-directional movement.
pub const NEIGHBORS_8: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];
