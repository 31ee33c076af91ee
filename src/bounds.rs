use crate::constants::*;
use crate::location::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned box of room tiles, always clipped to the room.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: u8,
    pub max_x: u8,
    pub min_y: u8,
    pub max_y: u8,
}

impl BoundingBox {
    /// Box of side `core_size` centred on `center`, clipped to the room.
    pub fn around(center: Location, core_size: u8) -> BoundingBox {
        let half = core_size / 2;

        BoundingBox {
            min_x: center.x().saturating_sub(half),
            max_x: center.x().saturating_add(half).min(ROOM_WIDTH - 1),
            min_y: center.y().saturating_sub(half),
            max_y: center.y().saturating_add(half).min(ROOM_HEIGHT - 1),
        }
    }

    pub fn width(&self) -> u8 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u8 {
        self.max_y - self.min_y + 1
    }

    pub fn contains(&self, location: Location) -> bool {
        (self.min_x..=self.max_x).contains(&location.x())
            && (self.min_y..=self.max_y).contains(&location.y())
    }

    /// Grow the box by `margin` on every side without clipping.
    pub fn expand(&self, margin: u8) -> RingBox {
        let margin = margin as i16;
        RingBox {
            min_x: self.min_x as i16 - margin,
            max_x: self.max_x as i16 + margin,
            min_y: self.min_y as i16 - margin,
            max_y: self.max_y as i16 + margin,
        }
    }
}

/// Unclipped box whose edges may lie outside the room.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RingBox {
    pub min_x: i16,
    pub max_x: i16,
    pub min_y: i16,
    pub max_y: i16,
}

impl RingBox {
    pub fn corners(&self) -> [(i16, i16); 4] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.min_x, self.max_y),
            (self.max_x, self.max_y),
        ]
    }
}
