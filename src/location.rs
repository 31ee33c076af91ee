use crate::constants::*;
use serde::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub fn from_coords(x: u32, y: u32) -> Self {
        Location {
            packed: ((x << 8) | y) as u16,
        }
    }

    #[inline]
    pub fn from_xy(x: u8, y: u8) -> Self {
        Self::from_coords(x as u32, y as u32)
    }

    /// Build a location from signed coordinates, rejecting anything outside the room.
    pub fn checked_new(x: i16, y: i16) -> Option<Self> {
        if in_room_bounds(x, y) {
            Some(Self::from_coords(x as u32, y as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        Location { packed }
    }

    /// Offset by `(dx, dy)`, returning `None` if the result leaves the room.
    pub fn checked_add(self, dx: i8, dy: i8) -> Option<Self> {
        Self::checked_new(self.x() as i16 + dx as i16, self.y() as i16 + dy as i16)
    }

    pub fn distance_to(self, other: Self) -> u8 {
        let dx = (self.x() as i8) - (other.x() as i8);
        let dy = (self.y() as i8) - (other.y() as i8);

        dx.abs().max(dy.abs()) as u8
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(Location::from_packed)
    }
}

/// Serializes a `Location` as `{ "x": .., "y": .. }`, the shape stored in room memory.
///
/// Use with `#[serde(with = "crate::location::xy_serde")]`. Deserialization
/// rejects coordinates outside the room.
pub mod xy_serde {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: u8,
        y: u8,
    }

    pub fn serialize<S>(location: &Location, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Xy {
            x: location.x(),
            y: location.y(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Location, D::Error>
    where
        D: Deserializer<'de>,
    {
        let xy = Xy::deserialize(deserializer)?;
        Location::checked_new(xy.x as i16, xy.y as i16)
            .ok_or_else(|| {
                serde::de::Error::custom(format!("position ({}, {}) outside room", xy.x, xy.y))
            })
    }
}
