pub const ROOM_WIDTH: u8 = 50;
pub const ROOM_HEIGHT: u8 = 50;

/// Side length of the obstruction-free core square.
pub const CORE_SIZE: u8 = 13;

/// How far (Chebyshev) from the target the core search looks for a centre.
pub const CORE_SEARCH_RADIUS: u8 = 10;

/// Distance between the core bounds and the defensive ring.
pub const DEFENSE_MARGIN: u8 = 3;

/// Centre used whenever landmarks are missing or no core square fits.
pub const FALLBACK_CENTER: (u8, u8) = (25, 25);

/// Every `GATE_SPACING`-th cell along an open ring edge is a rampart.
pub const GATE_SPACING: i16 = 3;

/// Default node-expansion ceiling for a single path query.
pub const DEFAULT_PATH_MAX_OPS: u32 = 2000;

/// Construction site cap enforced by the game (and by `SimulatedRoom`).
pub const MAX_CONSTRUCTION_SITES: usize = 100;

#[inline]
pub fn in_room_bounds(x: i16, y: i16) -> bool {
    (0..ROOM_WIDTH as i16).contains(&x) && (0..ROOM_HEIGHT as i16).contains(&y)
}
