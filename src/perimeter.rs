//! Perimeter: a ring of constructed walls with rampart gates, a fixed margin
//! outside the core.
//!
//! Each edge of the ring is walked in increasing coordinate order. A tile
//! whose outward neighbour is natural wall gets a plain wall, since nothing can
//! approach from that side. Open tiles follow a wall-wall-rampart pattern keyed
//! on the tile's index along its edge. The left and right edges skip their end
//! tiles, which already belong to the top and bottom edges.

use crate::bounds::*;
use crate::constants::*;
use crate::location::*;
use crate::placement::*;
use crate::terrain::*;
use log::*;

use screeps::constants::StructureType;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgeDirection {
    /// Traversal order of the ring.
    pub const ALL: [EdgeDirection; 4] = [
        EdgeDirection::Top,
        EdgeDirection::Bottom,
        EdgeDirection::Left,
        EdgeDirection::Right,
    ];

    /// Unit offset pointing away from the core.
    pub fn outward(self) -> (i16, i16) {
        match self {
            EdgeDirection::Top => (0, -1),
            EdgeDirection::Bottom => (0, 1),
            EdgeDirection::Left => (-1, 0),
            EdgeDirection::Right => (1, 0),
        }
    }
}

/// Per-edge context for computing a tile's index along its edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RingEdgeContext {
    pub direction: EdgeDirection,
    pub ring_min_x: i16,
    pub ring_min_y: i16,
}

impl RingEdgeContext {
    pub fn index_of(&self, x: i16, y: i16) -> i16 {
        match self.direction {
            EdgeDirection::Top | EdgeDirection::Bottom => x - self.ring_min_x,
            // Corners belong to the horizontal edges, so vertical edges start at 0 one tile in.
            EdgeDirection::Left | EdgeDirection::Right => y - self.ring_min_y - 1,
        }
    }

    /// Tiles of this edge in visiting order, unclipped.
    pub fn tiles(&self, ring: &RingBox) -> Vec<(i16, i16)> {
        match self.direction {
            EdgeDirection::Top => (ring.min_x..=ring.max_x).map(|x| (x, ring.min_y)).collect(),
            EdgeDirection::Bottom => (ring.min_x..=ring.max_x).map(|x| (x, ring.max_y)).collect(),
            EdgeDirection::Left => ((ring.min_y + 1)..ring.max_y)
                .map(|y| (ring.min_x, y))
                .collect(),
            EdgeDirection::Right => ((ring.min_y + 1)..ring.max_y)
                .map(|y| (ring.max_x, y))
                .collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RingPlacement {
    pub location: Location,
    pub structure_type: StructureType,
    pub direction: EdgeDirection,
    pub index: i16,
}

/// Structure for one ring tile, or `None` if the tile is outside the room or
/// natural wall.
pub fn ring_structure_at(
    terrain: &FastRoomTerrain,
    x: i16,
    y: i16,
    context: &RingEdgeContext,
) -> Option<StructureType> {
    if !in_room_bounds(x, y) || terrain.is_wall(x as u8, y as u8) {
        return None;
    }

    let (ox, oy) = context.direction.outward();
    if terrain.is_wall_signed(x + ox, y + oy) {
        return Some(StructureType::Wall);
    }

    if context.index_of(x, y).rem_euclid(GATE_SPACING) == GATE_SPACING - 1 {
        Some(StructureType::Rampart)
    } else {
        Some(StructureType::Wall)
    }
}

/// Compute the ring placements for `bounds` expanded by `margin`, in visiting order.
pub fn plan_ring(
    terrain: &FastRoomTerrain,
    bounds: &BoundingBox,
    margin: u8,
) -> Vec<RingPlacement> {
    let ring = bounds.expand(margin);
    let mut placements = Vec::new();

    for direction in EdgeDirection::ALL {
        let context = RingEdgeContext {
            direction,
            ring_min_x: ring.min_x,
            ring_min_y: ring.min_y,
        };

        for (x, y) in context.tiles(&ring) {
            if let Some(structure_type) = ring_structure_at(terrain, x, y, &context) {
                // ring_structure_at only returns Some for in-room tiles.
                if let Some(location) = Location::checked_new(x, y) {
                    placements.push(RingPlacement {
                        location,
                        structure_type,
                        direction,
                        index: context.index_of(x, y),
                    });
                }
            }
        }
    }

    placements
}

/// Issue construction sites for the defensive ring, skipping anything already
/// built or ordered.
pub fn build_ring(
    terrain: &FastRoomTerrain,
    bounds: &BoundingBox,
    margin: u8,
    target: &mut dyn PlacementTarget,
) -> PlacementReport {
    let mut report = PlacementReport::default();

    for placement in plan_ring(terrain, bounds, margin) {
        let outcome = place_if_absent(target, placement.location, placement.structure_type);
        report.record(&outcome);
    }

    info!(
        "Perimeter: {} created, {} existing, {} rejected",
        report.created, report.already_exists, report.rejected
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnv::FnvHashSet;

    fn core_bounds() -> BoundingBox {
        BoundingBox::around(Location::from_xy(25, 25), CORE_SIZE)
    }

    #[test]
    fn open_ring_is_two_walls_one_gate() {
        let terrain = FastRoomTerrain::plains();
        let ring = plan_ring(&terrain, &core_bounds(), DEFENSE_MARGIN);

        // Ring spans 16..=34 on both axes: 19 tiles per horizontal edge, 17 per vertical.
        assert_eq!(ring.len(), 19 * 2 + 17 * 2);

        for placement in &ring {
            let expected = if placement.index % 3 == 2 {
                StructureType::Rampart
            } else {
                StructureType::Wall
            };
            assert_eq!(placement.structure_type, expected, "{:?}", placement);
        }

        let gates = ring
            .iter()
            .filter(|p| p.structure_type == StructureType::Rampart)
            .count();
        assert_eq!(gates, 6 * 2 + 5 * 2);
    }

    #[test]
    fn edge_indices_start_at_zero() {
        let terrain = FastRoomTerrain::plains();
        let ring = plan_ring(&terrain, &core_bounds(), DEFENSE_MARGIN);

        let top: Vec<_> = ring.iter().filter(|p| p.direction == EdgeDirection::Top).collect();
        assert_eq!(top[0].location, Location::from_xy(16, 16));
        assert_eq!(top[0].index, 0);
        assert_eq!(top[2].structure_type, StructureType::Rampart);

        let left: Vec<_> = ring.iter().filter(|p| p.direction == EdgeDirection::Left).collect();
        assert_eq!(left[0].location, Location::from_xy(16, 17));
        assert_eq!(left[0].index, 0);
        assert_eq!(left[2].location, Location::from_xy(16, 19));
        assert_eq!(left[2].structure_type, StructureType::Rampart);
    }

    #[test]
    fn corners_are_visited_once() {
        let terrain = FastRoomTerrain::plains();
        let bounds = core_bounds();
        let ring = plan_ring(&terrain, &bounds, DEFENSE_MARGIN);

        let mut seen = FnvHashSet::default();
        for placement in &ring {
            assert!(seen.insert(placement.location), "{:?} placed twice", placement);
        }

        for (x, y) in bounds.expand(DEFENSE_MARGIN).corners() {
            let visits = ring
                .iter()
                .filter(|p| p.location == Location::from_xy(x as u8, y as u8))
                .count();
            assert_eq!(visits, 1);
        }
    }

    #[test]
    fn outward_natural_wall_gets_plain_wall() {
        // Natural wall row directly above the top edge of the ring.
        let terrain = FastRoomTerrain::from_fn(|_, y| {
            if y == 15 {
                TerrainFlags::WALL
            } else {
                TerrainFlags::NONE
            }
        });
        let ring = plan_ring(&terrain, &core_bounds(), DEFENSE_MARGIN);

        assert!(ring
            .iter()
            .filter(|p| p.direction == EdgeDirection::Top)
            .all(|p| p.structure_type == StructureType::Wall));
        assert!(ring
            .iter()
            .filter(|p| p.direction == EdgeDirection::Bottom)
            .any(|p| p.structure_type == StructureType::Rampart));
    }

    #[test]
    fn natural_walls_and_off_room_tiles_are_skipped() {
        let mut terrain = FastRoomTerrain::plains();
        terrain.set_xy(20, 16, TerrainFlags::WALL);

        let ring = plan_ring(&terrain, &core_bounds(), DEFENSE_MARGIN);
        assert!(ring.iter().all(|p| p.location != Location::from_xy(20, 16)));
        assert_eq!(ring.len(), 19 * 2 + 17 * 2 - 1);

        // Core hugging the left edge: the left edge of the ring is off the room.
        let edge_bounds = BoundingBox::around(Location::from_xy(6, 25), CORE_SIZE);
        let ring = plan_ring(&terrain, &edge_bounds, DEFENSE_MARGIN);
        assert!(ring.iter().all(|p| p.direction != EdgeDirection::Left));
        assert!(ring
            .iter()
            .all(|p| (p.location.x() as usize) < ROOM_WIDTH as usize));
    }

    #[test]
    fn building_twice_creates_nothing_new() {
        let terrain = FastRoomTerrain::plains();
        let mut room = SimulatedRoom::new(terrain.clone());
        let bounds = core_bounds();

        let first = build_ring(&terrain, &bounds, DEFENSE_MARGIN, &mut room);
        assert_eq!(first.created, 72);
        assert_eq!(first.rejected, 0);

        let second = build_ring(&terrain, &bounds, DEFENSE_MARGIN, &mut room);
        assert_eq!(second.created, 0);
        assert_eq!(second.already_exists, 72);
    }
}
