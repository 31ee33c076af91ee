//! Path queries between two tiles of a room.
//!
//! The planner only ever needs "a short walkable path, as unit steps". That
//! is expressed by the [`PathService`] trait so a caller can plug in the
//! game's own path finder; [`TerrainPathService`] is the native A*
//! implementation used offline and by default.

use crate::constants::*;
use crate::location::*;
use crate::room_data::*;
use crate::terrain::*;
use fnv::FnvHashSet;
use pathfinding::directed::astar::astar;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// One unit move along a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub dx: i8,
    pub dy: i8,
}

/// Options for a single path query, mirroring the game's `findPath` options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathOptions {
    /// Walk through tiles occupied by creeps.
    pub ignore_creeps: bool,
    /// Walk through tiles occupied by structures.
    pub ignore_destructible_structures: bool,
    /// Treat roads like the terrain underneath them.
    pub ignore_roads: bool,
    pub plain_cost: u32,
    pub swamp_cost: u32,
    /// Node-expansion ceiling. An exhausted search returns no path.
    pub max_ops: u32,
}

impl Default for PathOptions {
    fn default() -> Self {
        PathOptions {
            ignore_creeps: false,
            ignore_destructible_structures: false,
            ignore_roads: false,
            plain_cost: 1,
            swamp_cost: 5,
            max_ops: DEFAULT_PATH_MAX_OPS,
        }
    }
}

impl PathOptions {
    /// Plain and swamp both cost 1.
    pub fn flat() -> Self {
        PathOptions {
            plain_cost: 1,
            swamp_cost: 1,
            ..Default::default()
        }
    }

    pub fn ignore_creeps(mut self) -> Self {
        self.ignore_creeps = true;
        self
    }

    pub fn ignore_destructible_structures(mut self) -> Self {
        self.ignore_destructible_structures = true;
        self
    }

    pub fn ignore_roads(mut self) -> Self {
        self.ignore_roads = true;
        self
    }

    pub fn max_ops(mut self, max_ops: u32) -> Self {
        self.max_ops = max_ops;
        self
    }
}

pub trait PathService {
    /// Find a path from `start` to `end` as a list of unit steps. The start
    /// tile is not part of the result; the final step lands on `end`.
    ///
    /// Returns an empty list if no path exists, the search budget ran out, or
    /// `start == end`.
    fn find_path(&self, start: Location, end: Location, options: &PathOptions) -> Vec<PathStep>;
}

/// A* over a room's terrain, with optional structure, road and creep layers.
pub struct TerrainPathService<'a> {
    terrain: &'a FastRoomTerrain,
    structures: FnvHashSet<Location>,
    roads: FnvHashSet<Location>,
    creeps: FnvHashSet<Location>,
}

impl<'a> TerrainPathService<'a> {
    pub fn new(terrain: &'a FastRoomTerrain) -> Self {
        TerrainPathService {
            terrain,
            structures: FnvHashSet::default(),
            roads: FnvHashSet::default(),
            creeps: FnvHashSet::default(),
        }
    }

    /// Tiles blocked by non-walkable structures.
    pub fn with_structures(mut self, structures: impl IntoIterator<Item = Location>) -> Self {
        self.structures.extend(structures);
        self
    }

    pub fn with_roads(mut self, roads: impl IntoIterator<Item = Location>) -> Self {
        self.roads.extend(roads);
        self
    }

    pub fn with_creeps(mut self, creeps: impl IntoIterator<Item = Location>) -> Self {
        self.creeps.extend(creeps);
        self
    }

    fn step_cost(&self, loc: Location, options: &PathOptions) -> u32 {
        if !options.ignore_roads && self.roads.contains(&loc) {
            return 1;
        }
        if self.terrain.is_swamp(loc.x(), loc.y()) {
            options.swamp_cost.max(1)
        } else {
            options.plain_cost.max(1)
        }
    }

    fn is_blocked(&self, loc: Location, options: &PathOptions) -> bool {
        self.terrain.is_wall_at(loc)
            || (!options.ignore_destructible_structures && self.structures.contains(&loc))
            || (!options.ignore_creeps && self.creeps.contains(&loc))
    }
}

impl<'a> PathService for TerrainPathService<'a> {
    fn find_path(&self, start: Location, end: Location, options: &PathOptions) -> Vec<PathStep> {
        if start == end {
            return Vec::new();
        }

        let min_cost = if options.ignore_roads || self.roads.is_empty() {
            options.plain_cost.min(options.swamp_cost).max(1)
        } else {
            1
        };

        let ops = Cell::new(0u32);
        let goal = (end.x() as i16, end.y() as i16);

        let result = astar(
            &(start.x() as i16, start.y() as i16),
            |&(x, y)| {
                ops.set(ops.get() + 1);
                if ops.get() > options.max_ops {
                    return Vec::new();
                }

                NEIGHBORS_8
                    .iter()
                    .filter_map(|&(dx, dy)| {
                        let nx = x + dx as i16;
                        let ny = y + dy as i16;
                        let loc = Location::checked_new(nx, ny)?;

                        // The destination is always enterable so paths can end on
                        // sources, controllers and other obstacles.
                        if (nx, ny) != goal && self.is_blocked(loc, options) {
                            return None;
                        }

                        Some(((nx, ny), self.step_cost(loc, options)))
                    })
                    .collect::<Vec<_>>()
            },
            |&(x, y)| {
                let dx = (x - goal.0).unsigned_abs() as u32;
                let dy = (y - goal.1).unsigned_abs() as u32;
                dx.max(dy) * min_cost
            },
            |&pos| pos == goal,
        );

        match result {
            Some((path, _cost)) => path
                .windows(2)
                .map(|pair| PathStep {
                    dx: (pair[1].0 - pair[0].0) as i8,
                    dy: (pair[1].1 - pair[0].1) as i8,
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Absolute cells visited by following `steps` from `start`, excluding `start`.
pub fn walk_path(start: Location, steps: &[PathStep]) -> Vec<PlanLocation> {
    let mut current = PlanLocation::from(start);
    steps
        .iter()
        .map(|step| {
            current = current + (step.dx, step.dy);
            current
        })
        .collect()
}

/// Cells of a path that actually arrives at `end`, or `None` when the walk is
/// empty or stops short. A service that gives up early may hand back a partial
/// path; it is treated the same as no path at all. Ending next to `end` counts
/// as arriving, since hosts may stop one tile short of an obstacle goal.
pub fn walk_complete_path(
    start: Location,
    end: Location,
    steps: &[PathStep],
) -> Option<Vec<PlanLocation>> {
    let cells = walk_path(start, steps);
    let last = *cells.last()?;

    if last.distance_to(PlanLocation::from(end)) <= 1 {
        Some(cells)
    } else {
        None
    }
}

/// The cell `n` positions from the end of a cell list (`n = 1` is the last cell).
pub fn cell_from_end(cells: &[PlanLocation], n: usize) -> Option<PlanLocation> {
    if n == 0 || cells.len() < n {
        None
    } else {
        Some(cells[cells.len() - n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_path_in_open_room() {
        let terrain = FastRoomTerrain::plains();
        let service = TerrainPathService::new(&terrain);

        let steps = service.find_path(
            Location::from_xy(10, 10),
            Location::from_xy(40, 40),
            &PathOptions::flat(),
        );

        assert_eq!(steps.len(), 30);
        assert!(steps.iter().all(|s| *s == PathStep { dx: 1, dy: 1 }));
    }

    #[test]
    fn path_ends_on_obstacle_goal() {
        let mut terrain = FastRoomTerrain::plains();
        terrain.set_xy(20, 10, TerrainFlags::WALL);
        let service = TerrainPathService::new(&terrain);

        let start = Location::from_xy(10, 10);
        let end = Location::from_xy(20, 10);
        let steps = service.find_path(start, end, &PathOptions::flat());
        let cells = walk_path(start, &steps);

        assert_eq!(cells.len(), 10);
        assert_eq!(cells.last().and_then(|c| c.as_location()), Some(end));
        assert!(cells[..cells.len() - 1]
            .iter()
            .all(|c| !terrain.is_wall_signed(c.x(), c.y())));
    }

    #[test]
    fn walled_off_goal_has_no_path() {
        let terrain = FastRoomTerrain::from_fn(|x, _| {
            if x == 25 {
                TerrainFlags::WALL
            } else {
                TerrainFlags::NONE
            }
        });
        let service = TerrainPathService::new(&terrain);

        let steps = service.find_path(
            Location::from_xy(10, 10),
            Location::from_xy(40, 10),
            &PathOptions::flat(),
        );
        assert!(steps.is_empty());
    }

    #[test]
    fn exhausted_budget_has_no_path() {
        let terrain = FastRoomTerrain::plains();
        let service = TerrainPathService::new(&terrain);

        let steps = service.find_path(
            Location::from_xy(1, 1),
            Location::from_xy(48, 48),
            &PathOptions::flat().max_ops(5),
        );
        assert!(steps.is_empty());
    }

    #[test]
    fn structures_block_unless_ignored() {
        let terrain = FastRoomTerrain::plains();
        let wall: Vec<Location> = (0..50).map(|y| Location::from_xy(25, y)).collect();
        let service = TerrainPathService::new(&terrain).with_structures(wall);

        let start = Location::from_xy(20, 20);
        let end = Location::from_xy(30, 20);

        assert!(service.find_path(start, end, &PathOptions::flat()).is_empty());

        let steps = service.find_path(
            start,
            end,
            &PathOptions::flat().ignore_destructible_structures(),
        );
        assert_eq!(steps.len(), 10);
    }

    #[test]
    fn swamps_are_avoided_when_expensive() {
        let terrain = FastRoomTerrain::from_fn(|x, y| {
            if x == 25 && (15..=25).contains(&y) {
                TerrainFlags::SWAMP
            } else {
                TerrainFlags::NONE
            }
        });
        let service = TerrainPathService::new(&terrain);
        let start = Location::from_xy(20, 20);
        let end = Location::from_xy(30, 20);

        let cells = walk_path(start, &service.find_path(start, end, &PathOptions::default()));
        assert!(cells.iter().all(|c| !(c.x() == 25 && (15..=25).contains(&c.y()))));

        let flat_cells = walk_path(start, &service.find_path(start, end, &PathOptions::flat()));
        assert_eq!(flat_cells.len(), 10);
    }

    #[test]
    fn creeps_block_unless_ignored() {
        let terrain = FastRoomTerrain::plains();
        let creeps: Vec<Location> = (0..50).map(|y| Location::from_xy(25, y)).collect();
        let service = TerrainPathService::new(&terrain).with_creeps(creeps);

        let start = Location::from_xy(20, 20);
        let end = Location::from_xy(30, 20);

        assert!(service.find_path(start, end, &PathOptions::flat()).is_empty());
        assert_eq!(
            service
                .find_path(start, end, &PathOptions::flat().ignore_creeps())
                .len(),
            10
        );
    }

    #[test]
    fn roads_are_followed_through_swamp() {
        let terrain = FastRoomTerrain::from_fn(|_, _| TerrainFlags::SWAMP);
        let road: Vec<Location> = (20..=30).map(|x| Location::from_xy(x, 20)).collect();
        let service = TerrainPathService::new(&terrain).with_roads(road);

        let start = Location::from_xy(20, 20);
        let end = Location::from_xy(30, 20);
        let cells = walk_path(start, &service.find_path(start, end, &PathOptions::default()));

        assert_eq!(cells.len(), 10);
        assert!(cells.iter().all(|c| c.y() == 20));
    }

    #[test]
    fn incomplete_walks_are_rejected() {
        let start = Location::from_xy(10, 10);
        let end = Location::from_xy(15, 10);
        let steps = vec![PathStep { dx: 1, dy: 0 }; 5];

        let cells = walk_complete_path(start, end, &steps).expect("walk reaches end");
        assert_eq!(cells.last(), Some(&PlanLocation::new(15, 10)));

        // One short still counts, since the goal may be an obstacle.
        assert!(walk_complete_path(start, end, &steps[..4]).is_some());
        assert_eq!(walk_complete_path(start, end, &steps[..3]), None);
        assert_eq!(walk_complete_path(start, end, &[]), None);
    }

    #[test]
    fn cell_from_end_counts_from_last() {
        let cells: Vec<PlanLocation> = (0..5).map(|i| PlanLocation::new(i, 0)).collect();
        assert_eq!(cell_from_end(&cells, 1), Some(PlanLocation::new(4, 0)));
        assert_eq!(cell_from_end(&cells, 3), Some(PlanLocation::new(2, 0)));
        assert_eq!(cell_from_end(&cells, 5), Some(PlanLocation::new(0, 0)));
        assert_eq!(cell_from_end(&cells, 6), None);
        assert_eq!(cell_from_end(&cells, 0), None);
    }
}
