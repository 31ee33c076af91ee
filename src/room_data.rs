use crate::location::*;
use crate::terrain::*;

/// Signed coordinate used while deriving placements. It may point outside the
/// room (negative offsets near an edge, or a path step that walked off); call
/// [`PlanLocation::as_location`] to bounds-check it.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct PlanLocation {
    x: i16,
    y: i16,
}

impl PlanLocation {
    pub fn new(x: i16, y: i16) -> PlanLocation {
        PlanLocation { x, y }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn as_location(&self) -> Option<Location> {
        Location::checked_new(self.x, self.y)
    }

    pub fn distance_to(self, other: Self) -> u16 {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        dx.unsigned_abs().max(dy.unsigned_abs())
    }
}

impl From<Location> for PlanLocation {
    fn from(loc: Location) -> Self {
        PlanLocation {
            x: loc.x() as i16,
            y: loc.y() as i16,
        }
    }
}

impl From<&Location> for PlanLocation {
    fn from(loc: &Location) -> Self {
        PlanLocation {
            x: loc.x() as i16,
            y: loc.y() as i16,
        }
    }
}

impl std::ops::Add<(i8, i8)> for PlanLocation {
    type Output = Self;
    fn add(self, other: (i8, i8)) -> Self {
        Self {
            x: self.x + other.0 as i16,
            y: self.y + other.1 as i16,
        }
    }
}

/// Trait for providing room data to the planner.
/// Implementations exist for both in-game (screeps API) and offline use.
pub trait PlannerRoomDataSource {
    fn get_terrain(&self) -> &FastRoomTerrain;
    fn get_controller(&self) -> Option<Location>;
    fn get_sources(&self) -> &[Location];
    fn get_mineral(&self) -> Option<Location>;
}

/// Owned snapshot of everything the planner reads from a room.
#[derive(Clone)]
pub struct RoomDataSnapshot {
    terrain: FastRoomTerrain,
    controller: Option<Location>,
    sources: Vec<Location>,
    mineral: Option<Location>,
}

impl RoomDataSnapshot {
    pub fn new(terrain: FastRoomTerrain) -> Self {
        RoomDataSnapshot {
            terrain,
            controller: None,
            sources: Vec::new(),
            mineral: None,
        }
    }

    pub fn with_controller(mut self, controller: Location) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_source(mut self, source: Location) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_mineral(mut self, mineral: Location) -> Self {
        self.mineral = Some(mineral);
        self
    }
}

impl PlannerRoomDataSource for RoomDataSnapshot {
    fn get_terrain(&self) -> &FastRoomTerrain {
        &self.terrain
    }

    fn get_controller(&self) -> Option<Location> {
        self.controller
    }

    fn get_sources(&self) -> &[Location] {
        &self.sources
    }

    fn get_mineral(&self) -> Option<Location> {
        self.mineral
    }
}
