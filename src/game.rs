//! Glue between the planner and a live Screeps room.

use crate::location::*;
use crate::placement::*;
use crate::room_data::*;
use crate::terrain::*;
use screeps::*;

fn to_location(pos: Position) -> Location {
    Location::from_xy(pos.x().u8(), pos.y().u8())
}

/// Copy a room's static terrain into a planner grid.
pub fn terrain_from_room(room: &Room) -> FastRoomTerrain {
    let terrain = room.get_terrain();

    FastRoomTerrain::from_fn(|x, y| match terrain.get(x, y) {
        Terrain::Wall => TerrainFlags::WALL,
        Terrain::Swamp => TerrainFlags::SWAMP,
        _ => TerrainFlags::NONE,
    })
}

/// Terrain plus controller, sources and mineral of a visible room.
pub fn snapshot_room(room: &Room) -> RoomDataSnapshot {
    let mut snapshot = RoomDataSnapshot::new(terrain_from_room(room));

    if let Some(controller) = room.controller() {
        snapshot = snapshot.with_controller(to_location(controller.pos()));
    }

    for source in room.find(find::SOURCES, None) {
        snapshot = snapshot.with_source(to_location(source.pos()));
    }

    if let Some(mineral) = room.find(find::MINERALS, None).first() {
        snapshot = snapshot.with_mineral(to_location(mineral.pos()));
    }

    snapshot
}

impl PlacementTarget for Room {
    fn structures_at(&self, location: Location) -> Vec<StructureType> {
        let pos = RoomPosition::new(location.x(), location.y(), self.name());
        self.look_for_at(look::STRUCTURES, &pos)
            .iter()
            .map(|structure| structure.structure_type())
            .collect()
    }

    fn construction_sites_at(&self, location: Location) -> Vec<StructureType> {
        let pos = RoomPosition::new(location.x(), location.y(), self.name());
        self.look_for_at(look::CONSTRUCTION_SITES, &pos)
            .iter()
            .map(|site| site.structure_type())
            .collect()
    }

    fn create_construction_site(
        &mut self,
        location: Location,
        structure_type: StructureType,
    ) -> Result<(), PlacementError> {
        Room::create_construction_site(self, location.x(), location.y(), structure_type, None)
            .map_err(|err| PlacementError::Host(format!("{:?}", err)))
    }
}
