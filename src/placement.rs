//! Construction-site side effects.
//!
//! The planner never talks to the game directly. Anything that can report
//! what already stands on a tile and accept new construction sites implements
//! [`PlacementTarget`]; [`place_if_absent`] layers the "don't order what is
//! already ordered or built" rule on top.

use crate::constants::*;
use crate::location::*;
use crate::terrain::*;
use fnv::FnvHashMap;
use log::*;
use thiserror::Error;

use screeps::constants::StructureType;

/// Why the host refused a construction site.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("invalid target for {structure_type:?} at ({x}, {y})")]
    InvalidTarget {
        structure_type: StructureType,
        x: u8,
        y: u8,
    },
    #[error("construction site limit reached")]
    Full,
    #[error("room controller level too low")]
    RclNotEnough,
    #[error("room is not owned")]
    NotOwner,
    #[error("host rejected construction site: {0}")]
    Host(String),
}

pub trait PlacementTarget {
    /// Structure types already built on the tile.
    fn structures_at(&self, location: Location) -> Vec<StructureType>;

    /// Structure types with a pending construction site on the tile.
    fn construction_sites_at(&self, location: Location) -> Vec<StructureType>;

    fn create_construction_site(
        &mut self,
        location: Location,
        structure_type: StructureType,
    ) -> Result<(), PlacementError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    Created,
    AlreadyExists,
    Rejected(PlacementError),
}

/// Tally of placement attempts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub created: u32,
    pub already_exists: u32,
    pub rejected: u32,
}

impl PlacementReport {
    pub fn record(&mut self, outcome: &PlacementOutcome) {
        match outcome {
            PlacementOutcome::Created => self.created += 1,
            PlacementOutcome::AlreadyExists => self.already_exists += 1,
            PlacementOutcome::Rejected(_) => self.rejected += 1,
        }
    }

    pub fn merge(&mut self, other: &PlacementReport) {
        self.created += other.created;
        self.already_exists += other.already_exists;
        self.rejected += other.rejected;
    }

    pub fn attempted(&self) -> u32 {
        self.created + self.already_exists + self.rejected
    }
}

/// True if a structure or construction site of exactly this type is on the tile.
pub fn has_existing(
    target: &dyn PlacementTarget,
    location: Location,
    structure_type: StructureType,
) -> bool {
    target.structures_at(location).contains(&structure_type)
        || target
            .construction_sites_at(location)
            .contains(&structure_type)
}

/// Order a construction site unless the same type is already built or ordered there.
pub fn place_if_absent(
    target: &mut dyn PlacementTarget,
    location: Location,
    structure_type: StructureType,
) -> PlacementOutcome {
    if has_existing(target, location, structure_type) {
        return PlacementOutcome::AlreadyExists;
    }

    match target.create_construction_site(location, structure_type) {
        Ok(()) => {
            debug!(
                "Created {:?} site at ({}, {})",
                structure_type,
                location.x(),
                location.y()
            );
            PlacementOutcome::Created
        }
        Err(err) => {
            warn!(
                "Failed to place {:?} at ({}, {}): {}",
                structure_type,
                location.x(),
                location.y(),
                err
            );
            PlacementOutcome::Rejected(err)
        }
    }
}

/// In-memory room used for offline planning and tests. Applies the game's
/// basic construction rules: no sites on natural walls (except roads), one
/// site per tile, no site for a structure type already built there, and a
/// global site cap.
#[derive(Clone)]
pub struct SimulatedRoom {
    terrain: FastRoomTerrain,
    structures: FnvHashMap<Location, Vec<StructureType>>,
    sites: FnvHashMap<Location, StructureType>,
    orders: Vec<(Location, StructureType)>,
    max_sites: usize,
}

impl SimulatedRoom {
    pub fn new(terrain: FastRoomTerrain) -> Self {
        SimulatedRoom {
            terrain,
            structures: FnvHashMap::default(),
            sites: FnvHashMap::default(),
            orders: Vec::new(),
            max_sites: MAX_CONSTRUCTION_SITES,
        }
    }

    pub fn with_max_sites(mut self, max_sites: usize) -> Self {
        self.max_sites = max_sites;
        self
    }

    pub fn add_structure(&mut self, location: Location, structure_type: StructureType) {
        self.structures
            .entry(location)
            .or_default()
            .push(structure_type);
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn site_at(&self, location: Location) -> Option<StructureType> {
        self.sites.get(&location).copied()
    }

    /// Every successful order, in the order it was issued.
    pub fn orders(&self) -> &[(Location, StructureType)] {
        &self.orders
    }

    /// Turn every pending site into a finished structure.
    pub fn complete_all_sites(&mut self) {
        let mut sites: Vec<(Location, StructureType)> = self.sites.drain().collect();
        sites.sort_by_key(|(location, _)| location.packed_repr());
        for (location, structure_type) in sites {
            self.add_structure(location, structure_type);
        }
    }
}

impl PlacementTarget for SimulatedRoom {
    fn structures_at(&self, location: Location) -> Vec<StructureType> {
        self.structures.get(&location).cloned().unwrap_or_default()
    }

    fn construction_sites_at(&self, location: Location) -> Vec<StructureType> {
        self.sites.get(&location).copied().into_iter().collect()
    }

    fn create_construction_site(
        &mut self,
        location: Location,
        structure_type: StructureType,
    ) -> Result<(), PlacementError> {
        let invalid = PlacementError::InvalidTarget {
            structure_type,
            x: location.x(),
            y: location.y(),
        };

        if structure_type != StructureType::Road && self.terrain.is_wall_at(location) {
            return Err(invalid);
        }
        if self.sites.contains_key(&location) {
            return Err(invalid);
        }
        if self.structures_at(location).contains(&structure_type) {
            return Err(invalid);
        }
        if self.sites.len() >= self.max_sites {
            return Err(PlacementError::Full);
        }

        self.sites.insert(location, structure_type);
        self.orders.push((location, structure_type));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_existing_sites_and_structures() {
        let mut room = SimulatedRoom::new(FastRoomTerrain::plains());
        let loc = Location::from_xy(10, 10);

        assert_eq!(
            place_if_absent(&mut room, loc, StructureType::Wall),
            PlacementOutcome::Created
        );
        assert_eq!(
            place_if_absent(&mut room, loc, StructureType::Wall),
            PlacementOutcome::AlreadyExists
        );

        room.complete_all_sites();
        assert_eq!(room.site_count(), 0);
        assert_eq!(
            place_if_absent(&mut room, loc, StructureType::Wall),
            PlacementOutcome::AlreadyExists
        );
        assert_eq!(room.orders().len(), 1);
    }

    #[test]
    fn host_rejections_are_reported() {
        let mut terrain = FastRoomTerrain::plains();
        terrain.set_xy(5, 5, TerrainFlags::WALL);
        let mut room = SimulatedRoom::new(terrain).with_max_sites(1);

        let outcome = place_if_absent(&mut room, Location::from_xy(5, 5), StructureType::Rampart);
        assert!(matches!(
            outcome,
            PlacementOutcome::Rejected(PlacementError::InvalidTarget { x: 5, y: 5, .. })
        ));

        assert_eq!(
            place_if_absent(&mut room, Location::from_xy(6, 6), StructureType::Rampart),
            PlacementOutcome::Created
        );
        assert_eq!(
            place_if_absent(&mut room, Location::from_xy(7, 7), StructureType::Rampart),
            PlacementOutcome::Rejected(PlacementError::Full)
        );
    }

    #[test]
    fn report_tallies_outcomes() {
        let mut report = PlacementReport::default();
        report.record(&PlacementOutcome::Created);
        report.record(&PlacementOutcome::Created);
        report.record(&PlacementOutcome::AlreadyExists);
        report.record(&PlacementOutcome::Rejected(PlacementError::Full));

        let mut total = PlacementReport::default();
        total.merge(&report);
        total.merge(&report);

        assert_eq!(report.attempted(), 4);
        assert_eq!(total.created, 4);
        assert_eq!(total.rejected, 2);
    }
}
