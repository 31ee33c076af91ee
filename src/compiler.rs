//! Site compilation: expand the core layout and the path-derived positions
//! into an absolute, deduplicated list of structure sites.

use crate::constants::*;
use crate::layout::*;
use crate::location::*;
use crate::pathing::*;
use crate::room_data::*;
use fnv::FnvHashSet;
use log::*;
use serde::{Deserialize, Serialize};

use screeps::constants::StructureType;

/// A planned structure at an absolute room position.
///
/// Serializes as `{ "type": "...", "pos": { "x": .., "y": .. } }`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureSite {
    #[serde(rename = "type")]
    pub structure_type: StructureType,
    #[serde(with = "crate::location::xy_serde")]
    pub pos: Location,
}

impl StructureSite {
    pub fn new(structure_type: StructureType, pos: Location) -> Self {
        StructureSite {
            structure_type,
            pos,
        }
    }
}

/// Drop out-of-room coordinates, then keep the first occurrence of each
/// `(type, x, y)` in input order.
pub fn dedup_sites<I>(candidates: I) -> Vec<StructureSite>
where
    I: IntoIterator<Item = (StructureType, PlanLocation)>,
{
    let mut seen: FnvHashSet<StructureSite> = FnvHashSet::default();

    candidates
        .into_iter()
        .filter_map(|(structure_type, pos)| {
            pos.as_location()
                .map(|location| StructureSite::new(structure_type, location))
        })
        .filter(|site| seen.insert(*site))
        .collect()
}

/// Collects every placement derived from a core centre and the room's landmarks.
pub struct SiteCompiler<'a> {
    center: Location,
    data: &'a dyn PlannerRoomDataSource,
    paths: &'a dyn PathService,
    max_ops: u32,
    candidates: Vec<(StructureType, PlanLocation)>,
}

impl<'a> SiteCompiler<'a> {
    pub fn new(
        center: Location,
        data: &'a dyn PlannerRoomDataSource,
        paths: &'a dyn PathService,
    ) -> Self {
        SiteCompiler {
            center,
            data,
            paths,
            max_ops: DEFAULT_PATH_MAX_OPS,
            candidates: Vec::new(),
        }
    }

    pub fn max_ops(mut self, max_ops: u32) -> Self {
        self.max_ops = max_ops;
        self
    }

    pub fn compile(mut self) -> Vec<StructureSite> {
        self.add_spawns();
        self.add_containers();
        self.add_extensions();
        self.add_towers();
        self.add_storage();
        self.add_links();
        self.add_labs();
        self.add_trade_structures();
        self.add_utility_structures();
        self.add_roads();

        let total = self.candidates.len();
        let sites = dedup_sites(self.candidates);

        debug!(
            "Compiled {} sites from {} candidates around ({}, {})",
            sites.len(),
            total,
            self.center.x(),
            self.center.y()
        );

        sites
    }

    fn origin(&self) -> PlanLocation {
        PlanLocation::from(self.center)
    }

    fn push(&mut self, structure_type: StructureType, pos: PlanLocation) {
        self.candidates.push((structure_type, pos));
    }

    fn push_offset(&mut self, structure_type: StructureType, offset: (i8, i8)) {
        let pos = self.origin() + offset;
        self.push(structure_type, pos);
    }

    fn add_template(&mut self, structure_type: StructureType) {
        for entry in template_offsets(structure_type) {
            self.push_offset(structure_type, (entry.dx, entry.dy));
        }
    }

    /// Path from the core centre to a landmark, as absolute cells. Empty when
    /// the landmark can't be reached.
    fn landmark_cells(&self, landmark: Location) -> Vec<PlanLocation> {
        let options = PathOptions::flat()
            .ignore_creeps()
            .ignore_roads()
            .max_ops(self.max_ops);
        let steps = self.paths.find_path(self.center, landmark, &options);
        walk_complete_path(self.center, landmark, &steps).unwrap_or_default()
    }

    /// Standing tile next to each source, on the core side.
    pub fn source_containers(&self) -> Vec<PlanLocation> {
        self.data
            .get_sources()
            .iter()
            .filter_map(|source| cell_from_end(&self.landmark_cells(*source), 2))
            .collect()
    }

    pub fn mineral_container(&self) -> Option<PlanLocation> {
        let mineral = self.data.get_mineral()?;
        cell_from_end(&self.landmark_cells(mineral), 2)
    }

    /// Two tiles short of the controller, so upgraders standing on it stay in range.
    pub fn controller_container(&self) -> Option<PlanLocation> {
        let controller = self.data.get_controller()?;
        cell_from_end(&self.landmark_cells(controller), 3)
    }

    fn add_spawns(&mut self) {
        self.add_template(StructureType::Spawn);
    }

    fn add_containers(&mut self) {
        for pos in self.source_containers() {
            self.push(StructureType::Container, pos);
        }
        if let Some(pos) = self.mineral_container() {
            self.push(StructureType::Container, pos);
        }
        if let Some(pos) = self.controller_container() {
            self.push(StructureType::Container, pos);
        }
        self.push_offset(StructureType::Container, LAB_RELAY_CONTAINER);
    }

    fn add_extensions(&mut self) {
        let anchor = self.origin() + EXTENSION_ANCHOR;
        for &offset in EXTENSION_INNER.iter().chain(EXTENSION_OUTER.iter()) {
            self.push(StructureType::Extension, anchor + offset);
        }
    }

    fn add_towers(&mut self) {
        self.add_template(StructureType::Tower);
        for &offset in OUTER_TOWERS.iter() {
            self.push_offset(StructureType::Tower, offset);
        }
    }

    fn add_storage(&mut self) {
        let pos = self.origin();
        self.push(StructureType::Storage, pos);
    }

    fn add_links(&mut self) {
        self.push_offset(StructureType::Link, CORE_LINK);

        let sources = self.data.get_sources().to_vec();
        for source in sources {
            self.push(StructureType::Link, PlanLocation::from(source) + (0, 1));
        }
    }

    fn add_labs(&mut self) {
        self.add_template(StructureType::Lab);
    }

    fn add_trade_structures(&mut self) {
        self.add_template(StructureType::Terminal);
        self.add_template(StructureType::Factory);
    }

    fn add_utility_structures(&mut self) {
        self.push_offset(StructureType::Observer, OBSERVER);
        self.push_offset(StructureType::PowerSpawn, POWER_SPAWN);
        self.push_offset(StructureType::Nuker, NUKER);
    }

    fn add_roads(&mut self) {
        self.add_template(StructureType::Road);

        for &offset in DIAMOND_ROADS.iter().chain(CONNECTOR_ROADS.iter()) {
            self.push_offset(StructureType::Road, offset);
        }

        // Each outer tower gets a road back to the core.
        let tower_options = PathOptions::flat().max_ops(self.max_ops);
        for &offset in OUTER_TOWERS.iter() {
            let Some(tower) = (self.origin() + offset).as_location() else {
                continue;
            };
            let steps = self.paths.find_path(tower, self.center, &tower_options);
            for pos in walk_complete_path(tower, self.center, &steps).unwrap_or_default() {
                self.push(StructureType::Road, pos);
            }
        }

        // Haul roads from every source into the core.
        let source_options = PathOptions::flat().ignore_creeps().max_ops(self.max_ops);
        let sources = self.data.get_sources().to_vec();
        for source in sources {
            let steps = self.paths.find_path(source, self.center, &source_options);
            for pos in walk_complete_path(source, self.center, &steps).unwrap_or_default() {
                self.push(StructureType::Road, pos);
            }
        }
    }
}

/// Compile the full site list for a core centre with the default path budget.
pub fn compile_sites(
    center: Location,
    data: &dyn PlannerRoomDataSource,
    paths: &dyn PathService,
) -> Vec<StructureSite> {
    SiteCompiler::new(center, data, paths).compile()
}
