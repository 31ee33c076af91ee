//! Public API for the room planner.
//!
//! `RoomPlanner` provides a fluent API for configuring a planning pass. A pass
//! runs to completion in one call: it locates the core, orders the defensive
//! ring and source ramparts, compiles the full site list and persists it with
//! the core visual.

use crate::bounds::BoundingBox;
use crate::compiler::SiteCompiler;
use crate::constants::*;
use crate::core_locator::{locate_core, CoreSearch};
use crate::location::Location;
use crate::pathing::{PathService, TerrainPathService};
use crate::perimeter::build_ring;
use crate::placement::{place_if_absent, PlacementOutcome, PlacementReport, PlacementTarget};
use crate::room_data::PlannerRoomDataSource;
use crate::source_guard::protect_sources;
use crate::store::{RegionStore, StoreError};
use crate::visual::CoreVisual;
use log::*;
use serde::{Deserialize, Serialize};

// Re-export key types for convenience
pub use crate::compiler::StructureSite;
pub use crate::core_locator::{CoreLocation, CoreStatus};
pub use crate::room_data::{PlanLocation, RoomDataSnapshot};
pub use crate::terrain::{FastRoomTerrain, TerrainFlags};

/// Tunables of a planning pass. `Default` gives the standard layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConfig {
    /// Side length of the wall-free core square.
    pub core_size: u8,
    /// Chebyshev radius searched around the target for a core centre.
    pub search_radius: u8,
    /// Gap between the core box and the defensive ring.
    pub defense_margin: u8,
    pub path_max_ops: u32,
    #[serde(with = "crate::location::xy_serde")]
    pub fallback_center: Location,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            core_size: CORE_SIZE,
            search_radius: CORE_SEARCH_RADIUS,
            defense_margin: DEFENSE_MARGIN,
            path_max_ops: DEFAULT_PATH_MAX_OPS,
            fallback_center: Location::from_xy(FALLBACK_CENTER.0, FALLBACK_CENTER.1),
        }
    }
}

impl PlannerConfig {
    fn core_search(&self) -> CoreSearch {
        CoreSearch {
            core_size: self.core_size,
            search_radius: self.search_radius,
            fallback: self.fallback_center,
            path_max_ops: self.path_max_ops,
        }
    }
}

/// Result of a planning pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanOutcome {
    pub core: CoreLocation,
    pub bounds: BoundingBox,
    pub sites: Vec<StructureSite>,
    /// Construction orders issued for the ring and source ramparts.
    pub defense: PlacementReport,
}

#[derive(Clone, Debug, Default)]
pub struct RoomPlanner {
    config: PlannerConfig,
}

impl RoomPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        RoomPlanner { config }
    }

    pub fn core_size(mut self, core_size: u8) -> Self {
        self.config.core_size = core_size;
        self
    }

    pub fn search_radius(mut self, search_radius: u8) -> Self {
        self.config.search_radius = search_radius;
        self
    }

    pub fn defense_margin(mut self, defense_margin: u8) -> Self {
        self.config.defense_margin = defense_margin;
        self
    }

    pub fn path_max_ops(mut self, max_ops: u32) -> Self {
        self.config.path_max_ops = max_ops;
        self
    }

    pub fn fallback_center(mut self, center: Location) -> Self {
        self.config.fallback_center = center;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run one planning pass for `region`.
    ///
    /// The region must already be initialized in `store`; nothing is placed
    /// or written otherwise. Host rejections of individual construction
    /// orders are counted in the outcome, not returned as errors.
    pub fn plan(
        &self,
        region: &str,
        data: &dyn PlannerRoomDataSource,
        paths: &dyn PathService,
        target: &mut dyn PlacementTarget,
        store: &mut dyn RegionStore,
    ) -> Result<PlanOutcome, StoreError> {
        if !store.is_initialized(region) {
            return Err(StoreError::Uninitialized(region.to_owned()));
        }

        let core = locate_core(data, paths, &self.config.core_search());
        let bounds = BoundingBox::around(core.center, self.config.core_size);

        let terrain = data.get_terrain();
        let mut defense = build_ring(terrain, &bounds, self.config.defense_margin, target);
        defense.merge(&protect_sources(terrain, data.get_sources(), target));

        store.write_visual(
            region,
            CoreVisual {
                core_center: core.center,
                core_bounds: bounds,
            },
        )?;

        let sites = SiteCompiler::new(core.center, data, paths)
            .max_ops(self.config.path_max_ops)
            .compile();
        store.write_sites(region, sites.clone())?;

        info!(
            "Planned {}: core ({}, {}) {:?}, {} sites, {} defense orders",
            region,
            core.center.x(),
            core.center.y(),
            core.status,
            sites.len(),
            defense.created
        );

        Ok(PlanOutcome {
            core,
            bounds,
            sites,
            defense,
        })
    }
}

/// Plan a room with the default configuration, routing over its terrain.
pub fn plan_room(
    region: &str,
    data: &dyn PlannerRoomDataSource,
    target: &mut dyn PlacementTarget,
    store: &mut dyn RegionStore,
) -> Result<PlanOutcome, StoreError> {
    let paths = TerrainPathService::new(data.get_terrain());
    RoomPlanner::new().plan(region, data, &paths, target, store)
}

/// Take the next persisted site for `region` and order it. Returns `None`
/// once the list is drained.
pub fn issue_next_site(
    region: &str,
    store: &mut dyn RegionStore,
    target: &mut dyn PlacementTarget,
) -> Option<(StructureSite, PlacementOutcome)> {
    let site = store.pop_next_site(region)?;
    let outcome = place_if_absent(target, site.pos, site.structure_type);

    Some((site, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::SimulatedRoom;
    use crate::store::MemoryRegionStore;

    fn example_room() -> RoomDataSnapshot {
        RoomDataSnapshot::new(FastRoomTerrain::plains())
            .with_controller(Location::from_xy(10, 10))
            .with_source(Location::from_xy(40, 40))
    }

    #[test]
    fn config_defaults_and_builder() {
        let planner = RoomPlanner::new().search_radius(4).defense_margin(2);
        assert_eq!(planner.config().core_size, 13);
        assert_eq!(planner.config().search_radius, 4);
        assert_eq!(planner.config().defense_margin, 2);
        assert_eq!(planner.config().fallback_center, Location::from_xy(25, 25));

        let parsed: PlannerConfig = serde_json::from_str(r#"{"searchRadius":7}"#).unwrap();
        assert_eq!(parsed.search_radius, 7);
        assert_eq!(parsed.path_max_ops, 2000);
    }

    #[test]
    fn plan_persists_sites_and_visual() {
        let data = example_room();
        let mut room = SimulatedRoom::new(data.get_terrain().clone()).with_max_sites(usize::MAX);
        let mut store = MemoryRegionStore::new();
        store.initialize("W1N1", data.get_sources());

        let outcome = plan_room("W1N1", &data, &mut room, &mut store).unwrap();

        assert_eq!(outcome.core.center, Location::from_xy(25, 25));
        assert_eq!(outcome.core.status, CoreStatus::Exact);
        assert_eq!(store.sites("W1N1"), Some(outcome.sites.as_slice()));
        assert_eq!(
            store.visual("W1N1"),
            Some(&CoreVisual {
                core_center: outcome.core.center,
                core_bounds: outcome.bounds,
            })
        );
        assert_eq!(outcome.defense.created, 72);
    }

    #[test]
    fn uninitialized_region_is_untouched() {
        let data = example_room();
        let mut room = SimulatedRoom::new(data.get_terrain().clone());
        let mut store = MemoryRegionStore::new();

        let result = plan_room("W1N1", &data, &mut room, &mut store);

        assert!(matches!(result, Err(StoreError::Uninitialized(_))));
        assert!(room.orders().is_empty());
        assert!(!store.is_initialized("W1N1"));
    }

    #[test]
    fn issue_next_site_drains_the_list() {
        let mut store = MemoryRegionStore::new();
        store.initialize("W1N1", &[]);
        let storage = StructureSite::new(
            screeps::constants::StructureType::Storage,
            Location::from_xy(25, 25),
        );
        store.write_sites("W1N1", vec![storage, storage]).unwrap();

        let mut room = SimulatedRoom::new(FastRoomTerrain::plains());
        assert_eq!(
            issue_next_site("W1N1", &mut store, &mut room),
            Some((storage, PlacementOutcome::Created))
        );
        assert_eq!(
            issue_next_site("W1N1", &mut store, &mut room),
            Some((storage, PlacementOutcome::AlreadyExists))
        );
        assert_eq!(issue_next_site("W1N1", &mut store, &mut room), None);
    }
}
