//! Core location: pick the centre of the obstruction-free square the base is
//! built around.
//!
//! The target point is the midpoint of the walk between the controller and its
//! nearest source. From there every centre within the search radius is tested
//! for a wall-free core square, and the valid centre closest to the target
//! wins. Ties go to the first candidate in scan order (rows top to bottom,
//! then columns left to right), so the result is fully deterministic.

use crate::constants::*;
use crate::location::*;
use crate::pathing::*;
use crate::room_data::*;
use crate::terrain::*;
use itertools::iproduct;
use log::*;
use serde::{Deserialize, Serialize};

/// How the core centre was arrived at. The centre itself is always usable;
/// the status only tells callers whether it is a fallback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreStatus {
    /// Target came from the controller/source path and a clear square was found.
    Exact,
    /// Controller or sources missing; the fallback centre was used as the target.
    NoLandmarks,
    /// No clear square within the search radius; the fallback centre was used.
    NoValidSquare,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoreLocation {
    pub center: Location,
    pub target: Location,
    pub status: CoreStatus,
}

/// Parameters of the core search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoreSearch {
    pub core_size: u8,
    pub search_radius: u8,
    pub fallback: Location,
    pub path_max_ops: u32,
}

impl Default for CoreSearch {
    fn default() -> Self {
        CoreSearch {
            core_size: CORE_SIZE,
            search_radius: CORE_SEARCH_RADIUS,
            fallback: Location::from_xy(FALLBACK_CENTER.0, FALLBACK_CENTER.1),
            path_max_ops: DEFAULT_PATH_MAX_OPS,
        }
    }
}

/// Source nearest to the controller by range. The first of several equally
/// near sources wins.
pub fn nearest_source(controller: Location, sources: &[Location]) -> Option<Location> {
    let (first, rest) = sources.split_first()?;

    let nearest = rest.iter().fold(*first, |nearest, source| {
        if controller.distance_to(*source) < controller.distance_to(nearest) {
            *source
        } else {
            nearest
        }
    });

    Some(nearest)
}

/// Middle cell of the walk `start + steps`, counting `start` as cell 0.
pub fn path_midpoint(start: Location, steps: &[PathStep]) -> Location {
    let mut cells = Vec::with_capacity(steps.len() + 1);
    cells.push(PlanLocation::from(start));
    cells.extend(walk_path(start, steps));

    cells[cells.len() / 2].as_location().unwrap_or(start)
}

/// Point the core search is anchored on, or `None` when the room lacks a
/// controller or sources.
pub fn core_target(
    data: &dyn PlannerRoomDataSource,
    paths: &dyn PathService,
    max_ops: u32,
) -> Option<Location> {
    let controller = data.get_controller()?;
    let source = nearest_source(controller, data.get_sources())?;

    let options = PathOptions::flat()
        .ignore_creeps()
        .ignore_destructible_structures()
        .max_ops(max_ops);
    let steps = paths.find_path(controller, source, &options);

    // A path that never reaches the source is no path; the target falls back
    // to the controller itself.
    let steps: &[PathStep] = if walk_complete_path(controller, source, &steps).is_some() {
        &steps
    } else {
        warn!("No complete path from controller {:?} to source {:?}", controller, source);
        &[]
    };

    Some(path_midpoint(controller, steps))
}

/// Search for the centre of a wall-free `core_size` square nearest to `target`.
pub fn find_core_center(
    terrain: &FastRoomTerrain,
    target: Location,
    search_radius: u8,
    core_size: u8,
) -> Option<Location> {
    let radius = search_radius as i16;
    let half = (core_size / 2) as i16;
    let (tx, ty) = (target.x() as i16, target.y() as i16);

    let candidates: Vec<Location> = iproduct!(-radius..=radius, -radius..=radius)
        .map(|(dy, dx)| (tx + dx, ty + dy))
        .filter(|&(x, y)| terrain.is_clear_square(x, y, half))
        .filter_map(|(x, y)| Location::checked_new(x, y))
        .collect();

    debug!(
        "Core search around {:?}: {} valid centres",
        target,
        candidates.len()
    );

    candidates
        .into_iter()
        .min_by_key(|candidate| candidate.distance_to(target))
}

/// Run the full core location step. Never fails: missing landmarks and an
/// exhausted search both resolve to the fallback centre.
pub fn locate_core(
    data: &dyn PlannerRoomDataSource,
    paths: &dyn PathService,
    search: &CoreSearch,
) -> CoreLocation {
    let (target, mut status) = match core_target(data, paths, search.path_max_ops) {
        Some(target) => (target, CoreStatus::Exact),
        None => {
            warn!(
                "Missing controller or sources, targeting fallback centre {:?}",
                search.fallback
            );
            (search.fallback, CoreStatus::NoLandmarks)
        }
    };

    let center = match find_core_center(
        data.get_terrain(),
        target,
        search.search_radius,
        search.core_size,
    ) {
        Some(center) => center,
        None => {
            warn!(
                "No clear {}x{} core within {} of {:?}, using fallback centre {:?}",
                search.core_size, search.core_size, search.search_radius, target, search.fallback
            );
            status = CoreStatus::NoValidSquare;
            search.fallback
        }
    };

    info!("Core centre {:?} (target {:?}, {:?})", center, target, status);

    CoreLocation {
        center,
        target,
        status,
    }
}
