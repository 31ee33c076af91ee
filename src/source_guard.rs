//! SourceGuard: covers energy-transfer infrastructure on source tiles with ramparts.

use crate::location::*;
use crate::placement::*;
use crate::terrain::*;
use log::*;

use screeps::constants::StructureType;

/// Containers and links are the structures that move energy out of a source.
pub fn is_energy_transfer(structure_type: StructureType) -> bool {
    matches!(structure_type, StructureType::Container | StructureType::Link)
}

/// Issue a rampart over every container or link standing on a source tile.
/// Sources without such infrastructure are left alone.
pub fn protect_sources(
    terrain: &FastRoomTerrain,
    sources: &[Location],
    target: &mut dyn PlacementTarget,
) -> PlacementReport {
    let mut report = PlacementReport::default();

    for &source in sources {
        if terrain.is_wall_at(source) {
            continue;
        }

        let guarded: Vec<StructureType> = target
            .structures_at(source)
            .into_iter()
            .filter(|structure_type| is_energy_transfer(*structure_type))
            .collect();

        for structure_type in guarded {
            let outcome = place_if_absent(target, source, StructureType::Rampart);
            if outcome == PlacementOutcome::Created {
                debug!(
                    "Guarding {:?} at source ({}, {})",
                    structure_type,
                    source.x(),
                    source.y()
                );
            }
            report.record(&outcome);
        }
    }

    report
}
