//! Static core layout, expressed as offsets from the core centre.
//!
//! ```text
//!          y:-2   -1    0    1    2
//!  x:-2               Spawn
//!  x:-1          Road Tower Road
//!  x: 0   Spawn Tower Stor Link PSpawn
//!  x: 1          Road Tower Road
//!  x: 2               Spawn
//! ```
//!
//! Every table here is literal data. Entry order matters: the site compiler
//! keeps the first occurrence of each `(type, x, y)`.

use screeps::constants::StructureType;

/// A structure at a fixed offset from the core centre.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutOffset {
    pub structure_type: StructureType,
    pub dx: i8,
    pub dy: i8,
}

pub const fn offset(structure_type: StructureType, dx: i8, dy: i8) -> LayoutOffset {
    LayoutOffset {
        structure_type,
        dx,
        dy,
    }
}

pub const STRUCTURE_LAYOUT: &[LayoutOffset] = &[
    // Inner core
    offset(StructureType::Storage, 0, 0),
    offset(StructureType::Tower, 0, -1),
    offset(StructureType::Link, 0, 1),
    offset(StructureType::Tower, -1, 0),
    offset(StructureType::Tower, 1, 0),
    // Two out in each cardinal direction
    offset(StructureType::Spawn, 0, -2),
    offset(StructureType::PowerSpawn, 0, 2),
    offset(StructureType::Spawn, -2, 0),
    offset(StructureType::Spawn, 2, 0),
    // Road ring
    offset(StructureType::Road, 0, 3),
    offset(StructureType::Road, 1, 2),
    offset(StructureType::Road, 2, 1),
    offset(StructureType::Road, 3, 0),
    offset(StructureType::Road, 2, -1),
    offset(StructureType::Road, 1, -2),
    offset(StructureType::Road, 0, -3),
    offset(StructureType::Road, -1, -2),
    offset(StructureType::Road, -2, -1),
    offset(StructureType::Road, 3, 0),
    offset(StructureType::Road, -2, 1),
    offset(StructureType::Road, -1, 2),
    offset(StructureType::Road, 1, 1),
    offset(StructureType::Road, 1, -1),
    offset(StructureType::Road, -1, -1),
    offset(StructureType::Road, -1, 1),
    // Lab block
    offset(StructureType::Terminal, 2, 6),
    offset(StructureType::Factory, 2, 2),
    offset(StructureType::Lab, 2, 4),
    offset(StructureType::Lab, 2, 5),
    offset(StructureType::Lab, 3, 2),
    offset(StructureType::Lab, 3, 4),
    offset(StructureType::Lab, 3, 5),
    offset(StructureType::Lab, 4, 2),
    offset(StructureType::Lab, 4, 3),
    offset(StructureType::Lab, 4, 5),
    offset(StructureType::Lab, 5, 3),
    offset(StructureType::Lab, 5, 4),
];

/// Template entries of one structure type, in table order.
pub fn template_offsets(
    structure_type: StructureType,
) -> impl Iterator<Item = &'static LayoutOffset> {
    STRUCTURE_LAYOUT
        .iter()
        .filter(move |entry| entry.structure_type == structure_type)
}

/// Extensions are grouped around the north spawn.
pub const EXTENSION_ANCHOR: (i8, i8) = (0, -2);

/// First tier: the eight neighbours of the anchor.
pub const EXTENSION_INNER: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (-1, -1),
    (1, -1),
    (0, 1),
    (-1, 1),
    (1, 1),
];

/// Second tier: the sides of the 5x5 ring around the anchor, corners excluded.
pub const EXTENSION_OUTER: [(i8, i8); 12] = [
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (2, -1),
    (2, 0),
    (2, 1),
    (-1, -2),
    (0, -2),
    (1, -2),
    (-1, 2),
    (0, 2),
    (1, 2),
];

/// Outer towers at the corners and poles of the core.
pub const OUTER_TOWERS: [(i8, i8); 6] = [(-3, -3), (3, -3), (-3, 3), (3, 3), (0, -4), (0, 4)];

/// Road diamond around the centre: `|dx| + |dy| == 3` or `|dx| == |dy| == 1`,
/// listed column by column.
pub const DIAMOND_ROADS: [(i8, i8); 16] = [
    (-3, 0),
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, -1),
    (-1, 1),
    (-1, 2),
    (0, -3),
    (0, 3),
    (1, -2),
    (1, -1),
    (1, 1),
    (1, 2),
    (2, -1),
    (2, 1),
    (3, 0),
];

/// Spawn-to-storage link and the lab row feeding into the main road.
pub const CONNECTOR_ROADS: [(i8, i8); 5] = [(0, -1), (0, -2), (1, -2), (2, -2), (3, -2)];

pub const CORE_LINK: (i8, i8) = (0, 2);
pub const LAB_RELAY_CONTAINER: (i8, i8) = (4, 4);
pub const OBSERVER: (i8, i8) = (0, -6);
pub const POWER_SPAWN: (i8, i8) = (3, 0);
pub const NUKER: (i8, i8) = (0, -5);

#[cfg(test)]
mod tests {
    use super::*;
    use fnv::FnvHashSet;

    #[test]
    fn template_has_expected_counts() {
        assert_eq!(template_offsets(StructureType::Spawn).count(), 3);
        assert_eq!(template_offsets(StructureType::Tower).count(), 3);
        assert_eq!(template_offsets(StructureType::Lab).count(), 10);
        assert_eq!(template_offsets(StructureType::Road).count(), 16);
        assert_eq!(
            template_offsets(StructureType::Storage).next(),
            Some(&offset(StructureType::Storage, 0, 0))
        );
    }

    #[test]
    fn diamond_matches_its_rule() {
        let mut expected = Vec::new();
        for dx in -3i8..=3 {
            for dy in -3i8..=3 {
                let (ax, ay) = (dx.abs(), dy.abs());
                if ax + ay == 3 || (ax == ay && ax == 1) {
                    expected.push((dx, dy));
                }
            }
        }
        assert_eq!(expected, DIAMOND_ROADS.to_vec());
    }

    #[test]
    fn extension_tiers_are_distinct() {
        let cells: FnvHashSet<(i8, i8)> = EXTENSION_INNER
            .iter()
            .chain(EXTENSION_OUTER.iter())
            .copied()
            .collect();
        assert_eq!(cells.len(), 20);
        assert!(!cells.contains(&(0, 0)));
        assert!(EXTENSION_INNER
            .iter()
            .all(|&(dx, dy)| dx.abs().max(dy.abs()) == 1));
        assert!(EXTENSION_OUTER
            .iter()
            .all(|&(dx, dy)| dx.abs().max(dy.abs()) == 2));
    }
}
