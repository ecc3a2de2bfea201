//! Procedural prefabs (trees, the house) and stamping into a grid.

use std::collections::BTreeMap;

use glam::IVec3;
use voxelsand_core::{GridCoord, MaterialKey, Voxel};

use crate::grid::VoxelGrid;

/// Outcome of stamping a prefab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StampReport {
    pub placed: usize,
    /// Cells that were already occupied and left untouched.
    pub skipped: usize,
}

impl std::ops::AddAssign for StampReport {
    fn add_assign(&mut self, rhs: Self) {
        self.placed += rhs.placed;
        self.skipped += rhs.skipped;
    }
}

/// Place `voxels` offset by `origin`. Occupied cells are skipped, never
/// overwritten.
pub fn stamp(grid: &mut VoxelGrid, voxels: &[Voxel], origin: GridCoord) -> StampReport {
    let mut report = StampReport::default();
    for voxel in voxels {
        match grid.place(origin + voxel.coord, voxel.material) {
            Ok(()) => report.placed += 1,
            Err(e) => {
                log::debug!("stamp skipped: {e}");
                report.skipped += 1;
            }
        }
    }
    if report.skipped > 0 {
        log::warn!(
            "stamp at {origin}: {} voxels placed, {} occupied cells skipped",
            report.placed,
            report.skipped
        );
    }
    report
}

/// The tree variants scattered over generated terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    T1,
    T2,
    T3,
    T4,
    T5,
}

pub const ALL_TREES: [TreeKind; 5] = [
    TreeKind::T1,
    TreeKind::T2,
    TreeKind::T3,
    TreeKind::T4,
    TreeKind::T5,
];

struct TreeShape {
    trunk: MaterialKey,
    leaf: MaterialKey,
    trunk_height: i32,
    /// Canopy layers bottom to top as (y, radius).
    canopy: &'static [(i32, i32)],
}

impl TreeKind {
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::T1 => "tree_1",
            TreeKind::T2 => "tree_2",
            TreeKind::T3 => "tree_3",
            TreeKind::T4 => "tree_4",
            TreeKind::T5 => "tree_5",
        }
    }

    fn shape(self) -> TreeShape {
        match self {
            TreeKind::T1 => TreeShape {
                trunk: MaterialKey::Trunk1,
                leaf: MaterialKey::Leaf1,
                trunk_height: 4,
                canopy: &[(3, 2), (4, 2), (5, 1)],
            },
            TreeKind::T2 => TreeShape {
                trunk: MaterialKey::Trunk2,
                leaf: MaterialKey::Leaf2,
                trunk_height: 5,
                canopy: &[(4, 2), (5, 1), (6, 0)],
            },
            TreeKind::T3 => TreeShape {
                trunk: MaterialKey::Trunk3,
                leaf: MaterialKey::Leaf1,
                trunk_height: 6,
                canopy: &[(3, 2), (4, 2), (5, 1), (6, 1), (7, 0)],
            },
            TreeKind::T4 => TreeShape {
                trunk: MaterialKey::Trunk1,
                leaf: MaterialKey::Leaf2,
                trunk_height: 3,
                canopy: &[(2, 1), (3, 2), (4, 1)],
            },
            TreeKind::T5 => TreeShape {
                trunk: MaterialKey::Trunk2,
                leaf: MaterialKey::Leaf1,
                trunk_height: 7,
                canopy: &[(5, 2), (6, 1), (7, 1), (8, 0)],
            },
        }
    }

    /// Voxels relative to the tree base at the origin, sorted by (y, x, z).
    pub fn voxels(self) -> Vec<Voxel> {
        let shape = self.shape();
        let mut cells = BTreeMap::new();
        for (y, radius) in shape.canopy {
            for x in -radius..=*radius {
                for z in -radius..=*radius {
                    // Round off the corners of wide layers.
                    if *radius >= 2 && x.abs() == *radius && z.abs() == *radius {
                        continue;
                    }
                    cells.insert((*y, x, z), shape.leaf);
                }
            }
        }
        for y in 0..shape.trunk_height {
            cells.insert((y, 0, 0), shape.trunk);
        }
        collect(cells)
    }
}

/// Footprint half-width of the house.
const HOUSE_HALF: i32 = 3;
const HOUSE_WALL_HEIGHT: i32 = 4;

/// Plank house with trunk corner posts, a door facing -Z and a flat roof.
pub fn house() -> Vec<Voxel> {
    let mut cells = BTreeMap::new();
    for y in 0..=HOUSE_WALL_HEIGHT {
        for x in -HOUSE_HALF..=HOUSE_HALF {
            for z in -HOUSE_HALF..=HOUSE_HALF {
                let edge_x = x.abs() == HOUSE_HALF;
                let edge_z = z.abs() == HOUSE_HALF;
                let material = if y == HOUSE_WALL_HEIGHT {
                    MaterialKey::Plank
                } else if edge_x && edge_z {
                    MaterialKey::Trunk3
                } else if edge_x || edge_z {
                    let door = x == 0 && z == -HOUSE_HALF && y < 2;
                    let window = y == 2 && (x == 0 || z == 0);
                    if door || window {
                        continue;
                    }
                    MaterialKey::Plank
                } else {
                    continue;
                };
                cells.insert((y, x, z), material);
            }
        }
    }
    collect(cells)
}

fn collect(cells: BTreeMap<(i32, i32, i32), MaterialKey>) -> Vec<Voxel> {
    cells
        .into_iter()
        .map(|((y, x, z), material)| Voxel::new(IVec3::new(x, y, z), material))
        .collect()
}
