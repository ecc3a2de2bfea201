use glam::IVec3;

use crate::material::MaterialKey;

/// Integer cell coordinate. Hashing and equality are exact-integer.
pub type GridCoord = IVec3;

/// A placed voxel: enough for a renderer to rebuild it deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Voxel {
    pub coord: GridCoord,
    pub material: MaterialKey,
}

impl Voxel {
    pub fn new(coord: GridCoord, material: MaterialKey) -> Self {
        Self { coord, material }
    }
}
