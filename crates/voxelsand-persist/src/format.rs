use glam::IVec3;
use serde::Serialize;
use voxelsand_core::{GridCoord, MaterialKey, Voxel};

/// One entry of a persisted voxel list. Coordinates are grid units, never
/// world units.
///
/// ```json
/// { "gridX": 0, "gridY": 1, "gridZ": -2, "materialKey": "STONE" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoxelRecord {
    pub grid_x: i32,
    pub grid_y: i32,
    pub grid_z: i32,
    pub material_key: MaterialKey,
}

impl VoxelRecord {
    pub fn coord(&self) -> GridCoord {
        IVec3::new(self.grid_x, self.grid_y, self.grid_z)
    }

    pub fn to_voxel(self) -> Voxel {
        Voxel::new(self.coord(), self.material_key)
    }
}

impl From<Voxel> for VoxelRecord {
    fn from(voxel: Voxel) -> Self {
        Self {
            grid_x: voxel.coord.x,
            grid_y: voxel.coord.y,
            grid_z: voxel.coord.z,
            material_key: voxel.material,
        }
    }
}
