use voxelsand_core::{GridCoord, Voxel};
use voxelsand_world::{stamp, StampReport, VoxelGrid};

use crate::format::VoxelRecord;

/// Stamp a loaded voxel list at `origin`. Occupied cells are skipped and
/// counted, as for any programmatic placement.
pub fn stamp_records(grid: &mut VoxelGrid, records: &[VoxelRecord], origin: GridCoord) -> StampReport {
    let voxels: Vec<Voxel> = records.iter().map(|r| r.to_voxel()).collect();
    stamp(grid, &voxels, origin)
}
