use voxelsand_world::VoxelGrid;

use crate::error::PersistError;
use crate::format::VoxelRecord;

/// Snapshot the grid as records sorted by (y, x, z), so the same grid
/// always produces the same file.
pub fn export_voxel_list(grid: &VoxelGrid) -> Vec<VoxelRecord> {
    let mut records: Vec<VoxelRecord> = grid.voxels().map(VoxelRecord::from).collect();
    records.sort_by_key(|r| (r.grid_y, r.grid_x, r.grid_z));
    records
}

/// Pretty-print records with two-space indentation.
pub fn to_json_string(records: &[VoxelRecord]) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Export a grid as a voxel-list document. An empty grid has nothing worth
/// saving and is refused.
pub fn export_json(grid: &VoxelGrid) -> Result<String, PersistError> {
    if grid.is_empty() {
        return Err(PersistError::EmptyExport);
    }
    let records = export_voxel_list(grid);
    let json = to_json_string(&records)?;
    log::info!("exported {} voxels ({} bytes)", records.len(), json.len());
    Ok(json)
}
