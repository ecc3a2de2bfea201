use std::collections::HashMap;

use serde_json::{Map, Value};
use voxelsand_core::{CoordinateTransform, GridCoord, MaterialKey};
use voxelsand_world::{SupportMarkers, VoxelGrid};

use crate::error::PersistError;
use crate::format::VoxelRecord;

/// Parse and fully validate a voxel list. Nothing is applied anywhere; a
/// single bad record rejects the whole batch.
pub fn parse_voxel_list(bytes: &[u8]) -> Result<Vec<VoxelRecord>, PersistError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(PersistError::NotAList(json_kind(&other))),
    };

    let mut seen: HashMap<GridCoord, usize> = HashMap::with_capacity(items.len());
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let malformed = |reason: String| PersistError::MalformedRecord { index, reason };

        let fields = item
            .as_object()
            .ok_or_else(|| malformed(format!("expected an object, found {}", json_kind(item))))?;
        let record = parse_record(fields).map_err(malformed)?;

        if let Some(first) = seen.insert(record.coord(), index) {
            return Err(malformed(format!(
                "duplicate coordinate {} (first used by record {first})",
                record.coord()
            )));
        }
        records.push(record);
    }
    Ok(records)
}

fn parse_record(fields: &Map<String, Value>) -> Result<VoxelRecord, String> {
    let material = match fields.get("materialKey") {
        None => return Err("missing field 'materialKey'".to_string()),
        Some(Value::String(s)) => s.parse::<MaterialKey>().map_err(|e| e.to_string())?,
        Some(other) => {
            return Err(format!(
                "'materialKey' must be a string, found {}",
                json_kind(other)
            ))
        }
    };
    Ok(VoxelRecord {
        grid_x: int_field(fields, "gridX")?,
        grid_y: int_field(fields, "gridY")?,
        grid_z: int_field(fields, "gridZ")?,
        material_key: material,
    })
}

fn int_field(fields: &Map<String, Value>, name: &str) -> Result<i32, String> {
    let value = fields
        .get(name)
        .ok_or_else(|| format!("missing field '{name}'"))?;
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| format!("'{name}' must be an integer grid coordinate, found {value}"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build a fresh builder grid from a voxel list.
pub fn import_voxel_list(
    bytes: &[u8],
    transform: CoordinateTransform,
) -> Result<VoxelGrid, PersistError> {
    let records = parse_voxel_list(bytes)?;
    let mut grid = VoxelGrid::new(transform, SupportMarkers::Tracked);
    for record in &records {
        grid.place(record.coord(), record.material_key)?;
    }
    log::info!("imported {} voxels", records.len());
    Ok(grid)
}

/// Replace the contents of `grid` with a voxel list. On error the grid is
/// left exactly as it was. Returns the number of voxels loaded.
pub fn reload_into(grid: &mut VoxelGrid, bytes: &[u8]) -> Result<usize, PersistError> {
    let records = parse_voxel_list(bytes)?;
    let cleared = grid.clear();
    for record in &records {
        // Coordinates are unique and the grid is empty, so this cannot fail.
        grid.place(record.coord(), record.material_key)?;
    }
    log::info!(
        "reloaded grid: {} voxels replaced by {}",
        cleared,
        records.len()
    );
    Ok(records.len())
}

/// Origin-relative voxels of a prefab file.
pub fn parse_prefab(bytes: &[u8]) -> Result<Vec<voxelsand_core::Voxel>, PersistError> {
    Ok(parse_voxel_list(bytes)?
        .into_iter()
        .map(VoxelRecord::to_voxel)
        .collect())
}
