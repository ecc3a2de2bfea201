use std::collections::{BTreeMap, HashMap, HashSet};

use glam::IVec3;
use voxelsand_core::{CoordinateTransform, GridCoord, MaterialKey, Voxel};

use crate::collision::CollisionIndex;
use crate::error::GridError;

/// Whether the grid maintains support markers under placed voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupportMarkers {
    /// Builder behavior: every empty cell between a voxel and the ground
    /// carries a marker.
    #[default]
    Tracked,
    /// Generated worlds never depict markers.
    Disabled,
}

/// Sparse voxel set with support-marker bookkeeping and a collision index
/// kept in lockstep.
///
/// Invariants:
/// - at most one voxel per cell;
/// - a marker never shares a cell with a voxel;
/// - every voxel has exactly one collision entry, markers have none.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    transform: CoordinateTransform,
    support: SupportMarkers,
    voxels: HashMap<GridCoord, MaterialKey>,
    markers: HashSet<GridCoord>,
    collision: CollisionIndex,
    /// Bumped on every successful mutation.
    revision: u64,
}

impl VoxelGrid {
    pub fn new(transform: CoordinateTransform, support: SupportMarkers) -> Self {
        Self {
            transform,
            support,
            voxels: HashMap::new(),
            markers: HashSet::new(),
            collision: CollisionIndex::new(transform),
            revision: 0,
        }
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn support_markers(&self) -> SupportMarkers {
        self.support
    }

    pub fn collision(&self) -> &CollisionIndex {
        &self.collision
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Place a voxel. Occupied cells are rejected and left unchanged.
    pub fn place(&mut self, coord: GridCoord, material: MaterialKey) -> Result<(), GridError> {
        if let Some(&existing) = self.voxels.get(&coord) {
            return Err(GridError::DuplicateVoxel { coord, existing });
        }

        self.markers.remove(&coord);
        self.voxels.insert(coord, material);
        self.collision.insert(coord, material.collision_class());
        if self.support == SupportMarkers::Tracked {
            self.add_markers_below(coord);
        }
        self.revision += 1;
        log::debug!("placed {material} at {coord}");
        Ok(())
    }

    /// Remove the voxel at `coord`, returning its material. No-op on an
    /// empty cell.
    pub fn remove(&mut self, coord: GridCoord) -> Option<MaterialKey> {
        let material = self.voxels.remove(&coord)?;
        self.collision.remove(&coord);

        if self.support == SupportMarkers::Tracked {
            let above = coord + IVec3::Y;
            if self.voxels.contains_key(&above) || self.markers.contains(&above) {
                // Still supported from above: refill the column.
                self.add_markers_below(above);
            } else {
                self.remove_markers_below(coord);
            }
        }
        self.revision += 1;
        log::debug!("removed {material} from {coord}");
        Some(material)
    }

    /// Remove every voxel, marker and collision entry. Returns the number
    /// of voxels removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.voxels.len();
        if removed > 0 || !self.markers.is_empty() {
            self.voxels.clear();
            self.markers.clear();
            self.collision.clear();
            self.revision += 1;
        }
        removed
    }

    pub fn exists(&self, coord: GridCoord) -> bool {
        self.voxels.contains_key(&coord)
    }

    pub fn get(&self, coord: GridCoord) -> Option<Voxel> {
        self.voxels
            .get(&coord)
            .map(|&material| Voxel::new(coord, material))
    }

    pub fn has_marker(&self, coord: GridCoord) -> bool {
        self.markers.contains(&coord)
    }

    /// Number of voxels.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Iterate placed voxels in no particular order.
    pub fn voxels(&self) -> impl Iterator<Item = Voxel> + '_ {
        self.voxels
            .iter()
            .map(|(&coord, &material)| Voxel::new(coord, material))
    }

    /// Iterate marker cells in no particular order.
    pub fn markers(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.markers.iter().copied()
    }

    /// Voxel count per material.
    pub fn material_counts(&self) -> BTreeMap<MaterialKey, usize> {
        let mut counts = BTreeMap::new();
        for material in self.voxels.values() {
            *counts.entry(*material).or_insert(0) += 1;
        }
        counts
    }

    /// Fill every genuinely empty cell from `coord` down to y = 0.
    /// Existing voxels and markers are skipped, not treated as a stop.
    fn add_markers_below(&mut self, coord: GridCoord) {
        for y in (0..=coord.y).rev() {
            let cell = IVec3::new(coord.x, y, coord.z);
            if self.voxels.contains_key(&cell) || self.markers.contains(&cell) {
                continue;
            }
            self.markers.insert(cell);
        }
    }

    /// Delete markers from `coord` down to y = 0, stopping at the first
    /// voxel: whatever lies below it belongs to that voxel's column.
    fn remove_markers_below(&mut self, coord: GridCoord) {
        for y in (0..=coord.y).rev() {
            let cell = IVec3::new(coord.x, y, coord.z);
            if self.voxels.contains_key(&cell) {
                break;
            }
            self.markers.remove(&cell);
        }
    }
}
