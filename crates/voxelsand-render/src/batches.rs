use std::cmp::Ordering;
use std::collections::BTreeMap;

use voxelsand_core::MaterialKey;
use voxelsand_world::VoxelGrid;

/// One voxel instance (16 bytes). `material` is `MaterialKey::index`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub position: [f32; 3],
    pub material: u32,
}

/// One support-marker sphere (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerRaw {
    pub position: [f32; 3],
    pub radius: f32,
}

/// Marker sphere radius as a fraction of the voxel size.
const MARKER_RADIUS_FRACTION: f32 = 0.25;

/// Per-material instance arrays rebuilt from a grid when it changes.
#[derive(Debug, Default)]
pub struct BatchSet {
    /// Grid revision the batches were built from.
    built_revision: Option<u64>,
    batches: BTreeMap<MaterialKey, Vec<InstanceRaw>>,
    markers: Vec<MarkerRaw>,
}

impl BatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild if the grid changed since the last build. Returns whether a
    /// rebuild happened.
    ///
    /// Batches are tied to the revision counter only, so one `BatchSet`
    /// must follow a single grid.
    pub fn rebuild_if_changed(&mut self, grid: &VoxelGrid) -> bool {
        if self.built_revision == Some(grid.revision()) {
            return false;
        }
        self.rebuild(grid);
        true
    }

    /// Unconditionally rebuild from `grid`.
    pub fn rebuild(&mut self, grid: &VoxelGrid) {
        let transform = grid.transform();
        self.batches.clear();
        for voxel in grid.voxels() {
            self.batches
                .entry(voxel.material)
                .or_default()
                .push(InstanceRaw {
                    position: transform.grid_to_world(voxel.coord).to_array(),
                    material: voxel.material.index() as u32,
                });
        }
        // Stable order so uploads are reproducible.
        for instances in self.batches.values_mut() {
            instances.sort_by(|a, b| by_position(&a.position, &b.position));
        }

        let radius = transform.voxel_size() * MARKER_RADIUS_FRACTION;
        self.markers = grid
            .markers()
            .map(|coord| MarkerRaw {
                position: transform.grid_to_world(coord).to_array(),
                radius,
            })
            .collect();
        self.markers
            .sort_by(|a, b| by_position(&a.position, &b.position));

        self.built_revision = Some(grid.revision());
        log::debug!(
            "rebuilt {} batches, {} markers at revision {}",
            self.batches.len(),
            self.markers.len(),
            grid.revision()
        );
    }

    pub fn instances(&self, key: MaterialKey) -> &[InstanceRaw] {
        self.batches.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Raw bytes of one material's instances, ready for upload.
    pub fn instance_bytes(&self, key: MaterialKey) -> &[u8] {
        bytemuck::cast_slice(self.instances(key))
    }

    pub fn markers(&self) -> &[MarkerRaw] {
        &self.markers
    }

    pub fn marker_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.markers)
    }

    /// Materials with at least one instance.
    pub fn materials(&self) -> impl Iterator<Item = MaterialKey> + '_ {
        self.batches.keys().copied()
    }

    pub fn total_instances(&self) -> usize {
        self.batches.values().map(Vec::len).sum()
    }
}

fn by_position(a: &[f32; 3], b: &[f32; 3]) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use voxelsand_core::WorldConfig;
    use voxelsand_world::SupportMarkers;

    fn grid() -> VoxelGrid {
        VoxelGrid::new(
            WorldConfig::default().builder_transform(),
            SupportMarkers::Tracked,
        )
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 16);
        assert_eq!(std::mem::size_of::<MarkerRaw>(), 16);
    }

    #[test]
    fn test_groups_by_material() {
        let mut g = grid();
        g.place(IVec3::new(0, 0, 0), MaterialKey::M1).expect("place");
        g.place(IVec3::new(1, 0, 0), MaterialKey::M1).expect("place");
        g.place(IVec3::new(0, 2, 0), MaterialKey::M2).expect("place");

        let mut batches = BatchSet::new();
        assert!(batches.rebuild_if_changed(&g));
        assert_eq!(batches.instances(MaterialKey::M1).len(), 2);
        assert_eq!(batches.instances(MaterialKey::M2).len(), 1);
        assert!(batches.instances(MaterialKey::Stone).is_empty());
        assert_eq!(batches.total_instances(), 3);
        assert_eq!(batches.instance_bytes(MaterialKey::M1).len(), 32);

        let m2 = batches.instances(MaterialKey::M2)[0];
        assert_eq!(m2.position, [2.5, 12.5, 2.5]);
        assert_eq!(m2.material, MaterialKey::M2.index() as u32);
        // y=1 under the M2 voxel is a marker (y=0 holds M1).
        assert_eq!(batches.markers().len(), 1);
        assert_eq!(batches.markers()[0].position, [2.5, 7.5, 2.5]);
        assert_eq!(batches.markers()[0].radius, 1.25);
    }

    #[test]
    fn test_skips_rebuild_when_unchanged() {
        let mut g = grid();
        g.place(IVec3::new(0, 0, 0), MaterialKey::M1).expect("place");
        let mut batches = BatchSet::new();
        assert!(batches.rebuild_if_changed(&g));
        assert!(!batches.rebuild_if_changed(&g));

        g.remove(IVec3::new(0, 0, 0));
        assert!(batches.rebuild_if_changed(&g));
        assert_eq!(batches.total_instances(), 0);
        assert_eq!(batches.materials().count(), 0);
    }

    #[test]
    fn test_empty_grid_builds_once() {
        let mut batches = BatchSet::new();
        let g = grid();
        assert!(batches.rebuild_if_changed(&g));
        assert!(!batches.rebuild_if_changed(&g));
        assert!(batches.marker_bytes().is_empty());
    }
}
