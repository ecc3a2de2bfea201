use std::collections::HashMap;

use glam::{IVec3, Vec3};
use voxelsand_core::{Aabb, CollisionClass, CoordinateTransform, GridCoord};

/// Per-cell voxel boxes split into solid and liquid buckets.
///
/// Keyed by the same grid coordinate as `VoxelGrid`, so a movement check
/// only has to look at the cells around the agent.
#[derive(Debug, Clone)]
pub struct CollisionIndex {
    transform: CoordinateTransform,
    solid: HashMap<GridCoord, Aabb>,
    liquid: HashMap<GridCoord, Aabb>,
}

impl CollisionIndex {
    pub fn new(transform: CoordinateTransform) -> Self {
        Self {
            transform,
            solid: HashMap::new(),
            liquid: HashMap::new(),
        }
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    fn bucket(&self, class: CollisionClass) -> &HashMap<GridCoord, Aabb> {
        match class {
            CollisionClass::Solid => &self.solid,
            CollisionClass::Liquid => &self.liquid,
        }
    }

    /// Insert the cell's box into the bucket for `class`. A cell lives in
    /// at most one bucket.
    pub fn insert(&mut self, coord: GridCoord, class: CollisionClass) {
        let cell = self.transform.cell_box(coord);
        match class {
            CollisionClass::Solid => {
                self.liquid.remove(&coord);
                self.solid.insert(coord, cell);
            }
            CollisionClass::Liquid => {
                self.solid.remove(&coord);
                self.liquid.insert(coord, cell);
            }
        }
    }

    /// Drop the cell from whichever bucket holds it.
    pub fn remove(&mut self, coord: &GridCoord) -> bool {
        self.solid.remove(coord).is_some() | self.liquid.remove(coord).is_some()
    }

    pub fn clear(&mut self) {
        self.solid.clear();
        self.liquid.clear();
    }

    pub fn get(&self, class: CollisionClass, coord: &GridCoord) -> Option<&Aabb> {
        self.bucket(class).get(coord)
    }

    pub fn len(&self, class: CollisionClass) -> usize {
        self.bucket(class).len()
    }

    pub fn is_empty(&self) -> bool {
        self.solid.is_empty() && self.liquid.is_empty()
    }

    /// Boxes in `class` whose cell lies within `radius` cells (inclusive,
    /// per axis) of the cell containing `center`.
    ///
    /// Non-finite centers and negative radii yield nothing.
    pub fn query_nearby(&self, center: Vec3, radius: i32, class: CollisionClass) -> Vec<Aabb> {
        if !center.is_finite() || radius < 0 {
            return Vec::new();
        }
        let bucket = self.bucket(class);
        if bucket.is_empty() {
            return Vec::new();
        }

        let origin = self.transform.world_to_grid(center);
        let side = 2 * radius as i64 + 1;

        // A huge neighborhood costs more to walk than the bucket itself.
        if side.saturating_mul(side).saturating_mul(side) > bucket.len() as i64 {
            return bucket
                .iter()
                .filter(|(coord, _)| within(origin, **coord, radius))
                .map(|(_, cell)| *cell)
                .collect();
        }

        let mut found = Vec::new();
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    let Some(coord) = offset(origin, dx, dy, dz) else {
                        continue;
                    };
                    if let Some(cell) = bucket.get(&coord) {
                        found.push(*cell);
                    }
                }
            }
        }
        found
    }

    /// Whether `probe` touches any box of `class` near `center`.
    pub fn intersects_any(
        &self,
        probe: &Aabb,
        center: Vec3,
        radius: i32,
        class: CollisionClass,
    ) -> bool {
        intersects(probe, &self.query_nearby(center, radius, class))
    }
}

/// True iff `candidate` overlaps at least one of `boxes`.
pub fn intersects(candidate: &Aabb, boxes: &[Aabb]) -> bool {
    boxes.iter().any(|b| b.intersects(candidate))
}

fn within(origin: IVec3, coord: IVec3, radius: i32) -> bool {
    let d = (coord.as_i64vec3() - origin.as_i64vec3()).abs();
    d.max_element() <= radius as i64
}

fn offset(origin: IVec3, dx: i32, dy: i32, dz: i32) -> Option<IVec3> {
    Some(IVec3::new(
        origin.x.checked_add(dx)?,
        origin.y.checked_add(dy)?,
        origin.z.checked_add(dz)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelsand_core::GridLayout;

    fn index() -> CollisionIndex {
        CollisionIndex::new(CoordinateTransform::new(5.0, GridLayout::terrain()))
    }

    #[test]
    fn test_probe_inside_solid_cell_hits() {
        let mut idx = index();
        idx.insert(IVec3::ZERO, CollisionClass::Solid);
        let cell = *idx.get(CollisionClass::Solid, &IVec3::ZERO).expect("inserted");

        let probe = Aabb::from_center_size(cell.center(), Vec3::splat(1.0));
        let nearby = idx.query_nearby(cell.center(), 5, CollisionClass::Solid);
        assert_eq!(nearby.len(), 1);
        assert!(intersects(&probe, &nearby));
    }

    #[test]
    fn test_probe_one_cell_away_misses() {
        let mut idx = index();
        idx.insert(IVec3::ZERO, CollisionClass::Solid);

        // Cell (0,0,5) sits five voxels away along Z.
        let far = idx.transform().cell_box(IVec3::new(0, 0, 5));
        let probe = Aabb::from_center_size(far.center(), Vec3::splat(4.0));
        assert!(!idx.intersects_any(&probe, far.center(), 5, CollisionClass::Solid));
    }

    #[test]
    fn test_buckets_are_independent() {
        let mut idx = index();
        idx.insert(IVec3::new(1, 0, 0), CollisionClass::Liquid);
        let center = idx.transform().grid_to_world(IVec3::new(1, 0, 0));
        assert!(idx.query_nearby(center, 1, CollisionClass::Solid).is_empty());
        assert_eq!(idx.query_nearby(center, 1, CollisionClass::Liquid).len(), 1);
        assert_eq!(idx.len(CollisionClass::Liquid), 1);
        assert_eq!(idx.len(CollisionClass::Solid), 0);
    }

    #[test]
    fn test_reclassify_moves_between_buckets() {
        let mut idx = index();
        idx.insert(IVec3::ZERO, CollisionClass::Liquid);
        idx.insert(IVec3::ZERO, CollisionClass::Solid);
        assert_eq!(idx.len(CollisionClass::Liquid), 0);
        assert_eq!(idx.len(CollisionClass::Solid), 1);
    }

    #[test]
    fn test_radius_is_inclusive_and_bounded() {
        let mut idx = index();
        for x in 0..=8 {
            idx.insert(IVec3::new(x, 0, 0), CollisionClass::Solid);
        }
        let center = idx.transform().grid_to_world(IVec3::ZERO);
        // Cells 0..=5 are within radius 5, 6..=8 are not.
        assert_eq!(idx.query_nearby(center, 5, CollisionClass::Solid).len(), 6);
        assert_eq!(idx.query_nearby(center, 0, CollisionClass::Solid).len(), 1);
    }

    #[test]
    fn test_large_radius_matches_neighborhood_scan() {
        let mut idx = index();
        idx.insert(IVec3::new(3, 1, -2), CollisionClass::Solid);
        idx.insert(IVec3::new(40, 0, 0), CollisionClass::Solid);
        let center = idx.transform().grid_to_world(IVec3::ZERO);
        // Bucket-scan path: far cell excluded, near cell included.
        let found = idx.query_nearby(center, 10, CollisionClass::Solid);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], idx.transform().cell_box(IVec3::new(3, 1, -2)));
    }

    #[test]
    fn test_dense_bucket_uses_neighborhood_scan() {
        let mut idx = index();
        for x in -6..=6 {
            for y in -6..=6 {
                for z in -6..=6 {
                    idx.insert(IVec3::new(x, y, z), CollisionClass::Solid);
                }
            }
        }
        let center = idx.transform().grid_to_world(IVec3::ZERO);
        assert_eq!(idx.query_nearby(center, 5, CollisionClass::Solid).len(), 11 * 11 * 11);
    }

    #[test]
    fn test_malformed_queries_yield_nothing() {
        let mut idx = index();
        idx.insert(IVec3::ZERO, CollisionClass::Solid);
        assert!(idx
            .query_nearby(Vec3::new(f32::NAN, 0.0, 0.0), 5, CollisionClass::Solid)
            .is_empty());
        assert!(idx.query_nearby(Vec3::ZERO, -1, CollisionClass::Solid).is_empty());
        let far = Vec3::splat(1.0e9);
        assert!(idx.query_nearby(far, 5, CollisionClass::Solid).is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut idx = index();
        idx.insert(IVec3::ZERO, CollisionClass::Solid);
        idx.insert(IVec3::X, CollisionClass::Liquid);
        assert!(idx.remove(&IVec3::ZERO));
        assert!(!idx.remove(&IVec3::ZERO));
        idx.clear();
        assert!(idx.is_empty());
    }
}
