use std::collections::BTreeMap;

use glam::IVec3;
use voxelsand_core::{GridCoord, MaterialKey, WorldConfig};

use crate::grid::{SupportMarkers, VoxelGrid};
use crate::noise::{column_hash, hash_to_unit, NoiseField};
use crate::prefab::{self, StampReport, ALL_TREES};

/// Height = (noise + offset) * scale, sampled at (x, z) / smoothness.
const HEIGHT_SCALE: f64 = 20.0;
const HEIGHT_OFFSET: f64 = 0.5;
const SMOOTHNESS: f64 = 40.0;
/// Nudge keeping height samples off the lattice points where simplex is 0.
const HEIGHT_SAMPLE_SHIFT: f64 = 0.01;
const MAX_HEIGHT: f64 = 20.0;

/// Type-noise thresholds picking sand and stone surfaces.
const SAND_THRESHOLD: f64 = 0.3;
const STONE_THRESHOLD: f64 = -0.3;
/// Cells at or below this grid Y are always stone.
const BEDROCK_TOP: i32 = 2;

/// Half-width of the flattened building plateau, inclusive.
const PLATEAU_HALF: i32 = 10;

/// Chance that an eligible column seeds a tree.
const TREE_CHANCE: f64 = 0.001;
/// Trees only grow on columns taller than this.
const TREE_MIN_HEIGHT: i32 = 3;
/// Minimum per-axis distance between two tree sites.
const TREE_SPACING: i32 = 10;

/// Seed salt separating the surface-type field from the height field.
const TYPE_SEED_SALT: u64 = 0x5EED_7E77_A1B2_C3D4;
const TREE_SEED_SALT: u64 = 0x7EE5;

/// Top material family of a terrain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Dirt topped with grass.
    Dirt,
    Sand,
    Stone,
}

impl Surface {
    fn material(self) -> MaterialKey {
        match self {
            Surface::Dirt => MaterialKey::Dirt,
            Surface::Sand => MaterialKey::Sand,
            Surface::Stone => MaterialKey::Stone,
        }
    }
}

/// What a generation pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainSummary {
    pub material_counts: BTreeMap<MaterialKey, usize>,
    pub trees: usize,
    pub plateau_height: i32,
    /// Prefab voxels dropped because their cell was already occupied.
    pub skipped: usize,
}

impl TerrainSummary {
    pub fn total_voxels(&self) -> usize {
        self.material_counts.values().sum()
    }
}

/// Deterministic heightmap terrain with water, trees and a central house.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    height: NoiseField,
    kind: NoiseField,
    seed: u64,
    half_extent: i32,
    water_level: i32,
    plateau_height: f64,
}

impl TerrainGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        let height = NoiseField::new(config.seed);
        let kind = NoiseField::new(config.seed ^ TYPE_SEED_SALT);
        let mut gen = Self {
            height,
            kind,
            seed: config.seed,
            half_extent: config.terrain_half_extent(),
            water_level: config.water_level,
            plateau_height: 0.0,
        };
        gen.plateau_height = gen.compute_plateau_height();
        gen
    }

    /// Grid Y of the plateau's top layer.
    pub fn plateau_height(&self) -> i32 {
        self.plateau_height.floor() as i32
    }

    pub fn in_plateau(x: i32, z: i32) -> bool {
        x.abs() <= PLATEAU_HALF && z.abs() <= PLATEAU_HALF
    }

    /// Unclamped noise height of a column.
    fn raw_height(&self, x: i32, z: i32) -> f64 {
        let n = self.height.sample(
            x as f64 / SMOOTHNESS + HEIGHT_SAMPLE_SHIFT,
            z as f64 / SMOOTHNESS + HEIGHT_SAMPLE_SHIFT,
        );
        (n + HEIGHT_OFFSET) * HEIGHT_SCALE
    }

    /// Lowest raw height over the plateau footprint, never below water.
    fn compute_plateau_height(&self) -> f64 {
        let mut min = f64::INFINITY;
        for x in -PLATEAU_HALF..PLATEAU_HALF {
            for z in -PLATEAU_HALF..PLATEAU_HALF {
                min = min.min(self.raw_height(x, z));
            }
        }
        min.max(self.water_level as f64)
    }

    /// Grid Y of the top solid cell of a column.
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        if Self::in_plateau(x, z) {
            return self.plateau_height();
        }
        self.raw_height(x, z).clamp(0.0, MAX_HEIGHT).floor() as i32
    }

    pub fn surface(&self, x: i32, z: i32) -> Surface {
        if Self::in_plateau(x, z) {
            return Surface::Stone;
        }
        let t = self
            .kind
            .sample(x as f64 / SMOOTHNESS, z as f64 / SMOOTHNESS);
        if t > SAND_THRESHOLD {
            Surface::Sand
        } else if t < STONE_THRESHOLD {
            Surface::Stone
        } else {
            Surface::Dirt
        }
    }

    /// Material of cell `y` in a column of height `h`.
    fn layer_material(surface: Surface, y: i32, h: i32) -> MaterialKey {
        if surface == Surface::Dirt && y == h {
            MaterialKey::Grass
        } else if y > BEDROCK_TOP {
            surface.material()
        } else {
            MaterialKey::Stone
        }
    }

    /// Whether the column is eligible and wins the tree roll.
    fn rolls_tree(&self, x: i32, z: i32, surface: Surface, h: i32) -> bool {
        if surface != Surface::Dirt || h <= TREE_MIN_HEIGHT || Self::in_plateau(x, z) {
            return false;
        }
        hash_to_unit(column_hash(x, z, self.seed ^ TREE_SEED_SALT)) < TREE_CHANCE
    }

    /// Tree base cells in generation order, spaced apart.
    pub fn tree_sites(&self) -> Vec<GridCoord> {
        let mut sites: Vec<GridCoord> = Vec::new();
        for x in -self.half_extent..self.half_extent {
            for z in -self.half_extent..self.half_extent {
                let h = self.column_height(x, z);
                if !self.rolls_tree(x, z, self.surface(x, z), h) {
                    continue;
                }
                let crowded = sites.iter().any(|s| {
                    (x - s.x).abs() < TREE_SPACING && (z - s.z).abs() < TREE_SPACING
                });
                if !crowded {
                    sites.push(IVec3::new(x, h + 1, z));
                }
            }
        }
        sites
    }

    /// Build a fresh terrain grid.
    pub fn generate(&self, config: &WorldConfig) -> (VoxelGrid, TerrainSummary) {
        let mut grid = VoxelGrid::new(config.terrain_transform(), SupportMarkers::Disabled);
        let summary = self.generate_into(&mut grid);
        (grid, summary)
    }

    /// Fill `grid` with columns, water, trees and the house.
    pub fn generate_into(&self, grid: &mut VoxelGrid) -> TerrainSummary {
        let mut prefabs = StampReport::default();

        for x in -self.half_extent..self.half_extent {
            for z in -self.half_extent..self.half_extent {
                let h = self.column_height(x, z);
                let surface = self.surface(x, z);
                for y in 0..=h {
                    let material = Self::layer_material(surface, y, h);
                    if grid.place(IVec3::new(x, y, z), material).is_err() {
                        prefabs.skipped += 1;
                    }
                }
                for y in (h + 1)..=self.water_level {
                    if grid.place(IVec3::new(x, y, z), MaterialKey::Water).is_err() {
                        prefabs.skipped += 1;
                    }
                }
            }
        }

        let sites = self.tree_sites();
        for site in &sites {
            let pick = column_hash(site.z, site.x, self.seed) as usize % ALL_TREES.len();
            prefabs += prefab::stamp(grid, &ALL_TREES[pick].voxels(), *site);
        }

        let house_origin = IVec3::new(0, self.plateau_height() + 1, 0);
        prefabs += prefab::stamp(grid, &prefab::house(), house_origin);

        let summary = TerrainSummary {
            material_counts: grid.material_counts(),
            trees: sites.len(),
            plateau_height: self.plateau_height(),
            skipped: prefabs.skipped,
        };
        log::info!(
            "generated terrain: {} voxels, {} trees, plateau at y={}",
            summary.total_voxels(),
            summary.trees,
            summary.plateau_height
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelsand_core::CollisionClass;

    fn small_config(seed: u64) -> WorldConfig {
        WorldConfig {
            exec_axis_voxel_count: 40,
            seed,
            ..WorldConfig::default()
        }
    }

    #[test]
    fn test_generation_deterministic() {
        let config = small_config(42);
        let (a, sa) = TerrainGenerator::new(&config).generate(&config);
        let (b, sb) = TerrainGenerator::new(&config).generate(&config);
        assert_eq!(sa, sb);
        let mut va: Vec<_> = a.voxels().map(|v| (v.coord.to_array(), v.material)).collect();
        let mut vb: Vec<_> = b.voxels().map(|v| (v.coord.to_array(), v.material)).collect();
        va.sort();
        vb.sort();
        assert_eq!(va, vb);
    }

    #[test]
    fn test_plateau_is_flat_stone_above_water() {
        let config = small_config(7);
        let gen = TerrainGenerator::new(&config);
        let h = gen.plateau_height();
        assert!(h >= config.water_level);
        for x in -PLATEAU_HALF..=PLATEAU_HALF {
            for z in -PLATEAU_HALF..=PLATEAU_HALF {
                assert_eq!(gen.column_height(x, z), h);
                assert_eq!(gen.surface(x, z), Surface::Stone);
            }
        }
    }

    #[test]
    fn test_plateau_top_is_stone_for_any_seed() {
        for seed in 0..16 {
            let config = small_config(seed);
            let gen = TerrainGenerator::new(&config);
            let (grid, summary) = gen.generate(&config);
            let h = summary.plateau_height;
            for x in -PLATEAU_HALF..=PLATEAU_HALF {
                for z in -PLATEAU_HALF..=PLATEAU_HALF {
                    assert_eq!(gen.surface(x, z), Surface::Stone, "seed {seed} ({x}, {z})");
                    let top = grid.get(IVec3::new(x, h, z)).map(|v| v.material);
                    assert_eq!(top, Some(MaterialKey::Stone), "seed {seed} ({x}, {z})");
                }
            }
        }
    }

    #[test]
    fn test_columns_follow_layer_rules() {
        let config = small_config(3);
        let gen = TerrainGenerator::new(&config);
        let (grid, _) = gen.generate(&config);
        for x in -20..20 {
            for z in -20..20 {
                let h = gen.column_height(x, z);
                assert!((0..=20).contains(&h));
                for y in 0..=h.min(BEDROCK_TOP) {
                    let m = grid.get(IVec3::new(x, y, z)).map(|v| v.material);
                    if gen.surface(x, z) == Surface::Dirt && y == h {
                        assert_eq!(m, Some(MaterialKey::Grass));
                    } else {
                        assert_eq!(m, Some(MaterialKey::Stone));
                    }
                }
                for y in (h + 1)..=config.water_level {
                    assert_eq!(
                        grid.get(IVec3::new(x, y, z)).map(|v| v.material),
                        Some(MaterialKey::Water)
                    );
                }
            }
        }
    }

    #[test]
    fn test_water_is_liquid_and_markers_disabled() {
        let config = small_config(11);
        let (grid, summary) = TerrainGenerator::new(&config).generate(&config);
        let water = summary
            .material_counts
            .get(&MaterialKey::Water)
            .copied()
            .unwrap_or(0);
        assert_eq!(grid.collision().len(CollisionClass::Liquid), water);
        assert_eq!(
            grid.collision().len(CollisionClass::Solid),
            grid.len() - water
        );
        assert_eq!(grid.marker_count(), 0);
    }

    #[test]
    fn test_house_on_plateau() {
        let config = small_config(5);
        let gen = TerrainGenerator::new(&config);
        let (grid, summary) = gen.generate(&config);
        let roof = IVec3::new(0, gen.plateau_height() + 1 + 4, 0);
        assert_eq!(grid.get(roof).map(|v| v.material), Some(MaterialKey::Plank));
        assert_eq!(summary.plateau_height, gen.plateau_height());
        assert!(summary.total_voxels() == grid.len());
    }

    #[test]
    fn test_tree_sites_spaced_and_eligible() {
        let config = WorldConfig {
            exec_axis_voxel_count: 120,
            ..WorldConfig::default()
        };
        let gen = TerrainGenerator::new(&config);
        let sites = gen.tree_sites();
        for (i, a) in sites.iter().enumerate() {
            assert!(!TerrainGenerator::in_plateau(a.x, a.z));
            assert_eq!(gen.surface(a.x, a.z), Surface::Dirt);
            assert_eq!(a.y, gen.column_height(a.x, a.z) + 1);
            assert!(a.y - 1 > TREE_MIN_HEIGHT);
            for b in &sites[i + 1..] {
                assert!(
                    (a.x - b.x).abs() >= TREE_SPACING || (a.z - b.z).abs() >= TREE_SPACING
                );
            }
        }
    }
}
