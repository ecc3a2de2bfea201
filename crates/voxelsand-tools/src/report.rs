use std::collections::BTreeMap;

use voxelsand_world::{TerrainSummary, VoxelGrid};

/// Summary of a grid, printable as a table or JSON.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GridReport {
    pub voxels: usize,
    pub markers: usize,
    /// Voxel count per material tag.
    pub materials: BTreeMap<String, usize>,
    /// Inclusive grid-space bounds, absent for an empty grid.
    pub bounds: Option<([i32; 3], [i32; 3])>,
}

impl GridReport {
    pub fn from_grid(grid: &VoxelGrid) -> Self {
        let mut bounds: Option<(glam::IVec3, glam::IVec3)> = None;
        for voxel in grid.voxels() {
            let c = voxel.coord;
            bounds = Some(match bounds {
                None => (c, c),
                Some((lo, hi)) => (lo.min(c), hi.max(c)),
            });
        }
        Self {
            voxels: grid.len(),
            markers: grid.marker_count(),
            materials: material_table(grid.material_counts().into_iter()),
            bounds: bounds.map(|(lo, hi)| (lo.to_array(), hi.to_array())),
        }
    }
}

/// Terrain generation summary, printable as a table or JSON.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TerrainReport {
    pub seed: u64,
    pub voxels: usize,
    pub trees: usize,
    pub plateau_height: i32,
    pub skipped: usize,
    pub materials: BTreeMap<String, usize>,
}

impl TerrainReport {
    pub fn new(seed: u64, summary: &TerrainSummary) -> Self {
        Self {
            seed,
            voxels: summary.total_voxels(),
            trees: summary.trees,
            plateau_height: summary.plateau_height,
            skipped: summary.skipped,
            materials: material_table(summary.material_counts.clone().into_iter()),
        }
    }
}

fn material_table(
    counts: impl Iterator<Item = (voxelsand_core::MaterialKey, usize)>,
) -> BTreeMap<String, usize> {
    counts.map(|(k, n)| (k.as_str().to_string(), n)).collect()
}

/// Format per-material counts as a markdown table.
pub fn format_materials(materials: &BTreeMap<String, usize>) -> String {
    let mut out = String::new();
    out.push_str("| Material | Voxels |\n");
    out.push_str("|----------|--------|\n");
    for (name, count) in materials {
        out.push_str(&format!("| {} | {} |\n", name, count));
    }
    out
}

pub fn format_grid(report: &GridReport) -> String {
    let mut out = format!(
        "{} voxels, {} support markers\n",
        report.voxels, report.markers
    );
    if let Some((lo, hi)) = report.bounds {
        out.push_str(&format!(
            "bounds: ({}, {}, {}) .. ({}, {}, {})\n",
            lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]
        ));
    }
    out.push('\n');
    out.push_str(&format_materials(&report.materials));
    out
}

pub fn format_terrain(report: &TerrainReport) -> String {
    let mut out = format!(
        "seed {}: {} voxels, {} trees, plateau at y={}",
        report.seed, report.voxels, report.trees, report.plateau_height
    );
    if report.skipped > 0 {
        out.push_str(&format!(", {} overlapping prefab voxels skipped", report.skipped));
    }
    out.push_str("\n\n");
    out.push_str(&format_materials(&report.materials));
    out
}
