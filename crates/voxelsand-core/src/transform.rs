use glam::{IVec3, Vec3};

use crate::aabb::Aabb;
use crate::constants::VOXEL_SIZE;
use crate::types::GridCoord;

/// Relative snap tolerance of `to_grid`, in cells.
const GRID_SNAP_EPSILON: f32 = 1e-5;
/// Upper bound of the snap tolerance, in cells.
const GRID_SNAP_MAX: f32 = 1e-2;

/// Whether an axis puts grid indices on cell midpoints.
///
/// `Centered` is used for axes split into an even number of cells, so that
/// cell `n` spans `[n*S, (n+1)*S]` and its position is the midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisParity {
    Centered,
    Aligned,
}

impl AxisParity {
    fn offset(self, voxel_size: f32) -> f32 {
        match self {
            AxisParity::Centered => voxel_size / 2.0,
            AxisParity::Aligned => 0.0,
        }
    }
}

/// Parity of each axis within one coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridLayout {
    pub x: AxisParity,
    pub y: AxisParity,
    pub z: AxisParity,
}

impl GridLayout {
    /// Builder area: every axis centered.
    pub const fn builder() -> Self {
        Self {
            x: AxisParity::Centered,
            y: AxisParity::Centered,
            z: AxisParity::Centered,
        }
    }

    /// Explorable terrain: X/Z aligned to the origin, Y centered.
    pub const fn terrain() -> Self {
        Self {
            x: AxisParity::Aligned,
            y: AxisParity::Centered,
            z: AxisParity::Aligned,
        }
    }
}

/// Bidirectional mapping between grid cells and world positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    voxel_size: f32,
    layout: GridLayout,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::new(VOXEL_SIZE, GridLayout::builder())
    }
}

impl CoordinateTransform {
    /// `voxel_size` must be positive; `WorldConfig::validate` enforces this
    /// for configured values.
    pub fn new(voxel_size: f32, layout: GridLayout) -> Self {
        debug_assert!(voxel_size > 0.0, "voxel size must be positive");
        Self { voxel_size, layout }
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// `grid * S + (centered ? S/2 : 0)`.
    pub fn to_world(&self, grid: i32, parity: AxisParity) -> f32 {
        grid as f32 * self.voxel_size + parity.offset(self.voxel_size)
    }

    /// Floor-division inverse of `to_world`; exact for integer inputs.
    ///
    /// Quotients within a relative `GRID_SNAP_EPSILON` of an integer snap
    /// to it, so float rounding on non-dyadic sizes never drops a cell
    /// boundary into the cell below.
    pub fn to_grid(&self, world: f32, parity: AxisParity) -> i32 {
        let q = (world - parity.offset(self.voxel_size)) / self.voxel_size;
        let nearest = q.round();
        let tolerance = (GRID_SNAP_EPSILON * nearest.abs().max(1.0)).min(GRID_SNAP_MAX);
        if (q - nearest).abs() < tolerance {
            nearest as i32
        } else {
            q.floor() as i32
        }
    }

    /// World position of a cell, using this transform's layout.
    pub fn grid_to_world(&self, coord: GridCoord) -> Vec3 {
        Vec3::new(
            self.to_world(coord.x, self.layout.x),
            self.to_world(coord.y, self.layout.y),
            self.to_world(coord.z, self.layout.z),
        )
    }

    /// Cell containing a world position, using this transform's layout.
    pub fn world_to_grid(&self, world: Vec3) -> GridCoord {
        IVec3::new(
            self.to_grid(world.x, self.layout.x),
            self.to_grid(world.y, self.layout.y),
            self.to_grid(world.z, self.layout.z),
        )
    }

    /// The voxel cube of a cell, centered on `grid_to_world`.
    pub fn cell_box(&self, coord: GridCoord) -> Aabb {
        Aabb::from_center_size(self.grid_to_world(coord), Vec3::splat(self.voxel_size))
    }

    /// Horizontal movement limits for a square play area of
    /// `2 * half_extent` cells: `(-to_world(half), to_world(half - 1))`
    /// on the X axis parity.
    pub fn play_area_bounds(&self, half_extent: i32) -> (f32, f32) {
        (
            -self.to_world(half_extent, self.layout.x),
            self.to_world(half_extent - 1, self.layout.x),
        )
    }
}
