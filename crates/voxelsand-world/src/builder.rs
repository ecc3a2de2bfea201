use glam::{IVec3, Vec3};
use voxelsand_core::material::BUILDER_PALETTE;
use voxelsand_core::{GridCoord, MaterialKey, WorldConfig};

use crate::grid::{SupportMarkers, VoxelGrid};

/// One discrete cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// -X
    Left,
    /// +X
    Right,
    /// -Z
    Forward,
    /// +Z
    Back,
    Up,
    Down,
}

impl CursorMove {
    fn delta(self) -> IVec3 {
        match self {
            CursorMove::Left => IVec3::NEG_X,
            CursorMove::Right => IVec3::X,
            CursorMove::Forward => IVec3::NEG_Z,
            CursorMove::Back => IVec3::Z,
            CursorMove::Up => IVec3::Y,
            CursorMove::Down => IVec3::NEG_Y,
        }
    }
}

/// Interactive builder: a cursor confined to the build area, a palette of
/// builder materials, and the grid being edited.
#[derive(Debug, Clone)]
pub struct BuilderSession {
    grid: VoxelGrid,
    cursor: GridCoord,
    palette_index: usize,
    half_extent: i32,
}

impl BuilderSession {
    pub fn new(config: &WorldConfig) -> Self {
        let half_extent = config.builder_half_extent();
        Self {
            grid: VoxelGrid::new(config.builder_transform(), SupportMarkers::Tracked),
            cursor: IVec3::new(-half_extent, 0, 0),
            palette_index: 0,
            half_extent,
        }
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    pub fn cursor(&self) -> GridCoord {
        self.cursor
    }

    /// Cursor cell center in world space.
    pub fn cursor_world(&self) -> Vec3 {
        self.grid.transform().grid_to_world(self.cursor)
    }

    /// Inclusive X/Z range of the build area.
    pub fn horizontal_range(&self) -> (i32, i32) {
        (-self.half_extent, self.half_extent - 1)
    }

    /// Step the cursor. Moves that would leave the build area or go below
    /// the ground are ignored. Returns whether the cursor moved.
    pub fn move_cursor(&mut self, step: CursorMove) -> bool {
        let next = self.cursor + step.delta();
        let (min, max) = self.horizontal_range();
        if next.x < min || next.x > max || next.z < min || next.z > max || next.y < 0 {
            return false;
        }
        self.cursor = next;
        true
    }

    /// Drop the cursor back to ground level, keeping X/Z.
    pub fn reset_cursor(&mut self) {
        self.cursor.y = 0;
    }

    pub fn material(&self) -> MaterialKey {
        BUILDER_PALETTE[self.palette_index]
    }

    pub fn next_material(&mut self) -> MaterialKey {
        self.palette_index = (self.palette_index + 1) % BUILDER_PALETTE.len();
        self.material()
    }

    pub fn previous_material(&mut self) -> MaterialKey {
        self.palette_index = self
            .palette_index
            .checked_sub(1)
            .unwrap_or(BUILDER_PALETTE.len() - 1);
        self.material()
    }

    /// Place the active material under the cursor if the cell is empty.
    pub fn place_at_cursor(&mut self) -> bool {
        if self.grid.exists(self.cursor) {
            return false;
        }
        self.grid.place(self.cursor, self.material()).is_ok()
    }

    pub fn remove_at_cursor(&mut self) -> Option<MaterialKey> {
        self.grid.remove(self.cursor)
    }
}
