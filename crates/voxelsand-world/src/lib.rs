pub mod builder;
pub mod collision;
pub mod error;
pub mod grid;
pub mod movement;
pub mod noise;
pub mod prefab;
pub mod shared;
pub mod terrain;

pub use builder::{BuilderSession, CursorMove};
pub use collision::CollisionIndex;
pub use error::GridError;
pub use grid::{SupportMarkers, VoxelGrid};
pub use movement::{Character, MovementConfig};
pub use prefab::{stamp, StampReport, TreeKind};
pub use shared::SharedGrid;
pub use terrain::{TerrainGenerator, TerrainSummary};

use glam::Vec3;
use voxelsand_core::{AxisParity, WorldConfig};

/// Generated terrain plus the character walking on it.
/// Drives one movement step per frame.
pub struct ExplorableWorld {
    grid: VoxelGrid,
    summary: TerrainSummary,
    character: Character,
}

impl ExplorableWorld {
    /// Generate terrain and spawn the character west of the house.
    pub fn generate(config: &WorldConfig) -> Self {
        let terrain = TerrainGenerator::new(config);
        let (grid, summary) = terrain.generate(config);
        let movement = MovementConfig::from_world(config, config.terrain_half_extent());
        let spawn = Self::spawn_point(config, summary.plateau_height);
        Self {
            grid,
            summary,
            character: Character::new(spawn, movement),
        }
    }

    /// Ten cells west of the origin, three cells above the plateau top.
    fn spawn_point(config: &WorldConfig, plateau_height: i32) -> Vec3 {
        let t = config.terrain_transform();
        let s = config.voxel_size;
        Vec3::new(
            t.to_world(-10, AxisParity::Centered),
            t.to_world(plateau_height, AxisParity::Centered) + 3.0 * s,
            t.to_world(0, AxisParity::Centered),
        )
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn summary(&self) -> &TerrainSummary {
        &self.summary
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn jump(&mut self) -> bool {
        self.character.jump()
    }

    /// Advance one frame. `direction` is the desired horizontal heading;
    /// its length is ignored and the step length is `speed * dt`.
    pub fn update(&mut self, dt: f32, direction: Vec3) {
        let heading = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        if heading != Vec3::ZERO {
            let step = heading * self.character.config.speed * dt;
            self.character.slide_horizontal(self.grid.collision(), step);
        }
        self.character.step_vertical(self.grid.collision(), dt);
    }
}
