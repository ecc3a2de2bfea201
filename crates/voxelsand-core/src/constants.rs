//! Single source of truth for shared constants.
//! Runtime overrides go through `WorldConfig`; these are its defaults.

/// Edge length of one voxel cube in world units.
pub const VOXEL_SIZE: f32 = 5.0;

/// Cells per horizontal axis of the builder area.
pub const BUILDER_AXIS_VOXEL_COUNT: u32 = 10;

/// Cells per horizontal axis of the explorable terrain.
pub const EXEC_AXIS_VOXEL_COUNT: u32 = 200;

/// Highest grid Y filled with water where the terrain dips below it.
pub const WATER_LEVEL: i32 = 4;

/// Neighborhood radius (in cells) scanned by collision queries.
pub const COLLISION_QUERY_RADIUS: i32 = 5;

/// Vertical lift applied to movement probes so standing on a surface
/// does not register as a collision.
pub const PROBE_BANDWIDTH: f32 = 0.1;

/// Character footprint in voxels: one wide, two tall, one deep.
pub const CHARACTER_SIZE_VOXELS: [f32; 3] = [1.0, 2.0, 1.0];

/// Horizontal speed in voxels per second.
pub const MOVE_SPEED_VOXELS: f32 = 4.0;

/// Gravity in voxels per second squared (negative = down).
pub const GRAVITY_VOXELS: f32 = -10.0;

/// Gravity is divided by this while the next step is submerged.
pub const LIQUID_GRAVITY_DIVISOR: f32 = 3.0;

/// Initial upward velocity of a jump, in voxels per second.
pub const JUMP_VELOCITY_VOXELS: f32 = 6.0;

/// Default terrain seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default file name offered when exporting a builder model.
pub const EXPORT_FILENAME: &str = "tree.json";
