use thiserror::Error;

/// Errors raised while loading or validating a `WorldConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse world config RON: {0}")]
    Parse(String),

    #[error("voxel_size must be positive and finite (got {0})")]
    InvalidVoxelSize(f32),

    #[error("{name} must be a positive cell count (got {value})")]
    InvalidAxisCount { name: &'static str, value: u32 },

    #[error("collision_query_radius must be at least 1 (got {0})")]
    InvalidQueryRadius(i32),
}
