use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::transform::{CoordinateTransform, GridLayout};

/// Runtime-tunable world parameters. Every field falls back to the
/// matching constant when omitted from the RON source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of one voxel in world units.
    pub voxel_size: f32,
    /// Cells per horizontal axis of the builder area.
    pub builder_axis_voxel_count: u32,
    /// Cells per horizontal axis of the generated terrain.
    pub exec_axis_voxel_count: u32,
    /// Highest grid Y that water fills to.
    pub water_level: i32,
    /// Neighborhood radius for collision queries, in cells.
    pub collision_query_radius: i32,
    /// Terrain seed.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            voxel_size: VOXEL_SIZE,
            builder_axis_voxel_count: BUILDER_AXIS_VOXEL_COUNT,
            exec_axis_voxel_count: EXEC_AXIS_VOXEL_COUNT,
            water_level: WATER_LEVEL,
            collision_query_radius: COLLISION_QUERY_RADIUS,
            seed: DEFAULT_SEED,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a config from RON.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = ron::Options::default()
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.voxel_size.is_finite() && self.voxel_size > 0.0) {
            return Err(ConfigError::InvalidVoxelSize(self.voxel_size));
        }
        if self.builder_axis_voxel_count == 0 {
            return Err(ConfigError::InvalidAxisCount {
                name: "builder_axis_voxel_count",
                value: self.builder_axis_voxel_count,
            });
        }
        if self.exec_axis_voxel_count == 0 {
            return Err(ConfigError::InvalidAxisCount {
                name: "exec_axis_voxel_count",
                value: self.exec_axis_voxel_count,
            });
        }
        if self.collision_query_radius < 1 {
            return Err(ConfigError::InvalidQueryRadius(self.collision_query_radius));
        }
        Ok(())
    }

    /// Transform for the builder area.
    pub fn builder_transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.voxel_size, GridLayout::builder())
    }

    /// Transform for the explorable terrain.
    pub fn terrain_transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.voxel_size, GridLayout::terrain())
    }

    /// Half of the terrain extent in cells.
    pub fn terrain_half_extent(&self) -> i32 {
        (self.exec_axis_voxel_count / 2) as i32
    }

    /// Half of the builder extent in cells.
    pub fn builder_half_extent(&self) -> i32 {
        (self.builder_axis_voxel_count / 2) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = WorldConfig::default();
        assert_eq!(config.voxel_size, VOXEL_SIZE);
        assert_eq!(config.exec_axis_voxel_count, EXEC_AXIS_VOXEL_COUNT);
        assert!(config.validate().is_ok());
        assert_eq!(config.terrain_half_extent(), 100);
        assert_eq!(config.builder_half_extent(), 5);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = WorldConfig::from_ron_str("(seed: 7, exec_axis_voxel_count: 35)")
            .expect("valid config");
        assert_eq!(config.seed, 7);
        assert_eq!(config.exec_axis_voxel_count, 35);
        assert_eq!(config.water_level, WATER_LEVEL);
        assert_eq!(config.terrain_half_extent(), 17);
    }

    #[test]
    fn test_invalid_voxel_size_rejected() {
        let result = WorldConfig::from_ron_str("(voxel_size: 0.0)");
        assert!(matches!(result, Err(ConfigError::InvalidVoxelSize(_))));
    }

    #[test]
    fn test_zero_extent_rejected() {
        let result = WorldConfig::from_ron_str("(builder_axis_voxel_count: 0)");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidAxisCount {
                name: "builder_axis_voxel_count",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let result = WorldConfig::from_ron_str("(seed: \"nope\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
