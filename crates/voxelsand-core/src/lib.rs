pub mod aabb;
pub mod config;
pub mod constants;
pub mod error;
pub mod material;
pub mod transform;
pub mod types;

pub use aabb::Aabb;
pub use config::WorldConfig;
pub use material::{CollisionClass, MaterialKey};
pub use transform::{AxisParity, CoordinateTransform, GridLayout};
pub use types::{GridCoord, Voxel};
