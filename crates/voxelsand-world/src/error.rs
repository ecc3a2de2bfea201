use thiserror::Error;
use voxelsand_core::{GridCoord, MaterialKey};

/// Errors raised by grid mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// `place` at an occupied cell. The existing voxel is left untouched.
    #[error("cell {coord} already holds a {existing} voxel")]
    DuplicateVoxel {
        coord: GridCoord,
        existing: MaterialKey,
    },
}
