use voxelsand_world::GridError;

/// Errors that can occur while reading or writing voxel lists.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("voxel list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("voxel list must be a JSON array, found {0}")]
    NotAList(&'static str),

    #[error("record {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("nothing to export: the grid is empty")]
    EmptyExport,

    #[error(transparent)]
    Grid(#[from] GridError),
}
