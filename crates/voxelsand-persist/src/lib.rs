pub mod error;
pub mod format;
pub mod load;
pub mod prefab;
pub mod save;

pub use error::PersistError;
pub use format::VoxelRecord;
pub use load::{import_voxel_list, parse_prefab, parse_voxel_list, reload_into};
pub use prefab::stamp_records;
pub use save::{export_json, export_voxel_list, to_json_string};
