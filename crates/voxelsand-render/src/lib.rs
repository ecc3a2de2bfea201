pub mod batches;

pub use batches::{BatchSet, InstanceRaw, MarkerRaw};
