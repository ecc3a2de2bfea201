use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::grid::VoxelGrid;

/// A grid shared across threads: any number of readers, one writer.
///
/// The marker scans in `place`/`remove` read and write the same columns, so
/// every mutation must go through the write guard.
#[derive(Debug, Clone)]
pub struct SharedGrid {
    inner: Arc<RwLock<VoxelGrid>>,
}

impl SharedGrid {
    pub fn new(grid: VoxelGrid) -> Self {
        Self {
            inner: Arc::new(RwLock::new(grid)),
        }
    }

    /// Read access. A writer that panicked cannot leave the grid half
    /// updated (every mutation completes before returning), so a poisoned
    /// lock is recovered.
    pub fn read(&self) -> RwLockReadGuard<'_, VoxelGrid> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, VoxelGrid> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` under the write lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut VoxelGrid) -> R) -> R {
        f(&mut self.write())
    }
}
