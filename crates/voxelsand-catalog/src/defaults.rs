//! The catalog shipped with the crate.

use crate::catalog::MaterialCatalog;
use crate::loader::CatalogError;

pub const DEFAULT_CATALOG_RON: &str = include_str!("../../../data/materials.ron");

/// Parse the embedded catalog.
pub fn default_catalog() -> Result<MaterialCatalog, CatalogError> {
    MaterialCatalog::from_ron_str(DEFAULT_CATALOG_RON)
}
