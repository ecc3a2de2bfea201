pub mod catalog;
pub mod defaults;
pub mod loader;
pub mod validator;

pub use catalog::{MaterialCatalog, CURSOR_OPACITY};
pub use defaults::{default_catalog, DEFAULT_CATALOG_RON};
pub use loader::CatalogError;
pub use validator::ValidationError;
