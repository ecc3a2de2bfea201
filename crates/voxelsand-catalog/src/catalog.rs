use std::collections::BTreeMap;

use voxelsand_core::material::{MaterialAppearance, MaterialKey, MaterialLook};

use crate::loader::{load_entries_from_str, CatalogError, LookDef};
use crate::validator::validate_entries;

/// Opacity of the builder cursor preview.
pub const CURSOR_OPACITY: f32 = 0.5;

/// Validated mapping from every material key to its look.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCatalog {
    looks: BTreeMap<MaterialKey, MaterialLook>,
}

impl MaterialCatalog {
    /// Parse and validate a catalog. Every key must be present exactly once.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, CatalogError> {
        let entries = load_entries_from_str(ron_str)?;
        validate_entries(&entries).map_err(CatalogError::Invalid)?;

        let mut looks = BTreeMap::new();
        for entry in entries {
            let look = match entry.look {
                LookDef::Uniform(a) => MaterialLook::Uniform(a),
                LookDef::PerFace(faces) => {
                    let found = faces.len();
                    let faces = faces.try_into().map_err(|_| {
                        CatalogError::Invalid(vec![crate::ValidationError::FaceCount {
                            key: entry.key,
                            found,
                        }])
                    })?;
                    MaterialLook::PerFace(faces)
                }
            };
            looks.insert(entry.key, look);
        }
        log::debug!("loaded material catalog with {} entries", looks.len());
        Ok(Self { looks })
    }

    pub fn get(&self, key: MaterialKey) -> Option<&MaterialLook> {
        self.looks.get(&key)
    }

    pub fn len(&self) -> usize {
        self.looks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.looks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialKey, &MaterialLook)> {
        self.looks.iter().map(|(k, v)| (*k, v))
    }

    /// Half-transparent preview of `key` for the builder cursor. Per-face
    /// looks stay per-face.
    pub fn cursor_look(&self, key: MaterialKey) -> Option<MaterialLook> {
        self.get(key).map(|look| look.map(cursor_appearance))
    }
}

fn cursor_appearance(a: &MaterialAppearance) -> MaterialAppearance {
    MaterialAppearance {
        opacity: CURSOR_OPACITY,
        transparent: true,
        ..a.clone()
    }
}
