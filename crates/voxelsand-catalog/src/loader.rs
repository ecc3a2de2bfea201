use serde::Deserialize;
use thiserror::Error;
use voxelsand_core::material::{MaterialAppearance, MaterialKey};

use crate::validator::ValidationError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse material catalog RON: {0}")]
    Parse(String),
    #[error("Material catalog failed validation ({} errors): {}", .0.len(), summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Look as written in the catalog file. Per-face lists are checked for
/// length before becoming a fixed array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum LookDef {
    Uniform(MaterialAppearance),
    PerFace(Vec<MaterialAppearance>),
}

/// One catalog entry as written in the catalog file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub key: MaterialKey,
    pub look: LookDef,
}

/// Parse catalog entries without validating them.
pub fn load_entries_from_str(ron_str: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| CatalogError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uniform_and_per_face() {
        let entries = load_entries_from_str(
            r#"[
                (key: M1, look: Uniform((color: (0.5, 0.25, 1.0)))),
                (key: WATER, look: PerFace([(visible: false), (opacity: 0.6)])),
            ]"#,
        )
        .expect("parse");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, MaterialKey::M1);
        match &entries[0].look {
            LookDef::Uniform(a) => {
                assert_eq!(a.color, (0.5, 0.25, 1.0));
                assert_eq!(a.opacity, 1.0);
                assert!(a.visible);
            }
            other => panic!("expected uniform look, got {other:?}"),
        }
        match &entries[1].look {
            LookDef::PerFace(faces) => {
                assert_eq!(faces.len(), 2);
                assert!(!faces[0].visible);
                assert_eq!(faces[1].opacity, 0.6);
            }
            other => panic!("expected per-face look, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let result = load_entries_from_str(r#"[(key: LAVA, look: Uniform(()))]"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(
            load_entries_from_str("[(key: STONE"),
            Err(CatalogError::Parse(_))
        ));
    }
}
