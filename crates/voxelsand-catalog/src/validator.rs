use std::collections::HashSet;

use thiserror::Error;
use voxelsand_core::material::{MaterialAppearance, MaterialKey, ALL_MATERIALS, FACE_COUNT};

use crate::loader::{CatalogEntry, LookDef};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Duplicate catalog entry for {0}")]
    DuplicateKey(MaterialKey),
    #[error("No catalog entry for {0}")]
    MissingKey(MaterialKey),
    #[error("Material {key} lists {found} faces, expected 6")]
    FaceCount { key: MaterialKey, found: usize },
    #[error("Material {key} face {face} opacity {value} is outside [0, 1]")]
    OpacityOutOfRange {
        key: MaterialKey,
        face: usize,
        value: f32,
    },
    #[error("Material {key} face {face} alpha_test {value} is outside [0, 1]")]
    AlphaTestOutOfRange {
        key: MaterialKey,
        face: usize,
        value: f32,
    },
}

/// Validate parsed catalog entries: every key exactly once, per-face
/// looks with six faces, opacity and alpha test within [0, 1].
pub fn validate_entries(entries: &[CatalogEntry]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.key) {
            errors.push(ValidationError::DuplicateKey(entry.key));
        }
    }
    for key in ALL_MATERIALS {
        if !seen.contains(&key) {
            errors.push(ValidationError::MissingKey(key));
        }
    }

    for entry in entries {
        let faces: &[MaterialAppearance] = match &entry.look {
            LookDef::Uniform(a) => std::slice::from_ref(a),
            LookDef::PerFace(faces) => {
                if faces.len() != FACE_COUNT {
                    errors.push(ValidationError::FaceCount {
                        key: entry.key,
                        found: faces.len(),
                    });
                }
                faces
            }
        };
        for (face, a) in faces.iter().enumerate() {
            if !(0.0..=1.0).contains(&a.opacity) {
                errors.push(ValidationError::OpacityOutOfRange {
                    key: entry.key,
                    face,
                    value: a.opacity,
                });
            }
            if !(0.0..=1.0).contains(&a.alpha_test) {
                errors.push(ValidationError::AlphaTestOutOfRange {
                    key: entry.key,
                    face,
                    value: a.alpha_test,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
