use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed catalog of material tags. The string form is what persisted
/// voxel lists and the RON catalog use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialKey {
    #[serde(rename = "DEBUG")]
    Debug,
    #[serde(rename = "STONE")]
    Stone,
    #[serde(rename = "GRASS")]
    Grass,
    #[serde(rename = "DIRT")]
    Dirt,
    #[serde(rename = "SAND")]
    Sand,
    #[serde(rename = "TRUNK_1")]
    Trunk1,
    #[serde(rename = "TRUNK_2")]
    Trunk2,
    #[serde(rename = "TRUNK_3")]
    Trunk3,
    #[serde(rename = "LEAF_1")]
    Leaf1,
    #[serde(rename = "LEAF_2")]
    Leaf2,
    #[serde(rename = "WATER")]
    Water,
    #[serde(rename = "PLANK")]
    Plank,
    #[serde(rename = "M1")]
    M1,
    #[serde(rename = "M2")]
    M2,
    #[serde(rename = "M3")]
    M3,
    #[serde(rename = "M4")]
    M4,
    #[serde(rename = "M5")]
    M5,
    #[serde(rename = "BUILDER_FLOOR")]
    BuilderFloor,
    #[serde(rename = "EXEC_FLOOR_0")]
    ExecFloor0,
    #[serde(rename = "EXEC_FLOOR_1")]
    ExecFloor1,
    #[serde(rename = "EXEC_FLOOR_2")]
    ExecFloor2,
}

/// Every material key, in declaration order.
pub const ALL_MATERIALS: [MaterialKey; 21] = [
    MaterialKey::Debug,
    MaterialKey::Stone,
    MaterialKey::Grass,
    MaterialKey::Dirt,
    MaterialKey::Sand,
    MaterialKey::Trunk1,
    MaterialKey::Trunk2,
    MaterialKey::Trunk3,
    MaterialKey::Leaf1,
    MaterialKey::Leaf2,
    MaterialKey::Water,
    MaterialKey::Plank,
    MaterialKey::M1,
    MaterialKey::M2,
    MaterialKey::M3,
    MaterialKey::M4,
    MaterialKey::M5,
    MaterialKey::BuilderFloor,
    MaterialKey::ExecFloor0,
    MaterialKey::ExecFloor1,
    MaterialKey::ExecFloor2,
];

/// Materials the builder cursor cycles through.
pub const BUILDER_PALETTE: [MaterialKey; 5] = [
    MaterialKey::M1,
    MaterialKey::M2,
    MaterialKey::M3,
    MaterialKey::M4,
    MaterialKey::M5,
];

/// How a placed voxel takes part in collision queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionClass {
    /// Blocks all movement.
    Solid,
    /// Only dampens vertical fall.
    Liquid,
}

impl MaterialKey {
    /// Canonical string tag.
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialKey::Debug => "DEBUG",
            MaterialKey::Stone => "STONE",
            MaterialKey::Grass => "GRASS",
            MaterialKey::Dirt => "DIRT",
            MaterialKey::Sand => "SAND",
            MaterialKey::Trunk1 => "TRUNK_1",
            MaterialKey::Trunk2 => "TRUNK_2",
            MaterialKey::Trunk3 => "TRUNK_3",
            MaterialKey::Leaf1 => "LEAF_1",
            MaterialKey::Leaf2 => "LEAF_2",
            MaterialKey::Water => "WATER",
            MaterialKey::Plank => "PLANK",
            MaterialKey::M1 => "M1",
            MaterialKey::M2 => "M2",
            MaterialKey::M3 => "M3",
            MaterialKey::M4 => "M4",
            MaterialKey::M5 => "M5",
            MaterialKey::BuilderFloor => "BUILDER_FLOOR",
            MaterialKey::ExecFloor0 => "EXEC_FLOOR_0",
            MaterialKey::ExecFloor1 => "EXEC_FLOOR_1",
            MaterialKey::ExecFloor2 => "EXEC_FLOOR_2",
        }
    }

    /// Solid vs liquid is decided by the material alone.
    pub fn collision_class(self) -> CollisionClass {
        match self {
            MaterialKey::Water => CollisionClass::Liquid,
            _ => CollisionClass::Solid,
        }
    }

    /// Index into `ALL_MATERIALS`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known material tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material key '{0}'")]
pub struct UnknownMaterial(pub String);

impl FromStr for MaterialKey {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_MATERIALS
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}

/// Render-facing description of one face (or all faces) of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAppearance {
    /// RGB color (0.0–1.0 per channel), multiplied with the texture if any.
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
    /// Texture path relative to the asset root.
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default)]
    pub double_sided: bool,
    /// Fragments with alpha below this are discarded. 0.0 = disabled.
    #[serde(default)]
    pub alpha_test: f32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_color() -> (f32, f32, f32) {
    (1.0, 1.0, 1.0)
}

fn default_opacity() -> f32 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl Default for MaterialAppearance {
    fn default() -> Self {
        Self {
            color: default_color(),
            texture: None,
            opacity: default_opacity(),
            transparent: false,
            double_sided: false,
            alpha_test: 0.0,
            visible: default_visible(),
        }
    }
}

/// Face order for per-face materials: +X, -X, +Y (top), -Y (bottom), +Z, -Z.
pub const FACE_COUNT: usize = 6;

/// Index of the top face in a per-face look.
pub const FACE_TOP: usize = 2;

/// Index of the bottom face in a per-face look.
pub const FACE_BOTTOM: usize = 3;

/// Either one appearance for the whole cube or one per face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialLook {
    Uniform(MaterialAppearance),
    PerFace([MaterialAppearance; FACE_COUNT]),
}

impl MaterialLook {
    /// Appearance of a single face.
    pub fn face(&self, face: usize) -> &MaterialAppearance {
        match self {
            MaterialLook::Uniform(a) => a,
            MaterialLook::PerFace(faces) => &faces[face % FACE_COUNT],
        }
    }

    /// Iterate every distinct appearance slot (1 or 6).
    pub fn appearances(&self) -> &[MaterialAppearance] {
        match self {
            MaterialLook::Uniform(a) => std::slice::from_ref(a),
            MaterialLook::PerFace(faces) => faces,
        }
    }

    /// Apply `f` to every appearance slot, preserving the variant.
    pub fn map(&self, f: impl Fn(&MaterialAppearance) -> MaterialAppearance) -> MaterialLook {
        match self {
            MaterialLook::Uniform(a) => MaterialLook::Uniform(f(a)),
            MaterialLook::PerFace(faces) => MaterialLook::PerFace([
                f(&faces[0]),
                f(&faces[1]),
                f(&faces[2]),
                f(&faces[3]),
                f(&faces[4]),
                f(&faces[5]),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_key_string_roundtrip() {
        for key in ALL_MATERIALS {
            let parsed: MaterialKey = key.as_str().parse().expect("known key");
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_unknown_material_rejected() {
        let err = "LAVA".parse::<MaterialKey>().unwrap_err();
        assert_eq!(err, UnknownMaterial("LAVA".into()));
    }

    #[test]
    fn test_serde_uses_canonical_tags() {
        // RON writes unit variants as bare identifiers.
        assert_eq!(ron::to_string(&MaterialKey::Trunk2).expect("ser"), "TRUNK_2");
        assert_eq!(
            ron::to_string(&MaterialKey::ExecFloor1).expect("ser"),
            "EXEC_FLOOR_1"
        );
        let back: MaterialKey = ron::from_str("LEAF_1").expect("de");
        assert_eq!(back, MaterialKey::Leaf1);
    }

    #[test]
    fn test_only_water_is_liquid() {
        for key in ALL_MATERIALS {
            let expected = if key == MaterialKey::Water {
                CollisionClass::Liquid
            } else {
                CollisionClass::Solid
            };
            assert_eq!(key.collision_class(), expected, "{key}");
        }
    }

    #[test]
    fn test_index_matches_table() {
        for (i, key) in ALL_MATERIALS.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_per_face_lookup() {
        let mut faces: [MaterialAppearance; FACE_COUNT] = Default::default();
        faces[FACE_TOP].texture = Some("top.png".into());
        let look = MaterialLook::PerFace(faces);
        assert_eq!(look.face(FACE_TOP).texture.as_deref(), Some("top.png"));
        assert!(look.face(0).texture.is_none());
        assert_eq!(look.appearances().len(), 6);

        let uniform = MaterialLook::Uniform(MaterialAppearance::default());
        assert_eq!(uniform.appearances().len(), 1);
    }

    #[test]
    fn test_map_preserves_variant() {
        let look = MaterialLook::PerFace(Default::default());
        let faded = look.map(|a| MaterialAppearance {
            opacity: 0.5,
            ..a.clone()
        });
        assert!(matches!(faded, MaterialLook::PerFace(_)));
        assert!(faded.appearances().iter().all(|a| a.opacity == 0.5));
    }
}
