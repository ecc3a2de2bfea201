use wasm_bindgen::prelude::*;

use voxelsand_catalog::{default_catalog, MaterialCatalog};
use voxelsand_core::constants::EXPORT_FILENAME;
use voxelsand_core::{MaterialKey, WorldConfig};
use voxelsand_persist::{export_json, reload_into};
use voxelsand_render::BatchSet;
use voxelsand_world::BuilderSession;

use crate::input::{action_for_key, BuilderAction};

/// Builder page state exposed to JavaScript: the cursor session, the
/// material catalog for cursor previews and the draw batches.
#[wasm_bindgen]
pub struct WebBuilder {
    session: BuilderSession,
    catalog: MaterialCatalog,
    batches: BatchSet,
}

#[wasm_bindgen]
impl WebBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebBuilder, JsValue> {
        let catalog = default_catalog().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            session: BuilderSession::new(&WorldConfig::default()),
            catalog,
            batches: BatchSet::new(),
        })
    }

    /// Apply the action bound to `key`. Returns whether anything changed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match action_for_key(key) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Cursor cell as `[x, y, z]`.
    pub fn cursor(&self) -> Vec<i32> {
        self.session.cursor().to_array().to_vec()
    }

    /// Cursor center in world space as `[x, y, z]`.
    pub fn cursor_world(&self) -> Vec<f32> {
        self.session.cursor_world().to_array().to_vec()
    }

    /// Active palette material tag.
    pub fn material(&self) -> String {
        self.session.material().as_str().to_string()
    }

    /// Cursor preview of one face as `[r, g, b, opacity]`.
    pub fn cursor_face(&self, face: usize) -> Vec<f32> {
        match self.catalog.cursor_look(self.session.material()) {
            Some(look) => {
                let a = look.face(face);
                vec![a.color.0, a.color.1, a.color.2, a.opacity]
            }
            None => Vec::new(),
        }
    }

    /// Texture of one face of a material, if it has one.
    pub fn face_texture(&self, material: &str, face: usize) -> Option<String> {
        let key: MaterialKey = material.parse().ok()?;
        self.catalog.get(key)?.face(face).texture.clone()
    }

    pub fn voxel_count(&self) -> usize {
        self.session.grid().len()
    }

    /// Rebuild draw batches if the grid changed.
    pub fn refresh_batches(&mut self) -> bool {
        self.batches.rebuild_if_changed(self.session.grid())
    }

    /// Instance bytes for one material tag. Empty for unknown tags.
    pub fn instance_bytes(&self, material: &str) -> Vec<u8> {
        material
            .parse::<MaterialKey>()
            .map(|key| self.batches.instance_bytes(key).to_vec())
            .unwrap_or_default()
    }

    pub fn marker_bytes(&self) -> Vec<u8> {
        self.batches.marker_bytes().to_vec()
    }

    /// Current model as a voxel-list document.
    pub fn export_json(&self) -> Result<String, JsValue> {
        export_json(self.session.grid()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export and offer the model for download. An empty model is refused
    /// with a message to the user.
    pub fn download(&self) -> Result<(), JsValue> {
        match export_json(self.session.grid()) {
            Ok(json) => crate::download::download_text(&json, EXPORT_FILENAME),
            Err(e) => {
                crate::show_error_to_user(&e.to_string());
                Ok(())
            }
        }
    }

    /// Replace the model with an uploaded voxel list. A malformed file
    /// leaves the current model untouched and is reported to the user.
    pub fn import_json(&mut self, text: &str) -> Result<usize, JsValue> {
        reload_into(self.session.grid_mut(), text.as_bytes()).map_err(|e| {
            let message = format!("Invalid voxel file: {e}");
            crate::show_error_to_user(&message);
            JsValue::from_str(&message)
        })
    }
}

impl WebBuilder {
    fn apply(&mut self, action: BuilderAction) -> bool {
        match action {
            BuilderAction::Place => self.session.place_at_cursor(),
            BuilderAction::Remove => self.session.remove_at_cursor().is_some(),
            BuilderAction::Move(step) => self.session.move_cursor(step),
            BuilderAction::PreviousMaterial => {
                self.session.previous_material();
                true
            }
            BuilderAction::NextMaterial => {
                self.session.next_material();
                true
            }
            BuilderAction::ResetCursor => {
                self.session.reset_cursor();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_drive_session() {
        let mut b = WebBuilder::new().expect("builder");
        assert!(b.handle_key("PageUp"));
        assert!(b.handle_key("."));
        assert!(b.handle_key("q"));
        assert_eq!(b.material(), "M2");
        assert_eq!(b.cursor(), vec![-5, 1, 0]);
        assert_eq!(b.voxel_count(), 1);
        assert!(!b.handle_key("q"));
        assert!(!b.handle_key("z"));
    }

    #[test]
    fn test_batches_follow_edits() {
        let mut b = WebBuilder::new().expect("builder");
        b.handle_key("q");
        assert!(b.refresh_batches());
        assert_eq!(b.instance_bytes("M1").len(), 16);
        assert!(b.instance_bytes("NOPE").is_empty());
        assert!(!b.refresh_batches());
    }

    #[test]
    fn test_cursor_face_is_half_transparent() {
        let b = WebBuilder::new().expect("builder");
        let face = b.cursor_face(0);
        assert_eq!(face.len(), 4);
        assert_eq!(face[3], 0.5);
        assert_eq!(
            b.face_texture("GRASS", 2).as_deref(),
            Some("textures/full_grass.png")
        );
    }

    #[test]
    fn test_export_round_trip() {
        let mut b = WebBuilder::new().expect("builder");
        b.handle_key("PageUp");
        b.handle_key("q");
        let json = b.export_json().expect("export");

        let mut other = WebBuilder::new().expect("builder");
        assert_eq!(other.import_json(&json).expect("import"), 1);
        assert_eq!(other.export_json().expect("export"), json);
    }
}
