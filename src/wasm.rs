//! WebAssembly bindings for the browser editor.
//!
//! This module provides [`EditorHandle`], a wrapper around [`LogoEditor`]
//! that the UI drives directly: settings records cross the boundary as plain
//! JS objects (typed through tsify), exports come back as bytes or strings
//! ready to be wrapped in a `Blob`.
//!
//! # Feature Flag
//!
//! This module is only available with the `tsify` feature enabled:
//!
//! ```toml
//! [dependencies]
//! logo-forge = { version = "0.1", features = ["tsify"] }
//! ```
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { EditorHandle } from 'logo-forge';
//!
//! await init();
//!
//! const editor = new EditorHandle();
//! editor.setIcon({ ...editor.icon(), rotate: 45 });
//! Object.assign(container.style, editor.previewStyles().container);
//!
//! const png = editor.exportPng();
//! const blob = new Blob([png], { type: 'image/png' });
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::editor::{Configurable, LogoEditor};
use crate::glyph::{BuiltinGlyph, CustomGlyph};
use crate::profile::LogoProfile;
use crate::settings::{BackgroundSettings, IconSettings};

/// Converts a serializable value to a plain JS object (maps become objects).
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Failed to convert value: {}", e)))
}

// ============================================================================
// EditorHandle
// ============================================================================

/// A [`LogoEditor`] exposed to JavaScript via wasm-bindgen.
#[wasm_bindgen]
pub struct EditorHandle {
    editor: LogoEditor,
}

impl Default for EditorHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl EditorHandle {
    /// Creates an editor in the default start state.
    #[wasm_bindgen(constructor)]
    pub fn new() -> EditorHandle {
        Self {
            editor: LogoEditor::new(),
        }
    }

    /// Creates an editor whose history starts at the given profile.
    #[wasm_bindgen(js_name = "fromProfileJson")]
    pub fn from_profile_json(json: &str) -> Result<EditorHandle, JsError> {
        let profile = LogoProfile::from_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse profile: {}", e)))?;
        Ok(Self {
            editor: LogoEditor::from_profile(&profile),
        })
    }

    // ---- Settings ----

    pub fn icon(&self) -> IconSettings {
        self.editor.icon().clone()
    }

    /// Replaces the icon settings. Returns true if anything changed.
    #[wasm_bindgen(js_name = "setIcon")]
    pub fn set_icon(&mut self, icon: IconSettings) -> bool {
        self.editor.update_icon(icon)
    }

    pub fn background(&self) -> BackgroundSettings {
        self.editor.background().clone()
    }

    /// Replaces the background settings. Returns true if anything changed.
    #[wasm_bindgen(js_name = "setBackground")]
    pub fn set_background(&mut self, background: BackgroundSettings) -> bool {
        self.editor.update_background(background)
    }

    /// Returns the grid name of the selected built-in glyph.
    pub fn glyph(&self) -> String {
        self.editor.glyph().name().to_string()
    }

    /// Selects a built-in glyph by grid name ("book", "check", ...).
    #[wasm_bindgen(js_name = "selectBuiltin")]
    pub fn select_builtin(&mut self, name: &str) -> Result<bool, JsError> {
        let glyph = BuiltinGlyph::from_name(name)
            .ok_or_else(|| JsError::new(&format!("Unknown glyph: {}", name)))?;
        Ok(self.editor.select_builtin(glyph))
    }

    /// Draws custom path data (in the 24x24 box) instead of the built-in glyph.
    #[wasm_bindgen(js_name = "selectCustom")]
    pub fn select_custom(&mut self, path: &str) -> Result<bool, JsError> {
        let glyph = CustomGlyph::new(path);
        glyph
            .validate()
            .map_err(|e| JsError::new(&format!("Invalid glyph path: {}", e)))?;
        Ok(self.editor.select_custom(glyph))
    }

    // ---- History ----

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    #[wasm_bindgen(js_name = "canUndo")]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    #[wasm_bindgen(js_name = "canRedo")]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    // ---- Suggestions ----

    /// Loads a raw suggestion service response. Returns the number of
    /// suggestions listed; on error the previous list is kept.
    #[wasm_bindgen(js_name = "applySuggestionsResponse")]
    pub fn apply_suggestions_response(&mut self, raw: &str) -> Result<u32, JsError> {
        let count = self
            .editor
            .apply_suggestions_response(raw)
            .map_err(|e| JsError::new(&format!("Failed to read suggestions: {}", e)))?;
        Ok(count as u32)
    }

    /// Returns the listed suggestions as `{ path, viewBox }` objects.
    pub fn suggestions(&self) -> Result<JsValue, JsError> {
        let items: Vec<_> = self.editor.suggestions().iter().collect();
        to_js(&items)
    }

    #[wasm_bindgen(js_name = "useSuggestion")]
    pub fn use_suggestion(&mut self, index: usize) -> bool {
        self.editor.use_suggestion(index)
    }

    // ---- Output ----

    /// Returns `{ container, icon }` style objects for the live preview.
    #[wasm_bindgen(js_name = "previewStyles")]
    pub fn preview_styles(&self) -> Result<JsValue, JsError> {
        to_js(&self.editor.preview_styles())
    }

    /// Renders `logo.png` and returns its bytes.
    #[wasm_bindgen(js_name = "exportPng")]
    pub fn export_png(&self) -> Result<Vec<u8>, JsError> {
        let artifact = self
            .editor
            .export_png()
            .map_err(|e| JsError::new(&format!("PNG export failed: {}", e)))?;
        Ok(artifact.bytes)
    }

    /// Builds `logo.svg` and returns its markup.
    #[wasm_bindgen(js_name = "exportSvg")]
    pub fn export_svg(&self) -> Result<String, JsError> {
        let artifact = self
            .editor
            .export_svg()
            .map_err(|e| JsError::new(&format!("SVG export failed: {}", e)))?;
        String::from_utf8(artifact.bytes)
            .map_err(|e| JsError::new(&format!("SVG export is not UTF-8: {}", e)))
    }

    // ---- Profile Import/Export ----

    /// Exports the current settings as a JSON string.
    #[wasm_bindgen(js_name = "exportProfileJson")]
    pub fn export_profile_json(&self) -> Result<String, JsError> {
        self.editor
            .export_profile()
            .to_json()
            .map_err(|e| JsError::new(&format!("Failed to serialize profile: {}", e)))
    }

    /// Imports settings from a JSON string as a single edit.
    #[wasm_bindgen(js_name = "importProfileJson")]
    pub fn import_profile_json(&mut self, json: &str) -> Result<(), JsError> {
        let profile = LogoProfile::from_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse profile: {}", e)))?;
        self.editor.apply_profile(&profile);
        Ok(())
    }
}
