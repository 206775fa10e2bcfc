//! Serializable logo profile for exchanging a design between processes.
//!
//! A [`LogoProfile`] captures both settings records and the selected built-in
//! glyph in a JSON document that the browser UI, the CLI and the WebAssembly
//! bindings all understand.
//!
//! # Example
//!
//! ```
//! use logo_forge::{BackgroundSettings, BuiltinGlyph, LogoProfile, FULLY_ROUND};
//!
//! let profile = LogoProfile::new()
//!     .with_glyph(BuiltinGlyph::Library)
//!     .with_background(BackgroundSettings {
//!         rounded: FULLY_ROUND,
//!         ..Default::default()
//!     });
//!
//! let json = profile.to_json().unwrap();
//! let restored = LogoProfile::from_json(&json).unwrap();
//! assert_eq!(restored, profile);
//! ```

use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::glyph::BuiltinGlyph;
use crate::history::HistoryEntry;
use crate::settings::{BackgroundSettings, IconSettings};

/// A complete, serializable logo design.
///
/// # JSON Format
///
/// ```json
/// {
///   "icon": { "size": 300, "rotate": 0, "fillColor": "#000000", ... },
///   "background": { "rounded": 9999, "isGradient": true, ... },
///   "glyph": "book"
/// }
/// ```
///
/// Missing fields fall back to the editor's start state, so `{}` is a valid
/// profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify), tsify(into_wasm_abi, from_wasm_abi))]
pub struct LogoProfile {
    pub icon: IconSettings,
    pub background: BackgroundSettings,
    /// Built-in glyph drawn when the icon has no custom path.
    pub glyph: BuiltinGlyph,
}

impl LogoProfile {
    /// Creates a profile holding the editor's start state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icon(mut self, icon: IconSettings) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_background(mut self, background: BackgroundSettings) -> Self {
        self.background = background;
        self
    }

    pub fn with_glyph(mut self, glyph: BuiltinGlyph) -> Self {
        self.glyph = glyph;
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the settings pair as a history snapshot.
    pub fn snapshot(&self) -> HistoryEntry {
        HistoryEntry::new(self.icon.clone(), self.background.clone())
    }
}
