//! Logo editing session with undo/redo and export.

use crate::export::{ExportArtifact, ExportError, ExportFormat, Exporter, RasterOptions};
use crate::glyph::{BuiltinGlyph, CustomGlyph};
use crate::history::{History, HistoryEntry};
use crate::preview::PreviewStyles;
use crate::profile::LogoProfile;
use crate::settings::{BackgroundSettings, IconSettings};
use crate::suggest::{SuggestionError, Suggestions};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`LogoProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &LogoProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> LogoProfile;
}

// ============================================================================
// LogoEditor
// ============================================================================

/// One editing session.
///
/// `LogoEditor` owns the current settings, the edit history, the selected
/// built-in glyph and the suggestion list. Every change to the settings
/// records one history entry; [`undo`](Self::undo) and [`redo`](Self::redo)
/// restore entries without recording. Replacing a record with an equal one
/// is not a change.
///
/// The selected built-in glyph is not part of the history, but selecting one
/// clears the icon's custom path, which is.
///
/// # Example
///
/// ```
/// use logo_forge::{IconSettings, LogoEditor};
///
/// let mut editor = LogoEditor::new();
/// editor.update_icon(IconSettings {
///     rotate: 45.0,
///     ..editor.icon().clone()
/// });
/// assert!(editor.can_undo());
///
/// editor.undo();
/// assert_eq!(editor.icon().rotate, 0.0);
///
/// let svg = editor.export_svg().unwrap();
/// assert_eq!(svg.file_name(), "logo.svg");
/// ```
#[derive(Debug)]
pub struct LogoEditor {
    icon: IconSettings,
    background: BackgroundSettings,
    glyph: BuiltinGlyph,
    history: History<HistoryEntry>,
    suggestions: Suggestions,
    exporter: Exporter,
}

impl Default for LogoEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LogoEditor {
    /// Creates an editor in the default start state.
    pub fn new() -> Self {
        Self::from_profile(&LogoProfile::default())
    }

    /// Creates an editor whose history starts at `profile`.
    pub fn from_profile(profile: &LogoProfile) -> Self {
        Self {
            icon: profile.icon.clone(),
            background: profile.background.clone(),
            glyph: profile.glyph,
            history: History::new(profile.snapshot()),
            suggestions: Suggestions::new(),
            exporter: Exporter::new(),
        }
    }

    /// Replaces the raster export options.
    pub fn with_raster_options(mut self, options: RasterOptions) -> Self {
        self.exporter = Exporter::with_raster_options(options);
        self
    }

    pub fn icon(&self) -> &IconSettings {
        &self.icon
    }

    pub fn background(&self) -> &BackgroundSettings {
        &self.background
    }

    /// Returns the selected built-in glyph.
    pub fn glyph(&self) -> BuiltinGlyph {
        self.glyph
    }

    pub fn history(&self) -> &History<HistoryEntry> {
        &self.history
    }

    // ---- Editing ----

    /// Replaces the icon settings. Returns true if they changed.
    pub fn update_icon(&mut self, icon: IconSettings) -> bool {
        if icon == self.icon {
            return false;
        }
        self.icon = icon;
        self.record();
        true
    }

    /// Replaces the background settings. Returns true if they changed.
    pub fn update_background(&mut self, background: BackgroundSettings) -> bool {
        if background == self.background {
            return false;
        }
        self.background = background;
        self.record();
        true
    }

    /// Selects a built-in glyph and drops any custom path.
    pub fn select_builtin(&mut self, glyph: BuiltinGlyph) -> bool {
        let glyph_changed = self.glyph != glyph;
        self.glyph = glyph;
        let icon = self.icon.clone().with_custom_vector_path(None);
        self.update_icon(icon) || glyph_changed
    }

    /// Draws `glyph` instead of the selected built-in glyph.
    pub fn select_custom(&mut self, glyph: CustomGlyph) -> bool {
        let icon = self.icon.clone().with_custom_vector_path(Some(glyph));
        self.update_icon(icon)
    }

    /// Applies the suggestion at `index`. Returns false if there is none.
    pub fn use_suggestion(&mut self, index: usize) -> bool {
        let Some(glyph) = self.suggestions.get(index).cloned() else {
            log::warn!("no glyph suggestion at index {index}");
            return false;
        };
        self.select_custom(glyph);
        true
    }

    fn record(&mut self) {
        self.history
            .record(HistoryEntry::new(self.icon.clone(), self.background.clone()));
    }

    // ---- History ----

    /// Steps back one entry. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        self.icon = entry.icon.clone();
        self.background = entry.background.clone();
        true
    }

    /// Steps forward one entry. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        self.icon = entry.icon.clone();
        self.background = entry.background.clone();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- Suggestions ----

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    /// Loads a suggestion service response. On error the previous
    /// suggestions stay listed.
    pub fn apply_suggestions_response(&mut self, raw: &str) -> Result<usize, SuggestionError> {
        self.suggestions.replace_from_response(raw)
    }

    // ---- Output ----

    pub fn preview_styles(&self) -> PreviewStyles {
        PreviewStyles::resolve(&self.icon, &self.background)
    }

    /// Exports the current settings. Never modifies settings or history.
    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        self.exporter
            .export(format, &self.icon, &self.background, self.glyph)
    }

    pub fn export_svg(&self) -> Result<ExportArtifact, ExportError> {
        self.export(ExportFormat::Svg)
    }

    pub fn export_png(&self) -> Result<ExportArtifact, ExportError> {
        self.export(ExportFormat::Png)
    }
}

impl Configurable for LogoEditor {
    /// Applies a profile as a single edit.
    fn apply_profile(&mut self, profile: &LogoProfile) {
        self.glyph = profile.glyph;
        if profile.icon == self.icon && profile.background == self.background {
            return;
        }
        self.icon = profile.icon.clone();
        self.background = profile.background.clone();
        self.record();
    }

    fn export_profile(&self) -> LogoProfile {
        LogoProfile {
            icon: self.icon.clone(),
            background: self.background.clone(),
            glyph: self.glyph,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::glyph::GlyphError;
    use crate::history::MAX_HISTORY;

    fn rotated(editor: &LogoEditor, degrees: f32) -> IconSettings {
        IconSettings {
            rotate: degrees,
            ..editor.icon().clone()
        }
    }

    #[test]
    fn editor_starts_at_defaults() {
        let editor = LogoEditor::new();
        assert_eq!(editor.icon(), &IconSettings::default());
        assert_eq!(editor.background(), &BackgroundSettings::default());
        assert_eq!(editor.glyph(), BuiltinGlyph::Book);
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
    }

    #[test]
    fn each_change_records_once() {
        let mut editor = LogoEditor::new();
        assert!(editor.update_icon(rotated(&editor, 10.0)));
        assert!(editor.update_background(BackgroundSettings {
            padding: 20.0,
            ..Default::default()
        }));
        assert_eq!(editor.history().len(), 3);

        // Equal replacements are not changes.
        assert!(!editor.update_icon(editor.icon().clone()));
        assert_eq!(editor.history().len(), 3);
    }

    #[test]
    fn undo_redo_restore_without_recording() {
        let mut editor = LogoEditor::new();
        editor.update_icon(rotated(&editor, 10.0));
        editor.update_icon(rotated(&editor, 20.0));

        assert!(editor.undo());
        assert_eq!(editor.icon().rotate, 10.0);
        assert!(editor.undo());
        assert_eq!(editor.icon().rotate, 0.0);
        assert!(!editor.undo());
        assert_eq!(editor.icon().rotate, 0.0);

        assert!(editor.redo());
        assert_eq!(editor.icon().rotate, 10.0);
        assert_eq!(editor.history().len(), 3);
    }

    #[test]
    fn edit_after_undo_discards_redo_branch() {
        let mut editor = LogoEditor::new();
        editor.update_icon(rotated(&editor, 10.0));
        editor.update_icon(rotated(&editor, 20.0));
        editor.undo();
        editor.update_icon(rotated(&editor, 30.0));

        assert!(!editor.can_redo());
        let rotations: Vec<f32> = editor.history().iter().map(|e| e.icon.rotate).collect();
        assert_eq!(rotations, vec![0.0, 10.0, 30.0]);
    }

    #[test]
    fn history_is_bounded() {
        let mut editor = LogoEditor::new();
        for i in 1..=60 {
            editor.update_icon(rotated(&editor, i as f32));
        }
        assert_eq!(editor.history().len(), MAX_HISTORY);
        assert_eq!(editor.icon().rotate, 60.0);
    }

    #[test]
    fn builtin_selection_clears_custom_path() {
        let mut editor = LogoEditor::new();
        assert!(editor.select_custom(CustomGlyph::new("M2 2h20")));
        assert!(editor.icon().custom_vector_path.is_some());

        assert!(editor.select_builtin(BuiltinGlyph::Check));
        assert_eq!(editor.glyph(), BuiltinGlyph::Check);
        assert!(editor.icon().custom_vector_path.is_none());
        assert_eq!(editor.history().len(), 3);

        // Undo brings the custom path back; the builtin selection stays.
        editor.undo();
        assert!(editor.icon().custom_vector_path.is_some());
        assert_eq!(editor.glyph(), BuiltinGlyph::Check);
    }

    #[test]
    fn suggestions_feed_custom_glyphs() {
        let mut editor = LogoEditor::new();
        assert!(!editor.use_suggestion(0));

        let count = editor
            .apply_suggestions_response(r#"[{"path": "M4 4l16 16", "viewBox": "0 0 24 24"}]"#)
            .unwrap();
        assert_eq!(count, 1);
        assert!(editor.apply_suggestions_response("oops").is_err());
        assert_eq!(editor.suggestions().len(), 1);

        assert!(editor.use_suggestion(0));
        assert_eq!(
            editor.icon().custom_vector_path.as_ref().map(|g| g.path.as_str()),
            Some("M4 4l16 16")
        );
        assert!(editor.can_undo());
    }

    #[test]
    fn export_does_not_touch_state() {
        let mut editor = LogoEditor::new();
        editor.update_background(BackgroundSettings {
            fill_color: Color::new(10, 20, 30),
            ..Default::default()
        });
        let before = editor.export_profile();
        let len = editor.history().len();

        let png = editor.export_png().unwrap();
        assert_eq!(png.file_name(), "logo.png");
        let svg = editor.export_svg().unwrap();
        assert_eq!(svg.mime_type(), "image/svg+xml");

        assert_eq!(editor.export_profile(), before);
        assert_eq!(editor.history().len(), len);
    }

    #[test]
    fn broken_custom_glyph_fails_export() {
        let mut editor = LogoEditor::new();
        editor.select_custom(CustomGlyph::new("Z"));
        let err = editor.export_png().unwrap_err();
        assert!(matches!(err, ExportError::MissingGlyph(GlyphError::MissingMoveTo('Z'))));
    }

    #[test]
    fn preview_reflects_current_settings() {
        let mut editor = LogoEditor::new();
        editor.update_icon(rotated(&editor, 90.0));
        assert_eq!(editor.preview_styles().icon.get("transform"), Some("rotate(90deg)"));
    }

    #[test]
    fn profile_apply_and_export() {
        let profile = LogoProfile::new()
            .with_glyph(BuiltinGlyph::Notebook)
            .with_background(BackgroundSettings {
                rounded: 24.0,
                ..Default::default()
            });

        let mut editor = LogoEditor::new();
        editor.apply_profile(&profile);
        assert_eq!(editor.export_profile(), profile);
        assert_eq!(editor.history().len(), 2);

        // Applying the same profile again is not an edit.
        editor.apply_profile(&profile);
        assert_eq!(editor.history().len(), 2);

        let restored = LogoEditor::from_profile(&profile);
        assert_eq!(restored.glyph(), BuiltinGlyph::Notebook);
        assert!(!restored.can_undo());
    }

    #[test]
    fn raster_options_reach_the_exporter() {
        let editor = LogoEditor::new().with_raster_options(RasterOptions { scale: 1.0 });
        let png = editor.export_png().unwrap();
        let img = image::load_from_memory(&png.bytes).unwrap();
        assert_eq!((img.width(), img.height()), (500, 500));
    }
}
