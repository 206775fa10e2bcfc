//! AI glyph suggestions.
//!
//! The suggestion service is an external collaborator that answers with a
//! JSON array of `{ "path": ..., "viewBox": ... }` objects, sometimes wrapped
//! in a Markdown code fence. Its output is untrusted: malformed responses are
//! rejected without disturbing the suggestions already on screen.

use thiserror::Error;

use crate::glyph::CustomGlyph;

/// A glyph proposed by the suggestion service.
pub type GlyphSuggestion = CustomGlyph;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("suggestion response is not a JSON array of glyphs: {0}")]
    Json(#[from] serde_json::Error),
    #[error("suggestion response contains no usable glyphs")]
    Empty,
}

/// Parses a suggestion response.
///
/// Entries whose path cannot start a drawing are dropped. An array left
/// empty after filtering is an error.
pub fn parse_suggestions(raw: &str) -> Result<Vec<GlyphSuggestion>, SuggestionError> {
    let parsed: Vec<GlyphSuggestion> = serde_json::from_str(strip_code_fence(raw))?;
    let total = parsed.len();

    let usable: Vec<_> = parsed
        .into_iter()
        .filter(|glyph| match glyph.validate() {
            Ok(()) => true,
            Err(err) => {
                log::debug!("dropping suggestion {:?}: {err}", glyph.path);
                false
            }
        })
        .collect();

    if usable.is_empty() {
        return Err(SuggestionError::Empty);
    }
    if usable.len() < total {
        log::warn!("dropped {} of {total} suggested glyphs", total - usable.len());
    }
    Ok(usable)
}

/// Returns the body of a Markdown code fence, or the trimmed input.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json") on the opening line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// The suggestion list shown in the picker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    items: Vec<GlyphSuggestion>,
}

impl Suggestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with the glyphs in `raw`.
    ///
    /// On error the previous list is kept and the failure is logged.
    /// Returns the number of glyphs now listed.
    pub fn replace_from_response(&mut self, raw: &str) -> Result<usize, SuggestionError> {
        match parse_suggestions(raw) {
            Ok(items) => {
                log::info!("received {} glyph suggestions", items.len());
                self.items = items;
                Ok(self.items.len())
            }
            Err(err) => {
                log::warn!("ignoring suggestion response: {err}");
                Err(err)
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&GlyphSuggestion> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlyphSuggestion> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
