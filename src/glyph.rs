//! Icon glyphs drawn on top of the background.
//!
//! A glyph is a small set of stroke-only vector primitives inside a view box.
//! The editor ships a handful of built-in glyphs (24x24, stroke-based) and
//! accepts custom path data, typically picked from AI suggestions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::settings::IconSettings;

// ============================================================================
// ViewBox
// ============================================================================

/// Error returned when a view box string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid viewBox {value:?}: expected four numbers with positive width and height")]
pub struct ViewBoxError {
    pub value: String,
}

/// The coordinate system a glyph's primitives are authored in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    /// The 24x24 box used by the built-in glyph set.
    pub const ICON_24: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        width: 24.0,
        height: 24.0,
    };
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::ICON_24
    }
}

impl FromStr for ViewBox {
    type Err = ViewBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ViewBoxError {
            value: s.to_string(),
        };
        let numbers = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f32>().map_err(|_| err()))
            .collect::<Result<Vec<_>, _>>()?;

        let [min_x, min_y, width, height] = numbers[..] else {
            return Err(err());
        };
        if !(width > 0.0 && height > 0.0) {
            return Err(err());
        }
        Ok(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

impl TryFrom<String> for ViewBox {
    type Error = ViewBoxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ViewBox> for String {
    fn from(view_box: ViewBox) -> Self {
        view_box.to_string()
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for ViewBox {
    fn schema_name() -> String {
        "ViewBox".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        <String as schemars::JsonSchema>::json_schema(generator)
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// A single stroke primitive of a glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphPrimitive<'a> {
    Path(&'a str),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rx: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
    },
}

/// A glyph ready to be drawn: its view box and primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGlyph<'a> {
    pub view_box: ViewBox,
    pub primitives: Vec<GlyphPrimitive<'a>>,
}

// ============================================================================
// Built-in glyphs
// ============================================================================

/// The glyphs offered in the editor's icon grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum BuiltinGlyph {
    #[default]
    Book,
    Building,
    Check,
    Library,
    Notebook,
    Scroll,
}

impl BuiltinGlyph {
    pub const ALL: [Self; 6] = [
        Self::Book,
        Self::Building,
        Self::Check,
        Self::Library,
        Self::Notebook,
        Self::Scroll,
    ];

    /// Returns the name used by the icon grid.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Building => "building",
            Self::Check => "check",
            Self::Library => "library",
            Self::Notebook => "notebook",
            Self::Scroll => "scroll",
        }
    }

    /// Looks a glyph up by its grid name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|glyph| glyph.name() == name)
    }

    /// Returns the glyph's primitives in the 24x24 box.
    pub fn primitives(&self) -> &'static [GlyphPrimitive<'static>] {
        use GlyphPrimitive::{Path, Rect};

        match self {
            Self::Book => &[Path(
                "M4 19.5v-15A2.5 2.5 0 0 1 6.5 2H20v20H6.5a2.5 2.5 0 0 1 0-5H20",
            )],
            Self::Building => &[
                Path("M6 22V4a2 2 0 0 1 2-2h8a2 2 0 0 1 2 2v18Z"),
                Path("M6 12H4a2 2 0 0 0-2 2v6a2 2 0 0 0 2 2h2"),
                Path("M18 9h2a2 2 0 0 1 2 2v9a2 2 0 0 1-2 2h-2"),
                Path("M10 6h4"),
                Path("M10 10h4"),
                Path("M10 14h4"),
                Path("M10 18h4"),
            ],
            Self::Check => &[Path("M20 6 9 17l-5-5")],
            Self::Library => &[
                Path("m16 6 4 14"),
                Path("M12 6v14"),
                Path("M8 8v12"),
                Path("M4 4v16"),
            ],
            Self::Notebook => &[
                Path("M2 6h4"),
                Path("M2 10h4"),
                Path("M2 14h4"),
                Path("M2 18h4"),
                Rect {
                    x: 4.0,
                    y: 2.0,
                    width: 16.0,
                    height: 20.0,
                    rx: 2.0,
                },
                Path("M16 2v20"),
            ],
            Self::Scroll => &[
                Path("M15 12h-5"),
                Path("M15 8h-5"),
                Path("M19 17V5a2 2 0 0 0-2-2H4"),
                Path(
                    "M8 21h12a2 2 0 0 0 2-2v-1a1 1 0 0 0-1-1H11a1 1 0 0 0-1 1v1a2 2 0 1 1-4 0V5a2 2 0 1 0-4 0v2a1 1 0 0 0 1 1h3",
                ),
            ],
        }
    }

    pub fn resolve(&self) -> ResolvedGlyph<'static> {
        ResolvedGlyph {
            view_box: ViewBox::ICON_24,
            primitives: self.primitives().to_vec(),
        }
    }
}

// ============================================================================
// Custom glyphs
// ============================================================================

/// Reasons a custom glyph cannot be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("custom glyph has no path data")]
    EmptyPath,
    #[error("custom glyph path must start with a moveto command, found {0:?}")]
    MissingMoveTo(char),
}

/// A single-path glyph, as produced by the AI suggestion collaborator.
///
/// Deserializes from either a bare path string (drawn in the 24x24 box) or
/// an object `{ "path": "...", "viewBox": "0 0 24 24" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CustomGlyphRepr")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CustomGlyph {
    pub path: String,
    pub view_box: ViewBox,
}

#[derive(Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
enum CustomGlyphRepr {
    Path(String),
    Full {
        path: String,
        #[serde(default, rename = "viewBox")]
        view_box: ViewBox,
    },
}

impl From<CustomGlyphRepr> for CustomGlyph {
    fn from(repr: CustomGlyphRepr) -> Self {
        match repr {
            CustomGlyphRepr::Path(path) => Self::new(path),
            CustomGlyphRepr::Full { path, view_box } => Self { path, view_box },
        }
    }
}

impl CustomGlyph {
    /// Creates a glyph in the default 24x24 box.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view_box: ViewBox::ICON_24,
        }
    }

    pub fn with_view_box(mut self, view_box: ViewBox) -> Self {
        self.view_box = view_box;
        self
    }

    /// Checks that the path data can start a drawing.
    pub fn validate(&self) -> Result<(), GlyphError> {
        match self.path.trim_start().chars().next() {
            None => Err(GlyphError::EmptyPath),
            Some('M' | 'm') => Ok(()),
            Some(other) => Err(GlyphError::MissingMoveTo(other)),
        }
    }

    pub fn resolve(&self) -> Result<ResolvedGlyph<'_>, GlyphError> {
        self.validate()?;
        Ok(ResolvedGlyph {
            view_box: self.view_box,
            primitives: vec![GlyphPrimitive::Path(self.path.trim())],
        })
    }
}

/// Picks the glyph to draw: the icon's custom path wins over the selected
/// built-in glyph.
pub fn resolve_glyph(
    selected: BuiltinGlyph,
    icon: &IconSettings,
) -> Result<ResolvedGlyph<'_>, GlyphError> {
    match &icon.custom_vector_path {
        Some(custom) => custom.resolve(),
        None => Ok(selected.resolve()),
    }
}
