//! Slide element and text-run types.

use serde::{Deserialize, Serialize};

/// A run of text with consistent styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with an explicit style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a strong (bold) text run.
    pub fn strong(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                is_strong: true,
                ..Default::default()
            },
        )
    }

    /// Create an accented (italic) text run.
    pub fn accent(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                is_accent: true,
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
///
/// Two styles are compatible (mergeable into one segment) iff all fields
/// compare equal. `is_code` and `is_math` take precedence over the
/// decorations: code and math runs are rendered verbatim, not decorated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Accented (typically italic) text
    pub is_accent: bool,

    /// Strong (typically bold) text
    pub is_strong: bool,

    /// Inline code
    pub is_code: bool,

    /// Inline math
    pub is_math: bool,

    /// Text color as an RGB triple
    pub color_rgb: Option<(u8, u8, u8)>,

    /// Hyperlink target URL
    pub hyperlink: Option<String>,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.is_accent
            || self.is_strong
            || self.is_code
            || self.is_math
            || self.color_rgb.is_some()
            || self.hyperlink.is_some()
    }
}

/// Qualitative horizontal placement of an image on the slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionHint {
    /// Left third of the canvas
    Left,
    /// Middle third of the canvas
    Center,
    /// Right third of the canvas
    Right,
}

/// An image placed on a slide.
///
/// All geometry is in pixels of the source presentation's coordinate space.
/// The `path` is already resolved by the external parser; the renderer never
/// touches the file itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageElement {
    /// Path to the extracted image file
    pub path: String,

    /// Display width on the slide, if known
    pub display_width_px: Option<u32>,

    /// Display height on the slide, if known
    pub display_height_px: Option<u32>,

    /// Intrinsic width of the image file
    pub original_width_px: Option<u32>,

    /// Intrinsic height of the image file
    pub original_height_px: Option<u32>,

    /// Left edge of the image on the slide
    pub left_px: Option<i32>,

    /// Top edge of the image on the slide
    pub top_px: Option<i32>,

    /// Rotation in degrees
    pub rotation: Option<f32>,

    /// Crop percentages applied by the source presentation
    pub crop_left_pct: Option<f32>,
    /// See `crop_left_pct`
    pub crop_right_pct: Option<f32>,
    /// See `crop_left_pct`
    pub crop_top_pct: Option<f32>,
    /// See `crop_left_pct`
    pub crop_bottom_pct: Option<f32>,

    /// Alternative text for accessibility
    pub alt_text: String,

    /// Explicit placement, overriding the computed hint
    pub position_hint: Option<PositionHint>,
}

impl ImageElement {
    /// Create an image element with just a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// A single element on a slide.
///
/// This is a closed variant set: every dispatch point in the renderer matches
/// exhaustively, so adding a variant is a compile-time event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideElement {
    /// A slide or section title
    Title {
        /// Title text
        content: String,
        /// Heading level, 1-based
        level: u32,
    },

    /// A bulleted list item
    ListItem {
        /// Styled text runs
        content: Vec<TextRun>,
        /// Nesting level, 0-based
        level: u32,
    },

    /// A paragraph of styled text runs
    Paragraph {
        /// Styled text runs
        content: Vec<TextRun>,
    },

    /// An image
    Image(ImageElement),

    /// A table: rows of cells, each cell a list of styled runs
    Table {
        /// rows → cells → runs
        rows: Vec<Vec<Vec<TextRun>>>,
    },

    /// A block of source code
    CodeBlock {
        /// Raw code text
        content: String,
        /// Language tag, if known
        language: Option<String>,
    },

    /// A display math formula
    ///
    /// The content may or may not still carry `$`/`$$` delimiters; emitters
    /// normalize either way.
    Formula {
        /// Raw math text
        content: String,
    },
}

impl SlideElement {
    /// Create a title element.
    pub fn title(content: impl Into<String>, level: u32) -> Self {
        SlideElement::Title {
            content: content.into(),
            level,
        }
    }

    /// Create a list item from plain text.
    pub fn list_item(text: impl Into<String>, level: u32) -> Self {
        SlideElement::ListItem {
            content: vec![TextRun::new(text)],
            level,
        }
    }

    /// Create a paragraph from plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        SlideElement::Paragraph {
            content: vec![TextRun::new(text)],
        }
    }

    /// Element type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            SlideElement::Title { .. } => "Title",
            SlideElement::ListItem { .. } => "ListItem",
            SlideElement::Paragraph { .. } => "Paragraph",
            SlideElement::Image(_) => "Image",
            SlideElement::Table { .. } => "Table",
            SlideElement::CodeBlock { .. } => "CodeBlock",
            SlideElement::Formula { .. } => "Formula",
        }
    }

    /// Concatenated raw text of the element, ignoring styling.
    pub fn plain_text(&self) -> String {
        fn runs_text(runs: &[TextRun]) -> String {
            runs.iter().map(|r| r.text.as_str()).collect()
        }
        match self {
            SlideElement::Title { content, .. } => content.clone(),
            SlideElement::ListItem { content, .. } => runs_text(content),
            SlideElement::Paragraph { content } => runs_text(content),
            SlideElement::Image(img) => img.alt_text.clone(),
            SlideElement::Table { rows } => rows
                .iter()
                .flat_map(|row| row.iter())
                .map(|cell| runs_text(cell))
                .collect::<Vec<_>>()
                .join(" "),
            SlideElement::CodeBlock { content, .. } => content.clone(),
            SlideElement::Formula { content } => content.clone(),
        }
    }
}
