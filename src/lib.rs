//! # undeck
//!
//! Slide-presentation rendering library for Rust.
//!
//! This library takes a structured presentation model and renders it to
//! text-markup dialects: Markdown, TiddlyWiki wikitext, Madoko, Quarto,
//! Marp and LaTeX Beamer, plus a JSON dump of the model itself.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undeck::{render, Presentation};
//!
//! fn main() -> undeck::Result<()> {
//!     // Load a presentation model from JSON
//!     let json = std::fs::read_to_string("deck.json")?;
//!     let deck: Presentation = render::json::from_json(&json)?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&deck, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Six output dialects**: Markdown, wikitext, Madoko, Quarto, Marp, Beamer
//! - **Structure preservation**: titles, lists, tables, images, code, math
//! - **Layout heuristics**: content-density scaling and two-column splits
//! - **Title continuity**: repeated slide titles merged or marked "(cont.)"
//! - **Parallel rendering**: Uses Rayon for multi-dialect runs

pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    ImageElement, PositionHint, Presentation, Slide, SlideElement, TextRun, TextStyle,
};
pub use render::{
    Dialect, DensityClass, DensityThresholds, JsonFormat, RenderOptions, RenderSink,
};

use std::path::{Path, PathBuf};

/// Render a presentation in one dialect with default options.
///
/// # Example
///
/// ```no_run
/// use undeck::{render_to, Dialect, Presentation};
///
/// let deck = Presentation::new();
/// let markdown = render_to(&deck, Dialect::Markdown).unwrap();
/// ```
pub fn render_to(presentation: &Presentation, dialect: Dialect) -> Result<String> {
    render::render_dialect(presentation, dialect, &RenderOptions::default())
}

/// Serialize a presentation model to JSON.
pub fn to_json(presentation: &Presentation, format: JsonFormat) -> Result<String> {
    render::json::to_json(presentation, format)
}

/// Load a presentation model from a JSON file.
///
/// # Example
///
/// ```no_run
/// use undeck::load_json;
///
/// let deck = load_json("deck.json").unwrap();
/// println!("Slides: {}", deck.slide_count());
/// ```
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Presentation> {
    let text = std::fs::read_to_string(path)?;
    render::json::from_json(&text)
}

/// Builder for rendering a presentation to one or more dialects.
///
/// # Example
///
/// ```no_run
/// use undeck::{Dialect, Presentation, Undeck};
///
/// let deck = Presentation::new();
/// let outputs = Undeck::new()
///     .with_dialect(Dialect::Marp)
///     .with_dialect(Dialect::Beamer)
///     .with_slide_separators()
///     .render(&deck);
/// ```
pub struct Undeck {
    options: RenderOptions,
    dialects: Vec<Dialect>,
}

impl Undeck {
    /// Create a new builder with default options and no dialects.
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            dialects: Vec::new(),
        }
    }

    /// Replace the render options wholesale.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Add one target dialect. Duplicates are ignored.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        if !self.dialects.contains(&dialect) {
            self.dialects.push(dialect);
        }
        self
    }

    /// Add several target dialects.
    pub fn with_dialects(mut self, dialects: &[Dialect]) -> Self {
        for &dialect in dialects {
            self = self.with_dialect(dialect);
        }
        self
    }

    /// Disable the per-dialect escaping pass.
    pub fn without_escaping(mut self) -> Self {
        self.options = self.options.with_escaping(false);
        self
    }

    /// Disable color markup.
    pub fn without_color(mut self) -> Self {
        self.options = self.options.with_color(false);
        self
    }

    /// Disable presenter notes.
    pub fn without_notes(mut self) -> Self {
        self.options = self.options.with_notes(false);
        self
    }

    /// Emit slide-separator markers between slides.
    pub fn with_slide_separators(mut self) -> Self {
        self.options = self.options.with_slide_separators(true);
        self
    }

    /// Keep near-duplicate titles, suffixed with " (cont.)".
    pub fn with_similar_titles(mut self) -> Self {
        self.options = self.options.with_similar_titles(true);
        self
    }

    /// Set the default image display width in pixels.
    pub fn with_image_width(mut self, width: u32) -> Self {
        self.options = self.options.with_image_width(width);
        self
    }

    /// Set the source slide canvas dimensions.
    pub fn with_slide_size(mut self, width_px: u32, height_px: u32) -> Self {
        self.options = self.options.with_slide_size(width_px, height_px);
        self
    }

    /// Dialects selected so far, defaulting to Markdown when none were added.
    fn targets(&self) -> Vec<Dialect> {
        if self.dialects.is_empty() {
            vec![Dialect::Markdown]
        } else {
            self.dialects.clone()
        }
    }

    /// Render every selected dialect, in parallel.
    ///
    /// Results are returned in selection order; a failure in one dialect
    /// does not affect the others.
    pub fn render(&self, presentation: &Presentation) -> Vec<(Dialect, Result<String>)> {
        render::render_all(presentation, &self.targets(), &self.options)
    }

    /// Render every selected dialect and write each to `dir`.
    ///
    /// Output files are named `<stem>.<ext>` with the dialect's extension
    /// (Marp gets `<stem>.marp.md` to avoid colliding with Markdown).
    /// Returns the written paths in selection order. Stops at the first
    /// render or I/O failure.
    pub fn write_to(
        &self,
        presentation: &Presentation,
        dir: impl AsRef<Path>,
        stem: &str,
    ) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::new();
        for (dialect, result) in self.render(presentation) {
            let text = result?;
            let mut sink = RenderSink::create(dir.join(dialect.output_name(stem)))?;
            sink.write_str(&text)?;
            written.push(sink.finish()?);
        }
        Ok(written)
    }
}

impl Default for Undeck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Presentation {
        let mut deck = Presentation::new();
        deck.add_slide(Slide::general(vec![
            SlideElement::title("Agenda", 1),
            SlideElement::paragraph("first point"),
        ]));
        deck
    }

    #[test]
    fn test_undeck_builder_defaults_to_markdown() {
        let outputs = Undeck::new().render(&sample());
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].0, Dialect::Markdown);
        assert!(outputs[0].1.as_ref().unwrap().contains("# Agenda"));
    }

    #[test]
    fn test_undeck_builder_deduplicates_dialects() {
        let undeck = Undeck::new()
            .with_dialect(Dialect::Marp)
            .with_dialects(&[Dialect::Marp, Dialect::Beamer]);
        assert_eq!(undeck.dialects, vec![Dialect::Marp, Dialect::Beamer]);
    }

    #[test]
    fn test_undeck_builder_chained_options() {
        let undeck = Undeck::new()
            .without_escaping()
            .without_notes()
            .with_slide_separators()
            .with_image_width(640);

        assert!(undeck.options.disable_escaping);
        assert!(undeck.options.disable_notes);
        assert!(undeck.options.enable_slides);
        assert_eq!(undeck.options.image_width, Some(640));
    }

    #[test]
    fn test_write_to_names_outputs_per_dialect() {
        let dir = tempfile::tempdir().unwrap();
        let written = Undeck::new()
            .with_dialects(&[Dialect::Markdown, Dialect::Marp, Dialect::Beamer])
            .write_to(&sample(), dir.path(), "deck")
            .unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["deck.md", "deck.marp.md", "deck.tex"]);
        for path in &written {
            assert!(!std::fs::read_to_string(path).unwrap().is_empty());
        }
    }

    #[test]
    fn test_render_to_default_options() {
        let out = render_to(&sample(), Dialect::Wiki).unwrap();
        assert!(out.contains("== Agenda =="));
    }

    #[test]
    fn test_load_json_missing_file_is_error() {
        assert!(load_json("does-not-exist.json").is_err());
    }
}
