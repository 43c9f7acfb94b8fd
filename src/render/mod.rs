//! Rendering engine: dialect emitters, layout heuristics and the slide
//! walker that drives them.

pub mod dialect;
pub mod json;
pub mod layout;
pub mod merge;
pub mod metrics;
pub mod options;
pub mod sink;
pub mod title;
pub mod walker;

pub use dialect::Dialect;
pub use json::JsonFormat;
pub use metrics::DensityClass;
pub use options::{DensityThresholds, RenderOptions};
pub use sink::RenderSink;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Presentation;

use walker::SlideWalker;

/// Render a presentation in the given dialect.
pub fn render_dialect(
    presentation: &Presentation,
    dialect: Dialect,
    options: &RenderOptions,
) -> Result<String> {
    SlideWalker::new(dialect.emitter(), options).render(presentation)
}

/// Render to standard Markdown.
pub fn to_markdown(presentation: &Presentation, options: &RenderOptions) -> Result<String> {
    render_dialect(presentation, Dialect::Markdown, options)
}

/// Render to wikitext.
pub fn to_wiki(presentation: &Presentation, options: &RenderOptions) -> Result<String> {
    render_dialect(presentation, Dialect::Wiki, options)
}

/// Render to Madoko markdown.
pub fn to_madoko(presentation: &Presentation, options: &RenderOptions) -> Result<String> {
    render_dialect(presentation, Dialect::Madoko, options)
}

/// Render to a Quarto/RevealJS document.
pub fn to_quarto(presentation: &Presentation, options: &RenderOptions) -> Result<String> {
    render_dialect(presentation, Dialect::Quarto, options)
}

/// Render to Marp markdown.
pub fn to_marp(presentation: &Presentation, options: &RenderOptions) -> Result<String> {
    render_dialect(presentation, Dialect::Marp, options)
}

/// Render to a LaTeX Beamer document.
pub fn to_beamer(presentation: &Presentation, options: &RenderOptions) -> Result<String> {
    render_dialect(presentation, Dialect::Beamer, options)
}

/// Render several dialects in parallel, one worker per dialect.
///
/// Failures are isolated per dialect: one failing render does not affect
/// the others. Results are returned in the order requested.
pub fn render_all(
    presentation: &Presentation,
    dialects: &[Dialect],
    options: &RenderOptions,
) -> Vec<(Dialect, Result<String>)> {
    dialects
        .par_iter()
        .map(|&dialect| (dialect, render_dialect(presentation, dialect, options)))
        .collect()
}
