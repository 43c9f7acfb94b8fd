//! Output dialect selection and the emitter trait.
//!
//! Each dialect implements [`DialectEmitter`]: a set of inline formatting
//! primitives used by the style-run merger plus block and chrome hooks
//! driven by the slide walker. The walker decides *what* to emit; emitters
//! decide *how* it is spelled in their markup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{ImageElement, PositionHint};

use super::merge;
use super::metrics::DensityClass;
use super::options::RenderOptions;

mod beamer;
mod madoko;
mod markdown;
mod marp;
mod quarto;
mod wiki;

pub use beamer::BeamerEmitter;
pub use madoko::MadokoEmitter;
pub use markdown::MarkdownEmitter;
pub use marp::MarpEmitter;
pub use quarto::QuartoEmitter;
pub use wiki::WikiEmitter;

/// Supported output dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Markdown,
    Wiki,
    Madoko,
    Quarto,
    Marp,
    Beamer,
}

impl Dialect {
    /// All dialects, in a stable order.
    pub const ALL: [Dialect; 6] = [
        Dialect::Markdown,
        Dialect::Wiki,
        Dialect::Madoko,
        Dialect::Quarto,
        Dialect::Marp,
        Dialect::Beamer,
    ];

    /// Lowercase dialect name.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Markdown => "markdown",
            Dialect::Wiki => "wiki",
            Dialect::Madoko => "madoko",
            Dialect::Quarto => "quarto",
            Dialect::Marp => "marp",
            Dialect::Beamer => "beamer",
        }
    }

    /// Conventional file extension for this dialect's output.
    pub fn extension(self) -> &'static str {
        match self {
            Dialect::Markdown => "md",
            Dialect::Wiki => "wiki",
            Dialect::Madoko => "mdk",
            Dialect::Quarto => "qmd",
            Dialect::Marp => "md",
            Dialect::Beamer => "tex",
        }
    }

    /// Output file name for a given stem. Marp gets a distinguishing infix
    /// since it shares the `.md` extension with plain Markdown.
    pub fn output_name(self, stem: &str) -> String {
        match self {
            Dialect::Marp => format!("{stem}.marp.md"),
            _ => format!("{stem}.{}", self.extension()),
        }
    }

    /// Instantiate the emitter for this dialect.
    pub fn emitter(self) -> Box<dyn DialectEmitter> {
        match self {
            Dialect::Markdown => Box::new(MarkdownEmitter::new()),
            Dialect::Wiki => Box::new(WikiEmitter::new()),
            Dialect::Madoko => Box::new(MadokoEmitter::new()),
            Dialect::Quarto => Box::new(QuartoEmitter::new()),
            Dialect::Marp => Box::new(MarpEmitter::new()),
            Dialect::Beamer => Box::new(BeamerEmitter::new()),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Dialect::Markdown),
            "wiki" => Ok(Dialect::Wiki),
            "madoko" => Ok(Dialect::Madoko),
            "quarto" | "qmd" => Ok(Dialect::Quarto),
            "marp" => Ok(Dialect::Marp),
            "beamer" | "tex" => Ok(Dialect::Beamer),
            _ => Err(Error::Render(format!("unknown dialect: {s}"))),
        }
    }
}

/// Per-slide chrome context handed to the slide-level hooks.
#[derive(Debug, Clone, Copy)]
pub struct SlideChrome {
    /// Effective density after any column-split downgrade
    pub density: DensityClass,
    /// Whether this is the last slide of the presentation
    pub is_last: bool,
}

/// Resolved geometry for one image, computed by the walker in the
/// emitter's target canvas coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLayout {
    /// Qualitative horizontal placement, explicit hint already applied
    pub position: Option<PositionHint>,
    /// Display width scaled into the target canvas
    pub scaled_width_px: Option<u32>,
}

/// One markup dialect's formatting surface.
///
/// Inline primitives take `&self` so the merger can call them through a
/// shared borrow; block hooks take `&mut self` because some emitters carry
/// state across calls (Beamer's itemize nesting, font-scale groups).
pub trait DialectEmitter {
    fn dialect(&self) -> Dialect;

    // Capabilities.

    /// Fixed multi-column slides render in a native column construct.
    fn supports_native_columns(&self) -> bool {
        false
    }

    /// Dense slides may be split into two heuristic columns.
    fn supports_column_split(&self) -> bool {
        false
    }

    /// Slides are always separated, regardless of `enable_slides`.
    fn requires_separators(&self) -> bool {
        false
    }

    /// Maximum supported list nesting depth, if bounded.
    fn max_list_depth(&self) -> Option<u32> {
        None
    }

    /// Target canvas for image geometry, when it differs from the source
    /// slide canvas.
    fn target_canvas(&self) -> Option<(u32, u32)> {
        None
    }

    /// Left/right images are pulled ahead of the body as floats.
    fn floats_side_images(&self) -> bool {
        false
    }

    // Document and slide chrome.

    fn document_open(&mut self, _out: &mut String, _options: &RenderOptions) {}
    fn document_close(&mut self, _out: &mut String) {}
    fn begin_slide(&mut self, _out: &mut String, _chrome: &SlideChrome) {}
    fn slide_title(&mut self, out: &mut String, text: &str, level: u32, options: &RenderOptions);
    fn body_open(&mut self, _out: &mut String, _chrome: &SlideChrome) {}
    fn body_close(&mut self, _out: &mut String) {}
    fn end_slide(&mut self, _out: &mut String, _chrome: &SlideChrome) {}
    fn empty_slide(&mut self, _out: &mut String) {}

    fn slide_separator(&mut self, out: &mut String) {
        out.push_str("\n---\n\n");
    }

    // Block elements. Textual content arrives already merged and formatted
    // through the inline primitives.

    /// A title appearing mid-body rather than at the head of a slide.
    fn heading(&mut self, out: &mut String, text: &str, level: u32, options: &RenderOptions) {
        self.slide_title(out, text, level, options);
    }

    fn paragraph(&mut self, out: &mut String, text: &str);
    fn list_item(&mut self, out: &mut String, text: &str, level: u32);

    /// Called once when leaving a run of list items.
    fn list_close(&mut self, _out: &mut String) {}

    fn image(
        &mut self,
        out: &mut String,
        image: &ImageElement,
        layout: ImageLayout,
        options: &RenderOptions,
    );

    /// Rows of pre-formatted cell strings. The first row is the header.
    fn table(&mut self, out: &mut String, rows: &[Vec<String>]);

    fn code_block(
        &mut self,
        out: &mut String,
        code: &str,
        language: Option<&str>,
        options: &RenderOptions,
    );

    /// Display math. Content may carry `$`/`$$` wrappers; emitters
    /// normalize.
    fn formula(&mut self, out: &mut String, content: &str);

    fn notes(&mut self, out: &mut String, notes: &[String], options: &RenderOptions) {
        self.paragraph(out, "---");
        for note in notes {
            let text = if options.disable_escaping {
                note.clone()
            } else {
                self.escape(note)
            };
            self.paragraph(out, &text);
        }
    }

    // Fixed multi-column construct.

    fn columns_open(&mut self, _out: &mut String, _count: usize) {}
    fn column_open(&mut self, _out: &mut String, _index: usize, _count: usize) {}
    fn column_close(&mut self, _out: &mut String) {}
    fn columns_close(&mut self, _out: &mut String) {}

    // Heuristic two-column split construct.

    fn split_open(&mut self, _out: &mut String) {}
    fn split_next(&mut self, _out: &mut String) {}
    fn split_close(&mut self, _out: &mut String) {}

    // Inline primitives, used by the style-run merger.

    fn escape(&self, text: &str) -> String;
    fn strong(&self, text: &str) -> String;
    fn accent(&self, text: &str) -> String;
    fn colored(&self, text: &str, rgb: (u8, u8, u8)) -> String;
    fn hyperlink(&self, text: &str, url: &str) -> String;

    fn inline_code(&self, text: &str) -> String {
        merge::inline_code_fence(text)
    }

    fn inline_math(&self, text: &str) -> String {
        merge::inline_math(text)
    }
}

/// Apply a character substitution table in a single left-to-right pass.
///
/// Replacement strings are emitted verbatim and never re-scanned, so a
/// replacement may safely contain characters that appear as table keys.
pub(crate) fn apply_escape_table(text: &str, table: &[(char, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match table.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// `#rrggbb` hex form of an RGB triple.
pub(crate) fn rgb_to_hex(rgb: (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)
}

/// Strip one outer `$$…$$` or `$…$` wrapper from display-math content and
/// trim the payload, so emitters can re-wrap in their own display syntax
/// without doubling delimiters.
pub(crate) fn display_math_payload(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.len() >= 4 && trimmed.starts_with("$$") && trimmed.ends_with("$$") {
        trimmed[2..trimmed.len() - 2].trim()
    } else if trimmed.len() >= 2 && trimmed.starts_with('$') && trimmed.ends_with('$') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Percent-encode an image path for URL contexts, normalizing backslashes
/// to forward slashes first. Unreserved characters and `/` pass through.
pub(crate) fn quote_path(path: &str) -> String {
    use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

    const PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
        .remove(b'/')
        .remove(b'-')
        .remove(b'_')
        .remove(b'.')
        .remove(b'~');

    let normalized = path.replace('\\', "/");
    utf8_percent_encode(&normalized, PATH_SET).to_string()
}

/// Pipe-delimited table shared by the Markdown-family dialects.
///
/// Newlines inside cells become `<br />`, except in cells carrying inline
/// code where they collapse to spaces. Empty tables produce no output.
pub(crate) fn pipe_table(out: &mut String, rows: &[Vec<String>], align: &str) {
    if rows.is_empty() || rows[0].is_empty() {
        return;
    }

    fn render_row(out: &mut String, row: &[String]) {
        let cells: Vec<String> = row
            .iter()
            .map(|c| {
                if c.contains('`') {
                    c.replace('\n', " ")
                } else {
                    c.replace('\n', "<br />")
                }
            })
            .collect();
        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }

    render_row(out, &rows[0]);
    let separator: Vec<String> = rows[0].iter().map(|_| align.to_string()).collect();
    out.push_str("| ");
    out.push_str(&separator.join(" | "));
    out.push_str(" |\n");
    for row in &rows[1..] {
        render_row(out, row);
    }
    out.push('\n');
}

/// Backtick-fenced code block shared by the Markdown-family dialects.
pub(crate) fn fenced_code(out: &mut String, code: &str, language: Option<&str>) {
    out.push_str("```");
    out.push_str(language.unwrap_or(""));
    out.push('\n');
    out.push_str(code.trim());
    out.push_str("\n```\n\n");
}
