//! Marp markdown emitter.
//!
//! Marp renders at a fixed 1280x720 canvas, so image geometry is scaled
//! from the source slide into that space and expressed through alt-text
//! keywords (`left`/`center`/`right`, `w:Npx`). Density classes become
//! `<!-- _class: … -->` directives backed by the CSS in the header.

use crate::model::{ImageElement, PositionHint};

use super::super::merge::wrap_with_delimiters;
use super::super::options::RenderOptions;
use super::{
    apply_escape_table, display_math_payload, fenced_code, pipe_table, quote_path, rgb_to_hex,
    Dialect, DialectEmitter, ImageLayout, SlideChrome,
};

/// Marp's default rendering canvas.
pub const MARP_TARGET_WIDTH_PX: u32 = 1280;
pub const MARP_TARGET_HEIGHT_PX: u32 = 720;

/// Marp keeps most Markdown punctuation intact; only table pipes,
/// emphasis stars, backticks and raw HTML need protecting.
const ESCAPES: &[(char, &str)] = &[
    ('|', "\\|"),
    ('*', "\\*"),
    ('`', "\\`"),
    ('<', "\\<"),
    ('>', "\\>"),
    ('\u{000B}', " "),
    ('\u{000C}', " "),
];

const HEADER: &str = r#"---
marp: true
theme: default
paginate: true
html: true
---

<style>
section.small {
  font-size: 24px;
}
section.smaller {
  font-size: 20px;
}
section.smallest {
  font-size: 18px;
}

img[alt~="center"] {
  display: block;
  margin: 0 auto;
}
img[alt~="left"] {
  float: left;
  margin-right: 1em;
  margin-bottom: 0.5em;
}
img[alt~="right"] {
  float: right;
  margin-left: 1em;
  margin-bottom: 0.5em;
}

.columns {
  display: grid;
  grid-template-columns: repeat(2, 1fr);
  gap: 2em;
}

.columns > div {
  overflow: hidden;
}
</style>

"#;

#[derive(Debug, Default)]
pub struct MarpEmitter;

impl MarpEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl DialectEmitter for MarpEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Marp
    }

    fn supports_column_split(&self) -> bool {
        true
    }

    fn requires_separators(&self) -> bool {
        true
    }

    fn target_canvas(&self) -> Option<(u32, u32)> {
        Some((MARP_TARGET_WIDTH_PX, MARP_TARGET_HEIGHT_PX))
    }

    fn floats_side_images(&self) -> bool {
        true
    }

    fn document_open(&mut self, out: &mut String, _options: &RenderOptions) {
        out.push_str(HEADER);
    }

    fn begin_slide(&mut self, out: &mut String, chrome: &SlideChrome) {
        if let Some(class) = chrome.density.css_class() {
            out.push_str(&format!("<!-- _class: {class} -->\n\n"));
        }
    }

    fn slide_title(&mut self, out: &mut String, text: &str, level: u32, _options: &RenderOptions) {
        out.push_str(&"#".repeat(level as usize));
        out.push(' ');
        out.push_str(text);
        out.push_str("\n\n");
    }

    fn paragraph(&mut self, out: &mut String, text: &str) {
        out.push_str(text);
        out.push_str("\n\n");
    }

    fn list_item(&mut self, out: &mut String, text: &str, level: u32) {
        out.push_str(&"  ".repeat(level as usize));
        out.push_str("* ");
        out.push_str(text.trim());
        out.push('\n');
    }

    fn list_close(&mut self, out: &mut String) {
        out.push('\n');
    }

    fn image(
        &mut self,
        out: &mut String,
        image: &ImageElement,
        layout: ImageLayout,
        _options: &RenderOptions,
    ) {
        // Alt keyword order: position, original alt text, sizing.
        let mut keywords: Vec<String> = Vec::new();
        match layout.position {
            Some(PositionHint::Center) => keywords.push("center".to_string()),
            Some(PositionHint::Left) => keywords.push("left".to_string()),
            Some(PositionHint::Right) => keywords.push("right".to_string()),
            None => {}
        }
        if !image.alt_text.is_empty() {
            keywords.push(image.alt_text.clone());
        }
        if let Some(width) = layout.scaled_width_px.filter(|w| *w > 0) {
            keywords.push(format!("w:{width}px"));
        }

        let alt = keywords.join(" ");
        let path = quote_path(&image.path);
        out.push_str(&format!("![{alt}]({path})\n\n"));
    }

    fn table(&mut self, out: &mut String, rows: &[Vec<String>]) {
        pipe_table(out, rows, ":-:");
    }

    fn code_block(
        &mut self,
        out: &mut String,
        code: &str,
        language: Option<&str>,
        _options: &RenderOptions,
    ) {
        fenced_code(out, code, language);
    }

    fn formula(&mut self, out: &mut String, content: &str) {
        let payload = display_math_payload(content);
        if payload.is_empty() {
            return;
        }
        out.push_str(&format!("$${payload}$$\n\n"));
    }

    fn notes(&mut self, out: &mut String, notes: &[String], _options: &RenderOptions) {
        out.push_str("<!--\n");
        for note in notes {
            out.push_str(note);
            out.push('\n');
        }
        out.push_str("-->\n\n");
    }

    fn split_open(&mut self, out: &mut String) {
        out.push_str("<div class=\"columns\">\n<div>\n\n");
    }

    fn split_next(&mut self, out: &mut String) {
        out.push_str("\n</div>\n<div>\n\n");
    }

    fn split_close(&mut self, out: &mut String) {
        out.push_str("\n</div>\n</div>\n\n");
    }

    fn escape(&self, text: &str) -> String {
        apply_escape_table(text, ESCAPES)
    }

    fn strong(&self, text: &str) -> String {
        wrap_with_delimiters(text, "**", "**")
    }

    fn accent(&self, text: &str) -> String {
        wrap_with_delimiters(text, "*", "*")
    }

    fn colored(&self, text: &str, rgb: (u8, u8, u8)) -> String {
        format!("<span style=\"color:{}\">{text}</span>", rgb_to_hex(rgb))
    }

    fn hyperlink(&self, text: &str, url: &str) -> String {
        format!("[{text}]({url})")
    }

    fn inline_code(&self, text: &str) -> String {
        // Marp-significant characters are escaped inside the backticks
        // rather than fenced around.
        format!("`{}`", self.escape(text))
    }
}
