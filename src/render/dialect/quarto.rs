//! Quarto/RevealJS emitter. Markdown body syntax with a YAML front
//! matter header, fenced div columns and a fenced div notes block.

use crate::model::ImageElement;

use super::super::merge::wrap_with_delimiters;
use super::super::options::RenderOptions;
use super::{
    apply_escape_table, display_math_payload, fenced_code, pipe_table, quote_path, rgb_to_hex,
    Dialect, DialectEmitter, ImageLayout,
};

const ESCAPES: &[(char, &str)] = &[
    ('\\', "\\\\"),
    ('*', "\\*"),
    ('`', "\\`"),
    ('!', "\\!"),
    ('_', "\\_"),
    ('{', "\\{"),
    ('}', "\\}"),
    ('[', "\\["),
    (']', "\\]"),
    ('(', "\\("),
    (')', "\\)"),
    ('#', "\\#"),
    ('+', "\\+"),
    ('-', "\\-"),
    ('.', "\\."),
    ('|', "\\|"),
    ('<', "\\<"),
    ('>', "\\>"),
    ('\u{000B}', " "),
    ('\u{000C}', " "),
];

const HEADER: &str = r#"---
title: "Presentation Title"
author: "Author"
format:
  revealjs:
    slide-number: c/t
    width: 1600
    height: 900
    incremental: true
    theme: [simple]
---
"#;

#[derive(Debug, Default)]
pub struct QuartoEmitter;

impl QuartoEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Column width attribute for an n-column layout. Two and three
    /// columns use the conventional round values; anything else falls
    /// back to an even percentage split.
    fn column_width(count: usize) -> String {
        match count {
            0 => "100%".to_string(),
            2 => "50%".to_string(),
            3 => "33%".to_string(),
            n => format!("{:.0}%", 100.0 / n as f32),
        }
    }
}

impl DialectEmitter for QuartoEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Quarto
    }

    fn supports_native_columns(&self) -> bool {
        true
    }

    fn document_open(&mut self, out: &mut String, _options: &RenderOptions) {
        out.push_str(HEADER);
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
        _layout: ImageLayout,
        _options: &RenderOptions,
    ) {
        let path = quote_path(&image.path);
        let alt = if image.alt_text.is_empty() {
            "Image"
        } else {
            image.alt_text.as_str()
        };
        match image.display_width_px {
            None => out.push_str(&format!("![{alt}]({path})\n\n")),
            Some(width) => {
                out.push_str(&format!("![{alt}]({path}){{width=\"{width}px\"}}\n\n"))
            }
        }
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

    fn notes(&mut self, out: &mut String, notes: &[String], options: &RenderOptions) {
        self.paragraph(out, "::: {.notes}");
        for note in notes {
            let text = if options.disable_escaping {
                note.clone()
            } else {
                self.escape(note)
            };
            self.paragraph(out, &text);
        }
        self.paragraph(out, ":::");
    }

    fn columns_open(&mut self, out: &mut String, _count: usize) {
        self.paragraph(out, ":::: {.columns}");
    }

    fn column_open(&mut self, out: &mut String, _index: usize, count: usize) {
        let width = Self::column_width(count);
        self.paragraph(out, &format!("::: {{.column width=\"{width}\"}}"));
    }

    fn column_close(&mut self, out: &mut String) {
        self.paragraph(out, ":::");
    }

    fn columns_close(&mut self, out: &mut String) {
        self.paragraph(out, "::::");
    }

    fn escape(&self, text: &str) -> String {
        apply_escape_table(text, ESCAPES)
    }

    fn strong(&self, text: &str) -> String {
        wrap_with_delimiters(text, "**", "**")
    }

    fn accent(&self, text: &str) -> String {
        wrap_with_delimiters(text, "_", "_")
    }

    fn colored(&self, text: &str, rgb: (u8, u8, u8)) -> String {
        format!(" <span style=\"color:{}\">{text}</span> ", rgb_to_hex(rgb))
    }

    fn hyperlink(&self, text: &str, url: &str) -> String {
        format!("[{text}]({url})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_matter() {
        let mut e = QuartoEmitter::new();
        let mut out = String::new();
        e.document_open(&mut out, &RenderOptions::default());
        assert!(out.starts_with("---\n"));
        assert!(out.contains("revealjs:"));
    }

    #[test]
    fn test_column_widths() {
        assert_eq!(QuartoEmitter::column_width(2), "50%");
        assert_eq!(QuartoEmitter::column_width(3), "33%");
        assert_eq!(QuartoEmitter::column_width(4), "25%");
        assert_eq!(QuartoEmitter::column_width(0), "100%");
    }

    #[test]
    fn test_column_construct() {
        let mut e = QuartoEmitter::new();
        let mut out = String::new();
        e.columns_open(&mut out, 2);
        e.column_open(&mut out, 0, 2);
        e.paragraph(&mut out, "left");
        e.column_close(&mut out);
        e.columns_close(&mut out);
        assert!(out.contains(":::: {.columns}\n\n"));
        assert!(out.contains("::: {.column width=\"50%\"}\n\n"));
        assert!(out.ends_with("::::\n\n"));
    }

    #[test]
    fn test_notes_block() {
        let mut e = QuartoEmitter::new();
        let mut out = String::new();
        e.notes(
            &mut out,
            &["remember this".to_string()],
            &RenderOptions::default(),
        );
        assert!(out.starts_with("::: {.notes}\n\n"));
        assert!(out.contains("remember this"));
        assert!(out.ends_with(":::\n\n"));
    }

    #[test]
    fn test_strong_uses_asterisks() {
        let e = QuartoEmitter::new();
        assert_eq!(e.strong("x"), "**x**");
    }
}
