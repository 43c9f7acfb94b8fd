//! Madoko markdown emitter. Close to plain Markdown, with a `[TOC]`
//! directive up front and attribute-block image sizing.

use crate::model::ImageElement;

use super::super::merge::wrap_with_delimiters;
use super::super::options::RenderOptions;
use super::{
    apply_escape_table, display_math_payload, fenced_code, pipe_table, rgb_to_hex, Dialect,
    DialectEmitter, ImageLayout,
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
];

#[derive(Debug, Default)]
pub struct MadokoEmitter;

impl MadokoEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl DialectEmitter for MadokoEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Madoko
    }

    fn document_open(&mut self, out: &mut String, _options: &RenderOptions) {
        out.push_str("[TOC]\n\n");
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
        options: &RenderOptions,
    ) {
        let path = image.path.replace('\\', "/");
        let alt = if options.disable_escaping {
            image.alt_text.clone()
        } else {
            self.escape(&image.alt_text)
        };
        match image.display_width_px {
            None => out.push_str(&format!("![{alt}]({path})\n\n")),
            Some(width) => {
                out.push_str(&format!("![{alt}]({path}){{width=\"{width}px\"}}\n\n"))
            }
        }
    }

    fn table(&mut self, out: &mut String, rows: &[Vec<String>]) {
        pipe_table(out, rows, ":-");
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

    fn escape(&self, text: &str) -> String {
        apply_escape_table(text, ESCAPES)
    }

    fn strong(&self, text: &str) -> String {
        wrap_with_delimiters(text, "__", "__")
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
    fn test_document_open_writes_toc() {
        let mut e = MadokoEmitter::new();
        let mut out = String::new();
        e.document_open(&mut out, &RenderOptions::default());
        assert_eq!(out, "[TOC]\n\n");
    }

    #[test]
    fn test_image_attribute_block() {
        let mut e = MadokoEmitter::new();
        let mut out = String::new();
        let img = ImageElement {
            display_width_px: Some(400),
            ..ImageElement::new("dir\\pic.png")
        };
        e.image(&mut out, &img, ImageLayout::default(), &RenderOptions::default());
        assert_eq!(out, "![](dir/pic.png){width=\"400px\"}\n\n");
    }

    #[test]
    fn test_table_left_aligned() {
        let mut e = MadokoEmitter::new();
        let mut out = String::new();
        e.table(
            &mut out,
            &[vec!["h".to_string()], vec!["v".to_string()]],
        );
        assert!(out.contains("| :- |"));
    }
}
