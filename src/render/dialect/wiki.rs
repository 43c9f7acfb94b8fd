//! Wikitext emitter. HTML-entity escaping, `=`-fenced headings, quote
//! runs for emphasis and `wikitable` markup.

use log::warn;

use crate::model::ImageElement;

use super::super::merge::wrap_with_delimiters;
use super::super::options::RenderOptions;
use super::{
    apply_escape_table, display_math_payload, rgb_to_hex, Dialect, DialectEmitter, ImageLayout,
};

/// Wiki-significant characters mapped to HTML entities.
const ESCAPES: &[(char, &str)] = &[
    ('[', "&#91;"),
    (']', "&#93;"),
    ('|', "&#124;"),
    ('{', "&#123;"),
    ('}', "&#125;"),
    ('=', "&#61;"),
    ('*', "&#42;"),
    ('#', "&#35;"),
    ('\'', "&#39;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('&', "&amp;"),
];

#[derive(Debug, Default)]
pub struct WikiEmitter;

impl WikiEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl DialectEmitter for WikiEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Wiki
    }

    fn slide_title(&mut self, out: &mut String, text: &str, level: u32, _options: &RenderOptions) {
        let fence = "=".repeat(level as usize + 1);
        out.push_str(&format!("{fence} {text} {fence}\n\n"));
    }

    fn paragraph(&mut self, out: &mut String, text: &str) {
        out.push_str(text);
        out.push_str("\n\n");
    }

    fn list_item(&mut self, out: &mut String, text: &str, level: u32) {
        out.push_str(&"*".repeat(level as usize + 1));
        out.push(' ');
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
        let path = if options.disable_escaping {
            image.path.clone()
        } else {
            self.escape(&image.path)
        };
        match image.display_width_px {
            None => out.push_str(&format!("[[File:{path}]]\n\n")),
            Some(width) => out.push_str(&format!("[[File:{path}|{width}px]]\n\n")),
        }
    }

    fn table(&mut self, out: &mut String, rows: &[Vec<String>]) {
        if rows.is_empty() || rows[0].is_empty() {
            return;
        }
        let cell = |c: &String| c.replace('\n', "<br />");

        out.push_str("{| class=\"wikitable\"\n");
        let header: Vec<String> = rows[0].iter().map(|c| format!("! {}", cell(c))).collect();
        out.push_str(&header.join(" "));
        out.push('\n');
        for row in &rows[1..] {
            out.push_str("|-\n");
            for c in row {
                out.push_str(&format!("| {}\n", cell(c)));
            }
        }
        out.push_str("|}\n\n");
    }

    fn code_block(
        &mut self,
        out: &mut String,
        code: &str,
        language: Option<&str>,
        options: &RenderOptions,
    ) {
        let body = if options.disable_escaping {
            code.trim().to_string()
        } else {
            self.escape(code.trim())
        };
        match language {
            Some(lang) => out.push_str(&format!(
                "<syntaxhighlight lang=\"{lang}\">\n{body}\n</syntaxhighlight>\n\n"
            )),
            None => out.push_str(&format!("<syntaxhighlight>\n{body}\n</syntaxhighlight>\n\n")),
        }
    }

    fn formula(&mut self, out: &mut String, content: &str) {
        // No display-math syntax in plain wikitext; fall back to the raw
        // math text.
        warn!("wiki output has no display-math construct, emitting raw formula text");
        let payload = display_math_payload(content);
        if payload.is_empty() {
            return;
        }
        self.paragraph(out, payload);
    }

    fn escape(&self, text: &str) -> String {
        apply_escape_table(text, ESCAPES)
    }

    fn strong(&self, text: &str) -> String {
        wrap_with_delimiters(text, "'''", "'''")
    }

    fn accent(&self, text: &str) -> String {
        wrap_with_delimiters(text, "''", "''")
    }

    fn colored(&self, text: &str, rgb: (u8, u8, u8)) -> String {
        format!(" <span style=\"color:{}\">{text}</span> ", rgb_to_hex(rgb))
    }

    fn hyperlink(&self, text: &str, url: &str) -> String {
        format!("[{} {text}]", self.escape(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_fences() {
        let mut e = WikiEmitter::new();
        let mut out = String::new();
        e.slide_title(&mut out, "Intro", 1, &RenderOptions::default());
        assert_eq!(out, "== Intro ==\n\n");
    }

    #[test]
    fn test_list_stars() {
        let mut e = WikiEmitter::new();
        let mut out = String::new();
        e.list_item(&mut out, "a", 0);
        e.list_item(&mut out, "b", 1);
        assert_eq!(out, "* a\n** b\n");
    }

    #[test]
    fn test_wikitable() {
        let mut e = WikiEmitter::new();
        let mut out = String::new();
        e.table(
            &mut out,
            &[
                vec!["h1".to_string(), "h2".to_string()],
                vec!["a".to_string(), "b".to_string()],
            ],
        );
        assert!(out.starts_with("{| class=\"wikitable\"\n"));
        assert!(out.contains("! h1 ! h2\n"));
        assert!(out.contains("|-\n| a\n| b\n"));
        assert!(out.ends_with("|}\n\n"));
    }

    #[test]
    fn test_entity_escape() {
        let e = WikiEmitter::new();
        assert_eq!(e.escape("[a|b]"), "&#91;a&#124;b&#93;");
        assert_eq!(e.escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_quote_emphasis() {
        let e = WikiEmitter::new();
        assert_eq!(e.strong("x"), "'''x'''");
        assert_eq!(e.accent("x"), "''x''");
    }

    #[test]
    fn test_image_file_link() {
        let mut e = WikiEmitter::new();
        let mut out = String::new();
        let img = ImageElement {
            display_width_px: Some(200),
            ..ImageElement::new("pic.png")
        };
        e.image(&mut out, &img, ImageLayout::default(), &RenderOptions::default());
        assert_eq!(out, "[[File:pic.png|200px]]\n\n");
    }
}
