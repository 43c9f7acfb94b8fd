//! Standard Markdown emitter.

use crate::model::ImageElement;

use super::super::merge::wrap_with_delimiters;
use super::super::options::RenderOptions;
use super::{
    apply_escape_table, display_math_payload, fenced_code, pipe_table, quote_path, rgb_to_hex,
    Dialect, DialectEmitter, ImageLayout,
};

/// Characters that would change meaning in Markdown body text, each
/// backslash-escaped.
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
pub struct MarkdownEmitter;

impl MarkdownEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl DialectEmitter for MarkdownEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Markdown
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
            Some(width) => out.push_str(&format!(
                "<img src=\"{path}\" alt=\"{alt}\" style=\"max-width:{width}px;\" />\n\n"
            )),
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

    fn emitter() -> MarkdownEmitter {
        MarkdownEmitter::new()
    }

    #[test]
    fn test_title_and_list() {
        let mut e = emitter();
        let options = RenderOptions::default();
        let mut out = String::new();
        e.slide_title(&mut out, "Heading", 2, &options);
        e.list_item(&mut out, "first", 0);
        e.list_item(&mut out, "nested", 1);
        e.list_close(&mut out);
        assert_eq!(out, "## Heading\n\n* first\n  * nested\n\n");
    }

    #[test]
    fn test_image_with_and_without_width() {
        let mut e = emitter();
        let options = RenderOptions::default();
        let mut out = String::new();
        e.image(
            &mut out,
            &ImageElement::new("img/pic one.png"),
            ImageLayout::default(),
            &options,
        );
        assert_eq!(out, "![Image](img/pic%20one.png)\n\n");

        out.clear();
        let img = ImageElement {
            display_width_px: Some(320),
            alt_text: "chart".to_string(),
            ..ImageElement::new("a.png")
        };
        e.image(&mut out, &img, ImageLayout::default(), &options);
        assert_eq!(
            out,
            "<img src=\"a.png\" alt=\"chart\" style=\"max-width:320px;\" />\n\n"
        );
    }

    #[test]
    fn test_escape() {
        let e = emitter();
        assert_eq!(e.escape("a*b_c"), "a\\*b\\_c");
        assert_eq!(e.escape("<b>"), "\\<b\\>");
    }

    #[test]
    fn test_formula_normalizes_wrappers() {
        let mut e = emitter();
        let mut out = String::new();
        e.formula(&mut out, "$$e = mc^2$$");
        assert_eq!(out, "$$e = mc^2$$\n\n");
    }

    #[test]
    fn test_decorations() {
        let e = emitter();
        assert_eq!(e.strong("x"), "__x__");
        assert_eq!(e.accent(" x "), " _x_ ");
        assert_eq!(e.hyperlink("here", "https://a.io"), "[here](https://a.io)");
        assert_eq!(
            e.colored("x", (255, 0, 0)),
            " <span style=\"color:#ff0000\">x</span> "
        );
    }
}
