//! LaTeX Beamer emitter.
//!
//! The only stateful emitter: itemize environments are opened and closed
//! incrementally as list depth changes (clamped to LaTeX's four levels),
//! and the per-slide font-scale group must be balanced across body hooks.

use crate::model::{ImageElement, PositionHint};

use super::super::merge::wrap_with_delimiters;
use super::super::metrics::DensityClass;
use super::super::options::RenderOptions;
use super::{apply_escape_table, display_math_payload, Dialect, DialectEmitter, ImageLayout, SlideChrome};

/// LaTeX itemize nests at most four levels deep.
const MAX_LIST_DEPTH: u32 = 4;

const ESCAPES: &[(char, &str)] = &[
    ('\\', "\\textbackslash{}"),
    ('{', "\\{"),
    ('}', "\\}"),
    ('&', "\\&"),
    ('%', "\\%"),
    ('$', "\\$"),
    ('#', "\\#"),
    ('_', "\\_"),
    ('^', "\\textasciicircum{}"),
    ('~', "\\textasciitilde{}"),
    ('<', "\\textless{}"),
    ('>', "\\textgreater{}"),
    ('|', "\\textbar{}"),
    ('"', "''"),
    ('\u{2019}', "'"),
    ('\u{2018}', "`"),
    ('\u{201C}', "``"),
    ('\u{201D}', "''"),
    ('\u{2013}', "--"),
    ('\u{2014}', "---"),
    ('\u{00A0}', "~"),
    ('\u{000B}', " "),
    ('\u{000C}', " "),
];

/// Escapes for text inside `\texttt{…}`, where only grouping characters
/// and the backslash need protecting.
const VERBATIM_ESCAPES: &[(char, &str)] = &[
    ('\\', "\\textbackslash{}"),
    ('{', "\\{"),
    ('}', "\\}"),
];

/// Escapes for path and URL arguments. Backslashes are normalized to `/`
/// before this table applies.
const URL_ESCAPES: &[(char, &str)] = &[
    ('%', "\\%"),
    ('#', "\\#"),
    ('&', "\\&"),
    ('_', "\\_"),
    ('~', "\\textasciitilde{}"),
    ('^', "\\textasciicircum{}"),
    ('$', "\\$"),
    ('{', "\\{"),
    ('}', "\\}"),
];

const PREAMBLE: &str = r#"\documentclass[aspectratio=169]{beamer}
\usetheme{default}

\usepackage[utf8]{inputenc}
\usepackage{graphicx}
\usepackage{booktabs}
\usepackage{xcolor}
\usepackage{hyperref}
\usepackage{amsmath}
\usepackage{amssymb}
\usepackage{wrapfig}
\usepackage{float}
\usepackage{listings}

\beamertemplatenavigationsymbolsempty

\begin{document}

"#;

#[derive(Debug, Default)]
pub struct BeamerEmitter {
    list_depth: u32,
    font_scale_open: bool,
}

impl BeamerEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    fn escape_url(&self, path: &str) -> String {
        apply_escape_table(&path.replace('\\', "/"), URL_ESCAPES)
    }

    fn escape_verbatim(&self, text: &str) -> String {
        apply_escape_table(text, VERBATIM_ESCAPES)
    }

    /// Open or close itemize environments until the nesting matches
    /// `target` (1-indexed).
    fn adjust_list_depth(&mut self, out: &mut String, target: u32) {
        while self.list_depth < target {
            out.push_str(&"  ".repeat(self.list_depth as usize));
            out.push_str("\\begin{itemize}\n");
            self.list_depth += 1;
        }
        while self.list_depth > target {
            self.list_depth -= 1;
            out.push_str(&"  ".repeat(self.list_depth as usize));
            out.push_str("\\end{itemize}\n");
        }
    }

    /// Image width as a fraction of the slide, clamped to a usable range.
    fn width_fraction(image: &ImageElement, options: &RenderOptions, lo: f32, hi: f32, default: f32) -> f32 {
        match (image.display_width_px, options.slide_width_px) {
            (Some(w), slide) if slide > 0 => (w as f32 / slide as f32).clamp(lo, hi),
            _ => default,
        }
    }
}

impl DialectEmitter for BeamerEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Beamer
    }

    fn supports_native_columns(&self) -> bool {
        true
    }

    fn supports_column_split(&self) -> bool {
        true
    }

    fn max_list_depth(&self) -> Option<u32> {
        Some(MAX_LIST_DEPTH)
    }

    fn document_open(&mut self, out: &mut String, _options: &RenderOptions) {
        out.push_str(PREAMBLE);
    }

    fn document_close(&mut self, out: &mut String) {
        out.push_str("\\end{document}\n");
    }

    fn begin_slide(&mut self, out: &mut String, _chrome: &SlideChrome) {
        out.push_str("\\begin{frame}");
    }

    fn slide_title(&mut self, out: &mut String, text: &str, _level: u32, options: &RenderOptions) {
        let title = if options.disable_escaping {
            text.to_string()
        } else {
            self.escape(text)
        };
        out.push_str(&format!("\n\\frametitle{{{title}}}\n"));
    }

    fn body_open(&mut self, out: &mut String, chrome: &SlideChrome) {
        let scale = match chrome.density {
            DensityClass::None => None,
            DensityClass::Small => Some("\\small"),
            DensityClass::Smaller => Some("\\footnotesize"),
            DensityClass::Smallest => Some("\\scriptsize"),
        };
        if let Some(scale) = scale {
            out.push_str(&format!("{{{scale}\n"));
            self.font_scale_open = true;
        }
    }

    fn body_close(&mut self, out: &mut String) {
        if self.font_scale_open {
            out.push_str("\n}\n");
            self.font_scale_open = false;
        }
    }

    fn end_slide(&mut self, out: &mut String, _chrome: &SlideChrome) {
        out.push_str("\\end{frame}\n\n");
    }

    fn empty_slide(&mut self, out: &mut String) {
        out.push_str("\\begin{frame}{}\\end{frame}\n\n");
    }

    fn slide_separator(&mut self, _out: &mut String) {
        // Frames are self-delimiting.
    }

    fn heading(&mut self, out: &mut String, text: &str, level: u32, options: &RenderOptions) {
        let title = if options.disable_escaping {
            text.to_string()
        } else {
            self.escape(text)
        };
        match level {
            1 => out.push_str(&format!("\\begin{{block}}{{{title}}}\n\\end{{block}}\n\n")),
            2 => out.push_str(&format!("\\textbf{{{title}}}\\par\n\n")),
            _ => out.push_str(&format!("\\textit{{{title}}}\\par\n\n")),
        }
    }

    fn paragraph(&mut self, out: &mut String, text: &str) {
        out.push_str(text);
        out.push_str("\n\n");
    }

    fn list_item(&mut self, out: &mut String, text: &str, level: u32) {
        let clamped = level.min(MAX_LIST_DEPTH - 1);
        self.adjust_list_depth(out, clamped + 1);
        out.push_str(&"  ".repeat(clamped as usize));
        out.push_str("\\item ");
        out.push_str(text.trim());
        out.push('\n');
    }

    fn list_close(&mut self, out: &mut String) {
        self.adjust_list_depth(out, 0);
    }

    fn image(
        &mut self,
        out: &mut String,
        image: &ImageElement,
        layout: ImageLayout,
        options: &RenderOptions,
    ) {
        let path = self.escape_url(&image.path);
        let caption = if image.alt_text.is_empty() || options.disable_captions {
            None
        } else {
            Some(self.escape(&image.alt_text))
        };

        let wrap_side = match layout.position {
            Some(PositionHint::Left) if !options.disable_image_wrapping => Some('l'),
            Some(PositionHint::Right) if !options.disable_image_wrapping => Some('r'),
            _ => None,
        };

        if let Some(side) = wrap_side {
            let frac = Self::width_fraction(image, options, 0.25, 0.6, 0.4);
            out.push_str(&format!("\\begin{{wrapfigure}}{{{side}}}{{{frac:.2}\\linewidth}}\n"));
            out.push_str("  \\centering\n");
            out.push_str(&format!(
                "  \\includegraphics[width=\\linewidth,keepaspectratio]{{{path}}}\n"
            ));
            if let Some(caption) = caption {
                out.push_str(&format!("  \\caption{{{caption}}}\n"));
            }
            out.push_str("\\end{wrapfigure}\n");
        } else {
            let frac = Self::width_fraction(image, options, 0.2, 0.85, 0.7);
            out.push_str("\\begin{figure}[H]\n  \\centering\n");
            out.push_str(&format!(
                "  \\includegraphics[width={frac:.2}\\textwidth,keepaspectratio]{{{path}}}\n"
            ));
            if let Some(caption) = caption {
                out.push_str(&format!("  \\caption{{{caption}}}\n"));
            }
            out.push_str("\\end{figure}\n\n");
        }
    }

    fn table(&mut self, out: &mut String, rows: &[Vec<String>]) {
        if rows.is_empty() || rows[0].is_empty() {
            return;
        }
        let spec = "l".repeat(rows[0].len());
        out.push_str("\\begin{table}[H]\n  \\centering\n");
        out.push_str(&format!("  \\begin{{tabular}}{{{spec}}}\n"));
        out.push_str("    \\toprule\n");
        out.push_str(&format!("    {} \\\\\n", rows[0].join(" & ")));
        out.push_str("    \\midrule\n");
        for row in &rows[1..] {
            out.push_str(&format!("    {} \\\\\n", row.join(" & ")));
        }
        out.push_str("    \\bottomrule\n  \\end{tabular}\n\\end{table}\n\n");
    }

    fn code_block(
        &mut self,
        out: &mut String,
        code: &str,
        language: Option<&str>,
        options: &RenderOptions,
    ) {
        let body = code.trim_matches('\n');
        match language {
            Some(lang) if options.use_listings => out.push_str(&format!(
                "\\begin{{lstlisting}}[basicstyle=\\ttfamily\\footnotesize,language={lang}]\n{body}\n\\end{{lstlisting}}\n\n"
            )),
            _ => out.push_str(&format!("\\begin{{verbatim}}\n{body}\n\\end{{verbatim}}\n\n")),
        }
    }

    fn formula(&mut self, out: &mut String, content: &str) {
        let payload = display_math_payload(content);
        if payload.is_empty() {
            return;
        }
        out.push_str(&format!("\\[\n{payload}\n\\]\n\n"));
    }

    fn notes(&mut self, out: &mut String, notes: &[String], options: &RenderOptions) {
        let escaped: Vec<String> = notes
            .iter()
            .map(|n| {
                if options.disable_escaping {
                    n.clone()
                } else {
                    self.escape(n)
                }
            })
            .collect();
        out.push_str(&format!("\\note{{{}}}\n", escaped.join("\n")));
    }

    fn columns_open(&mut self, out: &mut String, _count: usize) {
        out.push_str("\\begin{columns}[T]\n");
    }

    fn column_open(&mut self, out: &mut String, _index: usize, count: usize) {
        let width = 1.0 / count.max(1) as f32;
        out.push_str(&format!("  \\column{{{width:.2}\\textwidth}}\n"));
    }

    fn columns_close(&mut self, out: &mut String) {
        out.push_str("\\end{columns}\n");
    }

    fn split_open(&mut self, out: &mut String) {
        out.push_str("\\begin{columns}[T]\n  \\column{0.48\\textwidth}\n");
    }

    fn split_next(&mut self, out: &mut String) {
        out.push_str("  \\column{0.48\\textwidth}\n");
    }

    fn split_close(&mut self, out: &mut String) {
        out.push_str("\\end{columns}\n");
    }

    fn escape(&self, text: &str) -> String {
        apply_escape_table(text, ESCAPES)
    }

    fn strong(&self, text: &str) -> String {
        wrap_with_delimiters(text, "\\textbf{", "}")
    }

    fn accent(&self, text: &str) -> String {
        wrap_with_delimiters(text, "\\textit{", "}")
    }

    fn colored(&self, text: &str, rgb: (u8, u8, u8)) -> String {
        format!("\\textcolor[RGB]{{{},{},{}}}{{{text}}}", rgb.0, rgb.1, rgb.2)
    }

    fn hyperlink(&self, text: &str, url: &str) -> String {
        format!("\\href{{{}}}{{{text}}}", self.escape_url(url))
    }

    fn inline_code(&self, text: &str) -> String {
        format!("\\texttt{{{}}}", self.escape_verbatim(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome(density: DensityClass) -> SlideChrome {
        SlideChrome {
            density,
            is_last: false,
        }
    }

    #[test]
    fn test_frame_chrome() {
        let mut e = BeamerEmitter::new();
        let options = RenderOptions::default();
        let mut out = String::new();
        e.begin_slide(&mut out, &chrome(DensityClass::Small));
        e.slide_title(&mut out, "Results & Methods", 1, &options);
        e.body_open(&mut out, &chrome(DensityClass::Small));
        e.paragraph(&mut out, "body");
        e.body_close(&mut out);
        e.end_slide(&mut out, &chrome(DensityClass::Small));
        assert!(out.starts_with("\\begin{frame}\n\\frametitle{Results \\& Methods}\n"));
        assert!(out.contains("{\\small\n"));
        assert!(out.contains("body\n\n\n}\n"));
        assert!(out.ends_with("\\end{frame}\n\n"));
    }

    #[test]
    fn test_no_font_scale_for_sparse_slides() {
        let mut e = BeamerEmitter::new();
        let mut out = String::new();
        e.body_open(&mut out, &chrome(DensityClass::None));
        e.body_close(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_itemize_nesting_and_clamp() {
        let mut e = BeamerEmitter::new();
        let mut out = String::new();
        e.list_item(&mut out, "top", 0);
        e.list_item(&mut out, "deep", 2);
        e.list_item(&mut out, "deeper than latex allows", 9);
        e.list_item(&mut out, "top again", 0);
        e.list_close(&mut out);

        assert_eq!(out.matches("\\begin{itemize}").count(), 4);
        assert_eq!(out.matches("\\end{itemize}").count(), 4);
        // Depth 9 clamps to the fourth level.
        assert!(out.contains("      \\item deeper than latex allows\n"));
        // Returning to the top closes the inner levels before the item.
        let top_again = out.find("\\item top again").unwrap();
        let last_close = out[..top_again].rfind("\\end{itemize}").unwrap();
        assert!(last_close < top_again);
    }

    #[test]
    fn test_table_booktabs() {
        let mut e = BeamerEmitter::new();
        let mut out = String::new();
        e.table(
            &mut out,
            &[
                vec!["a".to_string(), "b".to_string()],
                vec!["1".to_string(), "2".to_string()],
            ],
        );
        assert!(out.contains("\\begin{tabular}{ll}"));
        assert!(out.contains("    a & b \\\\\n"));
        assert!(out.contains("\\toprule"));
        assert!(out.contains("\\midrule"));
        assert!(out.contains("\\bottomrule"));
    }

    #[test]
    fn test_image_wrapfigure_for_side_placement() {
        let mut e = BeamerEmitter::new();
        let options = RenderOptions::default();
        let img = ImageElement {
            display_width_px: Some(480),
            ..ImageElement::new("fig.png")
        };
        let mut out = String::new();
        e.image(
            &mut out,
            &img,
            ImageLayout {
                position: Some(PositionHint::Left),
                scaled_width_px: None,
            },
            &options,
        );
        // 480/1600 = 0.30 of the slide width.
        assert!(out.starts_with("\\begin{wrapfigure}{l}{0.30\\linewidth}\n"));
        assert!(out.contains("\\includegraphics[width=\\linewidth,keepaspectratio]{fig.png}"));
    }

    #[test]
    fn test_image_centered_figure() {
        let mut e = BeamerEmitter::new();
        let options = RenderOptions::default();
        let img = ImageElement::new("fig.png");
        let mut out = String::new();
        e.image(&mut out, &img, ImageLayout::default(), &options);
        assert!(out.starts_with("\\begin{figure}[H]\n"));
        assert!(out.contains("width=0.70\\textwidth"));
    }

    #[test]
    fn test_code_block_listings_option() {
        let mut e = BeamerEmitter::new();
        let mut out = String::new();
        e.code_block(&mut out, "\nfn main() {}\n", Some("rust"), &RenderOptions::default());
        assert!(out.starts_with("\\begin{verbatim}\nfn main() {}\n"));

        out.clear();
        let options = RenderOptions {
            use_listings: true,
            ..Default::default()
        };
        e.code_block(&mut out, "fn main() {}", Some("rust"), &options);
        assert!(out.contains("language=rust]"));
    }

    #[test]
    fn test_formula_normalizes_delimiters() {
        let mut e = BeamerEmitter::new();
        let mut out = String::new();
        e.formula(&mut out, "$$\\sum_i x_i$$");
        assert_eq!(out, "\\[\n\\sum_i x_i\n\\]\n\n");
    }

    #[test]
    fn test_escape_smart_punctuation() {
        let e = BeamerEmitter::new();
        assert_eq!(e.escape("a\u{2014}b"), "a---b");
        assert_eq!(e.escape("\u{201C}hi\u{201D}"), "``hi''");
        assert_eq!(e.escape("50%"), "50\\%");
    }

    #[test]
    fn test_inline_primitives() {
        let e = BeamerEmitter::new();
        assert_eq!(e.strong("x"), "\\textbf{x}");
        assert_eq!(e.accent("x"), "\\textit{x}");
        assert_eq!(e.inline_code("a_b"), "\\texttt{a_b}");
        assert_eq!(
            e.hyperlink("site", "https://a.io/x_y"),
            "\\href{https://a.io/x\\_y}{site}"
        );
        assert_eq!(e.colored("x", (1, 2, 3)), "\\textcolor[RGB]{1,2,3}{x}");
    }
}
