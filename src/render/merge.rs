//! Style-run merging and segment formatting.
//!
//! Adjacent runs with identical style are coalesced into one logical
//! segment before any markup is applied, so a word split across runs by the
//! source presentation never grows delimiter boundaries mid-word.

use crate::model::{TextRun, TextStyle};

use super::dialect::DialectEmitter;
use super::options::RenderOptions;

/// Merge a list of text runs into one formatted string.
///
/// Runs are walked left to right and accumulated while their styles compare
/// field-wise equal; each closed segment is then formatted through the
/// dialect's primitives. Only the final concatenation is trimmed, never the
/// individual segments.
pub fn merge_runs(
    runs: &[TextRun],
    emitter: &dyn DialectEmitter,
    options: &RenderOptions,
) -> String {
    if runs.is_empty() {
        return String::new();
    }

    let mut segments: Vec<String> = Vec::new();
    let mut current_text = String::new();
    let mut current_style: Option<&TextStyle> = None;

    for run in runs {
        let verbatim = run.style.is_code || run.style.is_math;
        let normalized = normalize_run_text(&run.text, verbatim);

        match current_style {
            Some(style) if *style == run.style => current_text.push_str(&normalized),
            Some(style) => {
                segments.push(format_segment(&current_text, style, emitter, options));
                current_text = normalized;
                current_style = Some(&run.style);
            }
            None => {
                current_text = normalized;
                current_style = Some(&run.style);
            }
        }
    }
    if let Some(style) = current_style {
        segments.push(format_segment(&current_text, style, emitter, options));
    }

    segments.concat().trim().to_string()
}

/// Normalize whitespace in a single run's text.
///
/// Non-breaking and narrow non-breaking spaces become ordinary spaces.
/// Vertical-tab and form-feed control characters are stripped, except in
/// code/math runs where they must survive verbatim.
fn normalize_run_text(text: &str, verbatim: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{00A0}' | '\u{202F}' => out.push(' '),
            '\u{000B}' | '\u{000C}' if !verbatim => {}
            _ => out.push(c),
        }
    }
    out
}

fn format_segment(
    text: &str,
    style: &TextStyle,
    emitter: &dyn DialectEmitter,
    options: &RenderOptions,
) -> String {
    if text.is_empty() && !style.is_code && !style.is_math {
        return String::new();
    }

    // Code and math are rendered verbatim; escaping and decorations are
    // skipped entirely.
    if style.is_code {
        return emitter.inline_code(text);
    }
    if style.is_math {
        return emitter.inline_math(text);
    }

    let mut formatted = if options.disable_escaping {
        text.to_string()
    } else {
        emitter.escape(text)
    };

    // Fixed nesting: strong wraps first, so accent(strong(text)) when both
    // flags are set.
    if style.is_strong {
        formatted = emitter.strong(&formatted);
    }
    if style.is_accent {
        formatted = emitter.accent(&formatted);
    }
    if let Some(rgb) = style.color_rgb {
        if !options.disable_color {
            formatted = emitter.colored(&formatted, rgb);
        }
    }
    if let Some(ref url) = style.hyperlink {
        formatted = emitter.hyperlink(&formatted, url);
    }

    formatted
}

/// Wrap text as backtick-fenced inline code.
///
/// The fence is one backtick longer than the longest backtick run inside
/// the text, so no premature fence closure is possible. When the text
/// starts or ends with a backtick, or is entirely whitespace, a single
/// space pads each side to satisfy CommonMark disambiguation. Empty text
/// yields empty output.
pub fn inline_code_fence(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut longest = 0usize;
    let mut current = 0usize;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    let fence = "`".repeat(longest + 1);
    let needs_padding = text.starts_with('`')
        || text.ends_with('`')
        || text.chars().all(char::is_whitespace);

    if needs_padding {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}

/// Wrap text as `$`-delimited inline math.
///
/// Overall leading/trailing whitespace stays outside the delimiters. An
/// existing single outer `$…$` pair is removed before re-wrapping; a
/// `$$…$$` pair is already display-style and passes through untouched.
/// Trailing non-math whitespace inside the candidate is preserved after
/// the closing `$`. An empty or all-whitespace payload renders as `$ $`.
pub fn inline_math(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    if core.len() >= 4 && core.starts_with("$$") && core.ends_with("$$") {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[leading.len() + core.len()..];

    let candidate = if core.len() >= 2 && core.starts_with('$') && core.ends_with('$') {
        &core[1..core.len() - 1]
    } else {
        core
    };

    let symbols = candidate.trim_end();
    let internal_trailing = &candidate[symbols.len()..];
    let symbols = symbols.trim();

    let wrapped = if symbols.is_empty() {
        "$ $".to_string()
    } else {
        format!("${symbols}$")
    };

    format!("{leading}{wrapped}{internal_trailing}{trailing}")
}

/// Wrap the non-whitespace core of `text` in a delimiter pair, keeping the
/// original leading/trailing whitespace outside the delimiters. Text that
/// is entirely whitespace is returned unchanged, never as an empty
/// delimiter pair.
pub fn wrap_with_delimiters(text: &str, open: &str, close: &str) -> String {
    if text.is_empty() {
        return text.to_string();
    }
    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[leading.len() + core.len()..];
    format!("{leading}{open}{core}{close}{trailing}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::dialect::{Dialect, DialectEmitter};

    fn markdown() -> Box<dyn DialectEmitter> {
        Dialect::Markdown.emitter()
    }

    fn run(text: &str, style: TextStyle) -> TextRun {
        TextRun::styled(text, style)
    }

    #[test]
    fn test_merge_uniform_style_round_trip() {
        let emitter = markdown();
        let options = RenderOptions::default();
        let style = TextStyle {
            is_strong: true,
            ..Default::default()
        };
        let runs = vec![
            run("Hel", style.clone()),
            run("lo ", style.clone()),
            run("world", style.clone()),
        ];
        let merged = merge_runs(&runs, emitter.as_ref(), &options);
        let single = merge_runs(
            &[run("Hello world", style)],
            emitter.as_ref(),
            &options,
        );
        assert_eq!(merged, single);
        assert_eq!(merged, "__Hello world__");
    }

    #[test]
    fn test_merge_idempotent() {
        let emitter = markdown();
        let options = RenderOptions::default();
        let runs = vec![run("plain text", TextStyle::default())];
        let once = merge_runs(&runs, emitter.as_ref(), &options);
        let twice = merge_runs(
            &[run(&once, TextStyle::default())],
            emitter.as_ref(),
            &options,
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_style_change_closes_segment() {
        let emitter = markdown();
        let options = RenderOptions::default();
        let runs = vec![
            run("normal ", TextStyle::default()),
            run(
                "bold",
                TextStyle {
                    is_strong: true,
                    ..Default::default()
                },
            ),
        ];
        let merged = merge_runs(&runs, emitter.as_ref(), &options);
        assert_eq!(merged, "normal __bold__");
    }

    #[test]
    fn test_code_skips_escaping_and_decorations() {
        let emitter = markdown();
        let options = RenderOptions::default();
        let runs = vec![run(
            "a*b",
            TextStyle {
                is_code: true,
                is_strong: true,
                ..Default::default()
            },
        )];
        let merged = merge_runs(&runs, emitter.as_ref(), &options);
        assert_eq!(merged, "`a*b`");
    }

    #[test]
    fn test_accent_wraps_strong() {
        let emitter = markdown();
        let options = RenderOptions::default();
        let runs = vec![run(
            "both",
            TextStyle {
                is_strong: true,
                is_accent: true,
                ..Default::default()
            },
        )];
        let merged = merge_runs(&runs, emitter.as_ref(), &options);
        assert_eq!(merged, "___both___");
    }

    #[test]
    fn test_normalize_nbsp_and_vertical_tab() {
        assert_eq!(normalize_run_text("a\u{00A0}b\u{202F}c", false), "a b c");
        assert_eq!(normalize_run_text("a\u{000B}b\u{000C}c", false), "abc");
        // Verbatim runs keep control characters.
        assert_eq!(normalize_run_text("a\u{000B}b", true), "a\u{000B}b");
    }

    #[test]
    fn test_inline_code_fence_lengths() {
        assert_eq!(inline_code_fence("plain"), "`plain`");
        assert_eq!(inline_code_fence("a`b"), "``a`b``");
        assert_eq!(inline_code_fence("a``b"), "```a``b```");
        assert_eq!(inline_code_fence(""), "");
    }

    #[test]
    fn test_inline_code_fence_padding() {
        // A boundary backtick would be ambiguous without space padding.
        assert_eq!(inline_code_fence("`"), "`` ` ``");
        assert_eq!(inline_code_fence("`a`"), "`` `a` ``");
        assert_eq!(inline_code_fence("   "), "`     `");
    }

    #[test]
    fn test_inline_math_rewrap() {
        assert_eq!(inline_math("x_s"), "$x_s$");
        assert_eq!(inline_math("$x_s$"), "$x_s$");
        assert_eq!(inline_math(" x_s "), " $x_s$ ");
        assert_eq!(inline_math("$$x$$"), "$$x$$");
    }

    #[test]
    fn test_inline_math_empty_payload() {
        assert_eq!(inline_math("$$"), "$ $");
        assert_eq!(inline_math("  "), "  ");
    }

    #[test]
    fn test_wrap_with_delimiters_whitespace() {
        assert_eq!(wrap_with_delimiters(" x ", "*", "*"), " *x* ");
        assert_eq!(wrap_with_delimiters("   ", "*", "*"), "   ");
        assert_eq!(wrap_with_delimiters("", "*", "*"), "");
    }

    #[test]
    fn test_wrap_with_delimiters_asymmetric_whitespace() {
        // Core longer than any surrounding whitespace must not over-index.
        assert_eq!(wrap_with_delimiters("headline", "__", "__"), "__headline__");
        assert_eq!(wrap_with_delimiters("bold ", "__", "__"), "__bold__ ");
        assert_eq!(wrap_with_delimiters("  b", "*", "*"), "  *b*");
        assert_eq!(inline_math("e = mc^2"), "$e = mc^2$");
        assert_eq!(inline_math("x_s  "), "$x_s$  ");
    }
}
