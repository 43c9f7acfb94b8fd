//! Per-slide content metrics and density classification.
//!
//! Density is estimated from a semantic line count rather than rendered
//! output, so it can be computed with a full look-ahead over a slide's
//! elements before any of them are emitted.

use crate::model::SlideElement;

use super::options::DensityThresholds;

/// Categorical slide density, used to pick a font scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DensityClass {
    /// Fits comfortably at the default font size
    None,
    /// Slightly dense
    Small,
    /// Dense
    Smaller,
    /// Very dense
    Smallest,
}

impl DensityClass {
    /// CSS class / directive name for the Markdown-family dialects.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            DensityClass::None => None,
            DensityClass::Small => Some("small"),
            DensityClass::Smaller => Some("smaller"),
            DensityClass::Smallest => Some("smallest"),
        }
    }
}

impl DensityThresholds {
    /// Classify a semantic line count.
    pub fn classify(&self, line_count: u32) -> DensityClass {
        if line_count > self.smaller_max {
            DensityClass::Smallest
        } else if line_count > self.small_max {
            DensityClass::Smaller
        } else if line_count > self.normal_max {
            DensityClass::Small
        } else {
            DensityClass::None
        }
    }
}

/// Content metrics for a list of slide elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideMetrics {
    /// Semantic line count: titles, list items and paragraphs count one
    /// line each, code blocks one per newline, tables one per row
    pub line_count: u32,

    /// Total rendered-text character count
    pub char_count: u32,

    /// Line count restricted to non-title textual elements
    pub text_lines_for_avg: u32,

    /// Character count restricted to non-title textual elements
    pub text_chars_for_avg: u32,

    /// Largest image display width seen, if any
    pub max_image_width: Option<u32>,

    /// Largest image display height seen, if any
    pub max_image_height: Option<u32>,
}

impl SlideMetrics {
    /// Measure a list of elements.
    pub fn measure<'a, I>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'a SlideElement>,
    {
        let mut m = SlideMetrics::default();

        for element in elements {
            match element {
                SlideElement::Title { content, .. } => {
                    m.line_count += 1;
                    m.char_count += content.trim().chars().count() as u32;
                }
                SlideElement::ListItem { content, .. } | SlideElement::Paragraph { content } => {
                    let text: String = content.iter().map(|r| r.text.as_str()).collect();
                    m.line_count += 1;
                    m.char_count += text.chars().count() as u32;
                    m.text_lines_for_avg += 1;
                    m.text_chars_for_avg += text.trim().chars().count() as u32;
                }
                SlideElement::CodeBlock { content, .. } => {
                    let lines = if content.is_empty() {
                        1
                    } else {
                        content.matches('\n').count() as u32 + 1
                    };
                    m.line_count += lines;
                    m.char_count += content.chars().count() as u32;
                }
                SlideElement::Table { rows } => {
                    m.line_count += rows.len() as u32;
                    for row in rows {
                        for cell in row {
                            for run in cell {
                                m.char_count += run.text.chars().count() as u32;
                            }
                        }
                    }
                }
                SlideElement::Image(img) => {
                    if let Some(w) = img.display_width_px {
                        m.max_image_width = Some(m.max_image_width.unwrap_or(0).max(w));
                    }
                    if let Some(h) = img.display_height_px {
                        m.max_image_height = Some(m.max_image_height.unwrap_or(0).max(h));
                    }
                }
                SlideElement::Formula { content } => {
                    m.line_count += 1;
                    m.char_count += content.chars().count() as u32;
                }
            }
        }

        m
    }

    /// Average line length of the non-title textual elements, if any.
    pub fn avg_line_length(&self) -> Option<f32> {
        if self.text_lines_for_avg == 0 {
            None
        } else {
            Some(self.text_chars_for_avg as f32 / self.text_lines_for_avg as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageElement, TextRun};

    fn paragraphs(n: usize) -> Vec<SlideElement> {
        (0..n).map(|i| SlideElement::paragraph(format!("p{i}"))).collect()
    }

    #[test]
    fn test_density_boundaries() {
        let t = DensityThresholds::default();
        assert_eq!(t.classify(8), DensityClass::None);
        assert_eq!(t.classify(9), DensityClass::Small);
        assert_eq!(t.classify(12), DensityClass::Small);
        assert_eq!(t.classify(13), DensityClass::Smaller);
        assert_eq!(t.classify(18), DensityClass::Smaller);
        assert_eq!(t.classify(19), DensityClass::Smallest);
    }

    #[test]
    fn test_line_count_per_element_kind() {
        let mut elements = vec![SlideElement::title("T", 1)];
        elements.push(SlideElement::list_item("item", 0));
        elements.push(SlideElement::CodeBlock {
            content: "a\nb\nc".to_string(),
            language: None,
        });
        elements.push(SlideElement::Table {
            rows: vec![
                vec![vec![TextRun::new("h")]],
                vec![vec![TextRun::new("v")]],
            ],
        });
        let m = SlideMetrics::measure(&elements);
        // 1 title + 1 item + 3 code lines + 2 rows
        assert_eq!(m.line_count, 7);
    }

    #[test]
    fn test_image_contributes_no_lines() {
        let img = ImageElement {
            display_width_px: Some(640),
            display_height_px: Some(480),
            ..ImageElement::new("a.png")
        };
        let elements = vec![SlideElement::Image(img)];
        let m = SlideMetrics::measure(&elements);
        assert_eq!(m.line_count, 0);
        assert_eq!(m.max_image_width, Some(640));
        assert_eq!(m.max_image_height, Some(480));
    }

    #[test]
    fn test_avg_excludes_titles() {
        let elements = vec![
            SlideElement::title("A very long slide title indeed", 1),
            SlideElement::paragraph("abcde"),
            SlideElement::paragraph("fgh"),
        ];
        let m = SlideMetrics::measure(&elements);
        assert_eq!(m.text_lines_for_avg, 2);
        assert_eq!(m.text_chars_for_avg, 8);
        assert_eq!(m.avg_line_length(), Some(4.0));
    }

    #[test]
    fn test_avg_none_without_text() {
        let m = SlideMetrics::measure(&paragraphs(0));
        assert_eq!(m.avg_line_length(), None);
    }

    #[test]
    fn test_empty_code_block_is_one_line() {
        let elements = vec![SlideElement::CodeBlock {
            content: String::new(),
            language: None,
        }];
        assert_eq!(SlideMetrics::measure(&elements).line_count, 1);
    }
}
