//! Slide traversal and emission orchestration.
//!
//! One walker per output stream. The walker owns the title continuity
//! state, the list open/close bookkeeping and the layout decisions; the
//! emitter only spells out markup.

use log::warn;

use crate::error::{Error, Result};
use crate::model::{ImageElement, PositionHint, Presentation, Slide, SlideElement};

use super::dialect::{DialectEmitter, ImageLayout, SlideChrome};
use super::layout::{self, ColumnPlan};
use super::merge;
use super::metrics::SlideMetrics;
use super::options::RenderOptions;
use super::title::{TitleAction, TitleTracker};

pub struct SlideWalker<'a> {
    emitter: Box<dyn DialectEmitter>,
    options: &'a RenderOptions,
    titles: TitleTracker,
    in_list: bool,
}

impl<'a> SlideWalker<'a> {
    pub fn new(emitter: Box<dyn DialectEmitter>, options: &'a RenderOptions) -> Self {
        Self {
            emitter,
            options,
            titles: TitleTracker::new(),
            in_list: false,
        }
    }

    /// Render the whole presentation into one output string.
    pub fn render(mut self, presentation: &Presentation) -> Result<String> {
        let mut out = String::new();
        self.emitter.document_open(&mut out, self.options);

        let count = presentation.slides.len();
        for (index, slide) in presentation.slides.iter().enumerate() {
            let is_last = index + 1 == count;
            self.render_slide(&mut out, index, slide, is_last)?;
            if !is_last && (self.options.enable_slides || self.emitter.requires_separators()) {
                self.emitter.slide_separator(&mut out);
            }
        }

        self.emitter.document_close(&mut out);
        Ok(out)
    }

    fn render_slide(
        &mut self,
        out: &mut String,
        index: usize,
        slide: &Slide,
        is_last: bool,
    ) -> Result<()> {
        match slide {
            Slide::General { elements, notes } => {
                self.render_general(out, index, elements, notes, is_last)
            }
            Slide::MultiColumn {
                preface,
                columns,
                notes,
            } => self.render_multi_column(out, index, preface, columns, notes, is_last),
        }
    }

    fn render_general(
        &mut self,
        out: &mut String,
        index: usize,
        elements: &[SlideElement],
        notes: &[String],
        is_last: bool,
    ) -> Result<()> {
        if elements.is_empty() && notes.is_empty() {
            self.emitter.empty_slide(out);
            return Ok(());
        }

        // Density is judged over everything on the slide, including the
        // title; the split decision only looks at the remaining body.
        let metrics = SlideMetrics::measure(elements);
        let density = self.options.density.classify(metrics.line_count);

        let (title, body) = match elements.split_first() {
            Some((SlideElement::Title { content, level }, rest)) => {
                (Some((content.as_str(), *level)), rest)
            }
            _ => (None, elements),
        };

        // Side-floated images render ahead of the body for dialects that
        // float them, and are excluded from the split decision.
        let mut floated: Vec<&ImageElement> = Vec::new();
        let mut remainder: Vec<SlideElement> = Vec::with_capacity(body.len());
        if self.emitter.floats_side_images() {
            for element in body {
                if let SlideElement::Image(image) = element {
                    let position = self.image_layout(image).position;
                    if matches!(position, Some(PositionHint::Left | PositionHint::Right)) {
                        floated.push(image);
                        continue;
                    }
                }
                remainder.push(element.clone());
            }
        } else {
            remainder.extend_from_slice(body);
        }

        let plan = if self.emitter.supports_column_split() {
            ColumnPlan::decide(&remainder, density, self.options)
        } else {
            ColumnPlan::Flat
        };
        let chrome = SlideChrome {
            density: plan.effective_density(density),
            is_last,
        };

        self.emitter.begin_slide(out, &chrome);
        if let Some((content, level)) = title {
            self.emit_title(out, index, content, level, true)?;
        }
        self.emitter.body_open(out, &chrome);

        for image in floated {
            self.emit_image(out, image);
        }

        match plan {
            ColumnPlan::Flat => self.emit_elements(out, index, &remainder)?,
            ColumnPlan::Split { at } => {
                self.emitter.split_open(out);
                self.emit_elements(out, index, &remainder[..at])?;
                self.emitter.split_next(out);
                self.emit_elements(out, index, &remainder[at..])?;
                self.emitter.split_close(out);
            }
        }

        self.emit_notes(out, notes);
        self.emitter.body_close(out);
        self.emitter.end_slide(out, &chrome);
        Ok(())
    }

    fn render_multi_column(
        &mut self,
        out: &mut String,
        index: usize,
        preface: &[SlideElement],
        columns: &[Vec<SlideElement>],
        notes: &[String],
        is_last: bool,
    ) -> Result<()> {
        if columns.is_empty() {
            warn!("slide {index}: multi-column slide without columns, rendering preface only");
        }

        if !self.emitter.supports_native_columns() {
            // Flatten: preface first, then each column's elements in order.
            let flat: Vec<SlideElement> = preface
                .iter()
                .chain(columns.iter().flatten())
                .cloned()
                .collect();
            return self.render_general(out, index, &flat, notes, is_last);
        }

        let metrics = SlideMetrics::measure(preface.iter().chain(columns.iter().flatten()));
        let density = self.options.density.classify(metrics.line_count);
        let chrome = SlideChrome { density, is_last };

        let (title, rest) = match preface.split_first() {
            Some((SlideElement::Title { content, level }, rest)) => {
                (Some((content.as_str(), *level)), rest)
            }
            _ => (None, preface),
        };

        self.emitter.begin_slide(out, &chrome);
        if let Some((content, level)) = title {
            self.emit_title(out, index, content, level, true)?;
        }
        self.emitter.body_open(out, &chrome);

        self.emit_elements(out, index, rest)?;

        if !columns.is_empty() {
            let count = columns.len();
            self.emitter.columns_open(out, count);
            for (column_index, column) in columns.iter().enumerate() {
                self.emitter.column_open(out, column_index, count);
                self.emit_elements(out, index, column)?;
                self.emitter.column_close(out);
            }
            self.emitter.columns_close(out);
        }

        self.emit_notes(out, notes);
        self.emitter.body_close(out);
        self.emitter.end_slide(out, &chrome);
        Ok(())
    }

    fn emit_elements(
        &mut self,
        out: &mut String,
        slide_index: usize,
        elements: &[SlideElement],
    ) -> Result<()> {
        for element in elements {
            match element {
                SlideElement::ListItem { content, level } => {
                    let text = merge::merge_runs(content, self.emitter.as_ref(), self.options);
                    let level = match self.emitter.max_list_depth() {
                        Some(max) => (*level).min(max.saturating_sub(1)),
                        None => *level,
                    };
                    self.in_list = true;
                    self.emitter.list_item(out, &text, level);
                }
                other => {
                    self.close_list(out);
                    match other {
                        SlideElement::Title { content, level } => {
                            self.emit_title(out, slide_index, content, *level, false)?;
                        }
                        SlideElement::Paragraph { content } => {
                            let text =
                                merge::merge_runs(content, self.emitter.as_ref(), self.options);
                            self.emitter.paragraph(out, &text);
                        }
                        SlideElement::Image(image) => self.emit_image(out, image),
                        SlideElement::Table { rows } => {
                            let formatted: Vec<Vec<String>> = rows
                                .iter()
                                .map(|row| {
                                    row.iter()
                                        .map(|cell| {
                                            merge::merge_runs(
                                                cell,
                                                self.emitter.as_ref(),
                                                self.options,
                                            )
                                        })
                                        .collect()
                                })
                                .collect();
                            self.emitter.table(out, &formatted);
                        }
                        SlideElement::CodeBlock { content, language } => {
                            self.emitter.code_block(
                                out,
                                content,
                                language.as_deref(),
                                self.options,
                            );
                        }
                        SlideElement::Formula { content } => {
                            self.emitter.formula(out, content);
                        }
                        SlideElement::ListItem { .. } => unreachable!(),
                    }
                }
            }
        }
        self.close_list(out);
        Ok(())
    }

    fn emit_title(
        &mut self,
        out: &mut String,
        slide_index: usize,
        content: &str,
        level: u32,
        leading: bool,
    ) -> Result<()> {
        if level == 0 {
            return Err(Error::InvalidSlide {
                slide: slide_index,
                element: "title",
                reason: "title level must be at least 1".to_string(),
            });
        }
        match self
            .titles
            .observe(content, level, self.options.keep_similar_titles)
        {
            TitleAction::Emit(text) => {
                if leading {
                    self.emitter.slide_title(out, &text, level, self.options);
                } else {
                    self.emitter.heading(out, &text, level, self.options);
                }
            }
            TitleAction::Suppress => {}
        }
        Ok(())
    }

    fn emit_image(&mut self, out: &mut String, image: &ImageElement) {
        let layout = self.image_layout(image);
        self.emitter.image(out, image, layout, self.options);
    }

    fn emit_notes(&mut self, out: &mut String, notes: &[String]) {
        if self.options.disable_notes || notes.is_empty() {
            return;
        }
        self.emitter.notes(out, notes, self.options);
    }

    fn image_layout(&self, image: &ImageElement) -> ImageLayout {
        let original = self.options.slide_width_px;
        let target = self
            .emitter
            .target_canvas()
            .map(|(width, _)| width)
            .unwrap_or(original);
        ImageLayout {
            position: layout::resolve_position(image, original, target, self.options.image_width),
            scaled_width_px: layout::scaled_display_width(
                image,
                original,
                target,
                self.options.image_width,
            ),
        }
    }

    fn close_list(&mut self, out: &mut String) {
        if self.in_list {
            self.in_list = false;
            self.emitter.list_close(out);
        }
    }
}
