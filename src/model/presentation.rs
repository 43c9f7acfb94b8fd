//! Presentation-level types.

use super::SlideElement;
use serde::{Deserialize, Serialize};

/// A single slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Slide {
    /// A flat, ordered list of elements.
    General {
        /// Elements in source order
        elements: Vec<SlideElement>,
        /// Presenter notes
        #[serde(default)]
        notes: Vec<String>,
    },

    /// A slide the parser already split into side-by-side columns.
    MultiColumn {
        /// Elements rendered before the columns (title, intro text)
        preface: Vec<SlideElement>,
        /// Column contents, left to right
        columns: Vec<Vec<SlideElement>>,
        /// Presenter notes
        #[serde(default)]
        notes: Vec<String>,
    },
}

impl Slide {
    /// Create a general slide without notes.
    pub fn general(elements: Vec<SlideElement>) -> Self {
        Slide::General {
            elements,
            notes: Vec::new(),
        }
    }

    /// Create a multi-column slide without notes.
    pub fn multi_column(preface: Vec<SlideElement>, columns: Vec<Vec<SlideElement>>) -> Self {
        Slide::MultiColumn {
            preface,
            columns,
            notes: Vec::new(),
        }
    }

    /// Attach presenter notes.
    pub fn with_notes(mut self, new_notes: Vec<String>) -> Self {
        match &mut self {
            Slide::General { notes, .. } => *notes = new_notes,
            Slide::MultiColumn { notes, .. } => *notes = new_notes,
        }
        self
    }

    /// Presenter notes for this slide.
    pub fn notes(&self) -> &[String] {
        match self {
            Slide::General { notes, .. } => notes,
            Slide::MultiColumn { notes, .. } => notes,
        }
    }

    /// All elements in document order, columns flattened left to right.
    pub fn flattened_elements(&self) -> Vec<&SlideElement> {
        match self {
            Slide::General { elements, .. } => elements.iter().collect(),
            Slide::MultiColumn {
                preface, columns, ..
            } => preface
                .iter()
                .chain(columns.iter().flat_map(|col| col.iter()))
                .collect(),
        }
    }

    /// Check whether the slide has no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Slide::General { elements, .. } => elements.is_empty(),
            Slide::MultiColumn {
                preface, columns, ..
            } => preface.is_empty() && columns.iter().all(|c| c.is_empty()),
        }
    }
}

/// An ordered collection of slides.
///
/// Order is significant and preserved end-to-end by the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Presentation {
    /// Slides in source order
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create a new empty presentation.
    pub fn new() -> Self {
        Self { slides: Vec::new() }
    }

    /// Add a slide.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Check if the presentation has any slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
