//! Presentation document model.
//!
//! The model is produced once per conversion run by an external parser and
//! is read-only for the rendering engine.

mod element;
mod presentation;

pub use element::{
    ImageElement, PositionHint, SlideElement, TextRun, TextStyle,
};
pub use presentation::{Presentation, Slide};
