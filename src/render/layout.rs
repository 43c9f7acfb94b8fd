//! Adaptive layout decisions: column splitting and image placement.

use crate::model::{ImageElement, PositionHint, SlideElement};

use super::metrics::{DensityClass, SlideMetrics};
use super::options::RenderOptions;

/// Layout decision for the body of a general slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPlan {
    /// Render the body top to bottom as-is.
    Flat,
    /// Split the body into two column regions at the given element index.
    Split {
        /// Number of elements in the first column (ceiling of half)
        at: usize,
    },
}

impl ColumnPlan {
    /// Decide whether a slide body should render as two side-by-side
    /// regions.
    ///
    /// All conditions must hold: density is `Smaller` or `Smallest`, the
    /// body's average line length is under the configured threshold, at
    /// least two elements remain, and none of them is a table. Tables are
    /// never split or placed in narrow columns.
    pub fn decide(body: &[SlideElement], density: DensityClass, options: &RenderOptions) -> Self {
        if density < DensityClass::Smaller {
            return ColumnPlan::Flat;
        }
        if body.len() < 2 {
            return ColumnPlan::Flat;
        }
        if body
            .iter()
            .any(|e| matches!(e, SlideElement::Table { .. }))
        {
            return ColumnPlan::Flat;
        }

        let metrics = SlideMetrics::measure(body);
        match metrics.avg_line_length() {
            Some(avg) if avg < options.column_split_line_length as f32 => ColumnPlan::Split {
                at: body.len().div_ceil(2),
            },
            _ => ColumnPlan::Flat,
        }
    }

    /// Density class actually used for font scaling once the plan is known.
    ///
    /// A split spreads content across two narrower regions, so `Smaller`
    /// and `Smallest` slides are downgraded to `Small`.
    pub fn effective_density(self, density: DensityClass) -> DensityClass {
        match self {
            ColumnPlan::Split { .. } if density >= DensityClass::Smaller => DensityClass::Small,
            _ => density,
        }
    }
}

/// Map an image's geometry to a qualitative placement on the target canvas.
///
/// `left_px` and the display width (falling back to `default_width`) are
/// scaled by `target_width / original_width`; the scaled horizontal center
/// is then bucketed into equal thirds of the target canvas. An explicit
/// per-image hint always overrides the computed one. Returns `None` when
/// the geometry is insufficient to decide.
pub fn resolve_position(
    image: &ImageElement,
    original_width: u32,
    target_width: u32,
    default_width: Option<u32>,
) -> Option<PositionHint> {
    if let Some(hint) = image.position_hint {
        return Some(hint);
    }
    if original_width == 0 || target_width == 0 {
        return None;
    }

    let display_width = image.display_width_px.or(default_width)?;
    let left = image.left_px?;

    let scale = target_width as f32 / original_width as f32;
    let scaled_left = left as f32 * scale;
    let scaled_width = display_width as f32 * scale;
    let center = scaled_left + scaled_width / 2.0;

    let left_third = target_width as f32 / 3.0;
    let right_third = 2.0 * target_width as f32 / 3.0;

    if center < left_third {
        Some(PositionHint::Left)
    } else if center > right_third {
        Some(PositionHint::Right)
    } else {
        Some(PositionHint::Center)
    }
}

/// Scale an image's display width into the target canvas coordinate space.
pub fn scaled_display_width(
    image: &ImageElement,
    original_width: u32,
    target_width: u32,
    default_width: Option<u32>,
) -> Option<u32> {
    if original_width == 0 {
        return None;
    }
    let display_width = image.display_width_px.or(default_width)?;
    let scale = target_width as f32 / original_width as f32;
    Some((display_width as f32 * scale).round() as u32)
}
