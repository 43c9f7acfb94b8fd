//! Rendering options and configuration.

/// Default width of the source slide canvas in pixels.
pub const DEFAULT_SLIDE_WIDTH_PX: u32 = 1600;

/// Default height of the source slide canvas in pixels.
pub const DEFAULT_SLIDE_HEIGHT_PX: u32 = 900;

/// Options for rendering a presentation.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Skip the per-dialect escaping pass entirely.
    ///
    /// Callers requesting this accept that dialect-breaking characters may
    /// appear verbatim in the output.
    pub disable_escaping: bool,

    /// Do not emit color markup for colored runs
    pub disable_color: bool,

    /// Do not emit presenter notes
    pub disable_notes: bool,

    /// Emit a slide-separator marker between slides
    pub enable_slides: bool,

    /// Render near-duplicate consecutive titles with a " (cont.)" suffix
    /// instead of suppressing them
    pub keep_similar_titles: bool,

    /// Default image display width in px, used when the element has none
    pub image_width: Option<u32>,

    /// Width of the source slide canvas in px, used for image scaling
    pub slide_width_px: u32,

    /// Height of the source slide canvas in px
    pub slide_height_px: u32,

    /// Line-count thresholds for the density classifier
    pub density: DensityThresholds,

    /// Average-line-length ceiling below which dense slides split into
    /// two columns
    pub column_split_line_length: u32,

    /// Do not emit image captions (Beamer)
    pub disable_captions: bool,

    /// Do not float left/right images in wrap environments (Beamer)
    pub disable_image_wrapping: bool,

    /// Use `lstlisting` instead of `verbatim` for code blocks (Beamer)
    pub use_listings: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the escaping pass.
    pub fn with_escaping(mut self, enabled: bool) -> Self {
        self.disable_escaping = !enabled;
        self
    }

    /// Enable or disable color markup.
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.disable_color = !enabled;
        self
    }

    /// Enable or disable presenter notes.
    pub fn with_notes(mut self, enabled: bool) -> Self {
        self.disable_notes = !enabled;
        self
    }

    /// Enable slide-separator markers.
    pub fn with_slide_separators(mut self, enabled: bool) -> Self {
        self.enable_slides = enabled;
        self
    }

    /// Keep near-duplicate titles, suffixed with " (cont.)".
    pub fn with_similar_titles(mut self, keep: bool) -> Self {
        self.keep_similar_titles = keep;
        self
    }

    /// Set the default image width.
    pub fn with_image_width(mut self, width: u32) -> Self {
        self.image_width = Some(width);
        self
    }

    /// Set the source slide canvas dimensions.
    pub fn with_slide_size(mut self, width_px: u32, height_px: u32) -> Self {
        self.slide_width_px = width_px;
        self.slide_height_px = height_px;
        self
    }

    /// Set the density classifier thresholds.
    pub fn with_density_thresholds(mut self, thresholds: DensityThresholds) -> Self {
        self.density = thresholds;
        self
    }

    /// Set the column-split average-line-length threshold.
    pub fn with_column_split_threshold(mut self, chars: u32) -> Self {
        self.column_split_line_length = chars;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            disable_escaping: false,
            disable_color: false,
            disable_notes: false,
            enable_slides: false,
            keep_similar_titles: false,
            image_width: None,
            slide_width_px: DEFAULT_SLIDE_WIDTH_PX,
            slide_height_px: DEFAULT_SLIDE_HEIGHT_PX,
            density: DensityThresholds::default(),
            column_split_line_length: 40,
            disable_captions: true,
            disable_image_wrapping: false,
            use_listings: false,
        }
    }
}

/// Ascending line-count thresholds separating the density classes.
///
/// A slide with `line_count <= normal_max` is `None`; strictly above each
/// threshold it moves to the next class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityThresholds {
    /// Upper bound of the unscaled class (default 8)
    pub normal_max: u32,
    /// Upper bound of the `Small` class (default 12)
    pub small_max: u32,
    /// Upper bound of the `Smaller` class (default 18)
    pub smaller_max: u32,
}

impl Default for DensityThresholds {
    fn default() -> Self {
        Self {
            normal_max: 8,
            small_max: 12,
            smaller_max: 18,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_escaping(false)
            .with_similar_titles(true)
            .with_slide_size(1920, 1080)
            .with_column_split_threshold(50);

        assert!(options.disable_escaping);
        assert!(options.keep_similar_titles);
        assert_eq!(options.slide_width_px, 1920);
        assert_eq!(options.column_split_line_length, 50);
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(!options.disable_escaping);
        assert!(!options.enable_slides);
        assert_eq!(options.slide_width_px, 1600);
        assert_eq!(options.density, DensityThresholds::default());
        assert_eq!(options.column_split_line_length, 40);
    }
}
