//! Title continuity tracking.
//!
//! Slide decks frequently repeat a section title across several slides that
//! continue one topic. The tracker fuzzy-matches each new title against the
//! last emitted one so repeats can be suppressed or annotated instead of
//! producing a redundant heading on every slide.

use similar::TextDiff;

/// Similarity cutoff on a 0-100 scale; at or above this, two titles are
/// treated as the same heading.
const SIMILARITY_CUTOFF: f32 = 92.0;

/// What the walker should do with an incoming title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleAction {
    /// Emit the given text as a heading.
    Emit(String),
    /// Emit nothing for this title.
    Suppress,
}

/// Per-output-stream title continuity state.
#[derive(Debug, Default)]
pub struct TitleTracker {
    last: Option<(String, u32)>,
}

impl TitleTracker {
    /// Create a tracker with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a new title and return the emission decision.
    ///
    /// A title is a continuation iff its level equals the last emitted
    /// title's level and the normalized similarity ratio is at least the
    /// cutoff. With `keep_similar` the continuation is emitted with a
    /// `" (cont.)"` suffix and the state advances to the suffixed text;
    /// without it the title is suppressed and the state stays pinned to
    /// the previously emitted title.
    pub fn observe(&mut self, text: &str, level: u32, keep_similar: bool) -> TitleAction {
        let text = text.trim();
        if text.is_empty() {
            return TitleAction::Suppress;
        }

        let is_continuation = match &self.last {
            Some((last_text, last_level)) => {
                *last_level == level && similarity(last_text, text) >= SIMILARITY_CUTOFF
            }
            None => false,
        };

        if is_continuation {
            if keep_similar {
                let suffixed = format!("{text} (cont.)");
                self.last = Some((suffixed.clone(), level));
                TitleAction::Emit(suffixed)
            } else {
                TitleAction::Suppress
            }
        } else {
            self.last = Some((text.to_string(), level));
            TitleAction::Emit(text.to_string())
        }
    }
}

/// Normalized character-level similarity ratio on a 0-100 scale.
fn similarity(a: &str, b: &str) -> f32 {
    if a == b {
        return 100.0;
    }
    TextDiff::from_chars(a, b).ratio() * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_title_emitted() {
        let mut tracker = TitleTracker::new();
        assert_eq!(
            tracker.observe("Results", 1, false),
            TitleAction::Emit("Results".to_string())
        );
    }

    #[test]
    fn test_trailing_space_is_continuation() {
        let mut tracker = TitleTracker::new();
        tracker.observe("Results", 1, true);
        assert_eq!(
            tracker.observe("Results ", 1, true),
            TitleAction::Emit("Results (cont.)".to_string())
        );
    }

    #[test]
    fn test_continuation_suppressed() {
        let mut tracker = TitleTracker::new();
        tracker.observe("Results", 1, false);
        assert_eq!(tracker.observe("Results", 1, false), TitleAction::Suppress);
        // State stays pinned: a third repeat is still a continuation.
        assert_eq!(tracker.observe("Results", 1, false), TitleAction::Suppress);
    }

    #[test]
    fn test_different_level_not_continuation() {
        let mut tracker = TitleTracker::new();
        tracker.observe("Results", 1, false);
        assert_eq!(
            tracker.observe("Results", 2, false),
            TitleAction::Emit("Results".to_string())
        );
    }

    #[test]
    fn test_dissimilar_title_emitted() {
        let mut tracker = TitleTracker::new();
        tracker.observe("Introduction", 1, false);
        assert_eq!(
            tracker.observe("Conclusions", 1, false),
            TitleAction::Emit("Conclusions".to_string())
        );
    }

    #[test]
    fn test_empty_title_suppressed() {
        let mut tracker = TitleTracker::new();
        assert_eq!(tracker.observe("   ", 1, false), TitleAction::Suppress);
    }

    #[test]
    fn test_similarity_ratio() {
        assert_eq!(similarity("Results", "Results"), 100.0);
        assert!(similarity("Results", "Result") >= 92.0);
        assert!(similarity("Results", "Methods") < 92.0);
    }
}
