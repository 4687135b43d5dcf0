//! Dynamic threshold tracking.
//!
//! The threshold is a virtual horizontal line on the screen; the last
//! header above it is the current one. It moves every scroll tick: tight
//! against the viewport top when scrolling down, more forgiving when
//! scrolling up, and pushed toward the viewport bottom near the end of the
//! document where no header could otherwise pass it.

use serde::Serialize;

use crate::config::TrackerConfig;
use crate::layout::Viewport;

/// Everything one threshold update computed, for the debug readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSnapshot {
    pub document_height: f64,
    pub window_height: f64,
    pub scroll_top: f64,
    pub pixels_above: f64,
    pub pixels_below: f64,
    pub bottom_add: f64,
    pub adjusted_bottom_add: f64,
    pub scrolling_down: bool,
    pub threshold: f64,
}

/// Threshold state, advanced once per scroll tick.
#[derive(Debug, Clone)]
pub struct ThresholdState {
    threshold: f64,
    last_scroll_top: f64,
    down_threshold: f64,
    up_threshold: f64,
}

impl ThresholdState {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            threshold: config.down_threshold,
            last_scroll_top: 0.0,
            down_threshold: config.down_threshold,
            up_threshold: config.up_threshold,
        }
    }

    /// Current threshold position, px from the viewport top.
    pub fn get(&self) -> f64 {
        self.threshold
    }

    /// Pins the threshold to an explicit position (sidebar click sync).
    pub(crate) fn set(&mut self, value: f64) {
        self.threshold = value;
    }

    /// Advances the threshold for this tick's scroll geometry.
    pub fn update(&mut self, view: Viewport) -> ThresholdSnapshot {
        let Viewport {
            scroll_top,
            window_height,
            document_height,
        } = view;

        // Pixels of document left below the viewport; pushes the threshold
        // toward the bottom of the screen as the user nears the end.
        let pixels_below = (document_height - (scroll_top + window_height)).max(0.0);
        // Missing headroom above; pulls the threshold back toward the top
        // near the start of the document.
        let pixels_above = (self.down_threshold - scroll_top).max(0.0);
        let bottom_add = (window_height - pixels_below - self.down_threshold).max(0.0);

        // The bottom offset assumes at least two screens of document; on a
        // shorter page, scale it by how close the viewport bottom already
        // is to the end.
        let mut adjusted_bottom_add = bottom_add;
        if document_height < window_height * 2.0 {
            let max_pixels_below = document_height - window_height;
            let t = 1.0 - pixels_below / max_pixels_below.max(1.0);
            adjusted_bottom_add *= t.clamp(0.0, 1.0);
        }

        // Equal offsets count as scrolling down; the delta is zero either
        // way.
        let scrolling_down = scroll_top >= self.last_scroll_top;
        if scrolling_down {
            let scrolled = scroll_top - self.last_scroll_top;
            let adjusted_default = self.down_threshold + adjusted_bottom_add;
            self.threshold = adjusted_default.max(self.threshold - scrolled);
        } else {
            let scrolled = self.last_scroll_top - scroll_top;
            let adjusted_default = self.up_threshold - pixels_above
                + (adjusted_bottom_add - self.down_threshold).max(0.0);
            self.threshold = adjusted_default.min(self.threshold + scrolled);
        }

        // Whole document fits on screen: nothing to track against.
        if document_height <= window_height {
            self.threshold = 0.0;
        }

        self.last_scroll_top = scroll_top;

        ThresholdSnapshot {
            document_height,
            window_height,
            scroll_top,
            pixels_above,
            pixels_below,
            bottom_add,
            adjusted_bottom_add,
            scrolling_down,
            threshold: self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ThresholdState {
        ThresholdState::new(&TrackerConfig::default())
    }

    fn view(scroll_top: f64, window_height: f64, document_height: f64) -> Viewport {
        Viewport {
            scroll_top,
            window_height,
            document_height,
        }
    }

    #[test]
    fn test_starts_at_down_threshold() {
        assert_eq!(state().get(), 150.0);
    }

    #[test]
    fn test_rapid_down_scroll_floors_at_default() {
        let mut state = state();
        let snapshot = state.update(view(500.0, 800.0, 10_000.0));
        assert!(snapshot.scrolling_down);
        assert_eq!(state.get(), 150.0);
    }

    #[test]
    fn test_down_scroll_never_drops_below_default() {
        let mut state = state();
        for step in [120.0, 250.0, 400.0, 1_000.0, 4_000.0] {
            let snapshot = state.update(view(step, 800.0, 10_000.0));
            // Far from both document edges, downward scrolling always
            // settles on the down default.
            assert_eq!(snapshot.threshold, 150.0);
        }
    }

    #[test]
    fn test_up_scroll_relaxes_toward_up_threshold() {
        let mut state = state();
        state.update(view(500.0, 800.0, 10_000.0));
        // Scrolling back up 100px grows the threshold by the distance
        // scrolled, capped at the up default.
        let snapshot = state.update(view(400.0, 800.0, 10_000.0));
        assert!(!snapshot.scrolling_down);
        assert_eq!(snapshot.threshold, 250.0);
        // A large jump to the very top caps at the edge-adjusted default.
        let snapshot = state.update(view(0.0, 800.0, 10_000.0));
        assert_eq!(snapshot.pixels_above, 150.0);
        assert_eq!(snapshot.threshold, 150.0);
    }

    #[test]
    fn test_up_scroll_never_exceeds_up_threshold() {
        let mut state = state();
        state.update(view(5_000.0, 800.0, 10_000.0));
        for step in [4_500.0, 3_000.0, 2_000.0, 1_000.0] {
            let snapshot = state.update(view(step, 800.0, 10_000.0));
            assert!(snapshot.threshold <= 300.0);
        }
    }

    #[test]
    fn test_document_fitting_on_screen_forces_zero() {
        let mut state = state();
        assert_eq!(state.update(view(0.0, 1_000.0, 1_000.0)).threshold, 0.0);
        assert_eq!(state.update(view(0.0, 1_000.0, 600.0)).threshold, 0.0);
        // Direction does not matter.
        state.update(view(50.0, 1_000.0, 1_000.0));
        assert_eq!(state.update(view(0.0, 1_000.0, 1_000.0)).threshold, 0.0);
    }

    #[test]
    fn test_equal_scroll_top_counts_as_down() {
        let mut state = state();
        let snapshot = state.update(view(0.0, 800.0, 10_000.0));
        assert!(snapshot.scrolling_down);
        assert_eq!(snapshot.threshold, 150.0);
    }

    #[test]
    fn test_bottom_of_page_pushes_threshold_down() {
        let mut state = state();
        // Near the end of a long document, the threshold moves toward the
        // bottom of the viewport so the last headers can become current.
        let snapshot = state.update(view(9_200.0, 800.0, 10_000.0));
        assert_eq!(snapshot.pixels_below, 0.0);
        assert_eq!(snapshot.bottom_add, 650.0);
        assert_eq!(snapshot.threshold, 800.0);
    }

    #[test]
    fn test_short_document_scales_bottom_add() {
        let mut state = state();
        // Top of a 1.5-screen document: the raw bottom offset would be 350
        // but the scaling zeroes it out while the end is still far.
        let snapshot = state.update(view(0.0, 1_000.0, 1_500.0));
        assert_eq!(snapshot.bottom_add, 350.0);
        assert_eq!(snapshot.adjusted_bottom_add, 0.0);
        assert_eq!(snapshot.threshold, 150.0);
        // At the very end the offset applies in full.
        let snapshot = state.update(view(500.0, 1_000.0, 1_500.0));
        assert_eq!(snapshot.adjusted_bottom_add, 850.0);
        assert_eq!(snapshot.threshold, 1_000.0);
    }
}
