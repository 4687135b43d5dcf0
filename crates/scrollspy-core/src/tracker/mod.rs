//! Header tracking controller.
//!
//! One [`HeaderTracker`] per page, constructed at load. The host forwards
//! scroll events, sidebar clicks, and animation-frame ticks; the engine
//! keeps the threshold, the current header, and the sidebar fold state in
//! sync. There are no timers or callbacks inside — the host supplies
//! instants and frame ticks, so every transition is plain data.

mod resolver;
mod threshold;

pub use threshold::{ThresholdSnapshot, ThresholdState};

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::TrackerConfig;
use crate::layout::Layout;
use crate::outline::{Heading, NodeId, Outline};

/// Animation frames to wait after a sidebar click before pinning the
/// threshold, letting the jump scroll and relayout settle.
const CLICK_SETTLE_FRAMES: u8 = 2;

/// Deferred threshold pin scheduled by a sidebar click.
#[derive(Debug, Clone)]
struct PendingResolve {
    /// Anchor id of the clicked heading.
    target: String,
    /// Frames left before the pin fires.
    frames: u8,
}

/// What a resolver pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackerUpdate {
    /// Entry now marked current, if any.
    pub current: Option<NodeId>,
    /// Whether `current` differs from the previous pass. Hosts typically
    /// scroll the sidebar to the entry when this is set.
    pub changed: bool,
}

/// Scroll-synced header tracking for one page.
///
/// All state is confined here: threshold, last scroll position, click
/// suppression, fold marks, and the current entry. Single-threaded by
/// construction; the host's event loop interleaves the calls.
pub struct HeaderTracker {
    config: TrackerConfig,
    outline: Outline,
    threshold: ThresholdState,
    current: Option<NodeId>,
    /// Scroll updates are ignored until this instant (sidebar click).
    suppress_until: Option<Instant>,
    pending: Option<PendingResolve>,
    debug_enabled: bool,
    last_snapshot: Option<ThresholdSnapshot>,
}

impl HeaderTracker {
    /// Builds a tracker over the page's captured headings.
    pub fn new(headings: Vec<Heading>, config: TrackerConfig) -> Self {
        let outline = Outline::build(headings, &config);
        let threshold = ThresholdState::new(&config);
        Self {
            config,
            outline,
            threshold,
            current: None,
            suppress_until: None,
            pending: None,
            debug_enabled: false,
            last_snapshot: None,
        }
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Entry currently marked as the current header.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Current threshold position, px from the viewport top.
    pub fn threshold(&self) -> f64 {
        self.threshold.get()
    }

    /// Handles one scroll tick: recomputes the threshold and re-resolves
    /// the current header. Call once at load as well, to mark the initial
    /// header.
    ///
    /// Ticks inside the post-click suppression window are dropped.
    pub fn on_scroll(&mut self, layout: &dyn Layout, now: Instant) -> TrackerUpdate {
        if self.suppressed(now) {
            trace!("scroll tick dropped inside click suppression window");
            return TrackerUpdate {
                current: self.current,
                changed: false,
            };
        }

        let snapshot = self.threshold.update(layout.viewport());
        if self.debug_enabled {
            self.last_snapshot = Some(snapshot);
        }
        self.resolve(layout)
    }

    /// Handles a click on a sidebar header link.
    ///
    /// Scroll updates are disabled for a short window to mask the event
    /// storm from the resulting jump; the threshold pin itself waits for
    /// [`on_animation_frame`](Self::on_animation_frame).
    pub fn on_header_click(&mut self, target: &str, now: Instant) {
        self.suppress_until = Some(now + self.config.suppress_window());
        self.pending = Some(PendingResolve {
            target: target.to_owned(),
            frames: CLICK_SETTLE_FRAMES,
        });
        debug!(id = %target, "sidebar click, scroll updates suspended");
    }

    /// Advances the post-click continuation by one animation frame.
    ///
    /// On the settle frames in between (and when nothing is pending) this
    /// returns `None`. When the continuation fires, the threshold is
    /// pinned to the clicked heading's bottom edge and a resolver pass
    /// runs immediately, so the clicked heading becomes current regardless
    /// of the direction heuristic.
    pub fn on_animation_frame(&mut self, layout: &dyn Layout) -> Option<TrackerUpdate> {
        let pending = self.pending.as_mut()?;
        if pending.frames > 1 {
            pending.frames -= 1;
            return None;
        }

        let PendingResolve { target, .. } = self.pending.take()?;
        let Some(index) = self
            .outline
            .headings()
            .iter()
            .position(|h| h.id == target)
        else {
            trace!(id = %target, "click target not on the page, skipping pin");
            return None;
        };

        self.threshold.set(layout.heading_bottom(index));
        Some(self.resolve(layout))
    }

    /// Flips a foldable entry open or closed (sidebar toggle control).
    pub fn on_toggle(&mut self, node: NodeId) {
        self.outline.toggle(node);
    }

    /// Turns on capture of per-tick threshold internals.
    pub fn enable_threshold_debug(&mut self) {
        self.debug_enabled = true;
    }

    /// Latest captured threshold internals, if debugging is enabled and a
    /// scroll tick has run.
    pub fn threshold_debug(&self) -> Option<&ThresholdSnapshot> {
        self.last_snapshot.as_ref()
    }

    fn suppressed(&mut self, now: Instant) -> bool {
        match self.suppress_until {
            Some(until) if now < until => true,
            Some(_) => {
                self.suppress_until = None;
                false
            }
            None => false,
        }
    }

    fn resolve(&mut self, layout: &dyn Layout) -> TrackerUpdate {
        let resolved = resolver::resolve_heading(&self.outline, layout, self.threshold.get());
        let current = resolver::apply(&mut self.outline, resolved);
        let changed = current != self.current;
        self.current = current;
        TrackerUpdate { current, changed }
    }
}
