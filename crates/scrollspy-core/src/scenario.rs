//! Scenario files for replaying scroll sessions.
//!
//! A scenario describes a page (viewport, document height, headings at
//! document-space positions) plus a list of steps to drive through the
//! tracker. The CLI replays them against the engine; tests use them as
//! fixtures.

use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::TrackerConfig;
use crate::layout::{Layout, Viewport};
use crate::outline::{Heading, Inline};
use crate::tracker::{HeaderTracker, ThresholdSnapshot, TrackerUpdate};

/// Scenario file errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario page has no headings")]
    EmptyPage,
}

/// One heading on the simulated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioHeading {
    pub id: String,
    pub level: u8,
    pub text: String,
    /// Top edge in document space, px.
    pub top: f64,
    /// Rendered height, px.
    #[serde(default = "default_heading_height")]
    pub height: f64,
}

fn default_heading_height() -> f64 {
    40.0
}

/// The simulated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPage {
    pub window_height: f64,
    pub document_height: f64,
    pub headings: Vec<ScenarioHeading>,
}

/// One replay step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Scroll to an absolute offset and fire a scroll event.
    Scroll { to: f64 },
    /// Click a sidebar header link.
    Click { id: String },
    /// Advance animation frames.
    Frame {
        #[serde(default = "default_frame_count")]
        count: u32,
    },
    /// Let the simulated clock run without events.
    Wait { ms: u64 },
}

fn default_frame_count() -> u32 {
    1
}

/// A loadable replay scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: TrackerConfig,
    pub page: ScenarioPage,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Loads a scenario from disk. `.json` files parse as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path)?;
        let scenario: Scenario = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&raw)?
        } else {
            toml::from_str(&raw)?
        };
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if self.page.headings.is_empty() {
            return Err(ScenarioError::EmptyPage);
        }
        // Duplicate ids make anchor lookup ambiguous (first match wins at
        // resolve time); surfaced here because the engine stays silent.
        let mut seen = HashSet::new();
        for heading in &self.page.headings {
            if !seen.insert(heading.id.as_str()) {
                warn!(id = %heading.id, "scenario reuses a heading id");
            }
        }
        Ok(())
    }

    /// Headings for the tracker, document order.
    pub fn headings(&self) -> Vec<Heading> {
        self.page
            .headings
            .iter()
            .map(|h| Heading::new(&h.id, h.level, vec![Inline::Text(h.text.clone())]))
            .collect()
    }
}

/// [`Layout`] over a scenario page plus a mutable scroll offset.
#[derive(Debug, Clone)]
pub struct FixedLayout {
    tops: Vec<f64>,
    heights: Vec<f64>,
    window_height: f64,
    document_height: f64,
    scroll_top: f64,
}

impl FixedLayout {
    pub fn new(page: &ScenarioPage) -> Self {
        Self {
            tops: page.headings.iter().map(|h| h.top).collect(),
            heights: page.headings.iter().map(|h| h.height).collect(),
            window_height: page.window_height,
            document_height: page.document_height,
            scroll_top: 0.0,
        }
    }

    /// Scrolls to an absolute offset, clamped the way a scroll container
    /// clamps.
    pub fn scroll_to(&mut self, offset: f64) {
        let max = (self.document_height - self.window_height).max(0.0);
        self.scroll_top = offset.clamp(0.0, max);
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }
}

impl Layout for FixedLayout {
    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: self.scroll_top,
            window_height: self.window_height,
            document_height: self.document_height,
        }
    }

    fn heading_top(&self, index: usize) -> f64 {
        self.tops
            .get(index)
            .map_or(f64::INFINITY, |top| top - self.scroll_top)
    }

    fn heading_bottom(&self, index: usize) -> f64 {
        self.heading_top(index) + self.heights.get(index).copied().unwrap_or(0.0)
    }
}

/// Outcome of one replay step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub scroll_top: f64,
    pub threshold: f64,
    /// Resolver outcome, for steps that ran a pass.
    pub update: Option<TrackerUpdate>,
    /// Threshold internals, when debug capture is on.
    pub snapshot: Option<ThresholdSnapshot>,
}

/// Event cadence of the simulated clock, one frame at ~60fps.
const TICK: Duration = Duration::from_millis(16);

/// Drives a tracker through a scenario with a simulated clock.
pub struct Replay {
    tracker: HeaderTracker,
    layout: FixedLayout,
    now: Instant,
}

impl Replay {
    pub fn new(scenario: &Scenario) -> Self {
        let tracker = HeaderTracker::new(scenario.headings(), scenario.config.clone());
        let layout = FixedLayout::new(&scenario.page);
        Self {
            tracker,
            layout,
            now: Instant::now(),
        }
    }

    pub fn tracker(&self) -> &HeaderTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut HeaderTracker {
        &mut self.tracker
    }

    pub fn layout(&self) -> &FixedLayout {
        &self.layout
    }

    /// Runs one step. The clock advances one tick per event; a `wait` step
    /// advances by its own duration instead.
    pub fn run_step(&mut self, step: &Step) -> StepReport {
        let update = match step {
            Step::Scroll { to } => {
                self.now += TICK;
                self.layout.scroll_to(*to);
                Some(self.tracker.on_scroll(&self.layout, self.now))
            }
            Step::Click { id } => {
                self.now += TICK;
                self.tracker.on_header_click(id, self.now);
                None
            }
            Step::Frame { count } => {
                let mut last = None;
                for _ in 0..*count {
                    self.now += TICK;
                    if let Some(update) = self.tracker.on_animation_frame(&self.layout) {
                        last = Some(update);
                    }
                }
                last
            }
            Step::Wait { ms } => {
                self.now += Duration::from_millis(*ms);
                None
            }
        };

        StepReport {
            step: step.clone(),
            scroll_top: self.layout.scroll_top(),
            threshold: self.tracker.threshold(),
            update,
            snapshot: self.tracker.threshold_debug().copied(),
        }
    }

    /// Runs every step, collecting the reports.
    pub fn run(&mut self, steps: &[Step]) -> Vec<StepReport> {
        steps.iter().map(|step| self.run_step(step)).collect()
    }
}
