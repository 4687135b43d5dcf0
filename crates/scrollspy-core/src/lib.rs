//! Scrollspy Core - headless header tracking and sidebar synchronization
//!
//! This crate keeps a documentation page's sidebar in sync with scrolling:
//! - A dynamic threshold line that adapts to scroll direction and proximity
//!   to the document edges
//! - Resolution of the "current" header against that line
//! - A typed sidebar tree mirroring the page's heading outline, with fold
//!   state and current-header markers
//! - Click-to-threshold synchronization for sidebar navigation
//!
//! The engine is headless: the hosting page supplies geometry through the
//! [`Layout`] trait and forwards scroll/click/frame events; the engine hands
//! back typed state for the host to paint.

pub mod classes;
pub mod config;
pub mod layout;
pub mod outline;
pub mod scenario;
pub mod tracker;

// Re-exports for convenience
pub use config::TrackerConfig;
pub use layout::{Layout, Viewport};
pub use outline::{Heading, Inline, NodeId, Outline, SidebarEntry, SidebarGroup, SidebarNode};
pub use scenario::{
    FixedLayout, Replay, Scenario, ScenarioError, ScenarioHeading, ScenarioPage, Step, StepReport,
};
pub use tracker::{HeaderTracker, ThresholdSnapshot, ThresholdState, TrackerUpdate};
