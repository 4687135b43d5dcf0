//! Host-supplied page geometry.
//!
//! The engine never queries a document. The hosting page (a browser
//! binding, a replay driver, a test fixture) implements [`Layout`] to
//! expose the viewport and per-heading positions for the current frame.

/// Scroll geometry for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset from the top of the document, in px.
    pub scroll_top: f64,
    /// Visible viewport height, in px.
    pub window_height: f64,
    /// Full scrollable document height, in px.
    pub document_height: f64,
}

/// Read access to the rendered page's geometry.
///
/// Heading positions are viewport-relative (the `getBoundingClientRect`
/// convention): a heading scrolled past the top of the screen has a
/// negative top.
pub trait Layout {
    /// Current scroll geometry.
    fn viewport(&self) -> Viewport;

    /// Top edge of the heading at `index`, relative to the viewport top.
    fn heading_top(&self, index: usize) -> f64;

    /// Bottom edge of the heading at `index`, relative to the viewport top.
    fn heading_bottom(&self, index: usize) -> f64;
}
