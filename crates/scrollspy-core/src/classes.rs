//! CSS class hooks.
//!
//! The engine tracks sidebar state as typed data; a host painting that
//! state back into a document uses these class names, which match the
//! stylesheet the rendered book ships with.

/// Anchor of the entry currently marked as the current header.
pub const CURRENT_HEADER: &str = "current-header";

/// Entry whose fold is open.
pub const EXPANDED: &str = "expanded";

/// Sidebar list item generated for a heading.
pub const HEADER_ITEM: &str = "header-item";

/// Wrapper span around an entry's link and fold toggle.
pub const CHAPTER_LINK_WRAPPER: &str = "chapter-link-wrapper";

/// Anchor linking a sidebar entry to its heading.
pub const HEADER_IN_SUMMARY: &str = "header-in-summary";

/// Fold toggle control on a foldable entry.
pub const CHAPTER_FOLD_TOGGLE: &str = "chapter-fold-toggle";

/// Nested list container for one heading level.
pub const SECTION: &str = "section";

/// Container for the generated per-page outline, spliced into the sidebar
/// after the active page's own entry.
pub const ON_THIS_PAGE: &str = "on-this-page";
