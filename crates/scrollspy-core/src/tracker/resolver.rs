//! Current-header resolution.

use tracing::trace;

use crate::layout::Layout;
use crate::outline::{NodeId, Outline, SidebarNode};

/// Finds the heading the threshold line currently sits below.
///
/// Prefix scan in document order: the last heading whose top is at or above
/// the threshold wins. Headings are monotonically ordered on screen, so the
/// scan stops at the first one below the line.
pub(crate) fn resolve_heading(
    outline: &Outline,
    layout: &dyn Layout,
    threshold: f64,
) -> Option<usize> {
    let headings = outline.headings();
    if headings.is_empty() {
        return None;
    }

    let mut last = None;
    for index in 0..headings.len() {
        if layout.heading_top(index) <= threshold {
            last = Some(index);
        } else {
            break;
        }
    }

    match last {
        Some(index) => Some(index),
        // Above the first heading: claim it only while it is at least
        // partially on screen.
        None => {
            let top = layout.heading_top(0);
            (top < layout.viewport().window_height).then_some(0)
        }
    }
}

/// Applies a resolution to the sidebar: clears the old markers, marks the
/// resolved entry current, and expands its ancestor chain so the current
/// header is never hidden inside a collapsed group.
///
/// Returns the entry marked current. `None` when nothing resolved or the
/// anchor is missing from the tree; the cleared markers stay cleared.
pub(crate) fn apply(outline: &mut Outline, resolved: Option<usize>) -> Option<NodeId> {
    outline.collapse_foldable();

    let heading = resolved?;
    let anchor_id = outline.headings().get(heading)?.id.clone();
    let Some(entry) = outline.find_entry(&anchor_id) else {
        trace!(anchor = %anchor_id, "no sidebar anchor for current header");
        return None;
    };

    let mut cursor = Some(entry);
    while let Some(node) = cursor {
        if matches!(outline.node(node), SidebarNode::Entry(_)) {
            outline.set_expanded(node, true);
        }
        cursor = outline.parent(node);
    }

    Some(entry)
}
