//! Terminal rendering of tracker state.
//!
//! One line per replay step, an optional numeric readout of the threshold
//! internals with a viewport ruler (the stand-in for the on-screen red
//! line), and an indented dump of the sidebar tree.

use scrollspy_core::{HeaderTracker, NodeId, SidebarNode, Step, StepReport, ThresholdSnapshot};

/// Width of the viewport ruler, in characters.
const RULER_WIDTH: usize = 48;

pub fn print_step(index: usize, report: &StepReport, tracker: &HeaderTracker, debug: bool) {
    let what = match &report.step {
        Step::Scroll { to } => format!("scroll to {to:.0}"),
        Step::Click { id } => format!("click #{id}"),
        Step::Frame { count } => format!("advance {count} frame(s)"),
        Step::Wait { ms } => format!("wait {ms} ms"),
    };

    let current = tracker
        .current()
        .and_then(|node| tracker.outline().entry(node))
        .map_or_else(|| "-".to_string(), |entry| format!("#{}", entry.id));

    let marker = match report.update {
        Some(update) if update.changed => "*",
        _ => " ",
    };

    println!(
        "step {index:>3}  {what:<24} scroll {scroll:>7.1}  threshold {threshold:>7.1} {marker} current {current}",
        scroll = report.scroll_top,
        threshold = report.threshold,
    );

    if debug {
        if let Some(snapshot) = &report.snapshot {
            print_snapshot(snapshot);
        }
    }
}

fn print_snapshot(snapshot: &ThresholdSnapshot) {
    let rows = [
        ("documentHeight", snapshot.document_height),
        ("windowHeight", snapshot.window_height),
        ("scrollTop", snapshot.scroll_top),
        ("pixelsAbove", snapshot.pixels_above),
        ("pixelsBelow", snapshot.pixels_below),
        ("bottomAdd", snapshot.bottom_add),
        ("adjustedBottomAdd", snapshot.adjusted_bottom_add),
        ("threshold", snapshot.threshold),
    ];
    for (name, value) in rows {
        println!("          {name:<18} {value:>9.1}");
    }
    println!(
        "          {:<18} {}",
        "scrollingDown",
        snapshot.scrolling_down
    );
    println!(
        "          {}",
        threshold_ruler(snapshot.threshold, snapshot.window_height)
    );
}

/// Renders the viewport as a one-line ruler with the threshold position
/// marked.
fn threshold_ruler(threshold: f64, window_height: f64) -> String {
    if window_height <= 0.0 {
        return String::new();
    }
    let clamped = threshold.clamp(0.0, window_height);
    let position = ((clamped / window_height) * (RULER_WIDTH - 1) as f64).round() as usize;
    let mut ruler = String::with_capacity(RULER_WIDTH + 16);
    ruler.push('[');
    for i in 0..RULER_WIDTH {
        ruler.push(if i == position { '|' } else { '-' });
    }
    ruler.push(']');
    ruler.push_str(&format!(" {threshold:.1}px"));
    ruler
}

/// Prints the sidebar tree with fold state and the current marker.
pub fn print_tree(tracker: &HeaderTracker) {
    let outline = tracker.outline();
    let Some(root) = outline.root() else {
        println!("(no headings)");
        return;
    };
    print_node(tracker, root, 0);
}

fn print_node(tracker: &HeaderTracker, node: NodeId, depth: usize) {
    let outline = tracker.outline();
    if let SidebarNode::Entry(entry) = outline.node(node) {
        let fold = if !entry.foldable {
            ' '
        } else if entry.expanded {
            'v'
        } else {
            '>'
        };
        let marker = if tracker.current() == Some(node) {
            " <- current"
        } else {
            ""
        };
        println!(
            "{pad}{fold} {text} (#{id}){marker}",
            pad = "  ".repeat(depth),
            text = entry.text(),
            id = entry.id,
        );
    }

    // Collapsed subtrees stay hidden, like the rendered sidebar.
    let descend = match outline.node(node) {
        SidebarNode::Entry(entry) => entry.expanded,
        SidebarNode::Group(_) => true,
    };
    if !descend {
        return;
    }

    let next_depth = match outline.node(node) {
        SidebarNode::Entry(_) => depth + 1,
        SidebarNode::Group(_) => depth,
    };
    for &child in outline.children(node) {
        print_node(tracker, child, next_depth);
    }
}
