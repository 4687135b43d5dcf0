//! Sidebar outline tree.
//!
//! A typed mirror of the generated sidebar markup: entries stand for the
//! per-heading list items, groups for the nested list containers. The tree
//! is built once at page load from the captured heading sequence; fold
//! state and the current-header marker are rewritten on top of it by the
//! resolver on every pass.

use std::collections::HashSet;

use tracing::{trace, warn};

use crate::config::TrackerConfig;

use super::heading::{filter_label, plain_text, Heading, Inline};

/// ID used to address nodes in the outline arena.
pub type NodeId = usize;

/// A sidebar list item mirroring one heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    /// Index into the outline's heading sequence.
    pub heading: usize,
    /// Anchor target; the rendered link is `"#"` + this id.
    pub id: String,
    /// Label content, highlight wrappers unwrapped.
    pub label: Vec<Inline>,
    /// Heading level the entry was created for.
    pub level: u8,
    /// Whether the entry carries a fold toggle.
    pub foldable: bool,
    /// Fold state. Every entry starts expanded; the resolver collapses
    /// foldable entries that are not on the current header's path.
    pub expanded: bool,
}

impl SidebarEntry {
    /// Plain-text rendering of the label.
    pub fn text(&self) -> String {
        plain_text(&self.label)
    }
}

/// A nesting container for one heading level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarGroup {
    pub level: u8,
}

/// Tagged node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarNode {
    Entry(SidebarEntry),
    Group(SidebarGroup),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: SidebarNode,
}

/// The sidebar outline: the captured heading sequence plus the arena tree
/// built over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    headings: Vec<Heading>,
    nodes: Vec<Node>,
    root: Option<NodeId>,
    /// Entry nodes in document order.
    entries: Vec<NodeId>,
}

impl Outline {
    /// Build the sidebar tree for a captured heading sequence.
    ///
    /// Headings with an empty id, an empty label, or a level outside 2-6
    /// are skipped, mirroring the capture filter applied to the rendered
    /// page. Nesting follows the level-stack algorithm: a heading of level
    /// L lands under the nearest preceding heading of level < L, and level
    /// jumps of more than one create intermediate empty groups.
    pub fn build(headings: Vec<Heading>, config: &TrackerConfig) -> Self {
        let headings: Vec<Heading> = headings
            .into_iter()
            .filter(|h| {
                let keep = !h.id.is_empty() && !h.label.is_empty() && (2..=6).contains(&h.level);
                if !keep {
                    trace!(id = %h.id, level = h.level, "skipping untracked heading");
                }
                keep
            })
            .collect();

        let mut seen = HashSet::new();
        for heading in &headings {
            if !seen.insert(heading.id.as_str()) {
                warn!(id = %heading.id, "duplicate heading id, anchor lookup will use the first");
            }
        }

        let mut nodes: Vec<Node> = Vec::new();
        let mut entries: Vec<NodeId> = Vec::new();
        let mut root = None;
        // Stack of open nesting levels, innermost on top. Each frame is a
        // group node.
        let mut stack: Vec<NodeId> = Vec::new();

        if let Some(first) = headings.first() {
            // Seed nesting up to the first heading's level so its entry
            // lands at the right depth even when the page starts deep.
            for level in 2..=first.level {
                let group = push_node(
                    &mut nodes,
                    SidebarNode::Group(SidebarGroup { level }),
                );
                if let Some(&parent) = stack.last() {
                    attach(&mut nodes, parent, group);
                } else {
                    root = Some(group);
                }
                stack.push(group);
            }
        }

        for (index, heading) in headings.iter().enumerate() {
            let Some(&top) = stack.last() else { break };
            let level = heading.level;
            let current_level = node_level(&nodes, top);

            if level > current_level {
                // Begin nesting down to this level. Each new group hangs
                // off the last item of its parent frame, or directly off
                // the parent group when a jump of more than one level left
                // no item to hang it on.
                for next_level in current_level + 1..=level {
                    let Some(&frame) = stack.last() else { break };
                    let host = nodes[frame].children.last().copied().unwrap_or(frame);
                    let group = push_node(
                        &mut nodes,
                        SidebarNode::Group(SidebarGroup { level: next_level }),
                    );
                    attach(&mut nodes, host, group);
                    stack.push(group);
                }
            } else if level < current_level {
                while stack.len() > 1 {
                    let Some(&frame) = stack.last() else { break };
                    if node_level(&nodes, frame) <= level {
                        break;
                    }
                    stack.pop();
                }
            }

            // A fold toggle appears only at or beyond the fold level, and
            // only when the next heading nests underneath this one.
            let foldable = heading.level >= config.fold_level
                && headings
                    .get(index + 1)
                    .is_some_and(|next| next.level > level);

            let entry = push_node(
                &mut nodes,
                SidebarNode::Entry(SidebarEntry {
                    heading: index,
                    id: heading.id.clone(),
                    label: filter_label(&heading.label),
                    level,
                    foldable,
                    expanded: true,
                }),
            );
            if let Some(&parent) = stack.last() {
                attach(&mut nodes, parent, entry);
            }
            entries.push(entry);
        }

        Self {
            headings,
            nodes,
            root,
            entries,
        }
    }

    /// Captured headings, document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Outermost group, absent when no headings were captured.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &SidebarNode {
        &self.nodes[id].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Entry nodes in document order.
    pub fn entries(&self) -> &[NodeId] {
        &self.entries
    }

    /// The entry at `id`, if that node is an entry.
    pub fn entry(&self, id: NodeId) -> Option<&SidebarEntry> {
        match &self.nodes[id].kind {
            SidebarNode::Entry(entry) => Some(entry),
            SidebarNode::Group(_) => None,
        }
    }

    /// Looks up the entry for an anchor id, scanning entries in document
    /// order. With duplicate heading ids the first match wins.
    pub fn find_entry(&self, anchor_id: &str) -> Option<NodeId> {
        self.entries
            .iter()
            .copied()
            .find(|&node| self.entry(node).is_some_and(|e| e.id == anchor_id))
    }

    /// Flips a foldable entry open or closed, independent of current-header
    /// tracking. No-op on groups and non-foldable entries.
    pub fn toggle(&mut self, id: NodeId) {
        if let SidebarNode::Entry(entry) = &mut self.nodes[id].kind {
            if entry.foldable {
                entry.expanded = !entry.expanded;
            }
        }
    }

    /// Collapses every foldable entry; the resolver re-expands the current
    /// header's path afterwards.
    pub(crate) fn collapse_foldable(&mut self) {
        for &id in &self.entries {
            if let SidebarNode::Entry(entry) = &mut self.nodes[id].kind {
                if entry.foldable {
                    entry.expanded = false;
                }
            }
        }
    }

    pub(crate) fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if let SidebarNode::Entry(entry) = &mut self.nodes[id].kind {
            entry.expanded = expanded;
        }
    }
}

fn push_node(nodes: &mut Vec<Node>, kind: SidebarNode) -> NodeId {
    let id = nodes.len();
    nodes.push(Node {
        parent: None,
        children: Vec::new(),
        kind,
    });
    id
}

fn attach(nodes: &mut [Node], parent: NodeId, child: NodeId) {
    nodes[child].parent = Some(parent);
    nodes[parent].children.push(child);
}

fn node_level(nodes: &[Node], id: NodeId) -> u8 {
    match &nodes[id].kind {
        SidebarNode::Entry(entry) => entry.level,
        SidebarNode::Group(group) => group.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(id: &str, level: u8) -> Heading {
        Heading::new(id, level, vec![Inline::Text(id.to_uppercase())])
    }

    fn build(levels: &[(&str, u8)]) -> Outline {
        let headings = levels.iter().map(|&(id, l)| heading(id, l)).collect();
        Outline::build(headings, &TrackerConfig::default())
    }

    /// Renders the nesting as `id(children...)` strings for easy shape
    /// assertions.
    fn shape(outline: &Outline, node: NodeId) -> String {
        let inner = outline
            .children(node)
            .iter()
            .map(|&c| shape(outline, c))
            .collect::<Vec<_>>()
            .join(" ");
        match outline.node(node) {
            SidebarNode::Entry(entry) if inner.is_empty() => entry.id.clone(),
            SidebarNode::Entry(entry) => format!("{}({})", entry.id, inner),
            SidebarNode::Group(_) => format!("[{}]", inner),
        }
    }

    #[test]
    fn test_level_stack_nesting() {
        let outline = build(&[("h1", 2), ("h2", 3), ("h3", 3), ("h4", 4), ("h5", 2)]);
        let root = outline.root().unwrap();
        // h1 at the root; h2,h3 one level under h1; h4 under h3; h5 back at
        // the root.
        assert_eq!(shape(&outline, root), "[h1([h2 h3([h4])]) h5]");
    }

    #[test]
    fn test_level_jump_creates_intermediate_groups() {
        let outline = build(&[("a", 2), ("b", 4)]);
        let root = outline.root().unwrap();
        assert_eq!(shape(&outline, root), "[a([[b]])]");
    }

    #[test]
    fn test_page_starting_deep_is_seeded() {
        let outline = build(&[("a", 3), ("b", 2)]);
        let root = outline.root().unwrap();
        // The level-3 entry sits in a seeded inner group; the level-2 entry
        // pops back out to the root.
        assert_eq!(shape(&outline, root), "[[a] b]");
    }

    #[test]
    fn test_build_is_idempotent() {
        let levels = [("h1", 2), ("h2", 3), ("h3", 3), ("h4", 4), ("h5", 2)];
        assert_eq!(build(&levels), build(&levels));
    }

    #[test]
    fn test_fold_toggles_only_past_fold_level_with_deeper_successor() {
        let outline = build(&[("h1", 2), ("h2", 3), ("h3", 3), ("h4", 4), ("h5", 2)]);
        let foldable: Vec<bool> = outline
            .entries()
            .iter()
            .map(|&e| outline.entry(e).unwrap().foldable)
            .collect();
        // h1 has a deeper successor but sits below the fold level; only h3
        // (level 3 with a level-4 successor) folds.
        assert_eq!(foldable, vec![false, false, true, false, false]);
    }

    #[test]
    fn test_everything_starts_expanded() {
        let outline = build(&[("h1", 2), ("h2", 3), ("h3", 4)]);
        assert!(outline
            .entries()
            .iter()
            .all(|&e| outline.entry(e).unwrap().expanded));
    }

    #[test]
    fn test_skips_untracked_headings() {
        let headings = vec![
            heading("ok", 2),
            heading("", 2),
            heading("too-deep", 7),
            heading("top-level", 1),
            Heading::new("no-label", 3, vec![]),
        ];
        let outline = Outline::build(headings, &TrackerConfig::default());
        assert_eq!(outline.headings().len(), 1);
        assert_eq!(outline.entries().len(), 1);
    }

    #[test]
    fn test_labels_are_filtered() {
        let headings = vec![Heading::new(
            "marked",
            2,
            vec![Inline::Mark(vec![Inline::Text("hot".into())])],
        )];
        let outline = Outline::build(headings, &TrackerConfig::default());
        let entry = outline.entry(outline.entries()[0]).unwrap();
        assert_eq!(entry.label, vec![Inline::Text("hot".into())]);
    }

    #[test]
    fn test_find_entry_first_match_wins() {
        let outline = build(&[("dup", 2), ("dup", 3)]);
        let found = outline.find_entry("dup").unwrap();
        assert_eq!(found, outline.entries()[0]);
    }

    #[test]
    fn test_toggle_only_affects_foldable_entries() {
        let mut outline = build(&[("h1", 2), ("h2", 3), ("h3", 4)]);
        let entries: Vec<NodeId> = outline.entries().to_vec();
        // h2 is foldable (level 3, deeper successor); h1 is not.
        outline.toggle(entries[1]);
        assert!(!outline.entry(entries[1]).unwrap().expanded);
        outline.toggle(entries[0]);
        assert!(outline.entry(entries[0]).unwrap().expanded);
    }

    #[test]
    fn test_parent_chain_reaches_root() {
        let outline = build(&[("h1", 2), ("h2", 3), ("h3", 4)]);
        let deepest = *outline.entries().last().unwrap();
        let mut cursor = Some(deepest);
        let mut seen_root = false;
        while let Some(node) = cursor {
            if Some(node) == outline.root() {
                seen_root = true;
            }
            cursor = outline.parent(node);
        }
        assert!(seen_root);
    }
}
