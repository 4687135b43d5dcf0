//! Heading capture model.

/// Inline content of a heading's anchor label.
///
/// Only the distinctions the sidebar cares about are kept: plain text,
/// inline code, and highlight wrappers. Highlights get unwrapped when the
/// label is copied into the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Mark(Vec<Inline>),
}

/// A document heading eligible for sidebar tracking.
///
/// The host captures these once at page load, in document order, from
/// heading elements (levels 2-6) that carry a non-empty `id` and an anchor
/// as their first child. Candidates without both are dropped again by
/// [`Outline::build`](super::Outline::build) as a safety net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Stable anchor key, unique within the page.
    pub id: String,
    /// Heading level, 2-6.
    pub level: u8,
    /// Anchor content as captured from the page.
    pub label: Vec<Inline>,
}

impl Heading {
    pub fn new(id: impl Into<String>, level: u8, label: Vec<Inline>) -> Self {
        Self {
            id: id.into(),
            level,
            label,
        }
    }

    /// Plain-text rendering of the label.
    pub fn anchor_text(&self) -> String {
        plain_text(&self.label)
    }
}

/// Copies label content with `Mark` wrappers unwrapped, splicing their
/// children in place.
pub fn filter_label(label: &[Inline]) -> Vec<Inline> {
    let mut out = Vec::with_capacity(label.len());
    for inline in label {
        match inline {
            Inline::Mark(children) => out.extend(filter_label(children)),
            other => out.push(other.clone()),
        }
    }
    out
}

/// Flattens inline content to plain text.
pub fn plain_text(label: &[Inline]) -> String {
    fn collect(label: &[Inline], out: &mut String) {
        for inline in label {
            match inline {
                Inline::Text(text) | Inline::Code(text) => out.push_str(text),
                Inline::Mark(children) => collect(children, out),
            }
        }
    }

    let mut out = String::new();
    collect(label, &mut out);
    out
}
