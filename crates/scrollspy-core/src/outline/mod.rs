//! Sidebar outline: captured headings and the tree built over them.

mod heading;
mod tree;

pub use heading::{filter_label, plain_text, Heading, Inline};
pub use tree::{NodeId, Outline, SidebarEntry, SidebarGroup, SidebarNode};
