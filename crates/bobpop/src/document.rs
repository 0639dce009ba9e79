//! Platform adapter.
//!
//! The engine never touches a rendering surface directly. Everything it needs from the host
//! (element creation, styling, the popover primitive, stylesheet access, and the
//! colour-scheme signal) goes through [`Document`]. [`HeadlessDocument`](crate::HeadlessDocument)
//! is the in-memory implementation used by tests.

use crate::stylesheet::StyleSheet;

/// Opaque handle to a node owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Host document operations used by the builder, registry and lifecycle controller.
///
/// Element ids (the `id` attribute) and [`NodeId`] handles are distinct: the former are what
/// the popover primitive and CSS selectors refer to, the latter what the engine holds on to.
pub trait Document {
    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Attach `node` as the last child of the document body.
    fn append_to_body(&mut self, node: NodeId);

    /// Attach `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach `node` and its subtree. Detached or unknown nodes are ignored.
    fn remove(&mut self, node: NodeId);

    /// Whether `node` is currently reachable from the document body.
    fn is_attached(&self, node: NodeId) -> bool;

    /// Look up an attached element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&mut self, node: NodeId, name: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    fn add_class(&mut self, node: NodeId, class: &str);

    /// Attached elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<NodeId>;

    /// Set an inline style property. An empty value clears the property.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<&str>;

    /// Replace the node's children with parsed rich content.
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// Replace the node's children with plain text.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Ask the platform to show a popover element.
    fn show_popover(&mut self, node: NodeId);

    /// Ask the platform to hide a popover element.
    fn hide_popover(&mut self, node: NodeId);

    /// Whether `node` has a running (or about to run) exit transition.
    fn has_active_transition(&self, node: NodeId) -> bool;

    /// Whether the user prefers a dark colour scheme.
    fn prefers_dark_color_scheme(&self) -> bool;

    /// Look up a global style block by id.
    fn style_sheet(&self, id: &str) -> Option<&StyleSheet>;

    fn style_sheet_mut(&mut self, id: &str) -> Option<&mut StyleSheet>;

    /// Insert a global style block. Replaces any block with the same id.
    fn insert_style_sheet(&mut self, id: &str, sheet: StyleSheet);

    /// Remove a global style block, returning whether one existed.
    fn remove_style_sheet(&mut self, id: &str) -> bool;
}
