//! In-memory [`Document`] implementation.
//!
//! `HeadlessDocument` models just enough of a browser document for the engine to run without
//! a rendering surface: an element tree rooted at the body, inline styles, global style blocks,
//! the popover show/hide primitive, popover invoker buttons, light dismiss, and exit
//! transitions. Platform notifications are queued and handed to [`Bobpop`] by [`pump`].
//!
//! The auto-popover stack is not modelled: showing one `auto` popover does not close others.
//!
//! [`pump`]: HeadlessDocument::pump
//!
//! # Example
//!
//! ```
//! use bobpop::{Bobpop, HeadlessDocument, LifecycleState, PopoverOptions};
//!
//! let mut doc = HeadlessDocument::new();
//! let mut bobpop = Bobpop::new();
//!
//! let panel = bobpop.open(&mut doc, PopoverOptions::new().title("Saved"));
//! doc.pump(&mut bobpop);
//! assert_eq!(bobpop.state(&panel), LifecycleState::Open);
//!
//! doc.light_dismiss();
//! doc.pump(&mut bobpop);
//! assert_eq!(bobpop.state(&panel), LifecycleState::Removed);
//! ```

use std::collections::VecDeque;

use bobpop_core::alloc::HashMap;
use indexmap::IndexMap;

use crate::document::{Document, NodeId};
use crate::event::{Key, PlatformEvent, ToggleState};
use crate::popover::Bobpop;
use crate::stylesheet::StyleSheet;

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: IndexMap<String, String>,
    classes: Vec<String>,
    styles: IndexMap<String, String>,
    inner_html: Option<String>,
    text: Option<String>,
    popover_open: bool,
}

/// Headless document with a queued notification stream.
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    elements: HashMap<NodeId, Element>,
    body: Vec<NodeId>,
    next_node: u64,
    style_sheets: IndexMap<String, StyleSheet>,
    events: VecDeque<PlatformEvent>,
    transitioning: Vec<NodeId>,
    prefers_dark: bool,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document whose platform reports a dark colour-scheme preference.
    pub fn dark() -> Self {
        Self {
            prefers_dark: true,
            ..Self::default()
        }
    }

    pub fn set_prefers_dark(&mut self, prefers_dark: bool) {
        self.prefers_dark = prefers_dark;
    }

    // --- Notification queue ---

    pub fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.events.pop_front()
    }

    pub fn drain_events(&mut self) -> Vec<PlatformEvent> {
        self.events.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Deliver every queued notification, including ones raised while delivering.
    pub fn pump(&mut self, bobpop: &mut Bobpop) {
        while let Some(event) = self.poll_event() {
            bobpop.dispatch(self, event);
        }
    }

    // --- Simulated user and platform activity ---

    /// Activate `node`. Reports the click, then performs any popover invoker action it has.
    pub fn click(&mut self, node: NodeId) {
        if !self.is_attached(node) {
            return;
        }
        self.events.push_back(PlatformEvent::Click { target: node });

        let Some(target_id) = self.attribute(node, "popovertarget").map(str::to_owned) else {
            return;
        };
        let Some(target) = self.element_by_id(&target_id) else {
            return;
        };
        let action = self
            .attribute(node, "popovertargetaction")
            .unwrap_or("toggle")
            .to_owned();
        match action.as_str() {
            "hide" => self.hide_popover(target),
            "show" => self.show_popover(target),
            _ if self.is_popover_open(target) => self.hide_popover(target),
            _ => self.show_popover(target),
        }
    }

    /// Press a key. Escape also light-dismisses every open `auto` popover.
    pub fn press_key(&mut self, key: Key) {
        let is_escape = key == Key::Escape;
        self.events.push_back(PlatformEvent::KeyDown { key });
        if is_escape {
            self.light_dismiss();
        }
    }

    pub fn press_escape(&mut self) {
        self.press_key(Key::Escape);
    }

    /// Outside click: light-dismiss every open `auto` popover.
    pub fn light_dismiss(&mut self) {
        let targets: Vec<NodeId> = self
            .attached_nodes()
            .into_iter()
            .filter(|&node| {
                self.is_popover_open(node) && self.attribute(node, "popover") == Some("auto")
            })
            .collect();
        for target in targets {
            self.events.push_back(PlatformEvent::LightDismiss { target });
            self.hide_popover(target);
        }
    }

    /// Complete every running exit transition.
    pub fn finish_transitions(&mut self) {
        for target in std::mem::take(&mut self.transitioning) {
            self.events.push_back(PlatformEvent::TransitionEnd { target });
        }
    }

    pub fn pending_transitions(&self) -> &[NodeId] {
        &self.transitioning
    }

    // --- Inspection ---

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.elements.get(&node).map(|e| e.tag.as_str())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.elements
            .get(&node)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements
            .get(&node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn inner_html(&self, node: NodeId) -> Option<&str> {
        self.elements.get(&node)?.inner_html.as_deref()
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.elements.get(&node)?.text.as_deref()
    }

    pub fn is_popover_open(&self, node: NodeId) -> bool {
        self.elements.get(&node).is_some_and(|e| e.popover_open)
    }

    pub fn style_sheet_ids(&self) -> Vec<&str> {
        self.style_sheets.keys().map(String::as_str).collect()
    }

    /// Attached nodes in document order.
    pub fn attached_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.body.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(element) = self.elements.get(&node) {
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.elements.get_mut(&node).and_then(|e| e.parent.take());
        match parent {
            Some(parent) => {
                if let Some(parent) = self.elements.get_mut(&parent) {
                    parent.children.retain(|&child| child != node);
                }
            }
            None => self.body.retain(|&child| child != node),
        }
    }
}

impl Document for HeadlessDocument {
    fn create_element(&mut self, tag: &str) -> NodeId {
        let node = NodeId(self.next_node);
        self.next_node += 1;
        self.elements.insert(
            node,
            Element {
                tag: tag.to_string(),
                ..Element::default()
            },
        );
        node
    }

    fn append_to_body(&mut self, node: NodeId) {
        if !self.elements.contains_key(&node) {
            return;
        }
        self.detach(node);
        self.body.push(node);
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child
            || !self.elements.contains_key(&parent)
            || !self.elements.contains_key(&child)
        {
            return;
        }
        self.detach(child);
        if let Some(element) = self.elements.get_mut(&child) {
            element.parent = Some(parent);
        }
        if let Some(element) = self.elements.get_mut(&parent) {
            element.children.push(child);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if !self.is_attached(node) {
            return;
        }
        self.detach(node);
        // Removing an open popover hides it without notifications.
        if let Some(element) = self.elements.get_mut(&node) {
            element.popover_open = false;
        }
        self.transitioning.retain(|&n| n != node);
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            match self.elements.get(&current) {
                Some(Element {
                    parent: Some(parent),
                    ..
                }) => current = *parent,
                Some(_) => return self.body.contains(&current),
                None => return false,
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.attached_nodes()
            .into_iter()
            .find(|&node| self.attribute(node, "id") == Some(id))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.attributes.shift_remove(name);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.elements
            .get(&node)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.elements.get_mut(&node)
            && !element.classes.iter().any(|c| c == class)
        {
            element.classes.push(class.to_string());
        }
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.attached_nodes()
            .into_iter()
            .filter(|&node| self.has_class(node, class))
            .collect()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.elements.get_mut(&node) else {
            return;
        };
        if value.is_empty() {
            element.styles.shift_remove(property);
        } else {
            element
                .styles
                .insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.elements
            .get(&node)?
            .styles
            .get(property)
            .map(String::as_str)
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.inner_html = Some(html.to_string());
            element.text = None;
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.text = Some(text.to_string());
            element.inner_html = None;
        }
    }

    fn show_popover(&mut self, node: NodeId) {
        if !self.is_attached(node)
            || self.attribute(node, "popover").is_none()
            || self.is_popover_open(node)
        {
            return;
        }
        self.events.push_back(PlatformEvent::BeforeToggle {
            target: node,
            new_state: ToggleState::Open,
        });
        if let Some(element) = self.elements.get_mut(&node) {
            element.popover_open = true;
        }
        self.events.push_back(PlatformEvent::Toggle {
            target: node,
            new_state: ToggleState::Open,
        });
    }

    fn hide_popover(&mut self, node: NodeId) {
        if !self.is_popover_open(node) {
            return;
        }
        self.events.push_back(PlatformEvent::BeforeToggle {
            target: node,
            new_state: ToggleState::Closed,
        });
        if let Some(element) = self.elements.get_mut(&node) {
            element.popover_open = false;
        }
        if self.has_active_transition(node) && !self.transitioning.contains(&node) {
            self.transitioning.push(node);
        }
        self.events.push_back(PlatformEvent::Toggle {
            target: node,
            new_state: ToggleState::Closed,
        });
    }

    fn has_active_transition(&self, node: NodeId) -> bool {
        self.style(node, "transition-duration")
            .is_some_and(duration_is_nonzero)
    }

    fn prefers_dark_color_scheme(&self) -> bool {
        self.prefers_dark
    }

    fn style_sheet(&self, id: &str) -> Option<&StyleSheet> {
        self.style_sheets.get(id)
    }

    fn style_sheet_mut(&mut self, id: &str) -> Option<&mut StyleSheet> {
        self.style_sheets.get_mut(id)
    }

    fn insert_style_sheet(&mut self, id: &str, sheet: StyleSheet) {
        self.style_sheets.insert(id.to_string(), sheet);
    }

    fn remove_style_sheet(&mut self, id: &str) -> bool {
        self.style_sheets.shift_remove(id).is_some()
    }
}

/// Whether a computed `transition-duration` list contains any nonzero duration.
///
/// Accepts the CSS forms `0.3s`, `300ms` and comma-separated lists. Unparseable entries count
/// as zero.
pub fn duration_is_nonzero(value: &str) -> bool {
    value.split(',').map(str::trim).any(|entry| {
        let number = entry
            .strip_suffix("ms")
            .or_else(|| entry.strip_suffix('s'))
            .unwrap_or(entry);
        number.parse::<f64>().is_ok_and(|n| n > 0.0)
    })
}
