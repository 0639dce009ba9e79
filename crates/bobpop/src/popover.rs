//! The `Bobpop` service: entry point tying resolution, building, styling and lifecycle together.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use bobpop::{Bobpop, ControlRole, DismissMode, HeadlessDocument, LifecycleState, PopoverOptions};
//!
//! let mut doc = HeadlessDocument::new();
//! let mut bobpop = Bobpop::new();
//!
//! let confirmed = Rc::new(Cell::new(false));
//! let seen = confirmed.clone();
//! let panel = bobpop.open(
//!     &mut doc,
//!     PopoverOptions::new()
//!         .dismiss_mode(DismissMode::Manual)
//!         .show_ok_button(true)
//!         .on_close(move |event| seen.set(event.confirmed())),
//! );
//! doc.pump(&mut bobpop);
//!
//! doc.click(panel.control(ControlRole::Ok).unwrap());
//! doc.pump(&mut bobpop);
//!
//! assert!(confirmed.get());
//! assert_eq!(bobpop.state(&panel), LifecycleState::Removed);
//! ```

use std::rc::Rc;

use bobpop_core::alloc::HashMap;

use crate::builder::{ControlRole, MARKER_CLASS, PanelBuilder, PanelNodes};
use crate::config::{PopoverConfig, PopoverOptions, resolve};
use crate::document::{Document, NodeId};
use crate::event::{Key, PlatformEvent};
use crate::identity::IdentityAllocator;
use crate::lifecycle::{DismissalOutcome, LifecycleState, PanelController, Step};
use crate::style_registry::StyleRegistry;
use crate::tail::tail_selector;

/// Handle to an opened panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelHandle {
    /// DOM id assigned to the container.
    pub id: String,
    pub nodes: PanelNodes,
}

impl PanelHandle {
    pub fn container(&self) -> NodeId {
        self.nodes.container
    }

    pub fn control(&self, role: ControlRole) -> Option<NodeId> {
        self.nodes.control(role)
    }
}

/// A live panel: its nodes plus its state machine.
#[derive(Debug)]
struct LivePanel {
    nodes: PanelNodes,
    controller: PanelController,
}

/// Popover engine.
///
/// Owns the style registry, the identity allocator and every live panel's controller.
/// Documents are passed in per call, so one engine can serve a document it does not own.
#[derive(Debug, Default)]
pub struct Bobpop {
    styles: StyleRegistry,
    ids: IdentityAllocator,
    panels: HashMap<NodeId, LivePanel>,
    /// Containers of panels listening for the global escape key, in registration order.
    escape_listeners: Vec<NodeId>,
}

impl Bobpop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allocator(ids: IdentityAllocator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Create, attach and show a panel.
    pub fn open(&mut self, doc: &mut impl Document, options: PopoverOptions) -> PanelHandle {
        let mut config = resolve(&options, doc.prefers_dark_color_scheme());
        config.id = self.ids.allocate(&*doc, Some(config.id.as_str()));
        let config = Rc::new(config);

        let nodes = PanelBuilder::new(doc, &config).build();
        self.inject_styles(doc, &config);

        let container = nodes.container;
        if config.wants_escape_listener() {
            self.escape_listeners.push(container);
        }

        let controller = PanelController::new(container, config.clone(), options.hooks);
        self.panels.insert(
            container,
            LivePanel {
                nodes: nodes.clone(),
                controller,
            },
        );

        tracing::debug!(
            "opening popover '{}' ({})",
            config.id,
            config.dismiss_mode.as_attr()
        );
        doc.show_popover(container);

        PanelHandle {
            id: config.id.clone(),
            nodes,
        }
    }

    /// Ask the platform to hide every attached panel.
    ///
    /// Each panel then runs its own close path; removal happens as notifications arrive.
    pub fn close_all(&mut self, doc: &mut impl Document) {
        let containers = doc.elements_by_class(MARKER_CLASS);
        tracing::debug!("closing {} popover(s)", containers.len());
        for container in containers {
            doc.hide_popover(container);
        }
    }

    /// Lifecycle state of a panel. Unknown panels are reported as removed.
    pub fn state(&self, panel: &PanelHandle) -> LifecycleState {
        self.panels
            .get(&panel.container())
            .map_or(LifecycleState::Removed, |live| live.controller.state())
    }

    /// Resolved configuration of a live panel.
    pub fn config(&self, panel: &PanelHandle) -> Option<&PopoverConfig> {
        self.panels
            .get(&panel.container())
            .map(|live| live.controller.config())
    }

    pub fn live_panels(&self) -> usize {
        self.panels.len()
    }

    pub fn has_escape_listener(&self, panel: &PanelHandle) -> bool {
        self.escape_listeners.contains(&panel.container())
    }

    /// Feed one platform notification into the engine.
    pub fn dispatch(&mut self, doc: &mut impl Document, event: PlatformEvent) {
        tracing::trace!("dispatch {:?}", event);
        match event {
            PlatformEvent::BeforeToggle { target, new_state } => {
                if let Some(live) = self.panels.get_mut(&target) {
                    live.controller.before_toggle(new_state);
                }
            }
            PlatformEvent::Toggle { target, new_state } => {
                let step = match self.panels.get_mut(&target) {
                    Some(live) => live.controller.toggle(new_state),
                    None => Step::Idle,
                };
                if step == Step::BeginTeardown {
                    self.begin_teardown(doc, target);
                }
            }
            PlatformEvent::TransitionEnd { target } => {
                let step = match self.panels.get_mut(&target) {
                    Some(live) => live.controller.transition_end(),
                    None => Step::Idle,
                };
                if step == Step::Remove {
                    self.remove_panel(doc, target);
                }
            }
            PlatformEvent::Click { target } => self.control_activated(target),
            PlatformEvent::LightDismiss { target } => {
                if let Some(live) = self.panels.get_mut(&target) {
                    live.controller.record(DismissalOutcome::Cancelled);
                }
            }
            PlatformEvent::KeyDown { key: Key::Escape } => self.escape_pressed(doc),
            PlatformEvent::KeyDown { .. } => {}
        }
    }

    fn inject_styles(&mut self, doc: &mut impl Document, config: &PopoverConfig) {
        self.styles.ensure_backdrop(doc);
        if !config.controls().is_empty() {
            self.styles.ensure_buttons(doc);
        }
        if config.transition {
            self.styles.replace_transitions(doc, config.transition_kind);
        }
        if let Some(placement) = config.tail {
            self.styles.ensure_tails(doc);
            self.styles
                .add_rule(doc, placement.rule(&config.id, &config.tail_color));
        }
    }

    fn control_activated(&mut self, target: NodeId) {
        let found = self
            .panels
            .values_mut()
            .find_map(|live| live.nodes.role_of(target).map(|role| (live, role)));
        if let Some((live, role)) = found {
            tracing::trace!("'{}' control {:?} activated", live.controller.id(), role);
            live.controller.record(DismissalOutcome::for_control(role));
        }
    }

    fn escape_pressed(&mut self, doc: &mut impl Document) {
        let mut detached = Vec::new();
        for container in self.escape_listeners.clone() {
            let Some(live) = self.panels.get_mut(&container) else {
                continue;
            };
            // Looked up fresh: the element may have been removed behind our back.
            match doc.element_by_id(live.controller.id()) {
                Some(node) if node == container => {
                    live.controller.record(DismissalOutcome::Cancelled);
                    doc.hide_popover(node);
                }
                _ => {
                    tracing::trace!(
                        "escape ignored, '{}' is no longer attached",
                        live.controller.id()
                    );
                    if !doc.is_attached(container) {
                        detached.push(container);
                    }
                }
            }
        }
        for container in detached {
            self.escape_listeners.retain(|&node| node != container);
            self.remove_panel(doc, container);
        }
    }

    fn begin_teardown(&mut self, doc: &mut impl Document, container: NodeId) {
        self.escape_listeners.retain(|&node| node != container);
        if doc.has_active_transition(container) {
            if let Some(live) = self.panels.get_mut(&container) {
                live.controller.defer_removal();
            }
        } else {
            self.remove_panel(doc, container);
        }
    }

    fn remove_panel(&mut self, doc: &mut impl Document, container: NodeId) {
        let Some(mut live) = self.panels.remove(&container) else {
            tracing::warn!("remove requested for unknown panel {:?}", container);
            return;
        };
        doc.remove(container);

        let config = live.controller.config();
        if config.tail.is_some() {
            self.styles.remove(doc, &tail_selector(&config.id));
        }
        // Only undo our own stamp; the target may be gone or re-stamped by another panel.
        if let (Some(target), Some(name)) = (live.nodes.anchor_target, config.anchor.as_deref()) {
            if doc.is_attached(target) && doc.style(target, "anchor-name") == Some(name) {
                doc.set_style(target, "anchor-name", "");
            } else {
                tracing::debug!(
                    "anchor target of '{}' gone or re-stamped, skipping unbind",
                    config.id
                );
            }
        }

        tracing::debug!("popover '{}' removed", config.id);
        live.controller.mark_removed();
    }
}
