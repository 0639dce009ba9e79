//! Notifications the host platform feeds back into [`Bobpop::dispatch`](crate::Bobpop::dispatch).
//!
//! These mirror the browser's `beforetoggle`, `toggle`, `transitionend`, `click` and `keydown`
//! events closely enough that a web adapter can forward them one-to-one.

use crate::document::NodeId;

/// Open/closed state carried by toggle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleState {
    Open,
    Closed,
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Any other key, by its `KeyboardEvent.key` name.
    Other(String),
}

/// A platform notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Fired before a popover starts opening or closing.
    BeforeToggle {
        target: NodeId,
        new_state: ToggleState,
    },
    /// Fired after a popover has opened or closed.
    Toggle {
        target: NodeId,
        new_state: ToggleState,
    },
    /// A CSS transition on `target` has completed.
    TransitionEnd { target: NodeId },
    /// `target` was activated (mouse, touch or keyboard).
    Click { target: NodeId },
    /// Key pressed anywhere in the document.
    KeyDown { key: Key },
    /// The platform is about to light-dismiss `target` (outside click or platform escape).
    LightDismiss { target: NodeId },
}

impl PlatformEvent {
    /// The node this event is addressed to, if any.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            PlatformEvent::BeforeToggle { target, .. }
            | PlatformEvent::Toggle { target, .. }
            | PlatformEvent::TransitionEnd { target }
            | PlatformEvent::Click { target }
            | PlatformEvent::LightDismiss { target } => Some(*target),
            PlatformEvent::KeyDown { .. } => None,
        }
    }
}
