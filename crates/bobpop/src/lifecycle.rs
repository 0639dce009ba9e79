//! Per-panel open/close state machine.
//!
//! ```text
//! Unopened --toggle(open)--> Open --toggle(closed)--> Closing --(no transition | transitionend)--> Removed
//! ```
//!
//! The controller itself never touches the document. It consumes notifications, fires hooks,
//! and reports what the owner ([`Bobpop`](crate::Bobpop)) must do next through [`Step`].

use std::rc::Rc;

use crate::builder::ControlRole;
use crate::config::{Hook, Hooks, PopoverConfig};
use crate::document::NodeId;
use crate::event::ToggleState;

/// Why a panel closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DismissalOutcome {
    /// The OK control was activated.
    Confirmed,
    /// The Cancel or close control was activated, or the panel was light-dismissed.
    Cancelled,
    /// No control was involved, e.g. a programmatic hide.
    #[default]
    Neutral,
}

impl DismissalOutcome {
    pub fn for_control(role: ControlRole) -> Self {
        match role {
            ControlRole::Ok => DismissalOutcome::Confirmed,
            ControlRole::Cancel | ControlRole::Close => DismissalOutcome::Cancelled,
        }
    }
}

/// Lifecycle state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Unopened,
    Open,
    Closing,
    Removed,
}

/// Which hook an event was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopoverEventKind {
    BeforeOpen,
    Open,
    BeforeClose,
    Close,
    TransitionStart,
}

/// Payload handed to every hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverEvent {
    pub kind: PopoverEventKind,
    /// DOM id of the panel.
    pub id: String,
    pub node: NodeId,
    pub outcome: DismissalOutcome,
}

impl PopoverEvent {
    /// True when the OK control closed the panel.
    pub fn confirmed(&self) -> bool {
        self.outcome == DismissalOutcome::Confirmed
    }

    /// True when Cancel, the close control, escape, or light dismiss closed the panel.
    pub fn cancelled(&self) -> bool {
        self.outcome == DismissalOutcome::Cancelled
    }
}

/// What the owner must do after the controller handled a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing further.
    Idle,
    /// The panel closed; check for an exit transition and tear down.
    BeginTeardown,
    /// The deferred removal can run now.
    Remove,
}

/// State machine and hook dispatch for one panel instance.
#[derive(Debug)]
pub struct PanelController {
    node: NodeId,
    config: Rc<PopoverConfig>,
    hooks: Hooks,
    state: LifecycleState,
    outcome: DismissalOutcome,
    listening: bool,
    awaiting_transition: bool,
}

impl PanelController {
    pub fn new(node: NodeId, config: Rc<PopoverConfig>, hooks: Hooks) -> Self {
        Self {
            node,
            config,
            hooks,
            state: LifecycleState::Unopened,
            outcome: DismissalOutcome::Neutral,
            listening: true,
            awaiting_transition: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &PopoverConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn outcome(&self) -> DismissalOutcome {
        self.outcome
    }

    pub fn is_awaiting_transition(&self) -> bool {
        self.awaiting_transition
    }

    /// Record the outcome of the most recently activated control.
    pub fn record(&mut self, outcome: DismissalOutcome) {
        if self.state == LifecycleState::Removed {
            return;
        }
        self.outcome = outcome;
    }

    /// Handle `beforetoggle`.
    pub fn before_toggle(&mut self, new_state: ToggleState) -> Step {
        if !self.listening {
            tracing::trace!("'{}' beforetoggle ignored, listeners released", self.id());
            return Step::Idle;
        }
        match new_state {
            ToggleState::Open => self.fire(PopoverEventKind::BeforeOpen),
            ToggleState::Closed => self.fire(PopoverEventKind::BeforeClose),
        }
        Step::Idle
    }

    /// Handle `toggle`.
    pub fn toggle(&mut self, new_state: ToggleState) -> Step {
        if !self.listening {
            tracing::trace!("'{}' toggle ignored, listeners released", self.id());
            return Step::Idle;
        }
        match (self.state, new_state) {
            (LifecycleState::Unopened, ToggleState::Open) => {
                self.state = LifecycleState::Open;
                tracing::debug!("popover '{}' opened", self.id());
                self.fire(PopoverEventKind::Open);
                Step::Idle
            }
            (LifecycleState::Unopened | LifecycleState::Open, ToggleState::Closed) => {
                self.state = LifecycleState::Closing;
                tracing::debug!(
                    "popover '{}' closed ({:?})",
                    self.id(),
                    self.outcome
                );
                self.fire(PopoverEventKind::Close);
                // Single-shot: a panel is dismissed at most once.
                self.listening = false;
                Step::BeginTeardown
            }
            (state, new_state) => {
                tracing::trace!(
                    "'{}' toggle to {:?} ignored in state {:?}",
                    self.id(),
                    new_state,
                    state
                );
                Step::Idle
            }
        }
    }

    /// Removal has been deferred until the exit transition completes.
    pub fn defer_removal(&mut self) {
        if self.state != LifecycleState::Closing || self.awaiting_transition {
            return;
        }
        self.awaiting_transition = true;
        tracing::debug!("popover '{}' waiting for exit transition", self.id());
        self.fire(PopoverEventKind::TransitionStart);
    }

    /// Handle `transitionend` on the container.
    pub fn transition_end(&mut self) -> Step {
        if self.awaiting_transition {
            self.awaiting_transition = false;
            Step::Remove
        } else {
            Step::Idle
        }
    }

    pub fn mark_removed(&mut self) {
        self.state = LifecycleState::Removed;
        self.awaiting_transition = false;
        self.listening = false;
    }

    fn fire(&self, kind: PopoverEventKind) {
        let hook: Option<&Hook> = match kind {
            PopoverEventKind::BeforeOpen => self.hooks.on_before_open.as_ref(),
            PopoverEventKind::Open => self.hooks.on_open.as_ref(),
            PopoverEventKind::BeforeClose => self.hooks.on_before_close.as_ref(),
            PopoverEventKind::Close => self.hooks.on_close.as_ref(),
            PopoverEventKind::TransitionStart => self.hooks.on_transition_start.as_ref(),
        };
        if let Some(hook) = hook {
            hook.call(&PopoverEvent {
                kind,
                id: self.config.id.clone(),
                node: self.node,
                outcome: self.outcome,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recording_hooks(log: &Rc<RefCell<Vec<(PopoverEventKind, DismissalOutcome)>>>) -> Hooks {
        let hook = |log: &Rc<RefCell<Vec<_>>>| {
            let log = log.clone();
            Some(Hook::new(move |event: &PopoverEvent| {
                log.borrow_mut().push((event.kind, event.outcome));
            }))
        };
        Hooks {
            on_before_open: hook(log),
            on_open: hook(log),
            on_before_close: hook(log),
            on_close: hook(log),
            on_transition_start: hook(log),
        }
    }

    fn controller(hooks: Hooks) -> PanelController {
        PanelController::new(NodeId(1), Rc::new(PopoverConfig::default()), hooks)
    }

    #[test]
    fn test_full_cycle_without_transition() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut panel = controller(recording_hooks(&log));

        assert_eq!(panel.before_toggle(ToggleState::Open), Step::Idle);
        assert_eq!(panel.toggle(ToggleState::Open), Step::Idle);
        assert_eq!(panel.state(), LifecycleState::Open);

        panel.record(DismissalOutcome::Confirmed);
        assert_eq!(panel.before_toggle(ToggleState::Closed), Step::Idle);
        assert_eq!(panel.toggle(ToggleState::Closed), Step::BeginTeardown);
        assert_eq!(panel.state(), LifecycleState::Closing);

        assert_eq!(
            *log.borrow(),
            vec![
                (PopoverEventKind::BeforeOpen, DismissalOutcome::Neutral),
                (PopoverEventKind::Open, DismissalOutcome::Neutral),
                (PopoverEventKind::BeforeClose, DismissalOutcome::Confirmed),
                (PopoverEventKind::Close, DismissalOutcome::Confirmed),
            ]
        );
    }

    #[test]
    fn test_close_is_single_shot() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut panel = controller(recording_hooks(&log));
        panel.toggle(ToggleState::Open);
        assert_eq!(panel.toggle(ToggleState::Closed), Step::BeginTeardown);

        assert_eq!(panel.toggle(ToggleState::Open), Step::Idle);
        assert_eq!(panel.toggle(ToggleState::Closed), Step::Idle);
        assert_eq!(panel.before_toggle(ToggleState::Closed), Step::Idle);

        let closes = log
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == PopoverEventKind::Close)
            .count();
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_deferred_removal_fires_transition_start_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut panel = controller(recording_hooks(&log));
        panel.toggle(ToggleState::Open);
        panel.toggle(ToggleState::Closed);

        assert_eq!(panel.transition_end(), Step::Idle);
        panel.defer_removal();
        panel.defer_removal();
        assert!(panel.is_awaiting_transition());
        assert_eq!(panel.transition_end(), Step::Remove);
        assert_eq!(panel.transition_end(), Step::Idle);

        let starts = log
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == PopoverEventKind::TransitionStart)
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn test_last_activated_control_wins() {
        let mut panel = controller(Hooks::default());
        panel.record(DismissalOutcome::Confirmed);
        panel.record(DismissalOutcome::Cancelled);
        assert_eq!(panel.outcome(), DismissalOutcome::Cancelled);
    }

    #[test]
    fn test_event_flags_are_exclusive() {
        for outcome in [
            DismissalOutcome::Confirmed,
            DismissalOutcome::Cancelled,
            DismissalOutcome::Neutral,
        ] {
            let event = PopoverEvent {
                kind: PopoverEventKind::Close,
                id: "bobpop".into(),
                node: NodeId(0),
                outcome,
            };
            assert!(!(event.confirmed() && event.cancelled()));
        }
    }

    #[test]
    fn test_outcome_for_control() {
        assert_eq!(
            DismissalOutcome::for_control(ControlRole::Ok),
            DismissalOutcome::Confirmed
        );
        assert_eq!(
            DismissalOutcome::for_control(ControlRole::Close),
            DismissalOutcome::Cancelled
        );
        assert_eq!(
            DismissalOutcome::for_control(ControlRole::Cancel),
            DismissalOutcome::Cancelled
        );
    }
}
