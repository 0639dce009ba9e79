//! Bobpop - popover and alert panel engine
//!
//! This crate drives transient overlay panels (alerts, confirmations, tooltips) on top of a
//! host document's native popover primitive:
//! - Layered configuration: built-in defaults, a named theme, then caller options
//! - Panel construction with title, body and OK/Cancel/close controls
//! - Light (`auto`) and hard (`manual`) dismissal, with escape handling for the latter
//! - Lifecycle hooks carrying a confirmed/cancelled/neutral outcome
//! - Anchored positioning, decorative tails and exit transitions
//!
//! The host document is abstracted behind [`Document`]; platform notifications are fed back
//! through [`Bobpop::dispatch`]. [`HeadlessDocument`] is an in-memory implementation.
//!
//! ## Quick Start
//!
//! ```
//! use bobpop::{Bobpop, HeadlessDocument, PopoverOptions};
//!
//! let mut doc = HeadlessDocument::new();
//! let mut bobpop = Bobpop::new();
//!
//! bobpop.open(
//!     &mut doc,
//!     PopoverOptions::new()
//!         .theme("error")
//!         .title("Save failed")
//!         .body("The server did not respond.")
//!         .on_close(|event| println!("closed {} ({:?})", event.id, event.outcome)),
//! );
//!
//! // In the host's event loop:
//! doc.pump(&mut bobpop);
//! ```

pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod headless;
pub mod identity;
pub mod lifecycle;
pub mod popover;
pub mod style_registry;
pub mod stylesheet;
pub mod tail;
pub mod theme;

pub use builder::{ControlRole, PanelNodes};
pub use config::{
    DismissMode, Hook, Hooks, PopoverConfig, PopoverOptions, TextAlign, TransitionKind, resolve,
};
pub use document::{Document, NodeId};
pub use error::{ParseError, ParseResult};
pub use event::{Key, PlatformEvent, ToggleState};
pub use headless::HeadlessDocument;
pub use identity::IdentityAllocator;
pub use lifecycle::{DismissalOutcome, LifecycleState, PopoverEvent, PopoverEventKind};
pub use popover::{Bobpop, PanelHandle};
pub use style_registry::StyleRegistry;
pub use stylesheet::{CssRule, StyleSheet};
pub use tail::TailPlacement;
pub use theme::{ThemeName, ThemeOverrides};
