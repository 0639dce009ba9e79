//! Global style blocks shared by every panel.
//!
//! Blocks are keyed by a stable id and live in the document for the rest of its life. They are
//! injected lazily, the first time a panel needs them, and never duplicated. The transition
//! block is the exception: it is rebuilt on every open that enables a transition so it always
//! reflects the preset that panel asked for.
//!
//! Per-instance rules (the tail `::before` rules) go into a separate rules sheet and are removed
//! by selector when their panel is torn down.

use crate::builder::{BUTTON_CLASS, MARKER_CLASS, TAIL_CLASS};
use crate::config::TransitionKind;
use crate::document::Document;
use crate::stylesheet::{CssRule, StyleSheet};

pub const BACKDROP_BLOCK: &str = "bobpop-backdrop";
pub const TRANSITIONS_BLOCK: &str = "bobpop-transitions";
pub const TAILS_BLOCK: &str = "bobpop-tails";
pub const BUTTONS_BLOCK: &str = "bobpop-buttons";
pub const RULES_SHEET: &str = "bobpop-rules";

/// Service object managing injected style blocks in a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    injected: usize,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks this registry has inserted so far, replacements included.
    pub fn injected_count(&self) -> usize {
        self.injected
    }

    pub fn exists(&self, doc: &impl Document, block_id: &str) -> bool {
        doc.style_sheet(block_id).is_some()
    }

    /// Insert `rules` under `block_id` unless a block with that id is already present.
    ///
    /// Returns whether anything was inserted.
    pub fn ensure(&mut self, doc: &mut impl Document, block_id: &str, rules: Vec<CssRule>) -> bool {
        if self.exists(&*doc, block_id) {
            return false;
        }
        tracing::trace!("injecting style block '{}'", block_id);
        doc.insert_style_sheet(block_id, StyleSheet::from_rules(rules));
        self.injected += 1;
        true
    }

    /// Remove then re-insert a block.
    pub fn replace(&mut self, doc: &mut impl Document, block_id: &str, rules: Vec<CssRule>) {
        doc.remove_style_sheet(block_id);
        self.ensure(doc, block_id, rules);
    }

    /// Remove a whole block by id, or failing that, every per-instance rule matching
    /// `selector_or_id` (whitespace-insensitive). Returns how many blocks or rules went away.
    pub fn remove(&mut self, doc: &mut impl Document, selector_or_id: &str) -> usize {
        if selector_or_id != RULES_SHEET && doc.remove_style_sheet(selector_or_id) {
            tracing::trace!("removed style block '{}'", selector_or_id);
            return 1;
        }
        match doc.style_sheet_mut(RULES_SHEET) {
            Some(sheet) => sheet.remove_rules(selector_or_id),
            None => 0,
        }
    }

    /// Append a per-instance rule to the rules sheet, creating the sheet if needed.
    pub fn add_rule(&mut self, doc: &mut impl Document, rule: CssRule) {
        self.ensure(doc, RULES_SHEET, Vec::new());
        if let Some(sheet) = doc.style_sheet_mut(RULES_SHEET) {
            sheet.insert_rule(rule);
        }
    }

    pub fn ensure_backdrop(&mut self, doc: &mut impl Document) {
        self.ensure(doc, BACKDROP_BLOCK, backdrop_rules());
    }

    pub fn ensure_buttons(&mut self, doc: &mut impl Document) {
        self.ensure(doc, BUTTONS_BLOCK, button_rules());
    }

    pub fn ensure_tails(&mut self, doc: &mut impl Document) {
        self.ensure(doc, TAILS_BLOCK, tail_rules());
    }

    pub fn replace_transitions(&mut self, doc: &mut impl Document, kind: TransitionKind) {
        self.replace(doc, TRANSITIONS_BLOCK, transition_rules(kind));
    }
}

fn backdrop_rules() -> Vec<CssRule> {
    vec![CssRule::new(
        format!(".{MARKER_CLASS}::backdrop"),
        &[
            ("background", "var(--bobpop-backdrop-color, rgba(0, 0, 0, 0.5))"),
            ("backdrop-filter", "blur(var(--bobpop-backdrop-blur, 0px))"),
        ],
    )]
}

fn button_rules() -> Vec<CssRule> {
    vec![
        CssRule::new(
            format!(".{BUTTON_CLASS}"),
            &[
                ("cursor", "pointer"),
                ("font", "inherit"),
                ("padding", ".4rem .9rem"),
                ("border-radius", "6px"),
                ("border", "1px solid transparent"),
                ("background", "var(--bobpop-button-background, buttonface)"),
                ("color", "var(--bobpop-button-color, buttontext)"),
            ],
        ),
        CssRule::new(
            ".bobpop-close",
            &[
                ("border", "none"),
                ("background", "transparent"),
                ("padding", "0"),
            ],
        ),
        CssRule::new(".bobpop-button-ok", &[("font-weight", "bold")]),
        CssRule::new(".bobpop-button-cancel", &[("opacity", "0.85")]),
        CssRule::new(
            format!(".{BUTTON_CLASS}:focus-visible"),
            &[("outline", "2px solid currentColor"), ("outline-offset", "2px")],
        ),
    ]
}

fn tail_rules() -> Vec<CssRule> {
    vec![CssRule::new(
        format!(".{TAIL_CLASS}::before"),
        &[
            ("content", "\"\""),
            ("position", "absolute"),
            ("pointer-events", "none"),
            ("height", "0"),
            ("width", "0"),
            ("border", "solid transparent"),
            ("border-width", "8px"),
            ("margin-left", "-8px"),
        ],
    )]
}

fn transition_rules(kind: TransitionKind) -> Vec<CssRule> {
    let class = format!(".{}", kind.class_name());
    let (hidden, shown) = match kind {
        TransitionKind::Fade => ("opacity: 0;", "opacity: 1;"),
        TransitionKind::Scale => (
            "opacity: 0; transform: scale(0.9);",
            "opacity: 1; transform: scale(1);",
        ),
        TransitionKind::SlideUp => (
            "opacity: 0; transform: translateY(1rem);",
            "opacity: 1; transform: translateY(0);",
        ),
        TransitionKind::SlideDown => (
            "opacity: 0; transform: translateY(-1rem);",
            "opacity: 1; transform: translateY(0);",
        ),
    };
    vec![
        CssRule::raw(
            class.clone(),
            format!(
                "{hidden} transition-property: opacity, transform, overlay, display; \
                 transition-behavior: allow-discrete;"
            ),
        ),
        CssRule::raw(format!("{class}:popover-open"), shown),
        CssRule::raw("@starting-style", format!("{class}:popover-open {{ {hidden} }}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDocument;

    #[test]
    fn test_ensure_is_idempotent() {
        let mut doc = HeadlessDocument::new();
        let mut registry = StyleRegistry::new();

        assert!(registry.ensure(&mut doc, BACKDROP_BLOCK, backdrop_rules()));
        assert!(!registry.ensure(&mut doc, BACKDROP_BLOCK, Vec::new()));

        assert_eq!(doc.style_sheet_ids(), vec![BACKDROP_BLOCK]);
        assert_eq!(doc.style_sheet(BACKDROP_BLOCK).map(StyleSheet::len), Some(1));
        assert_eq!(registry.injected_count(), 1);
    }

    #[test]
    fn test_ensure_respects_blocks_inserted_elsewhere() {
        let mut doc = HeadlessDocument::new();
        doc.insert_style_sheet(BUTTONS_BLOCK, StyleSheet::new());
        let mut registry = StyleRegistry::new();
        registry.ensure_buttons(&mut doc);
        assert_eq!(doc.style_sheet(BUTTONS_BLOCK).map(StyleSheet::len), Some(0));
    }

    #[test]
    fn test_transition_block_is_replaced() {
        let mut doc = HeadlessDocument::new();
        let mut registry = StyleRegistry::new();

        registry.replace_transitions(&mut doc, TransitionKind::Fade);
        registry.replace_transitions(&mut doc, TransitionKind::SlideDown);

        let sheet = doc.style_sheet(TRANSITIONS_BLOCK).expect("block present");
        assert!(sheet.css_text().contains("bobpop-transition-slide-down"));
        assert!(!sheet.css_text().contains("bobpop-transition-fade"));
        assert_eq!(doc.style_sheet_ids(), vec![TRANSITIONS_BLOCK]);
    }

    #[test]
    fn test_remove_by_block_id_or_selector() {
        let mut doc = HeadlessDocument::new();
        let mut registry = StyleRegistry::new();
        registry.ensure_tails(&mut doc);
        registry.add_rule(&mut doc, CssRule::new("#one::before", &[("left", "10%")]));
        registry.add_rule(&mut doc, CssRule::new("#two::before", &[("left", "90%")]));

        assert_eq!(registry.remove(&mut doc, "# one :: before"), 1);
        assert_eq!(doc.style_sheet(RULES_SHEET).map(StyleSheet::len), Some(1));

        assert_eq!(registry.remove(&mut doc, TAILS_BLOCK), 1);
        assert!(!registry.exists(&doc, TAILS_BLOCK));

        assert_eq!(registry.remove(&mut doc, "#missing::before"), 0);
    }

    #[test]
    fn test_remove_without_rules_sheet_is_noop() {
        let mut doc = HeadlessDocument::new();
        let mut registry = StyleRegistry::new();
        assert_eq!(registry.remove(&mut doc, "#bobpop::before"), 0);
    }
}
