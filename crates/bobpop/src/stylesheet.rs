//! Minimal structured stylesheet model.
//!
//! Style blocks are generated by this crate, so rules are kept as `(selector, body)` pairs
//! rather than parsed CSS text. A host adapter serialises them with [`StyleSheet::css_text`].

/// A single CSS rule: a selector (or at-rule prelude) and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    /// Selector text, e.g. `#bobpop::before` or `@starting-style`.
    pub selector: String,
    /// Body between the braces, without the braces.
    pub body: String,
}

impl CssRule {
    /// Build a rule from declaration pairs.
    pub fn new(selector: impl Into<String>, declarations: &[(&str, &str)]) -> Self {
        let body = declarations
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            selector: selector.into(),
            body,
        }
    }

    /// Build a rule with a pre-formatted body, used for nested at-rules.
    pub fn raw(selector: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            body: body.into(),
        }
    }

    /// Serialised form, `selector { body }`.
    pub fn css_text(&self) -> String {
        format!("{} {{ {} }}", self.selector, self.body)
    }

    /// Compare selectors ignoring all whitespace.
    pub fn selector_matches(&self, selector: &str) -> bool {
        strip_whitespace(&self.selector) == strip_whitespace(selector)
    }
}

/// An ordered list of rules, standing in for one `<style>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<CssRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: Vec<CssRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append a rule, returning its index.
    pub fn insert_rule(&mut self, rule: CssRule) -> usize {
        self.rules.push(rule);
        self.rules.len() - 1
    }

    /// Delete the rule at `index`. Out-of-range indices are ignored.
    pub fn delete_rule(&mut self, index: usize) {
        if index < self.rules.len() {
            self.rules.remove(index);
        }
    }

    /// Indices of every rule whose selector matches, ignoring whitespace.
    pub fn rule_indices_by_selector(&self, selector: &str) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.selector_matches(selector))
            .map(|(index, _)| index)
            .collect()
    }

    /// Delete every rule matching `selector`. Returns how many were removed.
    pub fn remove_rules(&mut self, selector: &str) -> usize {
        let indices = self.rule_indices_by_selector(selector);
        // Highest index first so earlier indices stay valid.
        for &index in indices.iter().rev() {
            self.delete_rule(index);
        }
        indices.len()
    }

    pub fn css_text(&self) -> String {
        self.rules
            .iter()
            .map(CssRule::css_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_serialises_declarations_in_order() {
        let rule = CssRule::new(".bobpop", &[("color", "red"), ("padding", "15px")]);
        assert_eq!(rule.css_text(), ".bobpop { color: red; padding: 15px; }");
    }

    #[test]
    fn test_selector_match_ignores_whitespace() {
        let rule = CssRule::new("#bobpop :: before", &[]);
        assert!(rule.selector_matches("#bobpop::before"));
        assert!(!rule.selector_matches("#bobpop::after"));
    }

    #[test]
    fn test_remove_rules_deletes_every_match() {
        let mut sheet = StyleSheet::new();
        sheet.insert_rule(CssRule::new("#a::before", &[("left", "10%")]));
        sheet.insert_rule(CssRule::new("#b::before", &[("left", "50%")]));
        sheet.insert_rule(CssRule::new("#a ::before", &[("left", "90%")]));

        assert_eq!(sheet.remove_rules("#a::before"), 2);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules()[0].selector, "#b::before");
    }

    #[test]
    fn test_delete_rule_out_of_range_is_ignored() {
        let mut sheet = StyleSheet::from_rules(vec![CssRule::new("p", &[])]);
        sheet.delete_rule(5);
        assert_eq!(sheet.len(), 1);
    }
}
