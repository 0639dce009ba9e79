//! Collision-free DOM identifiers for panels.
//!
//! The requested id (or [`DEFAULT_ID`]) is used as-is whenever nothing attached to the
//! document already carries it, so repeated default-id panels stay predictable once the
//! previous one has been removed. On collision a fresh candidate
//! `{base}_{unix_millis}_{token}` is generated and re-checked until one is free.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::distr::{Alphanumeric, SampleString};
use rand::rngs::StdRng;

use crate::config::DEFAULT_ID;
use crate::document::Document;

/// Length of the random token in generated identifiers.
pub const TOKEN_LEN: usize = 6;

/// Allocates unique panel identifiers against the live document.
#[derive(Debug, Clone)]
pub struct IdentityAllocator {
    rng: StdRng,
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityAllocator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic tokens, for tests and reproducible demos.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Return `requested` (or the default id) if free, otherwise a fresh unused identifier.
    pub fn allocate(&mut self, doc: &impl Document, requested: Option<&str>) -> String {
        let base = requested
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_ID)
            .to_string();
        let rng = &mut self.rng;
        let candidate_base = base.clone();
        Self::allocate_with(doc, &base, move || {
            let token = Alphanumeric.sample_string(rng, TOKEN_LEN).to_ascii_lowercase();
            format!("{candidate_base}_{}_{token}", unix_millis())
        })
    }

    /// Like [`allocate`](Self::allocate) with a caller-supplied candidate generator.
    ///
    /// Every candidate is checked against the document; generation continues until one is
    /// free. The generator must eventually produce an unused id.
    pub fn allocate_with(
        doc: &impl Document,
        base: &str,
        mut next_candidate: impl FnMut() -> String,
    ) -> String {
        if doc.element_by_id(base).is_none() {
            return base.to_string();
        }
        let mut attempts = 0usize;
        loop {
            let candidate = next_candidate();
            attempts += 1;
            if doc.element_by_id(&candidate).is_none() {
                tracing::debug!(
                    "id '{}' in use, allocated '{}' after {} attempt(s)",
                    base,
                    candidate,
                    attempts
                );
                return candidate;
            }
            tracing::trace!("candidate id '{}' also in use", candidate);
        }
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDocument;

    fn occupy(doc: &mut HeadlessDocument, id: &str) {
        let node = doc.create_element("div");
        doc.set_attribute(node, "id", id);
        doc.append_to_body(node);
    }

    #[test]
    fn test_free_id_kept_as_is() {
        let doc = HeadlessDocument::new();
        let mut ids = IdentityAllocator::with_seed(7);
        assert_eq!(ids.allocate(&doc, None), DEFAULT_ID);
        assert_eq!(ids.allocate(&doc, Some("save-error")), "save-error");
        assert_eq!(ids.allocate(&doc, Some("  ")), DEFAULT_ID);
    }

    #[test]
    fn test_collision_generates_prefixed_id() {
        let mut doc = HeadlessDocument::new();
        occupy(&mut doc, DEFAULT_ID);
        let mut ids = IdentityAllocator::with_seed(7);

        let id = ids.allocate(&doc, None);
        assert_ne!(id, DEFAULT_ID);
        assert!(id.starts_with("bobpop_"));
        let token = id.rsplit('_').next().unwrap();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_every_candidate_is_rechecked() {
        let mut doc = HeadlessDocument::new();
        occupy(&mut doc, "base");
        occupy(&mut doc, "taken-1");
        occupy(&mut doc, "taken-2");

        let mut candidates = vec!["taken-1", "taken-2", "taken-1", "free"].into_iter();
        let mut calls = 0;
        let id = IdentityAllocator::allocate_with(&doc, "base", || {
            calls += 1;
            candidates.next().unwrap().to_string()
        });

        assert_eq!(id, "free");
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_detached_holder_does_not_collide() {
        let mut doc = HeadlessDocument::new();
        let stale = doc.create_element("div");
        doc.set_attribute(stale, "id", DEFAULT_ID);
        let mut ids = IdentityAllocator::with_seed(1);
        assert_eq!(ids.allocate(&doc, None), DEFAULT_ID);
    }
}
