//! Registry of named predicates and display filters.
//!
//! One registry per session, injected into the components that consult it.
//! Registration is last-wins under a given name; filters carry a priority
//! and an enabled flag controlling how the display pipeline composes them.

use std::collections::HashMap;

use crate::chain::FrameChain;
use crate::error::{FrameError, FrameResult};
use crate::filter::{FrameFilter, FrameSeq};
use crate::predicate::{FramePredicate, PredicateValue};

// ── FilterEntry ──────────────────────────────────────────────────────────────

/// A registered filter plus its display metadata.
pub struct FilterEntry {
    /// Registered name.
    pub name: String,
    /// Application-order key; higher priority filters see the sequence first.
    pub priority: i32,
    /// Disabled filters stay registered but are skipped by the pipeline.
    pub enabled: bool,
    filter: Box<dyn FrameFilter>,
}

impl FilterEntry {
    fn new(name: String, priority: i32, filter: Box<dyn FrameFilter>) -> Self {
        Self {
            name,
            priority,
            enabled: true,
            filter,
        }
    }
}

impl std::fmt::Debug for FilterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterEntry")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .finish()
    }
}

// ── FrameRegistry ────────────────────────────────────────────────────────────

/// Named collections of predicates and filters for one session.
#[derive(Default)]
pub struct FrameRegistry {
    /// Predicates keyed by registered name.
    predicates: HashMap<String, Box<dyn FramePredicate>>,
    /// Filter entries keyed by registered name.
    filters: HashMap<String, FilterEntry>,
}

impl FrameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Predicates ───────────────────────────────────────────────────────────

    /// Register a predicate under its own name. Re-registering a name
    /// replaces the previous definition.
    pub fn register_predicate(&mut self, predicate: Box<dyn FramePredicate>) {
        let name = predicate.name().to_string();
        if self.predicates.insert(name.clone(), predicate).is_some() {
            log::debug!("predicate '{name}' re-registered, previous definition replaced");
        }
    }

    /// Look up a predicate by name.
    pub fn predicate(&self, name: &str) -> Option<&dyn FramePredicate> {
        self.predicates.get(name).map(|p| p.as_ref())
    }

    /// Registered predicate names, sorted.
    pub fn predicate_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.predicates.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered predicates.
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Evaluate the named predicate against the chain.
    pub fn evaluate(
        &self,
        name: &str,
        chain: &FrameChain<'_>,
        args: &[PredicateValue],
    ) -> FrameResult<bool> {
        let predicate = self
            .predicates
            .get(name)
            .ok_or_else(|| FrameError::UnknownPredicate {
                name: name.to_string(),
            })?;
        predicate.evaluate(chain, args)
    }

    // ── Filters ──────────────────────────────────────────────────────────────

    /// Register a filter under a name with the given priority, enabled.
    /// Re-registering a name replaces the previous entry (last wins).
    pub fn register_filter(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        filter: Box<dyn FrameFilter>,
    ) {
        let name = name.into();
        let entry = FilterEntry::new(name.clone(), priority, filter);
        if self.filters.insert(name.clone(), entry).is_some() {
            log::debug!("filter '{name}' re-registered, previous registration replaced");
        }
    }

    /// Remove a filter by name. Returns `true` if it was registered.
    pub fn remove_filter(&mut self, name: &str) -> bool {
        self.filters.remove(name).is_some()
    }

    /// Enable a filter by name.
    pub fn enable_filter(&mut self, name: &str) -> bool {
        match self.filters.get_mut(name) {
            Some(entry) => {
                entry.enabled = true;
                true
            }
            None => false,
        }
    }

    /// Disable a filter by name (stays registered, skipped by the pipeline).
    pub fn disable_filter(&mut self, name: &str) -> bool {
        match self.filters.get_mut(name) {
            Some(entry) => {
                entry.enabled = false;
                true
            }
            None => false,
        }
    }

    /// Change a registered filter's priority.
    pub fn set_priority(&mut self, name: &str, priority: i32) -> bool {
        match self.filters.get_mut(name) {
            Some(entry) => {
                entry.priority = priority;
                true
            }
            None => false,
        }
    }

    /// Get a filter entry by name.
    pub fn filter(&self, name: &str) -> Option<&FilterEntry> {
        self.filters.get(name)
    }

    /// Total number of registered filters.
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Number of enabled filters.
    pub fn enabled_filter_count(&self) -> usize {
        self.filters.values().filter(|e| e.enabled).count()
    }

    /// All filter entries, descending priority, ties broken by name.
    pub fn filter_entries(&self) -> Vec<&FilterEntry> {
        let mut entries: Vec<&FilterEntry> = self.filters.values().collect();
        entries.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        entries
    }

    /// Compose all enabled filters over the sequence in descending priority
    /// order: the highest-priority filter sees the raw frames first and each
    /// later filter wraps the previous output.
    pub fn apply_filters<'a>(&self, frames: FrameSeq<'a>) -> FrameSeq<'a> {
        let mut seq = frames;
        for entry in self.filter_entries() {
            if entry.enabled {
                seq = entry.filter.transform(seq);
            }
        }
        seq
    }
}

impl std::fmt::Debug for FrameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRegistry")
            .field("predicates", &self.predicate_names())
            .field("filters", &self.filter_entries())
            .finish()
    }
}
