//! High-level inspection session.
//!
//! Owns the captured stack, the frame selection, the registry, and the
//! render options. The hosting debugger feeds activation records in as the
//! target runs and consults the session for predicates and backtraces.
//!
//! Construction registers the stock predicates (`caller_is`,
//! `caller_matches`) and the `"Reverse"` display filter, the way plugin
//! modules self-register when loaded.

use crate::chain::FrameChain;
use crate::error::{FrameError, FrameResult};
use crate::filter::ReverseFilter;
use crate::frame::FrameRecord;
use crate::predicate::{CallerIs, CallerMatches, PredicateValue};
use crate::registry::FrameRegistry;
use crate::render::{self, FrameSummary, RenderOptions};
use framelens_config::Config;

// ── InspectSession ───────────────────────────────────────────────────────────

/// One inspection session: stack state, registry, and render options.
///
/// The registry's lifecycle is tied to the session; components receive it by
/// reference rather than through ambient global state.
pub struct InspectSession {
    /// Activation records in call order; the last element is the innermost frame.
    stack: Vec<FrameRecord>,
    /// Selected frame, counted from the innermost.
    selected: usize,
    /// Registered predicates and filters.
    registry: FrameRegistry,
    /// Backtrace rendering options.
    options: RenderOptions,
}

impl InspectSession {
    /// Create a session with default options and the stock registrations.
    pub fn new() -> Self {
        let mut registry = FrameRegistry::new();
        Self::install_builtins(&mut registry);
        Self {
            stack: Vec::new(),
            selected: 0,
            registry,
            options: RenderOptions::default(),
        }
    }

    /// Create a session from a merged configuration.
    ///
    /// Render options come from the config; filters named in
    /// `[filters] disabled` start disabled.
    pub fn with_config(config: &Config) -> Self {
        let mut session = Self::new();
        session.options = RenderOptions::from_config(config);
        for name in config.disabled_filters() {
            session.registry.disable_filter(name);
        }
        session
    }

    fn install_builtins(registry: &mut FrameRegistry) {
        registry.register_predicate(Box::new(CallerIs));
        registry.register_predicate(Box::new(CallerMatches));
        registry.register_filter(
            ReverseFilter::NAME,
            ReverseFilter::PRIORITY,
            Box::new(ReverseFilter),
        );
    }

    // ── Stack maintenance (host side) ────────────────────────────────────────

    /// Push an activation record; the new record becomes the innermost frame
    /// and the selection refocuses on it.
    pub fn push_frame(&mut self, record: FrameRecord) {
        self.stack.push(record);
        self.selected = 0;
    }

    /// Pop the innermost activation record; the selection refocuses on the
    /// new innermost frame.
    pub fn pop_frame(&mut self) -> Option<FrameRecord> {
        let record = self.stack.pop();
        self.selected = 0;
        record
    }

    /// Drop all records.
    pub fn clear_stack(&mut self) {
        self.stack.clear();
        self.selected = 0;
    }

    /// Number of frames on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    // ── Frame selection ──────────────────────────────────────────────────────

    /// Select the frame `index` steps above the innermost one.
    pub fn select_frame(&mut self, index: usize) -> FrameResult<()> {
        if self.stack.is_empty() {
            return Err(FrameError::NoActiveFrame);
        }
        if index >= self.stack.len() {
            return Err(FrameError::NoMoreFrames {
                requested: index,
                available: self.stack.len() - 1,
            });
        }
        self.selected = index;
        Ok(())
    }

    /// Currently selected frame index, counted from the innermost.
    pub fn selected_frame(&self) -> usize {
        self.selected
    }

    /// View the stack from the current selection outward.
    pub fn chain(&self) -> FrameChain<'_> {
        FrameChain::with_selected(&self.stack, self.selected)
    }

    // ── Registry access ──────────────────────────────────────────────────────

    /// The session's registry.
    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    /// Mutable access for registering predicates and filters.
    pub fn registry_mut(&mut self) -> &mut FrameRegistry {
        &mut self.registry
    }

    // ── Evaluation and rendering ─────────────────────────────────────────────

    /// Evaluate a registered predicate against the current chain.
    ///
    /// This is the entry point the host's expression surface calls; errors
    /// surface as evaluation failures, never as `false`.
    pub fn evaluate(&self, predicate: &str, args: &[PredicateValue]) -> FrameResult<bool> {
        self.registry.evaluate(predicate, &self.chain(), args)
    }

    /// Render a textual backtrace of the current chain through the enabled
    /// filters. Fails with `NoActiveFrame` when no frame is selected.
    pub fn backtrace(&self) -> FrameResult<String> {
        let chain = self.chain();
        chain.current()?;
        Ok(render::render_backtrace(
            &chain,
            &self.registry,
            &self.options,
        ))
    }

    /// Structured form of [`backtrace`](Self::backtrace).
    pub fn frame_summaries(&self) -> FrameResult<Vec<FrameSummary>> {
        let chain = self.chain();
        chain.current()?;
        Ok(render::frame_summaries(
            &chain,
            &self.registry,
            &self.options,
        ))
    }

    /// Current render options.
    pub fn render_options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replace the render options.
    pub fn set_render_options(&mut self, options: RenderOptions) {
        self.options = options;
    }
}

impl Default for InspectSession {
    fn default() -> Self {
        Self::new()
    }
}
