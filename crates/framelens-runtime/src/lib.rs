//! Framelens Runtime - stack-frame inspection and decoration
//!
//! This library provides the frame-inspection subsystem a debugger exposes
//! to its extensions:
//! - Lazy traversal of a captured call stack (innermost to outermost)
//! - Named predicates evaluable from the host's expression surface
//! - Prioritized display filters and per-frame decorators
//! - Backtrace rendering with graceful fallback on filter failure
//!
//! # Quick-start
//!
//! ```rust
//! use framelens_runtime::{FrameRecord, InspectSession, PredicateValue};
//!
//! let mut session = InspectSession::new();
//! session.push_frame(FrameRecord::named("main"));
//! session.push_frame(FrameRecord::named("helper"));
//! session.push_frame(FrameRecord::named("worker"));
//!
//! // Is the direct caller of the innermost frame named "helper"?
//! let is_helper = session
//!     .evaluate("caller_is", &[PredicateValue::text("helper")])
//!     .unwrap();
//! assert!(is_helper);
//! ```

/// Framelens runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod chain;
pub mod error;
pub mod filter;
pub mod frame;
pub mod predicate;
pub mod registry;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use chain::{Frame, FrameChain};
pub use error::{FrameError, FrameResult};
pub use filter::{map_frames, FrameFilter, FrameSeq, ReverseFilter, ReverseFunction};
pub use frame::{FrameId, FrameRecord, FrameView};
pub use predicate::{CallerIs, CallerMatches, FramePredicate, PredicateValue};
pub use registry::{FilterEntry, FrameRegistry};
pub use render::{
    deserialize_summaries, frame_summaries, render_backtrace, serialize_summaries, FrameSummary,
    RenderOptions,
};
pub use session::InspectSession;
