//! Frame views over a captured call stack.
//!
//! A [`FrameRecord`] is the concrete, host-supplied activation record;
//! [`FrameView`] is the narrow capability set the rest of the subsystem
//! (chain traversal, decorators, rendering) works against.

use crate::error::FrameResult;
use serde::{Deserialize, Serialize};

/// Identity of a frame within one inspection, counted from the innermost frame.
pub type FrameId = usize;

/// One activation record on the call stack at the moment of inspection.
///
/// Records are read-only views produced fresh per inspection request; they
/// are not persisted and have no lifecycle beyond the request that created
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FrameRecord {
    /// Resolved function name, absent for frames without symbol information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Code address of the frame, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<u64>,

    /// Source file the frame executes in, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Source line, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl FrameRecord {
    /// Create a record with a resolved function name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create a record without symbol information.
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Attach a code address.
    pub fn with_address(mut self, address: u64) -> Self {
        self.address = Some(address);
        self
    }

    /// Attach a source location.
    pub fn with_source(mut self, file: impl Into<String>, line: u32) -> Self {
        self.source_file = Some(file.into());
        self.line = Some(line);
        self
    }
}

/// Narrow capability set every frame-like view implements.
///
/// Decorators wrap another view and override individual accessors; concrete
/// records resolve infallibly, while a decorator's `name` may fail and is
/// handled at the rendering boundary.
pub trait FrameView {
    /// Resolved display name. `Ok(None)` when the frame has no symbol name.
    fn name(&self) -> FrameResult<Option<String>>;

    /// Code address of the frame, if known.
    fn address(&self) -> Option<u64>;

    /// Source file the frame executes in, if known.
    fn source_file(&self) -> Option<String>;

    /// Source line, if known.
    fn line(&self) -> Option<u32>;
}

impl FrameView for FrameRecord {
    fn name(&self) -> FrameResult<Option<String>> {
        Ok(self.name.clone())
    }

    fn address(&self) -> Option<u64> {
        self.address
    }

    fn source_file(&self) -> Option<String> {
        self.source_file.clone()
    }

    fn line(&self) -> Option<u32> {
        self.line
    }
}
