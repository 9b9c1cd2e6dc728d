//! Lazy traversal of a captured stack, innermost to outermost.
//!
//! A [`FrameChain`] is an ordered view of the stack at the moment of
//! inspection. Frame 0 is the innermost (selected) frame; [`Frame::older`]
//! walks outward. Nothing is cached across traversals; every call re-reads
//! the live records, matching a possibly-changing stack.

use crate::error::{FrameError, FrameResult};
use crate::filter::FrameSeq;
use crate::frame::{FrameId, FrameRecord, FrameView};

/// Ordered, lazily-traversed view of the stack at the moment of inspection.
#[derive(Debug, Clone, Copy)]
pub struct FrameChain<'a> {
    /// Records in call order; the last element is the selected frame.
    view: &'a [FrameRecord],
}

impl<'a> FrameChain<'a> {
    /// View a stack anchored at its innermost frame.
    ///
    /// `records` are in call order: the first element is the outermost
    /// frame, the last the innermost.
    pub fn new(records: &'a [FrameRecord]) -> Self {
        Self { view: records }
    }

    /// View a stack anchored at the frame `selected` steps above the
    /// innermost one. Frames newer than the selection are not visible.
    pub fn with_selected(records: &'a [FrameRecord], selected: usize) -> Self {
        let end = records.len().saturating_sub(selected);
        Self {
            view: &records[..end],
        }
    }

    /// Number of frames visible from the selection outward.
    pub fn depth(&self) -> usize {
        self.view.len()
    }

    /// The innermost frame of the active selection.
    pub fn current(&self) -> FrameResult<Frame<'a>> {
        if self.view.is_empty() {
            return Err(FrameError::NoActiveFrame);
        }
        Ok(Frame {
            view: self.view,
            index: 0,
        })
    }

    /// Lazy, restartable iterator over the chain for the display pipeline,
    /// innermost first. Each call re-reads the underlying records.
    pub fn iter(&self) -> FrameSeq<'a> {
        let view = self.view;
        Box::new(
            (0..view.len()).map(move |index| Box::new(Frame { view, index }) as Box<dyn FrameView + 'a>),
        )
    }
}

/// One frame of a [`FrameChain`].
///
/// A cheap positional handle; name resolution happens lazily on access.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    view: &'a [FrameRecord],
    index: usize,
}

impl<'a> Frame<'a> {
    /// Position of this frame, counted from the innermost frame.
    pub fn id(&self) -> FrameId {
        self.index
    }

    fn record(&self) -> &'a FrameRecord {
        &self.view[self.view.len() - 1 - self.index]
    }

    /// The next frame outward.
    pub fn older(&self) -> FrameResult<Frame<'a>> {
        if self.index + 1 >= self.view.len() {
            return Err(FrameError::NoMoreFrames {
                requested: 1,
                available: 0,
            });
        }
        Ok(Frame {
            view: self.view,
            index: self.index + 1,
        })
    }

    /// Walk exactly `steps` frames outward, failing if the stack is
    /// exhausted before all steps are taken.
    pub fn walk_older(&self, steps: usize) -> FrameResult<Frame<'a>> {
        let available = self.view.len() - 1 - self.index;
        if steps > available {
            return Err(FrameError::NoMoreFrames {
                requested: steps,
                available,
            });
        }
        Ok(Frame {
            view: self.view,
            index: self.index + steps,
        })
    }
}

impl FrameView for Frame<'_> {
    fn name(&self) -> FrameResult<Option<String>> {
        Ok(self.record().name.clone())
    }

    fn address(&self) -> Option<u64> {
        self.record().address
    }

    fn source_file(&self) -> Option<String> {
        self.record().source_file.clone()
    }

    fn line(&self) -> Option<u32> {
        self.record().line
    }
}
