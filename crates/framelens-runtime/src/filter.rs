//! Frame decorators and display filters.
//!
//! A filter receives the lazy sequence of frame views flowing toward the
//! display pipeline and returns a (possibly transformed) sequence of the
//! same shape, so filters compose by wrapping. Decorators wrap a single
//! frame view, delegating every accessor except the one they override.

use crate::error::FrameResult;
use crate::frame::FrameView;

/// Lazy sequence of frame views flowing through the display pipeline.
pub type FrameSeq<'a> = Box<dyn Iterator<Item = Box<dyn FrameView + 'a>> + 'a>;

/// A registered transformation over the frame-display sequence.
pub trait FrameFilter {
    /// Transform the sequence. Implementations wrap the incoming iterator
    /// rather than draining it.
    fn transform<'a>(&self, frames: FrameSeq<'a>) -> FrameSeq<'a>;
}

/// Apply a decorator constructor to every element of the sequence.
pub fn map_frames<'a, F, V>(frames: FrameSeq<'a>, decorate: F) -> FrameSeq<'a>
where
    F: Fn(Box<dyn FrameView + 'a>) -> V + 'a,
    V: FrameView + 'a,
{
    Box::new(frames.map(move |frame| Box::new(decorate(frame)) as Box<dyn FrameView + 'a>))
}

/// Decorator that displays a frame's function name character-reversed.
///
/// Every other accessor delegates to the wrapped frame. An absent or empty
/// name passes through untouched. Reversal is by `char` unit; combining
/// marks are not kept with their base character.
pub struct ReverseFunction<'a> {
    inner: Box<dyn FrameView + 'a>,
}

impl<'a> ReverseFunction<'a> {
    /// Wrap a frame view.
    pub fn new(inner: Box<dyn FrameView + 'a>) -> Self {
        Self { inner }
    }
}

impl FrameView for ReverseFunction<'_> {
    fn name(&self) -> FrameResult<Option<String>> {
        match self.inner.name()? {
            None => Ok(None),
            Some(name) if name.is_empty() => Ok(Some(name)),
            Some(name) => Ok(Some(name.chars().rev().collect())),
        }
    }

    fn address(&self) -> Option<u64> {
        self.inner.address()
    }

    fn source_file(&self) -> Option<String> {
        self.inner.source_file()
    }

    fn line(&self) -> Option<u32> {
        self.inner.line()
    }
}

/// The stock `"Reverse"` display filter: decorates every frame with
/// [`ReverseFunction`]. Registered enabled at priority 100.
pub struct ReverseFilter;

impl ReverseFilter {
    /// Registered filter name.
    pub const NAME: &'static str = "Reverse";

    /// Default registration priority.
    pub const PRIORITY: i32 = 100;
}

impl FrameFilter for ReverseFilter {
    fn transform<'a>(&self, frames: FrameSeq<'a>) -> FrameSeq<'a> {
        map_frames(frames, ReverseFunction::new)
    }
}
