//! Rendering of the filtered frame sequence.
//!
//! The pipeline builds a lazy sequence from the chain, composes the enabled
//! filters over it, and produces either a textual listing or structured
//! [`FrameSummary`] records. A filter failure mid-walk is reported and the
//! output falls back to the untransformed chain; a broken filter can never
//! take down the frame listing.

use serde::{Deserialize, Serialize};

use crate::chain::FrameChain;
use crate::error::FrameResult;
use crate::filter::FrameSeq;
use crate::frame::FrameView;
use crate::registry::FrameRegistry;
use framelens_config::Config;

// ── RenderOptions ────────────────────────────────────────────────────────────

/// Options controlling the backtrace listing.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Maximum number of frames listed; `None` lists the whole chain
    pub max_frames: Option<usize>,
    /// Show the frame address column
    pub show_address: bool,
    /// Show source file and line
    pub show_source: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_frames: None,
            show_address: false,
            show_source: true,
        }
    }
}

impl RenderOptions {
    /// Build options from a merged configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_frames: config.max_frames(),
            show_address: config.show_address(),
            show_source: config.show_source(),
        }
    }
}

// ── FrameSummary ─────────────────────────────────────────────────────────────

/// One rendered frame in structured form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    /// Position counted from the innermost frame
    pub index: usize,
    /// Display name after filtering, absent for unnamed frames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Code address, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<u64>,
    /// Source file, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Source line, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Serialize summaries to a JSON string.
pub fn serialize_summaries(frames: &[FrameSummary]) -> serde_json::Result<String> {
    serde_json::to_string(frames)
}

/// Deserialize summaries from a JSON string.
pub fn deserialize_summaries(json: &str) -> serde_json::Result<Vec<FrameSummary>> {
    serde_json::from_str(json)
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// Build summaries from the filtered sequence.
///
/// If a filter fails while the sequence is walked, the failure is reported
/// and the summaries are rebuilt from the untransformed chain.
pub fn frame_summaries(
    chain: &FrameChain<'_>,
    registry: &FrameRegistry,
    options: &RenderOptions,
) -> Vec<FrameSummary> {
    match collect(registry.apply_filters(chain.iter()), options) {
        Ok(frames) => frames,
        Err(err) => {
            log::warn!("frame filter failed during rendering, falling back to unfiltered frames: {err}");
            // The untransformed chain resolves names infallibly.
            collect(chain.iter(), options).unwrap_or_default()
        }
    }
}

/// Render a textual backtrace listing.
pub fn render_backtrace(
    chain: &FrameChain<'_>,
    registry: &FrameRegistry,
    options: &RenderOptions,
) -> String {
    let frames = frame_summaries(chain, registry, options);
    if frames.is_empty() {
        return "No stack frames.".to_string();
    }

    let mut out = String::from("Call Stack:\n");
    for summary in &frames {
        let marker = if summary.index == 0 { "→" } else { " " };
        let name = summary.name.as_deref().unwrap_or("<unknown>");
        out.push_str(&format!("  {} #{} {}", marker, summary.index, name));
        if options.show_address {
            if let Some(address) = summary.address {
                out.push_str(&format!(" [{address:#x}]"));
            }
        }
        if options.show_source {
            if let Some(file) = &summary.source_file {
                match summary.line {
                    Some(line) => out.push_str(&format!(" at {file}:{line}")),
                    None => out.push_str(&format!(" at {file}")),
                }
            }
        }
        out.push('\n');
    }
    out.pop();
    out
}

/// Drain the sequence into summaries, honoring the frame limit.
fn collect(seq: FrameSeq<'_>, options: &RenderOptions) -> FrameResult<Vec<FrameSummary>> {
    let mut frames = Vec::new();
    for (index, frame) in seq.enumerate() {
        if let Some(limit) = options.max_frames {
            if index >= limit {
                break;
            }
        }
        frames.push(FrameSummary {
            index,
            name: frame.name()?,
            address: frame.address(),
            source_file: frame.source_file(),
            line: frame.line(),
        });
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ReverseFilter;
    use crate::frame::FrameRecord;

    fn stack() -> Vec<FrameRecord> {
        vec![
            FrameRecord::named("main"),
            FrameRecord::named("helper").with_source("demo.c", 17),
            FrameRecord::named("worker")
                .with_address(0x401000)
                .with_source("demo.c", 41),
        ]
    }

    #[test]
    fn test_summaries_unfiltered() {
        let records = stack();
        let chain = FrameChain::new(&records);
        let registry = FrameRegistry::new();
        let frames = frame_summaries(&chain, &registry, &RenderOptions::default());
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].name.as_deref(), Some("worker"));
        assert_eq!(frames[2].name.as_deref(), Some("main"));
    }

    #[test]
    fn test_summaries_respect_max_frames() {
        let records = stack();
        let chain = FrameChain::new(&records);
        let registry = FrameRegistry::new();
        let options = RenderOptions {
            max_frames: Some(2),
            ..Default::default()
        };
        let frames = frame_summaries(&chain, &registry, &options);
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_summaries_through_reverse_filter() {
        let records = stack();
        let chain = FrameChain::new(&records);
        let mut registry = FrameRegistry::new();
        registry.register_filter(
            ReverseFilter::NAME,
            ReverseFilter::PRIORITY,
            Box::new(ReverseFilter),
        );
        let frames = frame_summaries(&chain, &registry, &RenderOptions::default());
        assert_eq!(frames[0].name.as_deref(), Some("rekrow"));
        // Non-name accessors pass through the decorator untouched.
        assert_eq!(frames[0].address, Some(0x401000));
        assert_eq!(frames[0].line, Some(41));
    }

    #[test]
    fn test_render_backtrace_plain() {
        let records = stack();
        let chain = FrameChain::new(&records);
        let registry = FrameRegistry::new();
        let listing = render_backtrace(&chain, &registry, &RenderOptions::default());
        assert_eq!(
            listing,
            "Call Stack:\n  → #0 worker at demo.c:41\n    #1 helper at demo.c:17\n    #2 main"
        );
    }

    #[test]
    fn test_render_backtrace_with_address() {
        let records = stack();
        let chain = FrameChain::new(&records);
        let registry = FrameRegistry::new();
        let options = RenderOptions {
            show_address: true,
            ..Default::default()
        };
        let listing = render_backtrace(&chain, &registry, &options);
        assert!(listing.contains("worker [0x401000] at demo.c:41"));
    }

    #[test]
    fn test_render_backtrace_without_source() {
        let records = stack();
        let chain = FrameChain::new(&records);
        let registry = FrameRegistry::new();
        let options = RenderOptions {
            show_source: false,
            ..Default::default()
        };
        let listing = render_backtrace(&chain, &registry, &options);
        assert!(!listing.contains("demo.c"));
    }

    #[test]
    fn test_render_backtrace_unnamed_frame() {
        let records = vec![FrameRecord::unnamed(), FrameRecord::named("worker")];
        let chain = FrameChain::new(&records);
        let registry = FrameRegistry::new();
        let listing = render_backtrace(&chain, &registry, &RenderOptions::default());
        assert!(listing.contains("#1 <unknown>"));
    }

    #[test]
    fn test_render_backtrace_empty_chain() {
        let records: Vec<FrameRecord> = Vec::new();
        let chain = FrameChain::new(&records);
        let registry = FrameRegistry::new();
        let listing = render_backtrace(&chain, &registry, &RenderOptions::default());
        assert_eq!(listing, "No stack frames.");
    }

    #[test]
    fn test_summaries_json_roundtrip() {
        let records = stack();
        let chain = FrameChain::new(&records);
        let registry = FrameRegistry::new();
        let frames = frame_summaries(&chain, &registry, &RenderOptions::default());
        let json = serialize_summaries(&frames).unwrap();
        let parsed = deserialize_summaries(&json).unwrap();
        assert_eq!(parsed, frames);
    }
}
