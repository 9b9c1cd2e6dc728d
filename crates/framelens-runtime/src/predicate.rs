//! Named predicates over the frame chain.
//!
//! Predicates are boolean-valued queries registered by name and evaluated by
//! the hosting session's expression surface. The two stock predicates answer
//! "is the frame N levels above the current one named / matching X".

use crate::chain::FrameChain;
use crate::error::{FrameError, FrameResult};
use crate::frame::FrameView;
use regex::Regex;

/// Typed argument handed to a predicate by the expression surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateValue {
    /// Text argument (a name or pattern)
    Text(String),
    /// Integer argument (a frame-skip count)
    Int(i64),
}

impl PredicateValue {
    /// Convenience constructor for a text argument.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Convenience constructor for an integer argument.
    pub fn int(value: i64) -> Self {
        Self::Int(value)
    }
}

/// A boolean-valued query over the frame chain, registered by name.
///
/// Evaluation is a pure read of stack state at invocation time; errors
/// propagate to the expression surface rather than collapsing to `false`.
pub trait FramePredicate {
    /// Name the predicate is registered and invoked under.
    fn name(&self) -> &str;

    /// One-line description shown by the host's help surface.
    fn doc(&self) -> &str;

    /// Evaluate against the chain with the given arguments.
    fn evaluate(&self, chain: &FrameChain<'_>, args: &[PredicateValue]) -> FrameResult<bool>;
}

/// Parse the shared `(target, nframes = 1)` argument shape.
fn parse_args(args: &[PredicateValue]) -> FrameResult<(&str, usize)> {
    let target = match args.first() {
        Some(PredicateValue::Text(s)) => s.as_str(),
        Some(PredicateValue::Int(n)) => {
            return Err(FrameError::InvalidArgument {
                message: format!("expected text as first argument, got integer {n}"),
            })
        }
        None => {
            return Err(FrameError::InvalidArgument {
                message: "missing target argument".to_string(),
            })
        }
    };

    let nframes = match args.get(1) {
        None => 1,
        Some(PredicateValue::Int(n)) if *n >= 0 => *n as usize,
        Some(PredicateValue::Int(n)) => {
            return Err(FrameError::InvalidArgument {
                message: format!("frame count must be non-negative, got {n}"),
            })
        }
        Some(PredicateValue::Text(s)) => {
            return Err(FrameError::InvalidArgument {
                message: format!("expected integer frame count, got text '{s}'"),
            })
        }
    };

    if args.len() > 2 {
        return Err(FrameError::InvalidArgument {
            message: format!("expected at most 2 arguments, got {}", args.len()),
        });
    }

    Ok((target, nframes))
}

/// `caller_is(name, nframes = 1)`: exact name equality `nframes` levels up.
pub struct CallerIs;

impl FramePredicate for CallerIs {
    fn name(&self) -> &str {
        "caller_is"
    }

    fn doc(&self) -> &str {
        "True if the function nframes up the stack has exactly the given name"
    }

    fn evaluate(&self, chain: &FrameChain<'_>, args: &[PredicateValue]) -> FrameResult<bool> {
        let (target, nframes) = parse_args(args)?;
        let frame = chain.current()?.walk_older(nframes)?;
        // A frame without a symbol name only ever equals the empty target.
        let name = frame.name()?.unwrap_or_default();
        Ok(name == target)
    }
}

/// `caller_matches(pattern, nframes = 1)`: start-anchored regex match
/// `nframes` levels up.
pub struct CallerMatches;

impl FramePredicate for CallerMatches {
    fn name(&self) -> &str {
        "caller_matches"
    }

    fn doc(&self) -> &str {
        "True if the name of the function nframes up the stack begins with a match for the pattern"
    }

    fn evaluate(&self, chain: &FrameChain<'_>, args: &[PredicateValue]) -> FrameResult<bool> {
        let (pattern, nframes) = parse_args(args)?;
        let frame = chain.current()?.walk_older(nframes)?;
        let name = frame.name()?.ok_or(FrameError::NoSymbolName)?;
        // The name must begin with a match; the pattern is not required to
        // cover the whole name.
        let re = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(re.is_match(&name))
    }
}
