//! Error types for frame traversal, predicate evaluation, and rendering.

use thiserror::Error;

/// Errors produced by the frame-inspection subsystem.
///
/// Predicate-evaluation errors propagate to the expression surface as
/// evaluation failures; filter-transform errors are caught at the rendering
/// boundary. None of these are fatal to the hosting session.
#[derive(Error, Debug)]
pub enum FrameError {
    /// No frame is currently selected (empty stack or no session focus)
    #[error("no active frame")]
    NoActiveFrame,

    /// Traversal walked past the outermost frame
    #[error("requested {requested} older frame(s), only {available} available")]
    NoMoreFrames { requested: usize, available: usize },

    /// Name resolution was required but the frame has no symbol name
    #[error("frame has no symbol name")]
    NoSymbolName,

    /// No predicate registered under this name
    #[error("unknown predicate: {name}")]
    UnknownPredicate { name: String },

    /// A predicate was invoked with arguments of the wrong arity or type
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An invalid regular expression was supplied to a matching predicate
    #[error("invalid pattern: {0}")]
    BadPattern(#[from] regex::Error),

    /// A registered filter failed while transforming the display sequence
    #[error("frame filter '{filter}' failed: {message}")]
    FilterTransform { filter: String, message: String },
}

/// Result type for frame-inspection operations
pub type FrameResult<T> = Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_more_frames_display() {
        let err = FrameError::NoMoreFrames {
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "requested 5 older frame(s), only 2 available"
        );
    }

    #[test]
    fn test_bad_pattern_from_regex_error() {
        let err: FrameError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, FrameError::BadPattern(_)));
    }

    #[test]
    fn test_filter_transform_display_names_filter() {
        let err = FrameError::FilterTransform {
            filter: "Reverse".to_string(),
            message: "charset lookup failed".to_string(),
        };
        assert!(err.to_string().contains("Reverse"));
    }
}
