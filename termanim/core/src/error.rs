//! Error Types
//!
//! Every failure the animation core can report. Work failures are not listed
//! here: whatever the wrapped work returns is handed back untouched.

use std::io;

use thiserror::Error;

/// Invalid frame source or supervisor parameters
///
/// Raised at construction time, never on the first frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Width below the minimum for the chosen animation
    #[error("Argument 'width' must be greater than {limit} (got {width})")]
    WidthTooSmall {
        /// Requested width
        width: usize,
        /// Exclusive lower bound
        limit: usize,
    },

    /// Multi-line animations need at least one line
    #[error("Argument 'height' must be at least 1 (got {0})")]
    HeightTooSmall(usize),

    /// A single glyph was required
    #[error("Argument 'char' must be a single character, not a string of length {0}")]
    NotSingleGlyph(usize),

    /// The glyph must fill exactly one terminal column
    #[error("Character {0:?} must occupy exactly one terminal column")]
    GlyphWidth(char),

    /// Scrolling text has no big glyph for this character
    #[error("Character {0:?} cannot be rendered as scrolling text")]
    UnsupportedGlyph(char),

    /// Scrolling text needs something to scroll
    #[error("Scrolling text requires a non-empty message")]
    EmptyMessage,

    /// Cadence must be a positive duration
    #[error("Cadence must be greater than zero")]
    NonPositiveCadence,

    /// Animation name not recognised
    #[error("Unknown animation {0:?}")]
    UnknownAnimation(String),

    /// An annotation without any message
    #[error("At least one of 'start_msg' and 'end_msg' must be specified")]
    EmptyAnnotation,
}

/// Wrappers applied in an order that would corrupt terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// The animator was applied on top of an annotation
    #[error(
        "Functions decorated with Annotate should not be decorated with Animate. \
         Please reverse the order of the decorators!"
    )]
    AnnotationInsideAnimation,

    /// The animator was applied to something that is already animated
    #[error("Function is already animated; nested animations would interleave output")]
    NestedAnimation,
}

/// Errors surfaced by a supervised run
///
/// `R` is the work's output. A render failure does not stop the work, so
/// [`AnimateError::Render`] hands back whatever the work produced.
#[derive(Debug, Error)]
pub enum AnimateError<R = ()> {
    /// Writing or flushing a frame failed; the work still ran to completion
    #[error("Failed to render animation frame: {source}")]
    Render {
        /// The failed write or flush
        #[source]
        source: io::Error,
        /// What the work returned
        outcome: R,
    },

    /// The render thread could not be started; the work did not run
    #[error("Failed to spawn render thread: {0}")]
    Spawn(#[source] io::Error),

    /// The cooperative scheduler could not be built; the work did not run
    #[error("Failed to start cooperative scheduler: {0}")]
    Runtime(#[source] io::Error),

    /// Invalid configuration
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Invalid wrapper composition
    #[error(transparent)]
    Composition(#[from] CompositionError),
}

impl<R> AnimateError<R> {
    /// Whether the failure came from the terminal output stream
    #[must_use]
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    /// The work's outcome, if the work ran
    #[must_use]
    pub fn into_outcome(self) -> Option<R> {
        match self {
            Self::Render { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}
