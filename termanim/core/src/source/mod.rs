//! Frame Sources
//!
//! Restartable producers of constant-shape frames. The render loop pulls one
//! frame per tick and never asks a source whether it is exhausted: looping
//! animations cycle forever, scrolling text settles on blank frames.
//!
//! All constructors validate eagerly and return [`ConfigurationError`] for
//! invalid parameters.

mod glyphs;
mod line;
mod scrolling;
mod stacked;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::error::ConfigurationError;
use crate::frame::{Frame, Shape};

pub use glyphs::{big_glyph, Glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use line::{Arrow, CharWave, Spinner};
pub use scrolling::ScrollingText;
pub use stacked::{Stacked, DEFAULT_STACK_HEIGHT, DEFAULT_STACK_WIDTH};

/// A restartable sequence of frames with a constant shape
pub trait FrameSource: Send {
    /// Produce the next frame and advance the cursor
    fn next_frame(&mut self) -> Frame;

    /// Rewind to the first frame, keeping the configuration
    fn reset(&mut self);

    /// Shape shared by every frame this source produces
    fn shape(&self) -> Shape;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Frame {
        (**self).next_frame()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// The animations available by name
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    /// An arrow sweeping right, then back left
    #[default]
    Arrow,
    /// A spinning bar walking across the line
    Spinner,
    /// A wave of one glyph growing and shrinking
    CharWave,
    /// Stacked, phase-shifted char waves
    CharWaves,
    /// Stacked, phase-shifted spinners
    SpinnerMultiline,
    /// Stacked, phase-shifted arrows
    ArrowMultiline,
    /// Big 5x5 letters scrolling right to left
    ScrollingText,
}

impl AnimationKind {
    /// Every kind, in display order
    pub const ALL: [Self; 7] = [
        Self::Arrow,
        Self::Spinner,
        Self::CharWave,
        Self::CharWaves,
        Self::SpinnerMultiline,
        Self::ArrowMultiline,
        Self::ScrollingText,
    ];

    /// Configuration name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Spinner => "spinner",
            Self::CharWave => "char-wave",
            Self::CharWaves => "char-waves",
            Self::SpinnerMultiline => "spinner-multiline",
            Self::ArrowMultiline => "arrow-multiline",
            Self::ScrollingText => "scrolling-text",
        }
    }

    /// Whether frames span several lines
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            Self::CharWaves | Self::SpinnerMultiline | Self::ArrowMultiline | Self::ScrollingText
        )
    }

    /// Width used when none is configured
    #[must_use]
    pub fn default_width(&self) -> usize {
        match self {
            Self::Arrow => Arrow::DEFAULT_WIDTH,
            Self::Spinner => Spinner::DEFAULT_WIDTH,
            Self::CharWave => CharWave::DEFAULT_WIDTH,
            Self::CharWaves | Self::SpinnerMultiline | Self::ArrowMultiline => DEFAULT_STACK_WIDTH,
            Self::ScrollingText => ScrollingText::DEFAULT_WIDTH,
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ConfigurationError::UnknownAnimation(s.to_string()))
    }
}

/// Fail unless `width > limit`
pub(crate) fn ensure_width(width: usize, limit: usize) -> Result<(), ConfigurationError> {
    if width <= limit {
        return Err(ConfigurationError::WidthTooSmall { width, limit });
    }
    Ok(())
}

/// Fail unless `height >= 1`
pub(crate) fn ensure_height(height: usize) -> Result<(), ConfigurationError> {
    if height == 0 {
        return Err(ConfigurationError::HeightTooSmall(height));
    }
    Ok(())
}

/// Extract the one glyph of `text`, which must occupy exactly one column
pub(crate) fn single_glyph(text: &str) -> Result<char, ConfigurationError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) if glyph.width() == Some(1) => Ok(glyph),
        (Some(glyph), None) => Err(ConfigurationError::GlyphWidth(glyph)),
        _ => Err(ConfigurationError::NotSingleGlyph(text.chars().count())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("arrow".parse::<AnimationKind>(), Ok(AnimationKind::Arrow));
        assert_eq!(
            "Char_Waves".parse::<AnimationKind>(),
            Ok(AnimationKind::CharWaves)
        );
        assert_eq!(
            " scrolling-text ".parse::<AnimationKind>(),
            Ok(AnimationKind::ScrollingText)
        );
        assert_eq!(
            "sparkles".parse::<AnimationKind>(),
            Err(ConfigurationError::UnknownAnimation("sparkles".to_string()))
        );
    }

    #[test]
    fn test_kind_round_trips_names() {
        for kind in AnimationKind::ALL {
            assert_eq!(kind.to_string().parse::<AnimationKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_ensure_width() {
        for width in [0, 1] {
            assert!(ensure_width(width, 1).is_err());
        }
        for width in [2, 45, 110] {
            assert!(ensure_width(width, 1).is_ok());
        }
        assert_eq!(
            ensure_width(9, 9),
            Err(ConfigurationError::WidthTooSmall { width: 9, limit: 9 })
        );
    }

    #[test]
    fn test_single_glyph() {
        assert_eq!(single_glyph("#"), Ok('#'));
        assert_eq!(single_glyph(""), Err(ConfigurationError::NotSingleGlyph(0)));
        assert_eq!(single_glyph("##"), Err(ConfigurationError::NotSingleGlyph(2)));
        assert_eq!(single_glyph("日"), Err(ConfigurationError::GlyphWidth('日')));
    }
}
