//! Stacked Animations
//!
//! Turns a single-line source into a block: `height` copies of the source,
//! line `i` started `i` frames ahead of the first line.

use super::{ensure_height, Arrow, CharWave, FrameSource, Spinner};
use crate::error::ConfigurationError;
use crate::frame::{Frame, Shape};

/// Width used for stacked animations when none is configured
pub const DEFAULT_STACK_WIDTH: usize = 10;

/// Height used for stacked animations when none is configured
pub const DEFAULT_STACK_HEIGHT: usize = 3;

/// A single-line source repeated over several phase-shifted lines
#[derive(Clone, Debug)]
pub struct Stacked<S> {
    prototype: S,
    lines: Vec<S>,
    name: &'static str,
}

impl<S: FrameSource + Clone> Stacked<S> {
    /// Stack `height` copies of `line`
    pub fn new(line: S, height: usize) -> Result<Self, ConfigurationError> {
        ensure_height(height)?;
        debug_assert!(
            !line.shape().is_multiline(),
            "stacked sources must be single-line"
        );
        let mut prototype = line;
        prototype.reset();
        let lines = Self::phase_shifted(&prototype, height);
        Ok(Self {
            prototype,
            lines,
            name: "stacked",
        })
    }

    fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    fn phase_shifted(prototype: &S, height: usize) -> Vec<S> {
        (0..height)
            .map(|offset| {
                let mut line = prototype.clone();
                for _ in 0..offset {
                    line.next_frame();
                }
                line
            })
            .collect()
    }
}

impl Stacked<CharWave> {
    /// Stacked char waves
    pub fn char_waves(glyph: &str, width: usize, height: usize) -> Result<Self, ConfigurationError> {
        Ok(Self::new(CharWave::new(glyph, width)?, height)?.named("char-waves"))
    }
}

impl Stacked<Arrow> {
    /// Stacked arrows
    pub fn arrows(width: usize, height: usize) -> Result<Self, ConfigurationError> {
        Ok(Self::new(Arrow::new(width)?, height)?.named("arrow-multiline"))
    }
}

impl Stacked<Spinner> {
    /// Stacked spinners
    pub fn spinners(width: usize, height: usize) -> Result<Self, ConfigurationError> {
        Ok(Self::new(Spinner::new(width)?, height)?.named("spinner-multiline"))
    }
}

impl<S: FrameSource + Clone> FrameSource for Stacked<S> {
    fn next_frame(&mut self) -> Frame {
        Frame::from_lines(
            self.lines
                .iter_mut()
                .map(|line| line.next_frame().into_string()),
        )
    }

    fn reset(&mut self) {
        self.lines = Self::phase_shifted(&self.prototype, self.lines.len());
    }

    fn shape(&self) -> Shape {
        Shape::new(self.prototype.shape().width, self.lines.len())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
