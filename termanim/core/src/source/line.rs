//! Single-Line Animations
//!
//! Arrow, char wave and spinner. Each is a small cursor over a fixed cycle
//! of frames, padded with blanks to a constant width.

use super::{ensure_width, single_glyph, FrameSource};
use crate::error::ConfigurationError;
use crate::frame::{Frame, Shape};

const SPINNER_GLYPHS: [char; 4] = ['\\', '|', '/', '-'];

fn pad(left: usize, glyphs: &str, right: usize) -> Frame {
    Frame::new(format!("{}{glyphs}{}", " ".repeat(left), " ".repeat(right)))
}

/// An arrow moving back and forth
///
/// Width 4 (underscores are blanks):
///
/// ```text
/// >___  _>__  __>_  ___>  __<_  _<__
/// ```
///
/// The right sweep uses `>`, the left sweep `<`; the cycle has
/// `2 * (width - 1)` frames.
#[derive(Clone, Debug)]
pub struct Arrow {
    width: usize,
    step: usize,
}

impl Arrow {
    /// Width used when none is configured
    pub const DEFAULT_WIDTH: usize = 5;

    /// Create an arrow animation; `width` must be greater than 1
    pub fn new(width: usize) -> Result<Self, ConfigurationError> {
        ensure_width(width, 1)?;
        Ok(Self { width, step: 0 })
    }

    fn period(&self) -> usize {
        2 * (self.width - 1)
    }

    fn frame_at(&self, step: usize) -> Frame {
        let padding = self.width - 1;
        if step < padding {
            pad(step, ">", padding - step)
        } else {
            let i = step - padding;
            pad(padding - i, "<", i)
        }
    }
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            step: 0,
        }
    }
}

impl FrameSource for Arrow {
    fn next_frame(&mut self) -> Frame {
        let frame = self.frame_at(self.step);
        self.step = (self.step + 1) % self.period();
        frame
    }

    fn reset(&mut self) {
        self.step = 0;
    }

    fn shape(&self) -> Shape {
        Shape::line(self.width)
    }

    fn name(&self) -> &'static str {
        "arrow"
    }
}

/// A wave of one glyph, growing to full width and shrinking back
///
/// Glyph `#`, width 4 (underscores are blanks):
///
/// ```text
/// #___  ##__  ###_  ####  ###_  ##__
/// ```
#[derive(Clone, Debug)]
pub struct CharWave {
    glyph: char,
    width: usize,
    step: usize,
}

impl CharWave {
    /// Width used when none is configured
    pub const DEFAULT_WIDTH: usize = 10;

    /// Glyph used when none is configured
    pub const DEFAULT_GLYPH: char = '#';

    /// Create a wave of `glyph`, which must be exactly one character
    pub fn new(glyph: &str, width: usize) -> Result<Self, ConfigurationError> {
        let glyph = single_glyph(glyph)?;
        ensure_width(width, 1)?;
        Ok(Self {
            glyph,
            width,
            step: 0,
        })
    }

    /// Create a wave of an already-validated character
    pub fn with_char(glyph: char, width: usize) -> Result<Self, ConfigurationError> {
        Self::new(glyph.encode_utf8(&mut [0; 4]), width)
    }

    fn period(&self) -> usize {
        2 * (self.width - 1)
    }

    fn frame_at(&self, step: usize) -> Frame {
        let rising = self.width - 1;
        let count = if step < rising {
            step + 1
        } else {
            self.width - (step - rising)
        };
        let wave: String = std::iter::repeat(self.glyph).take(count).collect();
        pad(0, &wave, self.width - count)
    }
}

impl Default for CharWave {
    fn default() -> Self {
        Self {
            glyph: Self::DEFAULT_GLYPH,
            width: Self::DEFAULT_WIDTH,
            step: 0,
        }
    }
}

impl FrameSource for CharWave {
    fn next_frame(&mut self) -> Frame {
        let frame = self.frame_at(self.step);
        self.step = (self.step + 1) % self.period();
        frame
    }

    fn reset(&mut self) {
        self.step = 0;
    }

    fn shape(&self) -> Shape {
        Shape::line(self.width)
    }

    fn name(&self) -> &'static str {
        "char-wave"
    }
}

/// A spinning bar that takes four turns in each column, left to right
///
/// Width 2 (underscores are blanks):
///
/// ```text
/// \_  |_  /_  -_  _\  _|  _/  _-
/// ```
#[derive(Clone, Debug)]
pub struct Spinner {
    width: usize,
    position: usize,
}

impl Spinner {
    /// Width used when none is configured
    pub const DEFAULT_WIDTH: usize = 10;

    /// Create a spinner; `width` must be at least 1
    pub fn new(width: usize) -> Result<Self, ConfigurationError> {
        ensure_width(width, 0)?;
        Ok(Self { width, position: 0 })
    }

    fn frame_at(&self, position: usize) -> Frame {
        let column = position / SPINNER_GLYPHS.len();
        let glyph = SPINNER_GLYPHS[position % SPINNER_GLYPHS.len()];
        pad(column, glyph.encode_utf8(&mut [0; 4]), self.width - 1 - column)
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            position: 0,
        }
    }
}

impl FrameSource for Spinner {
    fn next_frame(&mut self) -> Frame {
        let frame = self.frame_at(self.position);
        self.position = (self.position + 1) % (self.width * SPINNER_GLYPHS.len());
        frame
    }

    fn reset(&mut self) {
        self.position = 0;
    }

    fn shape(&self) -> Shape {
        Shape::line(self.width)
    }

    fn name(&self) -> &'static str {
        "spinner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn take(source: &mut impl FrameSource, n: usize) -> Vec<String> {
        (0..n).map(|_| source.next_frame().into_string()).collect()
    }

    #[test]
    fn test_arrow_width_three() {
        let mut arrow = Arrow::new(3).unwrap();
        assert_eq!(take(&mut arrow, 5), vec![">  ", " > ", "  <", " < ", ">  "]);
    }

    #[test]
    fn test_arrow_width_four() {
        let mut arrow = Arrow::new(4).unwrap();
        assert_eq!(
            take(&mut arrow, 7),
            vec![">   ", " >  ", "  > ", "   <", "  < ", " <  ", ">   "]
        );
    }

    #[test]
    fn test_arrow_rejects_small_width() {
        for width in [0, 1] {
            assert_eq!(
                Arrow::new(width).unwrap_err(),
                ConfigurationError::WidthTooSmall { width, limit: 1 }
            );
        }
    }

    #[test]
    fn test_char_wave_width_three() {
        let mut wave = CharWave::new("#", 3).unwrap();
        assert_eq!(take(&mut wave, 5), vec!["#  ", "## ", "###", "## ", "#  "]);
    }

    #[test]
    fn test_char_wave_custom_glyph() {
        let mut wave = CharWave::with_char('*', 4).unwrap();
        assert_eq!(
            take(&mut wave, 6),
            vec!["*   ", "**  ", "*** ", "****", "*** ", "**  "]
        );
    }

    #[test]
    fn test_char_wave_rejects_bad_config() {
        assert!(matches!(
            CharWave::new("", 5),
            Err(ConfigurationError::NotSingleGlyph(0))
        ));
        assert!(matches!(
            CharWave::new("##", 5),
            Err(ConfigurationError::NotSingleGlyph(2))
        ));
        for width in [0, 1] {
            assert!(CharWave::new("#", width).is_err());
        }
    }

    #[test]
    fn test_spinner_width_two() {
        let mut spinner = Spinner::new(2).unwrap();
        assert_eq!(
            take(&mut spinner, 9),
            vec!["\\ ", "| ", "/ ", "- ", " \\", " |", " /", " -", "\\ "]
        );
    }

    #[test]
    fn test_spinner_width_one_is_allowed() {
        let mut spinner = Spinner::new(1).unwrap();
        assert_eq!(take(&mut spinner, 5), vec!["\\", "|", "/", "-", "\\"]);
        assert!(Spinner::new(0).is_err());
    }

    #[test]
    fn test_constant_width() {
        for width in 2..12 {
            let mut sources: Vec<Box<dyn FrameSource>> = vec![
                Box::new(Arrow::new(width).unwrap()),
                Box::new(CharWave::new("#", width).unwrap()),
                Box::new(Spinner::new(width).unwrap()),
            ];
            for source in &mut sources {
                let shape = source.shape();
                for _ in 0..(width * 8) {
                    assert_eq!(source.next_frame().shape(), shape);
                }
            }
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Arrow::default().shape(), Shape::line(5));
        assert_eq!(CharWave::default().next_frame().as_str(), "#         ");
        assert_eq!(Spinner::default().shape(), Shape::line(10));
    }

    #[test]
    fn test_reset_restarts_cycle() {
        let mut arrow = Arrow::new(5).unwrap();
        let first = arrow.next_frame();
        take(&mut arrow, 3);
        arrow.reset();
        arrow.reset();
        assert_eq!(arrow.next_frame(), first);
    }
}
