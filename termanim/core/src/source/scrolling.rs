//! Scrolling Text
//!
//! Big 5x5 letters entering from the right edge and leaving on the left,
//! followed by one full width of blanks. After that the source keeps
//! producing the blank frame, unless it was built with
//! [`ScrollingText::repeating`], in which case the scroll starts over.

use super::glyphs::{big_glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::{ensure_width, FrameSource};
use crate::error::ConfigurationError;
use crate::frame::{Frame, Shape};

/// Blank columns between two letters
const LETTER_GAP: usize = 2;

type Column = [char; GLYPH_HEIGHT];

const BLANK_COLUMN: Column = [' '; GLYPH_HEIGHT];

/// Large scrolling message
#[derive(Clone, Debug)]
pub struct ScrollingText {
    /// Width blanks, the message columns, width blanks
    columns: Vec<Column>,
    width: usize,
    step: usize,
    repeat: bool,
}

impl ScrollingText {
    /// Width used when none is configured
    pub const DEFAULT_WIDTH: usize = 50;

    /// Create a scroller for `message`; `width` must be greater than 9
    pub fn new(message: &str, width: usize) -> Result<Self, ConfigurationError> {
        ensure_width(width, 9)?;
        if message.is_empty() {
            return Err(ConfigurationError::EmptyMessage);
        }
        let glyphs = message
            .chars()
            .map(|c| big_glyph(c).ok_or(ConfigurationError::UnsupportedGlyph(c)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut columns = vec![BLANK_COLUMN; width];
        for (i, glyph) in glyphs.iter().enumerate() {
            if i > 0 {
                columns.extend([BLANK_COLUMN; LETTER_GAP]);
            }
            for col in 0..GLYPH_WIDTH {
                let mut column = BLANK_COLUMN;
                for (row, cell) in column.iter_mut().enumerate() {
                    *cell = char::from(glyph[row].as_bytes()[col]);
                }
                columns.push(column);
            }
        }
        columns.extend(std::iter::repeat(BLANK_COLUMN).take(width));

        Ok(Self {
            columns,
            width,
            step: 0,
            repeat: false,
        })
    }

    /// Start the scroll over instead of settling on blank frames
    #[must_use]
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Frames in one pass: the message scrolling through plus one width of
    /// blanks
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.columns.len() - self.width
    }

    fn frame_at(&self, step: usize) -> Frame {
        let window = &self.columns[step + 1..step + 1 + self.width];
        Frame::from_lines(
            (0..GLYPH_HEIGHT).map(|row| window.iter().map(|column| column[row]).collect::<String>()),
        )
    }
}

impl FrameSource for ScrollingText {
    fn next_frame(&mut self) -> Frame {
        let frame = self.frame_at(self.step);
        if self.step + 1 < self.frame_count() {
            self.step += 1;
        } else if self.repeat {
            self.step = 0;
        }
        frame
    }

    fn reset(&mut self) {
        self.step = 0;
    }

    fn shape(&self) -> Shape {
        Shape::new(self.width, GLYPH_HEIGHT)
    }

    fn name(&self) -> &'static str {
        "scrolling-text"
    }
}
