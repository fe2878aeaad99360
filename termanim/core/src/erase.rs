//! Erase Frames
//!
//! Computes the output that returns the cursor to the animation origin
//! ("rewind") and the output that blanks a drawn frame ("erase frame").
//!
//! Frames are drawn rewind-after-draw: a tick writes the frame followed by
//! its rewind, so the cursor is always back at the origin between ticks and
//! the next frame (same shape) overwrites the previous one in place. The
//! final erase frame is written from the origin too.
//!
//! ```text
//! single line (H = 1):  W blanks, then W backspaces
//! multi line  (H > 1):  H lines of W blanks joined by '\n',
//!                       then H - 1 previous-line sequences
//! ```
//!
//! Multi-line rewinds land in column 0 and assume lines do not wrap.

use crossterm::cursor::MoveToPreviousLine;
use crossterm::Command;

use crate::frame::{Frame, Shape};

/// Backspace control character (cursor one column left)
pub const BACKSPACE: char = '\x08';

/// Cursor to the start of the previous line (`ESC [ 1 F`)
#[must_use]
pub fn previous_line() -> String {
    let mut out = String::new();
    push_previous_lines(&mut out, 1);
    out
}

/// Output that moves the cursor from the end of a frame of `shape` back to
/// where the frame started.
#[must_use]
pub fn rewind(shape: Shape) -> String {
    let mut out = String::new();
    push_rewind(&mut out, shape);
    out
}

/// Output that blanks a frame of `shape` drawn at the cursor and leaves the
/// cursor where it was.
#[must_use]
pub fn erase_frame(shape: Shape) -> String {
    let blank = " ".repeat(shape.width);
    let mut out = String::with_capacity((shape.width + 1) * shape.height * 2);
    for line in 0..shape.height {
        if line > 0 {
            out.push('\n');
        }
        out.push_str(&blank);
    }
    push_rewind(&mut out, shape);
    out
}

/// A frame followed by its rewind, ready to write in one go
#[must_use]
pub fn draw_frame(frame: &Frame) -> String {
    let mut out = String::from(frame.as_str());
    push_rewind(&mut out, frame.shape());
    out
}

fn push_rewind(out: &mut String, shape: Shape) {
    if shape.is_multiline() {
        push_previous_lines(out, shape.height - 1);
    } else {
        out.extend(std::iter::repeat(BACKSPACE).take(shape.width));
    }
}

fn push_previous_lines(out: &mut String, count: usize) {
    for _ in 0..count {
        // Formatting into a String is infallible.
        let _ = MoveToPreviousLine(1).write_ansi(out);
    }
}
