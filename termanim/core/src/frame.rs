//! Frames and Their Shapes
//!
//! A frame is one instant of an animation: a single line, or a block of lines
//! joined by `\n`. Every frame from one source shares the same [`Shape`].

use std::fmt;

use unicode_width::UnicodeWidthStr;

/// Width (terminal columns) and height (lines) of a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Display columns of every line
    pub width: usize,
    /// Number of lines
    pub height: usize,
}

impl Shape {
    /// Create a shape
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Shape of a single-line frame
    #[must_use]
    pub const fn line(width: usize) -> Self {
        Self { width, height: 1 }
    }

    /// Whether the frame spans more than one line
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.height > 1
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One animation frame
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame(String);

impl Frame {
    /// Create a frame from raw text (lines separated by `\n`)
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Create a multi-line frame from its lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        Self(text)
    }

    /// Get the frame text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the frame's lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n')
    }

    /// Shape of this frame, measured from its first line
    #[must_use]
    pub fn shape(&self) -> Shape {
        let width = self.lines().next().map_or(0, UnicodeWidthStr::width);
        Shape::new(width, self.lines().count())
    }

    /// Append a message after the frame, separated by one space.
    ///
    /// The message goes on the first line; the other lines are padded with
    /// blanks so the result stays rectangular.
    #[must_use]
    pub fn with_message(&self, message: &str) -> Self {
        if message.is_empty() {
            return self.clone();
        }
        let padding = " ".repeat(message.width() + 1);
        let lines = self.lines().enumerate().map(|(i, line)| {
            if i == 0 {
                format!("{line} {message}")
            } else {
                format!("{line}{padding}")
            }
        });
        Self::from_lines(lines)
    }

    /// Consume the frame and return its text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Frame {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Frame {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Frame {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl PartialEq<&str> for Frame {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
