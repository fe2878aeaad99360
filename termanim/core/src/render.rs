//! Render Loop
//!
//! Draws frames from a [`FrameSource`] on a fixed cadence until told to
//! stop, then erases the last frame.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──start──▶ Running ──stop/cancel──▶ Stopping ──erase──▶ Stopped
//!                  │   ▲
//!                  └───┘ wait one cadence, draw frame + rewind, flush
//! ```
//!
//! The loop sleeps before it draws, so the first frame appears one cadence
//! after start. Work that finishes sooner leaves no output at all.
//!
//! A loop dropped while running (a panicking source, a dropped future)
//! still writes its erase frame on the way out.

use std::io::{self, Write};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use crate::erase::{draw_frame, erase_frame};
use crate::frame::Shape;
use crate::signal::StopSignal;
use crate::source::FrameSource;

/// Where a render loop is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Created, nothing drawn
    Idle,
    /// Drawing frames
    Running,
    /// Stop observed, erasing
    Stopping,
    /// Finished; the terminal is clean
    Stopped,
}

/// Summary of one completed loop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames written
    pub frames_drawn: u64,
    /// Shape of the last frame written, if any
    pub last_shape: Option<Shape>,
}

/// The animation loop for one supervised run
pub struct RenderLoop<'a, S: FrameSource + ?Sized, W: Write + ?Sized> {
    source: &'a mut S,
    out: &'a mut W,
    cadence: Duration,
    message: Option<&'a str>,
    state: LoopState,
    /// Shape currently on screen
    visible: Option<Shape>,
    stats: RenderStats,
}

impl<'a, S: FrameSource + ?Sized, W: Write + ?Sized> RenderLoop<'a, S, W> {
    /// Create an idle loop over `source`, writing to `out`
    pub fn new(source: &'a mut S, out: &'a mut W, cadence: Duration) -> Self {
        Self {
            source,
            out,
            cadence,
            message: None,
            state: LoopState::Idle,
            visible: None,
            stats: RenderStats::default(),
        }
    }

    /// Append `message` to every frame
    #[must_use]
    pub fn with_message(mut self, message: Option<&'a str>) -> Self {
        self.message = message.filter(|m| !m.is_empty());
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run on the current thread until `signal` is stopped
    pub fn run_blocking(mut self, signal: &StopSignal) -> io::Result<RenderStats> {
        self.start();
        let cadence = self.cadence;
        while let Some(drawn) = signal.tick(cadence, || self.draw_next()) {
            if let Err(error) = drawn {
                return Err(self.fail(error));
            }
        }
        self.finish()
    }

    /// Run as a cooperative task until `cancel` fires (or its sender is
    /// dropped). Cancellation ends the loop normally.
    pub async fn run_cooperative(mut self, mut cancel: oneshot::Receiver<()>) -> io::Result<RenderStats> {
        self.start();
        loop {
            tokio::select! {
                biased;
                _ = &mut cancel => break,
                () = tokio::time::sleep(self.cadence) => {}
            }
            if let Err(error) = self.draw_next() {
                return Err(self.fail(error));
            }
        }
        self.finish()
    }

    fn start(&mut self) {
        self.source.reset();
        self.state = LoopState::Running;
        debug!(
            source = self.source.name(),
            shape = %self.source.shape(),
            cadence_ms = self.cadence.as_millis() as u64,
            "Render loop started"
        );
    }

    fn draw_next(&mut self) -> io::Result<()> {
        let mut frame = self.source.next_frame();
        if let Some(message) = self.message {
            frame = frame.with_message(message);
        }
        let shape = frame.shape();
        debug_assert!(
            self.visible.map_or(true, |visible| visible == shape),
            "frame source {} changed shape mid-run",
            self.source.name()
        );

        // Mark visible first so a partial write still gets erased.
        self.visible = Some(shape);
        self.out.write_all(draw_frame(&frame).as_bytes())?;
        self.out.flush()?;

        self.stats.frames_drawn += 1;
        self.stats.last_shape = Some(shape);
        trace!(frame = self.stats.frames_drawn, "Frame drawn");
        Ok(())
    }

    fn erase(&mut self) -> io::Result<()> {
        if let Some(shape) = self.visible.take() {
            self.out.write_all(erase_frame(shape).as_bytes())?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<RenderStats> {
        self.state = LoopState::Stopping;
        let erased = self.erase();
        self.state = LoopState::Stopped;
        debug!(frames = self.stats.frames_drawn, "Render loop stopped");
        erased.map(|()| self.stats)
    }

    fn fail(&mut self, error: io::Error) -> io::Error {
        warn!(error = %error, frames = self.stats.frames_drawn, "Render loop failed");
        self.state = LoopState::Stopping;
        // Best effort; the original error is the one reported.
        let _ = self.erase();
        self.state = LoopState::Stopped;
        error
    }
}

impl<S: FrameSource + ?Sized, W: Write + ?Sized> Drop for RenderLoop<'_, S, W> {
    fn drop(&mut self) {
        if matches!(self.state, LoopState::Running | LoopState::Stopping) {
            let _ = self.erase();
        }
    }
}
