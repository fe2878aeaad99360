//! Test Utilities
//!
//! Output sinks that record or fail writes, for checking exactly what the
//! render loop put on the terminal and when.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

/// A writer that keeps every write as a separate chunk, with its timestamp
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    writes: Arc<Mutex<Vec<(Instant, String)>>>,
    flushes: Arc<Mutex<usize>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write, in order
    pub fn chunks(&self) -> Vec<String> {
        self.writes.lock().iter().map(|(_, s)| s.clone()).collect()
    }

    /// The most recent write
    pub fn last(&self) -> Option<String> {
        self.writes.lock().last().map(|(_, s)| s.clone())
    }

    /// When the most recent write happened
    pub fn last_write_at(&self) -> Option<Instant> {
        self.writes.lock().last().map(|(at, _)| *at)
    }

    /// Number of writes so far
    pub fn len(&self) -> usize {
        self.writes.lock().len()
    }

    /// Everything written, concatenated
    pub fn output(&self) -> String {
        self.chunks().concat()
    }

    /// Number of flushes so far
    pub fn flushes(&self) -> usize {
        *self.flushes.lock()
    }
}

impl Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes
            .lock()
            .push((Instant::now(), String::from_utf8_lossy(buf).into_owned()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.lock() += 1;
        Ok(())
    }
}

/// A writer that accepts `accepted` writes and then fails every write
#[derive(Clone, Debug)]
pub struct FailingWriter {
    pub recorder: Recorder,
    accepted: usize,
}

impl FailingWriter {
    pub fn after(accepted: usize) -> Self {
        Self {
            recorder: Recorder::new(),
            accepted,
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.recorder.len() >= self.accepted {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away"));
        }
        self.recorder.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.recorder.flush()
    }
}
