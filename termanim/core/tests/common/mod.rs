//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Clonable writer keeping one chunk per write
#[derive(Clone, Debug, Default)]
pub struct Terminal {
    chunks: Arc<Mutex<Vec<String>>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> Vec<String> {
        self.chunks.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.chunks.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.chunks.lock().len()
    }
}

impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.chunks
            .lock()
            .push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer whose terminal has gone away
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosedTerminal;

impl Write for ClosedTerminal {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
