//! Log records buffered until a subscriber is ready.
//!
//! Loading runs during bootstrap, typically before any `tracing`
//! subscriber is installed. Records are captured in a bounded ring
//! buffer and replayed once the logging subsystem is up. Oldest records
//! are dropped on overflow.

use std::collections::VecDeque;
use tracing::Level;

const DEFAULT_CAPACITY: usize = 256;

/// A bounded buffer of deferred log records.
#[derive(Debug)]
pub struct DeferredLog {
    records: VecDeque<(Level, String)>,
    capacity: usize,
}

impl DeferredLog {
    /// Creates a buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a buffer holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    /// Buffers a TRACE record.
    pub fn trace(&mut self, message: impl Into<String>) {
        self.push(Level::TRACE, message.into());
    }

    /// Buffers a DEBUG record.
    pub fn debug(&mut self, message: impl Into<String>) {
        self.push(Level::DEBUG, message.into());
    }

    /// Returns the number of buffered records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Emits all buffered records through `tracing` and clears the
    /// buffer.
    pub fn replay(&mut self) {
        for (level, message) in self.records.drain(..) {
            match level {
                Level::TRACE => tracing::trace!("{}", message),
                Level::DEBUG => tracing::debug!("{}", message),
                Level::INFO => tracing::info!("{}", message),
                Level::WARN => tracing::warn!("{}", message),
                Level::ERROR => tracing::error!("{}", message),
            }
        }
    }

    fn push(&mut self, level: Level, message: String) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back((level, message));
    }
}

impl Default for DeferredLog {
    fn default() -> Self {
        Self::new()
    }
}
