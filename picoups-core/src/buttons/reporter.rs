//! Button debounce and edge reporting
//!
//! Each key carries a "release pending" flag. A press is only reported while
//! the flag is clear and a release only while it is set, so the register
//! level turns into strictly alternating press/release edges. The board does
//! not clear a key latch by itself; it is written back to zero once a press
//! has been delivered.
//!
//! A failed event write leaves the key's state untouched so the same edge is
//! attempted again on the next poll. Under persistent write failure a key
//! can stay pending indefinitely.

use picoups_hal::{InputSink, KeyAction, Register, RegisterChannel};
use tracing::{debug, trace};

use super::keys::{Key, KEYS, KEY_COUNT};

/// What happened during one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReport {
    /// Press events delivered
    pub presses: u8,
    /// Release events delivered
    pub releases: u8,
    /// Key latches written back to zero
    pub resets: u8,
    /// Whether a synchronization barrier was delivered
    pub synced: bool,
}

impl PollReport {
    /// Number of key events delivered
    pub fn events(&self) -> u8 {
        self.presses + self.releases
    }
}

/// Button poller
pub struct KeyReporter<C, I> {
    channel: C,
    sink: I,
    release_pending: [bool; KEY_COUNT],
}

impl<C, I> KeyReporter<C, I>
where
    C: RegisterChannel<Address = Register>,
    I: InputSink,
{
    /// Create a reporter with no key pending release
    pub fn new(channel: C, sink: I) -> Self {
        Self {
            channel,
            sink,
            release_pending: [false; KEY_COUNT],
        }
    }

    /// Check if `key` is waiting for its release
    pub fn release_pending(&self, key: usize) -> bool {
        self.release_pending.get(key).copied().unwrap_or(false)
    }

    /// Get access to the register channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Get mutable access to the register channel
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Get access to the input sink
    pub fn sink(&self) -> &I {
        &self.sink
    }

    /// Get mutable access to the input sink
    pub fn sink_mut(&mut self) -> &mut I {
        &mut self.sink
    }

    /// Scan all keys once
    ///
    /// Keys are scanned in index order and events are delivered in that
    /// order. At most one barrier follows, and only if an event was
    /// delivered.
    pub fn poll(&mut self) -> PollReport {
        let mut report = PollReport::default();

        for (index, key) in KEYS.iter().enumerate() {
            let scan = match self.channel.read(key.register) {
                Ok(scan) => scan,
                Err(err) => {
                    trace!(key = index, error = %err, "key register read failed");
                    continue;
                }
            };

            if self.release_pending[index] {
                if scan == 0 {
                    if self.deliver(key, KeyAction::Release) {
                        self.release_pending[index] = false;
                        report.releases += 1;
                    }
                } else {
                    // Still latched while held; not expected, but harmless
                    self.reset(index, key);
                    report.resets += 1;
                }
            } else if scan != 0 && self.deliver(key, KeyAction::Press) {
                self.release_pending[index] = true;
                self.reset(index, key);
                report.presses += 1;
                report.resets += 1;
            }
        }

        if report.events() > 0 {
            match self.sink.sync() {
                Ok(()) => report.synced = true,
                Err(err) => trace!(error = %err, "barrier write failed"),
            }
        }

        report
    }

    fn deliver(&mut self, key: &Key, action: KeyAction) -> bool {
        match self.sink.key(key.code, action) {
            Ok(()) => {
                debug!(code = key.code.0, ?action, "key event");
                true
            }
            Err(err) => {
                trace!(code = key.code.0, error = %err, "key event write failed");
                false
            }
        }
    }

    fn reset(&mut self, index: usize, key: &Key) {
        if let Err(err) = self.channel.write(key.register, 0) {
            trace!(key = index, error = %err, "key latch reset failed");
        }
    }
}
