//! Events that trigger watch state transitions

use picoups_hal::Level;

/// Events that can trigger watch state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// Watch line sampled HIGH (UPS present, power good)
    SignalHigh,
    /// Watch line sampled LOW
    SignalLow,
    /// The shutdown action has been invoked
    ShutdownIssued,
}

impl WatchEvent {
    /// Event for a watch line sample
    pub fn from_level(level: Level) -> Self {
        match level {
            Level::High => WatchEvent::SignalHigh,
            Level::Low => WatchEvent::SignalLow,
        }
    }
}
