//! Watch state definition
//!
//! The "seen HIGH" latch is the state itself: it is set in
//! [`WatchState::Active`] and [`WatchState::ShutdownTriggered`], and clear in
//! [`WatchState::AwaitingFirstSignal`].

use super::events::WatchEvent;

/// Watch states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchState {
    /// Watch line not seen HIGH since startup or the last shutdown
    #[default]
    AwaitingFirstSignal,
    /// Watch line seen HIGH; pulse train running
    Active,
    /// HIGH→LOW edge observed while latched; shutdown must be issued
    ShutdownTriggered,
}

impl WatchState {
    /// Check if the "seen HIGH" latch is set
    pub fn latched(&self) -> bool {
        matches!(self, WatchState::Active | WatchState::ShutdownTriggered)
    }

    /// Check if this state sends the pulse train
    ///
    /// The cycle that observes the falling edge still pulses: the pulse is
    /// sent before the edge is acted on.
    pub fn pulses_allowed(&self) -> bool {
        self.latched()
    }

    /// Check if the shutdown action is due
    pub fn shutdown_due(&self) -> bool {
        matches!(self, WatchState::ShutdownTriggered)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: WatchEvent) -> Self {
        use WatchEvent::*;
        use WatchState::*;

        match (self, event) {
            (AwaitingFirstSignal, SignalHigh) => Active,

            // Falling edge while latched
            (Active, SignalLow) => ShutdownTriggered,

            // Latch is cleared once the action has been invoked
            (ShutdownTriggered, ShutdownIssued) => AwaitingFirstSignal,

            // Default: stay in current state
            _ => self,
        }
    }
}
