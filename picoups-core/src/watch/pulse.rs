//! Host-alive pulse train with FSSD watch
//!
//! Each cycle samples the watch line, sends one pulse on the output line if
//! allowed, and fires the shutdown action on a HIGH→LOW edge of the watch
//! line while latched. One pulse is always sent on the very first cycle: the
//! UPS may hold the watch line LOW until it has seen a pulse.

use embedded_hal::delay::DelayNs;
use picoups_hal::{GpioChannel, Level, Pin};
use tracing::{info, trace, warn};

use super::events::WatchEvent;
use super::state::WatchState;
use crate::config::PulseTiming;
use crate::traits::ShutdownAction;

/// Default pulse train output line
pub const DEFAULT_PULSE_PIN: Pin = Pin(22);
/// Default FSSD watch line
pub const DEFAULT_WATCH_PIN: Pin = Pin(27);

/// Lines bound to the pulse and watch roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchPins {
    /// Output line carrying the pulse train
    pub pulse: Pin,
    /// Input line carrying the FSSD signal; `None` disables the feature
    pub watch: Option<Pin>,
}

impl Default for WatchPins {
    fn default() -> Self {
        Self {
            pulse: DEFAULT_PULSE_PIN,
            watch: Some(DEFAULT_WATCH_PIN),
        }
    }
}

/// Result of one pulse attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseOutcome {
    /// Full HIGH/LOW pulse sent
    Sent,
    /// Driving the line HIGH failed; pulse aborted
    RaiseFailed,
    /// Driving the line LOW failed after the HIGH phase
    LowerFailed,
}

/// What happened during one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Watch line sample, `None` if the read failed
    pub reading: Option<Level>,
    /// Pulse attempt, `None` if no pulse was due
    pub pulse: Option<PulseOutcome>,
    /// Whether the shutdown action was invoked this cycle
    pub shutdown_fired: bool,
    /// State after the cycle
    pub state: WatchState,
}

/// Pulse/watch state machine
///
/// Owns the GPIO channel, the delay used to pace the pulse train and the
/// shutdown action. Every cycle takes one full pulse period.
pub struct PulseWatch<C, D, S> {
    gpio: C,
    delay: D,
    shutdown: S,
    pins: WatchPins,
    timing: PulseTiming,
    state: WatchState,
    /// Set until the first cycle has sent its unconditional pulse
    initial_pulse: bool,
}

impl<C: GpioChannel, D: DelayNs, S: ShutdownAction> PulseWatch<C, D, S> {
    /// Create a new state machine
    ///
    /// Both lines must already be set up in the right direction.
    pub fn new(gpio: C, delay: D, shutdown: S, pins: WatchPins, timing: PulseTiming) -> Self {
        Self {
            gpio,
            delay,
            shutdown,
            pins,
            timing,
            state: WatchState::default(),
            initial_pulse: true,
        }
    }

    /// Current watch state
    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Get access to the underlying GPIO channel
    pub fn gpio(&self) -> &C {
        &self.gpio
    }

    /// Get access to the delay pacing the cycles
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Get access to the shutdown action
    pub fn shutdown_action(&self) -> &S {
        &self.shutdown
    }

    /// Sample the watch line
    ///
    /// With the watch feature disabled the line always reads HIGH, so the
    /// pulse train runs and shutdown never fires. A failed read yields
    /// `None`, which changes nothing this cycle.
    pub fn sample(&mut self) -> Option<Level> {
        let Some(pin) = self.pins.watch else {
            return Some(Level::High);
        };

        match self.gpio.level(pin) {
            Ok(level) => Some(level),
            Err(err) => {
                trace!(%pin, error = %err, "watch line read failed");
                None
            }
        }
    }

    /// Run one cycle
    pub fn cycle(&mut self) -> CycleReport {
        let reading = self.sample();

        if let Some(level) = reading {
            self.apply(WatchEvent::from_level(level));
        }

        let pulse = if self.initial_pulse || self.state.pulses_allowed() {
            self.initial_pulse = false;
            Some(self.pulse())
        } else {
            self.delay.delay_us(self.timing.period_us);
            None
        };

        let shutdown_fired = self.state.shutdown_due();
        if shutdown_fired {
            warn!("FSSD line dropped, halting host");
            self.shutdown.trigger();
            self.apply(WatchEvent::ShutdownIssued);
        }

        CycleReport {
            reading,
            pulse,
            shutdown_fired,
            state: self.state,
        }
    }

    /// Run cycles forever
    pub fn run(&mut self) -> ! {
        loop {
            self.cycle();
        }
    }

    fn apply(&mut self, event: WatchEvent) {
        let next = self.state.transition(event);
        if next != self.state {
            match next {
                WatchState::Active => info!("FSSD line HIGH, pulse train armed"),
                WatchState::AwaitingFirstSignal => info!("waiting for FSSD line to return HIGH"),
                WatchState::ShutdownTriggered => {}
            }
        }
        self.state = next;
    }

    /// Send one pulse and idle out the rest of the period
    ///
    /// A failed write aborts the pulse; the next cycle tries again.
    fn pulse(&mut self) -> PulseOutcome {
        let pin = self.pins.pulse;

        if let Err(err) = self.gpio.set_level(pin, Level::High) {
            trace!(%pin, error = %err, "pulse raise failed");
            self.delay.delay_us(self.timing.period_us);
            return PulseOutcome::RaiseFailed;
        }

        self.delay.delay_us(self.timing.high_us);

        let outcome = match self.gpio.set_level(pin, Level::Low) {
            Ok(()) => PulseOutcome::Sent,
            Err(err) => {
                trace!(%pin, error = %err, "pulse lower failed");
                PulseOutcome::LowerFailed
            }
        };

        self.delay.delay_us(self.timing.low_us());
        outcome
    }
}
