//! Pulse/watch state machine
//!
//! Keeps the UPS informed that the host is alive and halts the host when
//! the UPS drops the FSSD watch line. The latch state is explicit and
//! finite; [`PulseWatch`] drives it from register readings.

pub mod events;
pub mod pulse;
pub mod state;

pub use events::WatchEvent;
pub use pulse::{CycleReport, PulseOutcome, PulseWatch, WatchPins};
pub use state::WatchState;
