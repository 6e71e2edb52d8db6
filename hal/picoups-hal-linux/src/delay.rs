//! Blocking delay on the host scheduler

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Delay that puts the calling thread to sleep
///
/// A sleep cut short by a signal counts as complete.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
