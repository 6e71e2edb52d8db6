//! Loop timing
//!
//! The UPS firmware is not particular about exact pulse shape or poll
//! cadence; sleeps interrupted by signals simply end early.

/// Pulse train timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    /// Full cycle length in microseconds
    pub period_us: u32,
    /// Time the output is held HIGH in microseconds
    pub high_us: u32,
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self {
            period_us: 500_000,
            high_us: 250_000,
        }
    }
}

impl PulseTiming {
    /// Time the output idles LOW after the HIGH phase
    pub fn low_us(&self) -> u32 {
        self.period_us.saturating_sub(self.high_us)
    }
}

/// Button poll timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    /// Interval between key register scans in microseconds
    pub interval_us: u32,
}

impl Default for PollTiming {
    fn default() -> Self {
        Self {
            interval_us: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pulse_is_half_duty() {
        let timing = PulseTiming::default();
        assert_eq!(timing.high_us, 250_000);
        assert_eq!(timing.low_us(), 250_000);
    }

    #[test]
    fn test_low_phase_never_underflows() {
        let timing = PulseTiming {
            period_us: 100,
            high_us: 200,
        };
        assert_eq!(timing.low_us(), 0);
    }
}
