//! GPIO pin abstractions
//!
//! A GPIO register channel addresses single lines by [`Pin`] number. Reads
//! return 0 or 1, writes drive the line LOW for zero and HIGH otherwise.

use core::fmt;

use crate::channel::{ChannelError, RegisterChannel};

/// GPIO line number as the kernel numbers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pin(pub u32);

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Logic level of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Check if this is the HIGH level
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Register value for this level
    pub fn as_register(self) -> u16 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// I/O direction of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// Control string accepted by the sysfs `direction` attribute
    pub fn as_sysfs(self) -> &'static str {
        match self {
            Direction::Input => "in\n",
            Direction::Output => "out\n",
        }
    }
}

/// Level helpers for GPIO register channels
pub trait GpioChannel: RegisterChannel<Address = Pin> {
    /// Drive an output line to `level`
    fn set_level(&mut self, pin: Pin, level: Level) -> Result<(), ChannelError> {
        self.write(pin, level.as_register())
    }

    /// Sample an input line
    fn level(&mut self, pin: Pin) -> Result<Level, ChannelError> {
        self.read(pin).map(|value| Level::from(value != 0))
    }
}

// Blanket implementation for all GPIO register channels
impl<T: RegisterChannel<Address = Pin> + ?Sized> GpioChannel for T {}
