//! In-memory fakes shared by the integration tests
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use embedded_hal::delay::DelayNs;
use picoups_core::traits::ShutdownAction;
use picoups_hal::{
    ChannelError, InputError, InputSink, KeyAction, KeyCode, Pin, Register, RegisterChannel,
};

/// GPIO lines: scripted reads per pin, recorded writes
#[derive(Default)]
pub struct FakeGpio {
    pub reads: HashMap<Pin, VecDeque<u16>>,
    pub writes: Vec<(Pin, u16)>,
}

impl FakeGpio {
    pub fn with_watch(pin: Pin, readings: &[u16]) -> Self {
        let mut gpio = Self::default();
        gpio.reads.insert(pin, readings.iter().copied().collect());
        gpio
    }
}

impl RegisterChannel for FakeGpio {
    type Address = Pin;

    fn read(&mut self, pin: Pin) -> Result<u16, ChannelError> {
        self.reads
            .get_mut(&pin)
            .and_then(VecDeque::pop_front)
            .ok_or(ChannelError::EmptyRead)
    }

    fn write(&mut self, pin: Pin, value: u16) -> Result<(), ChannelError> {
        self.writes.push((pin, value));
        Ok(())
    }
}

/// Register accesses in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(u8),
    Write(u8, u16),
}

/// UPS register file with scripted key latches
///
/// Each key register pops its next scripted reading; an exhausted script
/// reads zero. Writes are recorded but do not affect the script.
#[derive(Default)]
pub struct FakeUps {
    pub keys: HashMap<u8, VecDeque<u16>>,
    pub log: Vec<Access>,
}

impl FakeUps {
    pub fn with_key(offset: u8, readings: &[u16]) -> Self {
        let mut ups = Self::default();
        ups.script(offset, readings);
        ups
    }

    pub fn script(&mut self, offset: u8, readings: &[u16]) {
        self.keys.insert(offset, readings.iter().copied().collect());
    }

    pub fn writes(&self) -> Vec<(u8, u16)> {
        self.log
            .iter()
            .filter_map(|access| match *access {
                Access::Write(offset, value) => Some((offset, value)),
                Access::Read(_) => None,
            })
            .collect()
    }
}

impl RegisterChannel for FakeUps {
    type Address = Register;

    fn read(&mut self, register: Register) -> Result<u16, ChannelError> {
        self.log.push(Access::Read(register.offset));
        Ok(self
            .keys
            .get_mut(&register.offset)
            .and_then(VecDeque::pop_front)
            .unwrap_or(0))
    }

    fn write(&mut self, register: Register, value: u16) -> Result<(), ChannelError> {
        self.log.push(Access::Write(register.offset, value));
        Ok(())
    }
}

/// Events as the sink received them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyCode, KeyAction),
    Sync,
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
    /// Number of upcoming key writes to reject
    pub reject_keys: usize,
}

impl RecordingSink {
    pub fn keys(&self) -> Vec<(KeyCode, KeyAction)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                Event::Key(code, action) => Some((code, action)),
                Event::Sync => None,
            })
            .collect()
    }

    pub fn syncs(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Sync).count()
    }
}

impl InputSink for RecordingSink {
    fn key(&mut self, code: KeyCode, action: KeyAction) -> Result<(), InputError> {
        if self.reject_keys > 0 {
            self.reject_keys -= 1;
            return Err(InputError::ShortWrite {
                written: 0,
                expected: 24,
            });
        }
        self.events.push(Event::Key(code, action));
        Ok(())
    }

    fn sync(&mut self) -> Result<(), InputError> {
        self.events.push(Event::Sync);
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingShutdown {
    pub calls: u32,
}

impl ShutdownAction for CountingShutdown {
    fn trigger(&mut self) {
        self.calls += 1;
    }
}

/// Delay that adds up the requested time instead of sleeping
#[derive(Default)]
pub struct ClockDelay {
    pub elapsed_us: u64,
}

impl DelayNs for ClockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_us += u64::from(ns) / 1_000;
    }

    fn delay_us(&mut self, us: u32) {
        self.elapsed_us += u64::from(us);
    }
}
