//! Synthesized input device abstractions
//!
//! Constants mirror the Linux input event codes (`linux/input-event-codes.h`)
//! so sinks can pass them through unchanged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Synchronization event type
pub const EV_SYN: u16 = 0x00;
/// Key event type
pub const EV_KEY: u16 = 0x01;
/// Barrier code within `EV_SYN`
pub const SYN_REPORT: u16 = 0x00;
/// I2C bus type for [`DeviceIdentity::bustype`]
pub const BUS_I2C: u16 = 0x18;

/// Key code of an `EV_KEY` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const BTN_A: KeyCode = KeyCode(0x130);
    pub const BTN_B: KeyCode = KeyCode(0x131);
    pub const BTN_C: KeyCode = KeyCode(0x132);
}

/// Key transition carried by an `EV_KEY` event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Release,
    Press,
}

impl KeyAction {
    /// Event value for this transition
    pub fn value(self) -> i32 {
        match self {
            KeyAction::Release => 0,
            KeyAction::Press => 1,
        }
    }
}

/// Identity a synthesized device registers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub name: &'static str,
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// Receiver of synthesized input events
pub trait InputSink {
    /// Deliver one key event
    fn key(&mut self, code: KeyCode, action: KeyAction) -> Result<(), InputError>;

    /// Deliver a synchronization barrier
    fn sync(&mut self) -> Result<(), InputError>;
}

impl<S: InputSink + ?Sized> InputSink for &mut S {
    fn key(&mut self, code: KeyCode, action: KeyAction) -> Result<(), InputError> {
        (**self).key(code, action)
    }

    fn sync(&mut self) -> Result<(), InputError> {
        (**self).sync()
    }
}

/// Errors that can occur with a synthesized input device
#[derive(Debug, Error)]
pub enum InputError {
    /// The uinput control device could not be opened
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A registration step was rejected by the kernel
    #[error("could not {step}: {source}")]
    Register {
        step: &'static str,
        #[source]
        source: io::Error,
    },
    /// The device name does not fit the registration record
    #[error("device name is {0} bytes, too long")]
    NameTooLong(usize),
    /// The event write syscall failed
    #[error("event write failed: {0}")]
    Write(#[source] io::Error),
    /// The event was only partially written
    #[error("short event write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

impl InputError {
    /// Stable negative failure code, matching the daemon exit codes
    /// for setup failures
    pub fn code(&self) -> i32 {
        match self {
            InputError::Open { .. } => -2,
            InputError::Register { .. } | InputError::NameTooLong(_) => -5,
            InputError::Write(_) | InputError::ShortWrite { .. } => -3,
        }
    }
}
