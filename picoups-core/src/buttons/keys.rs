//! Button definitions and input device identity
//!
//! Event listeners recognize the UPS buttons by this exact name and key set,
//! so neither may change.

use picoups_hal::input::BUS_I2C;
use picoups_hal::{DeviceIdentity, KeyCode, Register};

use crate::telemetry::registers;

/// Number of buttons on the board
pub const KEY_COUNT: usize = 3;

/// Registered input device name
pub const INPUT_DEVICE_NAME: &str = "Raspberry Pi PIco UPS";

/// One button: its latch register and reported key code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub register: Register,
    pub code: KeyCode,
}

/// Buttons in scan order
pub const KEYS: [Key; KEY_COUNT] = [
    Key {
        register: registers::key(0),
        code: KeyCode::BTN_A,
    },
    Key {
        register: registers::key(1),
        code: KeyCode::BTN_B,
    },
    Key {
        register: registers::key(2),
        code: KeyCode::BTN_C,
    },
];

/// Identity of the synthesized input device
///
/// `version` is the daemon's version number.
pub fn input_device(version: u16) -> DeviceIdentity {
    DeviceIdentity {
        name: INPUT_DEVICE_NAME,
        bustype: BUS_I2C,
        vendor: 0x0000,
        product: 0x0000,
        version,
    }
}

/// Key codes to declare when registering the device
pub fn key_codes() -> [KeyCode; KEY_COUNT] {
    KEYS.map(|key| key.code)
}
