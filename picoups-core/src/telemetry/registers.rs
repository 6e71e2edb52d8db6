//! UPS PIco register map
//!
//! The board answers on two I2C addresses: the main register file at 0x69
//! and a bootloader/firmware block at 0x6b.

use picoups_hal::Register;

/// Main register file
pub const UPS_ADDRESS: u8 = 0x69;
/// Firmware information block
pub const FIRMWARE_ADDRESS: u8 = 0x6b;

/// Firmware version (byte)
pub const FIRMWARE_VERSION: Register = Register::byte(FIRMWARE_ADDRESS, 0x00);
/// Power mode (byte)
pub const POWER_MODE: Register = Register::byte(UPS_ADDRESS, 0x00);
/// Battery voltage (fixed-point word)
pub const BATTERY_VOLTAGE: Register = Register::word(UPS_ADDRESS, 0x01);
/// Host supply voltage (fixed-point word)
pub const HOST_VOLTAGE: Register = Register::word(UPS_ADDRESS, 0x03);
/// First key latch; keys 1 and 2 follow
pub const KEY_BASE: u8 = 0x09;
/// Temperature sensor 1 in °C (byte)
pub const TEMPERATURE_1: Register = Register::byte(UPS_ADDRESS, 0x0c);
/// Temperature sensor 2 in °C (byte)
pub const TEMPERATURE_2: Register = Register::byte(UPS_ADDRESS, 0x0d);

/// Key latch register for `key` (0..3)
///
/// The board sets the register nonzero on a press and never clears it;
/// software writes zero after consuming the press.
pub const fn key(key: u8) -> Register {
    Register::byte(UPS_ADDRESS, KEY_BASE + key)
}
