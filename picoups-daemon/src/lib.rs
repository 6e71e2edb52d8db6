//! PIco UPS daemons
//!
//! Two small long-running programs share this crate:
//!
//! - `picod` pulses a GPIO line so the UPS knows the host is alive, and
//!   halts the host when the UPS drops its FSSD line.
//! - `pico-i2cd` prints a telemetry snapshot read over I2C and turns the
//!   board's three buttons into a uinput key device.
//!
//! The binaries only parse arguments and install logging; setup and the main
//! loops live in [`picod`] and [`i2cd`].

pub mod cli;
pub mod config;
pub mod exit;
pub mod i2cd;
pub mod logging;
pub mod picod;

/// Protocol version of `picod`, printed by `-v`
pub const PICOD_VERSION: u16 = 3;
/// Protocol version of `pico-i2cd`, printed by `-v` and registered as the
/// input device version
pub const I2CD_VERSION: u16 = 1;
