//! Daemon configuration
//!
//! There is no configuration file: every setting has a built-in default and
//! the command line overrides paths, pins and features.

use std::path::PathBuf;

use picoups_core::config::{PollTiming, PulseTiming};
use picoups_core::watch::WatchPins;
use picoups_hal::Pin;
use picoups_hal_linux::{DEFAULT_ADAPTOR, DEFAULT_GPIO_ROOT, DEFAULT_UINPUT};

use crate::cli::{I2cdArgs, PicodArgs};

/// Settings for `picod`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicodConfig {
    pub gpio_root: PathBuf,
    /// `pins.watch` is `None` when the FSSD feature is off
    pub pins: WatchPins,
    pub timing: PulseTiming,
    pub daemonize: bool,
}

impl Default for PicodConfig {
    fn default() -> Self {
        Self {
            gpio_root: PathBuf::from(DEFAULT_GPIO_ROOT),
            pins: WatchPins::default(),
            timing: PulseTiming::default(),
            daemonize: false,
        }
    }
}

impl From<&PicodArgs> for PicodConfig {
    fn from(args: &PicodArgs) -> Self {
        Self {
            gpio_root: args.gpio_root.clone(),
            pins: WatchPins {
                pulse: Pin(args.pulse_pin),
                watch: (!args.no_fssd).then_some(Pin(args.watch_pin)),
            },
            timing: PulseTiming::default(),
            daemonize: args.daemonize,
        }
    }
}

/// Settings for `pico-i2cd`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cdConfig {
    pub adaptor: PathBuf,
    pub uinput: PathBuf,
    /// Print a telemetry snapshot before anything else
    pub status: bool,
    /// Run the button loop
    pub input_loop: bool,
    pub daemonize: bool,
    pub poll: PollTiming,
}

impl Default for I2cdConfig {
    fn default() -> Self {
        Self {
            adaptor: PathBuf::from(DEFAULT_ADAPTOR),
            uinput: PathBuf::from(DEFAULT_UINPUT),
            status: false,
            input_loop: true,
            daemonize: false,
            poll: PollTiming::default(),
        }
    }
}

impl From<&I2cdArgs> for I2cdConfig {
    fn from(args: &I2cdArgs) -> Self {
        Self {
            adaptor: args.adaptor.clone(),
            uinput: args.uinput.clone(),
            status: args.status,
            input_loop: !args.no_input,
            daemonize: args.daemonize,
            poll: PollTiming::default(),
        }
    }
}
