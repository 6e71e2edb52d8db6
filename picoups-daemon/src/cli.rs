//! Command line arguments
//!
//! Both daemons use single-letter flags; `-v` prints a bare `name/version`
//! string instead of clap's own version output.

use std::path::PathBuf;

use clap::Parser;
use picoups_hal_linux::{DEFAULT_ADAPTOR, DEFAULT_GPIO_ROOT, DEFAULT_UINPUT};

/// picod - keep the PIco UPS informed that the host is alive
#[derive(Parser, Debug)]
#[command(name = "picod", disable_version_flag = true)]
pub struct PicodArgs {
    /// Detach from the terminal once the lines are set up
    #[arg(short, long)]
    pub daemonize: bool,

    /// Ignore the FSSD line; never halt the host
    #[arg(short, long)]
    pub no_fssd: bool,

    /// Print the version and exit
    #[arg(short, long)]
    pub version: bool,

    /// Sysfs GPIO root
    #[arg(long, value_name = "DIR", default_value = DEFAULT_GPIO_ROOT)]
    pub gpio_root: PathBuf,

    /// Line carrying the pulse train
    #[arg(long, value_name = "N", default_value_t = 22)]
    pub pulse_pin: u32,

    /// Line carrying the FSSD signal
    #[arg(long, value_name = "N", default_value_t = 27)]
    pub watch_pin: u32,
}

/// pico-i2cd - PIco UPS telemetry and buttons
#[derive(Parser, Debug)]
#[command(name = "pico-i2cd", disable_version_flag = true)]
pub struct I2cdArgs {
    /// I2C adaptor the UPS is attached to
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_ADAPTOR)]
    pub adaptor: PathBuf,

    /// uinput control node
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_UINPUT)]
    pub uinput: PathBuf,

    /// Print one telemetry snapshot to stdout
    #[arg(short, long)]
    pub status: bool,

    /// Do not report button presses
    #[arg(short = 'i', long)]
    pub no_input: bool,

    /// Detach from the terminal once the input device is opened
    #[arg(short, long)]
    pub daemonize: bool,

    /// Print the version and exit
    #[arg(short, long)]
    pub version: bool,
}
