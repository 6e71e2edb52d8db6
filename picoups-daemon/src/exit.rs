//! Fatal errors and process exit codes
//!
//! Every setup failure has its own negative exit code so init scripts can
//! tell them apart. Steady-state failures never end the process.

use std::fmt;
use std::io;
use std::process;

use clap::error::ErrorKind;
use picoups_hal::{ChannelError, InputError};
use picoups_hal_linux::SetupError;
use thiserror::Error;
use tracing::debug;

/// Exit code for command line errors, shared by both daemons
pub const USAGE: i32 = -3;

/// Setup failures of `picod`
#[derive(Debug, Error)]
pub enum PicodError {
    #[error("could not set up pulse line: {0}")]
    PulseLine(#[source] SetupError),
    #[error("could not set up FSSD line: {0}")]
    WatchLine(#[source] SetupError),
    #[error("failed to daemonise: {0}")]
    Daemonize(#[source] io::Error),
}

impl PicodError {
    pub fn exit_code(&self) -> i32 {
        match self {
            PicodError::PulseLine(_) => -1,
            PicodError::Daemonize(_) => -2,
            PicodError::WatchLine(_) => -4,
        }
    }
}

/// Setup failures of `pico-i2cd`
#[derive(Debug, Error)]
pub enum I2cdError {
    #[error("could not open adaptor: {0}")]
    Adaptor(#[source] ChannelError),
    #[error("could not open uinput: {0}")]
    Uinput(#[source] InputError),
    #[error("failed to daemonise: {0}")]
    Daemonize(#[source] io::Error),
    #[error("could not register input device: {0}")]
    Register(#[source] InputError),
}

impl I2cdError {
    pub fn exit_code(&self) -> i32 {
        match self {
            I2cdError::Adaptor(_) => -1,
            I2cdError::Uinput(_) => -2,
            I2cdError::Daemonize(_) => -3,
            I2cdError::Register(_) => -5,
        }
    }
}

/// Exit code for a failed argument parse
///
/// Help output is a clean exit; anything else is a usage error.
pub fn usage_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE,
    }
}

/// Report an argument parse failure and exit
pub fn usage(err: clap::Error) -> ! {
    let code = usage_code(&err);
    // Printing help or usage to a closed stream leaves nothing else to do
    let _ = err.print();
    process::exit(code)
}

/// Line written to stderr for a fatal setup error
fn fatal_line(program: &str, err: &dyn fmt::Display) -> String {
    format!("{program}: {err}")
}

/// Report a fatal setup error and exit with `code`
///
/// The message goes to stderr once, whatever the log filter says.
pub fn fatal(program: &str, err: &dyn fmt::Display, code: i32) -> ! {
    debug!(code, "setup failed");
    eprintln!("{}", fatal_line(program, err));
    process::exit(code)
}
