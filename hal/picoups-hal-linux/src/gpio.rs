//! Sysfs GPIO
//!
//! Lines are driven through the legacy `/sys/class/gpio` interface: the line
//! number is written to `export`, which creates `gpio<N>/` holding the
//! `direction` and `value` attributes. Every access opens the attribute,
//! does one transfer and closes it again.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use embedded_hal::delay::DelayNs;
use picoups_hal::{retry_with_backoff, ChannelError, Direction, Pin, RegisterChannel};
use thiserror::Error;
use tracing::{debug, trace};

/// Default sysfs GPIO root
pub const DEFAULT_GPIO_ROOT: &str = "/sys/class/gpio";

/// Largest value read accepted from a `value` attribute
const VALUE_BUFFER: usize = 32;

/// Errors that can occur while setting up a line
#[derive(Debug, Error)]
pub enum SetupError {
    /// The export attribute could not be opened
    #[error("could not export GPIO {pin}: {source}")]
    Export {
        pin: Pin,
        #[source]
        source: ChannelError,
    },
    /// The direction never took, even after retrying
    #[error("could not set direction of GPIO {pin}: {source}")]
    Direction {
        pin: Pin,
        #[source]
        source: ChannelError,
    },
}

impl SetupError {
    /// Negative code of the underlying channel failure
    pub fn code(&self) -> i32 {
        match self {
            SetupError::Export { source, .. } | SetupError::Direction { source, .. } => {
                source.code()
            }
        }
    }
}

/// GPIO lines under one sysfs root
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
}

impl Default for SysfsGpio {
    fn default() -> Self {
        Self::new(DEFAULT_GPIO_ROOT)
    }
}

impl SysfsGpio {
    /// Create a channel rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn attribute(&self, pin: Pin, name: &str) -> PathBuf {
        self.root.join(format!("gpio{}", pin.0)).join(name)
    }

    /// Export `pin`
    ///
    /// Exporting an already exported line makes the kernel reject the write
    /// with `EBUSY`, so write failures are logged and otherwise ignored. Only
    /// failing to open the export attribute is an error.
    pub fn export(&self, pin: Pin) -> Result<(), ChannelError> {
        let path = self.root.join("export");
        let mut file = open_write(&path)?;

        if let Err(err) = put(&mut file, pin.0.to_string().as_bytes()) {
            debug!(%pin, error = %err, "export write rejected, line probably exported already");
        }
        Ok(())
    }

    /// Set the direction of an exported line
    pub fn set_direction(&self, pin: Pin, direction: Direction) -> Result<(), ChannelError> {
        let mut file = open_write(&self.attribute(pin, "direction"))?;
        put(&mut file, direction.as_sysfs().as_bytes())
    }

    /// Export `pin` and set its direction
    ///
    /// The direction attribute may be missing or not yet writable for a
    /// short while after export, so that step is retried with backoff.
    pub fn setup<D: DelayNs>(
        &self,
        pin: Pin,
        direction: Direction,
        delay: &mut D,
    ) -> Result<(), SetupError> {
        self.export(pin)
            .map_err(|source| SetupError::Export { pin, source })?;

        retry_with_backoff(delay, |attempt| {
            trace!(%pin, attempt, ?direction, "setting direction");
            self.set_direction(pin, direction)
        })
        .map_err(|source| SetupError::Direction { pin, source })?;

        debug!(%pin, ?direction, "line ready");
        Ok(())
    }
}

impl RegisterChannel for SysfsGpio {
    type Address = Pin;

    /// Read the line level: 1 if the attribute starts with `1`, 0 otherwise
    fn read(&mut self, pin: Pin) -> Result<u16, ChannelError> {
        let path = self.attribute(pin, "value");
        let mut file = File::open(&path).map_err(|source| ChannelError::Open { path, source })?;

        let mut buf = [0u8; VALUE_BUFFER];
        let len = file.read(&mut buf).map_err(ChannelError::Read)?;
        match buf[..len].first() {
            None => Err(ChannelError::EmptyRead),
            Some(b'1') => Ok(1),
            Some(_) => Ok(0),
        }
    }

    /// Drive the line: any nonzero value is HIGH
    fn write(&mut self, pin: Pin, value: u16) -> Result<(), ChannelError> {
        let mut file = open_write(&self.attribute(pin, "value"))?;
        put(&mut file, if value != 0 { b"1\n" } else { b"0\n" })
    }
}

fn open_write(path: &Path) -> Result<File, ChannelError> {
    OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|source| ChannelError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// One write syscall; sysfs attributes take the whole value or nothing
fn put(file: &mut File, bytes: &[u8]) -> Result<(), ChannelError> {
    let written = file.write(bytes).map_err(ChannelError::Write)?;
    if written < bytes.len() {
        return Err(ChannelError::ShortWrite {
            written,
            expected: bytes.len(),
        });
    }
    Ok(())
}
