//! Register channel abstraction
//!
//! A register channel addresses one device register space (GPIO lines on a
//! sysfs tree, or registers behind an I2C adaptor) and performs single
//! synchronous reads and writes. Channels never retry on their own: the
//! polling loops built on top of them are the retry mechanism.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Addressed register read/write
pub trait RegisterChannel {
    /// Address type understood by this channel
    type Address: Copy;

    /// Read the register at `address`
    fn read(&mut self, address: Self::Address) -> Result<u16, ChannelError>;

    /// Write `value` to the register at `address`
    fn write(&mut self, address: Self::Address, value: u16) -> Result<(), ChannelError>;
}

impl<C: RegisterChannel + ?Sized> RegisterChannel for &mut C {
    type Address = C::Address;

    fn read(&mut self, address: Self::Address) -> Result<u16, ChannelError> {
        (**self).read(address)
    }

    fn write(&mut self, address: Self::Address, value: u16) -> Result<(), ChannelError> {
        (**self).write(address, value)
    }
}

/// Errors that can occur on a register access
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The address cannot be encoded for this channel
    #[error("address {0:#x} cannot be encoded for this channel")]
    InvalidAddress(u32),
    /// The value does not fit the register width
    #[error("value {0:#x} does not fit the register")]
    ValueOutOfRange(u16),
    /// The control file could not be opened
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The write syscall failed
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
    /// Fewer bytes were written than requested
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
    /// The read syscall failed
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    /// The read returned no data
    #[error("empty read")]
    EmptyRead,
    /// The device address could not be selected on the bus
    #[error("could not select device {address:#04x}: {source}")]
    SelectAddress {
        address: u8,
        #[source]
        source: io::Error,
    },
    /// The bus transfer itself failed
    #[error("bus transfer failed: {0}")]
    Transfer(#[source] io::Error),
}

impl ChannelError {
    /// Stable negative failure code
    ///
    /// | code | failures                                            |
    /// |------|-----------------------------------------------------|
    /// | -1   | invalid address or value, address select            |
    /// | -2   | open, read, empty read                              |
    /// | -3   | write, short write, bus transfer                    |
    ///
    /// The telemetry output prints this value in place of a failed reading.
    pub fn code(&self) -> i32 {
        match self {
            ChannelError::InvalidAddress(_)
            | ChannelError::ValueOutOfRange(_)
            | ChannelError::SelectAddress { .. } => -1,
            ChannelError::Open { .. } | ChannelError::Read(_) | ChannelError::EmptyRead => -2,
            ChannelError::Write(_) | ChannelError::ShortWrite { .. } | ChannelError::Transfer(_) => {
                -3
            }
        }
    }
}
