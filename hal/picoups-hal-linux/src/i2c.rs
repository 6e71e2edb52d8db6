//! i2c-dev SMBus adaptor
//!
//! Talks to an adaptor node such as `/dev/i2c-1` with the `I2C_SLAVE` and
//! `I2C_SMBUS` ioctls. Address caching lives in [`picoups_hal::I2cChannel`];
//! this type only performs the transfers.

use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::Path;

use libc::c_int;
use picoups_hal::{ChannelError, SmbusBus};
use tracing::debug;

use self::ioctl::{i2c_set_slave, i2c_smbus, SmbusData, SmbusIoctlData};

/// Default I2C adaptor on the Raspberry Pi header
pub const DEFAULT_ADAPTOR: &str = "/dev/i2c-1";

const I2C_SMBUS_READ: u8 = 1;
const I2C_SMBUS_WRITE: u8 = 0;
const I2C_SMBUS_BYTE_DATA: u32 = 2;
const I2C_SMBUS_WORD_DATA: u32 = 3;

/// Kernel ABI of `linux/i2c-dev.h` and `linux/i2c.h`
mod ioctl {
    const I2C_SMBUS_BLOCK_MAX: usize = 32;

    /// `union i2c_smbus_data`
    #[repr(C)]
    #[derive(Clone, Copy)]
    pub union SmbusData {
        pub byte: u8,
        pub word: u16,
        pub block: [u8; I2C_SMBUS_BLOCK_MAX + 2],
    }

    /// `struct i2c_smbus_ioctl_data`
    #[repr(C)]
    pub struct SmbusIoctlData {
        pub read_write: u8,
        pub command: u8,
        pub size: u32,
        pub data: *mut SmbusData,
    }

    nix::ioctl_write_int_bad!(i2c_set_slave, 0x0703);
    nix::ioctl_write_ptr_bad!(i2c_smbus, 0x0720, SmbusIoctlData);
}

/// One opened I2C adaptor
#[derive(Debug)]
pub struct I2cDev {
    file: File,
}

impl I2cDev {
    /// Open an adaptor node read/write
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ChannelError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| ChannelError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(adaptor = %path.display(), "I2C adaptor opened");
        Ok(Self { file })
    }

    fn transfer(
        &mut self,
        read_write: u8,
        command: u8,
        size: u32,
        data: &mut SmbusData,
    ) -> Result<(), ChannelError> {
        let args = SmbusIoctlData {
            read_write,
            command,
            size,
            data: data as *mut SmbusData,
        };

        // SAFETY: `args` and the buffer it points to outlive the call, and the
        // buffer has the full size of the kernel's data union.
        unsafe { i2c_smbus(self.file.as_raw_fd(), &args) }
            .map_err(|errno| ChannelError::Transfer(errno.into()))?;
        Ok(())
    }
}

impl SmbusBus for I2cDev {
    fn select(&mut self, address: u8) -> Result<(), ChannelError> {
        // SAFETY: I2C_SLAVE takes the address by value.
        unsafe { i2c_set_slave(self.file.as_raw_fd(), c_int::from(address)) }.map_err(
            |errno| ChannelError::SelectAddress {
                address,
                source: errno.into(),
            },
        )?;
        Ok(())
    }

    fn read_byte_data(&mut self, command: u8) -> Result<u8, ChannelError> {
        let mut data = SmbusData { word: 0 };
        self.transfer(I2C_SMBUS_READ, command, I2C_SMBUS_BYTE_DATA, &mut data)?;
        // SAFETY: every field is plain bytes; the kernel filled the first one.
        Ok(unsafe { data.byte })
    }

    fn read_word_data(&mut self, command: u8) -> Result<u16, ChannelError> {
        let mut data = SmbusData { word: 0 };
        self.transfer(I2C_SMBUS_READ, command, I2C_SMBUS_WORD_DATA, &mut data)?;
        // SAFETY: as above; the kernel stores the word in host order.
        Ok(unsafe { data.word })
    }

    fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), ChannelError> {
        let mut data = SmbusData { byte: value };
        self.transfer(I2C_SMBUS_WRITE, command, I2C_SMBUS_BYTE_DATA, &mut data)
    }

    fn write_word_data(&mut self, command: u8, value: u16) -> Result<(), ChannelError> {
        let mut data = SmbusData { word: value };
        self.transfer(I2C_SMBUS_WRITE, command, I2C_SMBUS_WORD_DATA, &mut data)
    }
}
