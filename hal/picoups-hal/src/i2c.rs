//! I2C bus abstractions
//!
//! [`SmbusBus`] is implemented by platform HALs for one I2C adaptor.
//! [`I2cChannel`] layers register addressing on top of it and keeps track of
//! the currently selected device, so the address-select call is only issued
//! when an access targets a different device than the previous one.

use tracing::trace;

use crate::channel::{ChannelError, RegisterChannel};

/// Highest valid 7-bit device address
pub const MAX_DEVICE_ADDRESS: u8 = 0x7f;

/// Register access width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Single byte (SMBus byte data)
    Byte,
    /// Little-endian word spanning `offset` and `offset + 1` (SMBus word data)
    Word,
}

/// A register on an I2C device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    /// 7-bit device address
    pub device: u8,
    /// Register offset (SMBus command byte)
    pub offset: u8,
    /// Access width
    pub width: Width,
}

impl Register {
    /// Byte-wide register
    pub const fn byte(device: u8, offset: u8) -> Self {
        Self {
            device,
            offset,
            width: Width::Byte,
        }
    }

    /// Word-wide register
    pub const fn word(device: u8, offset: u8) -> Self {
        Self {
            device,
            offset,
            width: Width::Word,
        }
    }
}

/// SMBus transfers on a single adaptor
///
/// Transfers go to whichever device was last passed to [`SmbusBus::select`].
pub trait SmbusBus {
    /// Direct subsequent transfers at `address`
    fn select(&mut self, address: u8) -> Result<(), ChannelError>;

    /// SMBus "read byte data"
    fn read_byte_data(&mut self, command: u8) -> Result<u8, ChannelError>;

    /// SMBus "read word data"
    fn read_word_data(&mut self, command: u8) -> Result<u16, ChannelError>;

    /// SMBus "write byte data"
    fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), ChannelError>;

    /// SMBus "write word data"
    fn write_word_data(&mut self, command: u8, value: u16) -> Result<(), ChannelError>;
}

/// Register channel over an SMBus adaptor
pub struct I2cChannel<B> {
    bus: B,
    /// Device the adaptor currently points at
    selected: Option<u8>,
}

impl<B: SmbusBus> I2cChannel<B> {
    /// Wrap an adaptor; no device is selected yet
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            selected: None,
        }
    }

    /// Currently selected device address
    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    /// Get access to the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    fn select(&mut self, address: u8) -> Result<(), ChannelError> {
        if self.selected == Some(address) {
            return Ok(());
        }

        if address > MAX_DEVICE_ADDRESS {
            return Err(ChannelError::InvalidAddress(u32::from(address)));
        }

        trace!(address, "selecting i2c device");
        self.bus.select(address)?;
        self.selected = Some(address);
        Ok(())
    }
}

impl<B: SmbusBus> RegisterChannel for I2cChannel<B> {
    type Address = Register;

    fn read(&mut self, register: Register) -> Result<u16, ChannelError> {
        self.select(register.device)?;

        match register.width {
            Width::Byte => self.bus.read_byte_data(register.offset).map(u16::from),
            Width::Word => self.bus.read_word_data(register.offset),
        }
    }

    fn write(&mut self, register: Register, value: u16) -> Result<(), ChannelError> {
        self.select(register.device)?;

        match register.width {
            Width::Byte => {
                let byte = u8::try_from(value).map_err(|_| ChannelError::ValueOutOfRange(value))?;
                self.bus.write_byte_data(register.offset, byte)
            }
            Width::Word => self.bus.write_word_data(register.offset, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;

    /// Mock adaptor recording select calls
    #[derive(Default)]
    struct MockBus {
        current: Option<u8>,
        selects: Vec<u8>,
        registers: HashMap<(u8, u8), u8>,
        fail_select: bool,
    }

    impl MockBus {
        fn device(&self) -> Result<u8, ChannelError> {
            self.current
                .ok_or_else(|| ChannelError::Transfer(io::Error::other("no device selected")))
        }
    }

    impl SmbusBus for MockBus {
        fn select(&mut self, address: u8) -> Result<(), ChannelError> {
            if self.fail_select {
                return Err(ChannelError::SelectAddress {
                    address,
                    source: io::Error::other("busy"),
                });
            }
            self.selects.push(address);
            self.current = Some(address);
            Ok(())
        }

        fn read_byte_data(&mut self, command: u8) -> Result<u8, ChannelError> {
            let device = self.device()?;
            Ok(self.registers.get(&(device, command)).copied().unwrap_or(0))
        }

        fn read_word_data(&mut self, command: u8) -> Result<u16, ChannelError> {
            let low = self.read_byte_data(command)?;
            let high = self.read_byte_data(command.wrapping_add(1))?;
            Ok(u16::from_le_bytes([low, high]))
        }

        fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), ChannelError> {
            let device = self.device()?;
            self.registers.insert((device, command), value);
            Ok(())
        }

        fn write_word_data(&mut self, command: u8, value: u16) -> Result<(), ChannelError> {
            let [low, high] = value.to_le_bytes();
            self.write_byte_data(command, low)?;
            self.write_byte_data(command.wrapping_add(1), high)
        }
    }

    #[test]
    fn test_select_only_on_address_change() {
        let mut channel = I2cChannel::new(MockBus::default());

        channel.read(Register::byte(0x69, 0x00)).unwrap();
        channel.read(Register::byte(0x69, 0x0c)).unwrap();
        channel.read(Register::byte(0x6b, 0x00)).unwrap();
        channel.read(Register::byte(0x6b, 0x00)).unwrap();
        channel.read(Register::byte(0x69, 0x0d)).unwrap();

        assert_eq!(channel.bus().selects, vec![0x69, 0x6b, 0x69]);
        assert_eq!(channel.selected(), Some(0x69));
    }

    #[test]
    fn test_word_read_is_little_endian() {
        let mut bus = MockBus::default();
        bus.registers.insert((0x69, 0x01), 0x0a);
        bus.registers.insert((0x69, 0x02), 0x05);
        let mut channel = I2cChannel::new(bus);

        assert_eq!(channel.read(Register::word(0x69, 0x01)).unwrap(), 0x050a);
    }

    #[test]
    fn test_select_failure_is_per_access() {
        let bus = MockBus {
            fail_select: true,
            ..Default::default()
        };
        let mut channel = I2cChannel::new(bus);

        let err = channel.read(Register::byte(0x69, 0x09)).unwrap_err();
        assert_eq!(err.code(), -1);
        assert_eq!(channel.selected(), None);

        // Nothing was cached, so the next access selects again
        let err = channel.write(Register::byte(0x69, 0x09), 0).unwrap_err();
        assert!(matches!(err, ChannelError::SelectAddress { address: 0x69, .. }));
    }

    #[test]
    fn test_byte_write_range() {
        let mut channel = I2cChannel::new(MockBus::default());

        assert!(channel.write(Register::byte(0x69, 0x09), 0xff).is_ok());
        assert!(matches!(
            channel.write(Register::byte(0x69, 0x09), 0x100),
            Err(ChannelError::ValueOutOfRange(0x100))
        ));
    }

    #[test]
    fn test_invalid_device_address() {
        let mut channel = I2cChannel::new(MockBus::default());

        assert!(matches!(
            channel.read(Register::byte(0x80, 0x00)),
            Err(ChannelError::InvalidAddress(0x80))
        ));
        assert!(channel.bus().selects.is_empty());
    }
}
