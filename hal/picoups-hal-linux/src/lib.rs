//! Linux HAL for the PIco UPS daemons
//!
//! This crate provides the Linux implementations of the `picoups-hal` traits:
//! - Sysfs GPIO register channel with export/direction setup
//! - i2c-dev SMBus transfers
//! - uinput synthesized key device
//! - Blocking delay, halt command and daemonization

pub mod daemon;
pub mod delay;
pub mod gpio;
pub mod halt;
pub mod i2c;
pub mod uinput;

pub use daemon::daemonize;
pub use delay::StdDelay;
pub use gpio::{SetupError, SysfsGpio, DEFAULT_GPIO_ROOT};
pub use halt::HaltCommand;
pub use i2c::{I2cDev, DEFAULT_ADAPTOR};
pub use uinput::{UinputDevice, DEFAULT_UINPUT};
