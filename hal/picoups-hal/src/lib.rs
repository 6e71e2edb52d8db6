//! PIco UPS Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits shared by the two
//! PIco UPS daemons. The state machines in `picoups-core` only ever talk to
//! these traits, so the same logic runs against the Linux drivers and against
//! in-memory fakes in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Daemons (picod, pico-i2cd)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picoups-core (state machines, decode)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picoups-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picoups-hal-linux (sysfs, i2c-dev,     │
//! │  uinput)                                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`channel::RegisterChannel`] - Addressed register read/write
//! - [`gpio::GpioChannel`] - Level helpers for GPIO register channels
//! - [`i2c::SmbusBus`] - SMBus register transfers on one adaptor
//! - [`input::InputSink`] - Synthesized key and barrier events

#![deny(unsafe_code)]

pub mod channel;
pub mod gpio;
pub mod i2c;
pub mod input;
pub mod retry;

// Re-export key traits at crate root for convenience
pub use channel::{ChannelError, RegisterChannel};
pub use gpio::{Direction, GpioChannel, Level, Pin};
pub use i2c::{I2cChannel, Register, SmbusBus, Width};
pub use input::{DeviceIdentity, InputError, InputSink, KeyAction, KeyCode};
pub use retry::{retry_with_backoff, MAX_RETRIES};
