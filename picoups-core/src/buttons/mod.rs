//! UPS buttons as an input device
//!
//! The three buttons on the board latch a register each. [`KeyReporter`]
//! turns those latches into press/release events with one synchronization
//! barrier per batch.

pub mod keys;
pub mod reporter;

pub use keys::{input_device, key_codes, Key, INPUT_DEVICE_NAME, KEYS, KEY_COUNT};
pub use reporter::{KeyReporter, PollReport};
