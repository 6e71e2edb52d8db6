//! Board-agnostic core logic for the PIco UPS daemons
//!
//! This crate contains all daemon logic that does not depend on the Linux
//! device interfaces:
//!
//! - Pulse/watch state machine (host-alive pulse train, FSSD shutdown edge)
//! - Telemetry register map and fixed-point decoding
//! - Button debounce and edge reporting
//! - Timing configuration
//! - Hardware abstraction traits not covered by `picoups-hal`

#![deny(unsafe_code)]

pub mod buttons;
pub mod config;
pub mod telemetry;
pub mod traits;
pub mod watch;
