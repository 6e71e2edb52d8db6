//! UPS telemetry
//!
//! Register map of the UPS PIco, decoding of its fixed-point voltage
//! registers, and the line-oriented text format used for status output.

pub mod fixed;
pub mod registers;
pub mod snapshot;

pub use fixed::{decode_fixed, decode_fixed_bytes};
pub use snapshot::{Metric, Reading, Snapshot};
