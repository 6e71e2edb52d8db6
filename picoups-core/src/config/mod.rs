//! Configuration types
//!
//! There is no configuration file: every value has a compiled-in default
//! that the daemons' command lines may override.

pub mod timing;

pub use timing::*;
