//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and side effects that are not register accesses.

pub mod shutdown;

pub use shutdown::ShutdownAction;
