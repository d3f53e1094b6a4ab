//! # Printer Transport Layer
//!
//! The codec only needs `Write` (and `Read` for status queries); any duplex
//! stream works. This module provides the character-device backend used by
//! the CLI.
//!
//! - [`device`]: USB printer class and RFCOMM tty devices (Linux)

pub mod device;

pub use device::DeviceTransport;
