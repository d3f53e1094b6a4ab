//! # Printer Module
//!
//! Printer-specific hardware characteristics.
//!
//! ## Modules
//!
//! - [`model`]: Model codes and head geometry
//! - [`unit`]: Millimetre/dot conversion

pub mod model;
pub mod unit;

pub use model::ModelCode;
pub use unit::Dpi;
