//! # P-touch Raster Protocol
//!
//! Low-level command encoding and status decoding for Brother P-touch tape
//! printers in raster mode.
//!
//! ## Module Structure
//!
//! - [`commands`]: Pure byte builders and mode parameter types
//! - [`builder`]: [`CommandBuilder`], writes commands to a transport
//! - [`status`]: 32-byte status packet decoding
//!
//! ## Usage Example
//!
//! ```
//! use ptraster::protocol::{
//!     AdvancedMode, CommandBuilder, CompressionMode, DynamicCommandMode, VariousMode,
//! };
//!
//! let mut data = Vec::new();
//! let mut cb = CommandBuilder::new(&mut data);
//!
//! cb.invalidate(100)?;
//! cb.initialize()?;
//! cb.switch_dynamic_command_mode(DynamicCommandMode::Raster)?;
//! cb.various_mode_settings(VariousMode::AUTO_CUT)?;
//! cb.advanced_mode_settings(AdvancedMode::NO_CHAIN_PRINTING)?;
//! cb.specify_margin_amount(14)?;
//! cb.select_compression_mode(CompressionMode::None)?;
//! cb.raster_graphics_transfer(&[0xFF; 16])?;
//! cb.print_with_feeding()?;
//!
//! assert_eq!(data.last(), Some(&0x1A));
//! # Ok::<(), ptraster::PtrasterError>(())
//! ```
//!
//! ## Protocol Reference
//!
//! Based on the Brother "Raster Command Reference" for PT-E500/PT-P700/PT-H500.

pub mod builder;
pub mod commands;
pub mod status;

pub use builder::CommandBuilder;
pub use commands::{
    AdvancedMode, CompressionMode, DynamicCommandMode, PrintInformation, PrintInformationFlags,
    VariousMode,
};
pub use status::{
    ErrorInformation, NotificationNumber, StatusInformation, StatusType, query_status_information,
    read_status_information,
};
