//! # Command Builder
//!
//! Writes commands to a transport one at a time. Every method validates
//! through the matching builder in [`commands`](super::commands) first, so a
//! rejected command never puts a byte on the wire.
//!
//! ```
//! use ptraster::protocol::{CommandBuilder, DynamicCommandMode};
//!
//! let mut out = Vec::new();
//! let mut cb = CommandBuilder::new(&mut out);
//! cb.invalidate(4)?;
//! cb.initialize()?;
//! cb.switch_dynamic_command_mode(DynamicCommandMode::Raster)?;
//! assert_eq!(out, vec![0, 0, 0, 0, 0x1B, 0x40, 0x1B, 0x69, 0x61, 0x01]);
//! # Ok::<(), ptraster::PtrasterError>(())
//! ```

use std::io::Write;

use super::commands::{
    self, AdvancedMode, CompressionMode, DynamicCommandMode, INVALIDATE, PrintInformation,
    VariousMode,
};
use crate::error::Result;

/// Serializes commands onto a writer.
///
/// The builder holds no bytes between calls. Pass `&mut writer` to keep
/// using the writer afterwards.
#[derive(Debug)]
pub struct CommandBuilder<W: Write> {
    writer: W,
}

impl<W: Write> CommandBuilder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn cmd(&mut self, name: &'static str, bytes: &[u8]) -> Result<()> {
        tracing::trace!(command = name, len = bytes.len(), "Writing command");
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Send `repeat` zero bytes, one write per byte.
    ///
    /// To abort a transfer midway, invalidate enough bytes to flush the
    /// receiver and then [`initialize`](Self::initialize).
    pub fn invalidate(&mut self, repeat: usize) -> Result<()> {
        tracing::trace!(command = "invalidate", len = repeat, "Writing command");
        for _ in 0..repeat {
            self.writer.write_all(&[INVALIDATE])?;
        }
        Ok(())
    }

    /// Reset mode settings. Also cancels printing.
    pub fn initialize(&mut self) -> Result<()> {
        self.cmd("initialize", &commands::initialize())
    }

    /// Request a status packet. The caller reads the 32-byte reply.
    pub fn status_information_request(&mut self) -> Result<()> {
        self.cmd(
            "status_information_request",
            &commands::status_information_request(),
        )
    }

    /// Switch command mode. Raster transfers require
    /// [`DynamicCommandMode::Raster`]; that ordering is up to the caller.
    pub fn switch_dynamic_command_mode(&mut self, mode: DynamicCommandMode) -> Result<()> {
        self.cmd(
            "switch_dynamic_command_mode",
            &commands::switch_dynamic_command_mode(mode),
        )
    }

    pub fn print_information(&mut self, params: &PrintInformation) -> Result<()> {
        let bytes = commands::print_information(params)?;
        self.cmd("print_information", &bytes)
    }

    pub fn various_mode_settings(&mut self, mode: VariousMode) -> Result<()> {
        self.cmd("various_mode_settings", &commands::various_mode_settings(mode))
    }

    pub fn advanced_mode_settings(&mut self, mode: AdvancedMode) -> Result<()> {
        self.cmd(
            "advanced_mode_settings",
            &commands::advanced_mode_settings(mode),
        )
    }

    pub fn specify_margin_amount(&mut self, dots: u32) -> Result<()> {
        let bytes = commands::specify_margin_amount(dots)?;
        self.cmd("specify_margin_amount", &bytes)
    }

    pub fn select_compression_mode(&mut self, mode: CompressionMode) -> Result<()> {
        self.cmd(
            "select_compression_mode",
            &commands::select_compression_mode(mode),
        )
    }

    /// Transfer one raster line.
    pub fn raster_graphics_transfer(&mut self, data: &[u8]) -> Result<()> {
        let bytes = commands::raster_graphics_transfer(data)?;
        self.cmd("raster_graphics_transfer", &bytes)
    }

    pub fn zero_raster_graphics(&mut self) -> Result<()> {
        self.cmd("zero_raster_graphics", &commands::zero_raster_graphics())
    }

    /// End a page that is not the last one.
    pub fn print(&mut self) -> Result<()> {
        self.cmd("print", &commands::print())
    }

    /// End the last page.
    pub fn print_with_feeding(&mut self) -> Result<()> {
        self.cmd("print_with_feeding", &commands::print_with_feeding())
    }
}
