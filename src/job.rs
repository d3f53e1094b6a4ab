//! # Print Jobs
//!
//! Emits the complete command sequence for printing one image as one label:
//!
//! ```text
//! 00 × n                 invalidate
//! 1B 40                  initialize
//! 1B 69 61 01            switch to raster mode
//! 1B 69 7A ...           print information
//! 1B 69 4D m             various mode (auto cut, mirror)
//! 1B 69 4B m             advanced mode (chain, no cut)
//! 1B 69 64 nL nH         feed margin
//! 4D 00                  no compression
//! 67 nL nH ... × width   raster lines
//! 1A                     print with feeding
//! ```

use std::io::Write;

use crate::error::Result;
use crate::media::{Media, MediaRegistry, MediaType, MediaWidth};
use crate::printer::ModelCode;
use crate::protocol::commands::{self, MAX_MEDIA_DIMENSION};
use crate::protocol::{
    AdvancedMode, CommandBuilder, CompressionMode, DynamicCommandMode, PrintInformation,
    PrintInformationFlags, VariousMode,
};
use crate::raster::{RasterEncodeConfig, RasterEncoder, RasterImage};

/// Zero bytes sent ahead of a job to flush a half-received command.
pub const DEFAULT_INVALIDATE_BYTES: usize = 100;

/// Feed margin in dots (2mm at 180 DPI, the printer minimum).
pub const DEFAULT_MARGIN_DOTS: u32 = 14;

/// Layout and finishing options for a [`PrintJob`].
#[derive(Debug, Clone, PartialEq)]
pub struct JobOptions {
    pub model: ModelCode,
    pub media_type: MediaType,
    pub media_width: MediaWidth,
    pub auto_cut: bool,
    pub mirror: bool,
    /// Skip the feed and cut after the last label
    pub chain: bool,
    /// Feed margin before and after the label, in dots
    pub margin_dots: u32,
    pub invalidate_bytes: usize,
    /// Extra unprinted band on the left of the head, in millimetres
    pub margin_left_mm: f32,
    /// Extra unprinted band on the right of the head, in millimetres
    pub margin_right_mm: f32,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            model: ModelCode::default(),
            media_type: MediaType::LAMINATED_TAPE,
            media_width: MediaWidth::W24,
            auto_cut: true,
            mirror: false,
            chain: false,
            margin_dots: DEFAULT_MARGIN_DOTS,
            invalidate_bytes: DEFAULT_INVALIDATE_BYTES,
            margin_left_mm: 0.0,
            margin_right_mm: 0.0,
        }
    }
}

impl JobOptions {
    fn various_mode(&self) -> VariousMode {
        let mut mode = VariousMode::NONE;
        if self.auto_cut {
            mode |= VariousMode::AUTO_CUT;
        }
        if self.mirror {
            mode |= VariousMode::MIRROR_PRINTING;
        }
        mode
    }

    fn advanced_mode(&self) -> AdvancedMode {
        if self.chain {
            AdvancedMode::CHAIN_PRINTING
        } else {
            AdvancedMode::NO_CHAIN_PRINTING
        }
    }
}

/// One image printed as one label.
#[derive(Debug)]
pub struct PrintJob<'a, I: RasterImage + ?Sized> {
    encoder: RasterEncoder<'a, I>,
    options: JobOptions,
}

impl<'a, I: RasterImage + ?Sized> PrintJob<'a, I> {
    /// Prepare a job for `image` on `media`, geometry resolved through
    /// `registry`.
    pub fn new(image: &'a I, media: Media, options: JobOptions, registry: &MediaRegistry) -> Self {
        let config = RasterEncodeConfig::from_registry(options.model, media, registry);
        let mut encoder = RasterEncoder::new(image, Some(&config));
        encoder.set_margin(options.margin_left_mm, options.margin_right_mm);
        Self { encoder, options }
    }

    /// Print information for this job. Tape is continuous, so only the
    /// type and width fields are flagged valid; the length carries the
    /// label length in millimetres for validation.
    pub fn print_information(&self) -> PrintInformation {
        let dpi = self.options.model.dpi();
        let length_mm = dpi
            .dots_to_millimetre(self.encoder.raster_number())
            .ceil()
            .clamp(1.0, MAX_MEDIA_DIMENSION as f32) as u32;
        PrintInformation {
            flags: PrintInformationFlags::KIND | PrintInformationFlags::WIDTH,
            media_type: self.options.media_type,
            media_width: self.options.media_width,
            media_length: length_mm,
            raster_number: u64::from(self.encoder.raster_number()),
            not_starting_page: false,
        }
    }

    /// Write the whole job and flush.
    ///
    /// Parameters are validated before the first byte goes out, so a
    /// rejected job leaves the writer untouched.
    pub fn write_to<W: Write>(&mut self, mut writer: W) -> Result<()> {
        let info = self.print_information();
        commands::print_information(&info)?;
        commands::specify_margin_amount(self.options.margin_dots)?;
        tracing::info!(
            model = %self.options.model,
            media_type = %self.options.media_type,
            media_width = %self.options.media_width,
            lines = info.raster_number,
            "Starting print job"
        );

        let mut cb = CommandBuilder::new(&mut writer);
        cb.invalidate(self.options.invalidate_bytes)?;
        cb.initialize()?;
        cb.switch_dynamic_command_mode(DynamicCommandMode::Raster)?;
        cb.print_information(&info)?;
        cb.various_mode_settings(self.options.various_mode())?;
        cb.advanced_mode_settings(self.options.advanced_mode())?;
        cb.specify_margin_amount(self.options.margin_dots)?;
        cb.select_compression_mode(CompressionMode::None)?;

        self.encoder.transfer(&mut writer)?;

        CommandBuilder::new(&mut writer).print_with_feeding()?;
        writer.flush()?;

        tracing::info!(lines = info.raster_number, "Print job sent");
        Ok(())
    }
}
