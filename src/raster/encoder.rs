//! # Raster Encoder
//!
//! Turns image columns into bit-packed raster lines that span the full
//! print head.
//!
//! ## Line Layout
//!
//! One raster line covers `total_dots` dots, packed MSB first:
//!
//! ```text
//! dot:   0 1 2 3 4 5 6 7 | 8 9 ...
//! byte:  [    byte 0     ] [ byte 1 ...
//! bit:   7 6 5 4 3 2 1 0 | 7 6 ...
//! ```
//!
//! Dots outside the printable window `[pmin, pmax)` are always 0:
//!
//! ```text
//! pmin = page_margin + user_left_margin
//! pmax = total_dots - (page_margin + user_right_margin)
//!
//! ├─ pmin ─┼──── image rows 0.. ────┼─ total - pmax ─┤
//! ```
//!
//! A dot is set when the sampled luminance is above 127.

use std::io::Write;

use super::image::RasterImage;
use crate::error::Result;
use crate::media::{Media, MediaInfo, MediaRegistry};
use crate::printer::{Dpi, ModelCode};
use crate::protocol::CommandBuilder;

/// Luminance above which a dot is printed.
pub const LUMINANCE_THRESHOLD: u8 = 127;

/// Device geometry for a [`RasterEncoder`].
#[derive(Debug, Clone, Default)]
pub struct RasterEncodeConfig {
    pub model: ModelCode,
    /// Media geometry; `None` means no page margin.
    pub media_info: Option<MediaInfo>,
}

impl RasterEncodeConfig {
    pub fn new(model: ModelCode, media_info: Option<MediaInfo>) -> Self {
        Self { model, media_info }
    }

    /// Resolve `media` geometry through `registry`. Unknown media yields
    /// the zero-geometry sentinel.
    pub fn from_registry(model: ModelCode, media: Media, registry: &MediaRegistry) -> Self {
        Self {
            model,
            media_info: Some(registry.info(media)),
        }
    }
}

/// Encodes an image one column at a time.
///
/// The image is borrowed for the encoder's lifetime. Every encode call
/// overwrites the same scratch buffer.
///
/// ## Example
///
/// ```
/// use image::{GrayImage, Luma};
/// use ptraster::media::{Media, MediaRegistry};
/// use ptraster::printer::ModelCode;
/// use ptraster::raster::{RasterEncodeConfig, RasterEncoder};
///
/// let img = GrayImage::from_pixel(10, 70, Luma([255]));
/// let registry = MediaRegistry::new();
/// let config = RasterEncodeConfig::from_registry(ModelCode::PT_P700, Media::TZE_TAPE_12, &registry);
/// let mut encoder = RasterEncoder::new(&img, Some(&config));
///
/// let line = encoder.encode_column(0);
/// assert_eq!(line.len(), 16);
/// // 12mm tape leaves 29 dots unprinted on each side of the head
/// assert_eq!(line[0], 0x00);
/// assert_eq!(line[3], 0b0000_0111);
/// ```
#[derive(Debug)]
pub struct RasterEncoder<'a, I: RasterImage + ?Sized> {
    image: &'a I,
    width: u32,
    height: u32,
    /// Columns not yet handed out by [`next_line`](Self::next_line)
    line: u32,
    dots: u32,
    buffer: Vec<u8>,

    dpi: Dpi,
    margin_left_dots: u32,
    margin_right_dots: u32,
    user_margin_left_dots: u32,
    user_margin_right_dots: u32,
}

impl<'a, I: RasterImage + ?Sized> RasterEncoder<'a, I> {
    /// Create an encoder over `image`.
    ///
    /// Without a config the line spans the image height at 180 DPI with no
    /// margins.
    pub fn new(image: &'a I, config: Option<&RasterEncodeConfig>) -> Self {
        let (width, height) = image.dimensions();
        let mut dots = height;
        let mut dpi = Dpi::default();
        let mut margin = 0;

        if let Some(config) = config {
            dots = config.model.total_dots();
            dpi = config.model.dpi();
            if let Some(info) = &config.media_info {
                margin = dpi.millimetre_to_dots(info.page_margin_mm);
            }
        }

        tracing::debug!(width, height, dots, margin, "Created raster encoder");

        Self {
            image,
            width,
            height,
            line: width,
            dots,
            buffer: vec![0; dots.div_ceil(8) as usize],
            dpi,
            margin_left_dots: margin,
            margin_right_dots: margin,
            user_margin_left_dots: 0,
            user_margin_right_dots: 0,
        }
    }

    /// Extra margins in millimetres, added to the media page margin.
    pub fn set_margin(&mut self, left_mm: f32, right_mm: f32) {
        self.user_margin_left_dots = self.dpi.millimetre_to_dots(left_mm);
        self.user_margin_right_dots = self.dpi.millimetre_to_dots(right_mm);
    }

    /// Dots per raster line.
    #[inline]
    pub fn total_dots(&self) -> u32 {
        self.dots
    }

    /// Bytes per raster line, `ceil(total_dots / 8)`.
    #[inline]
    pub fn line_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Number of raster lines the image produces (one per column).
    #[inline]
    pub fn raster_number(&self) -> u32 {
        self.width
    }

    /// Columns remaining for [`next_line`](Self::next_line).
    #[inline]
    pub fn lines(&self) -> u32 {
        self.line
    }

    /// Printable dot window `[pmin, pmax)`. Empty when margins overlap.
    pub fn printable_window(&self) -> (u32, u32) {
        let pmin = self.margin_left_dots.saturating_add(self.user_margin_left_dots);
        let pmax = self
            .dots
            .saturating_sub(self.margin_right_dots.saturating_add(self.user_margin_right_dots));
        (pmin, pmax)
    }

    /// Advance to the next column, from the last column toward the first.
    /// Returns `false` once every column has been handed out.
    pub fn next_line(&mut self) -> bool {
        if self.line > 0 {
            self.line -= 1;
            true
        } else {
            false
        }
    }

    /// Encode the column selected by the last [`next_line`](Self::next_line).
    pub fn encode_line(&mut self) -> &[u8] {
        self.encode_column(self.line)
    }

    /// Encode column `x`. Columns outside the image give a blank line.
    ///
    /// The returned slice is overwritten by the next encode call.
    pub fn encode_column(&mut self, x: u32) -> &[u8] {
        self.buffer.fill(0);
        if x >= self.width {
            return &self.buffer;
        }

        let (pmin, pmax) = self.printable_window();
        for i in pmin..pmax.min(self.dots) {
            let y = i - pmin;
            if y >= self.height {
                break;
            }
            if self.image.luminance(x, y) > LUMINANCE_THRESHOLD {
                self.buffer[(i / 8) as usize] |= 0x80 >> (i % 8);
            }
        }
        &self.buffer
    }

    /// Send every column, first to last, as raster graphics transfers.
    ///
    /// Stops at the first error. The printer is then mid-page and should be
    /// re-initialized before retrying.
    pub fn transfer<W: Write>(&mut self, writer: W) -> Result<()> {
        let mut cb = CommandBuilder::new(writer);
        tracing::debug!(lines = self.width, bytes = self.buffer.len(), "Transferring raster");
        for x in 0..self.width {
            let line = self.encode_column(x);
            cb.raster_graphics_transfer(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::RASTER_GRAPHICS_TRANSFER;
    use image::{GrayImage, Luma};
    use std::io;

    fn white(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([255]))
    }

    fn p700(page_margin_mm: f32) -> RasterEncodeConfig {
        RasterEncodeConfig::new(
            ModelCode::PT_P700,
            Some(MediaInfo {
                page_margin_mm,
                ..MediaInfo::unknown()
            }),
        )
    }

    #[test]
    fn test_no_config_uses_image_height() {
        let img = white(3, 12);
        let mut encoder = RasterEncoder::new(&img, None);
        assert_eq!(encoder.total_dots(), 12);
        assert_eq!(encoder.line_bytes(), 2);
        assert_eq!(encoder.encode_column(0), &[0xFF, 0xF0]);
    }

    #[test]
    fn test_msb_first() {
        let mut img = GrayImage::new(1, 8);
        img.put_pixel(0, 0, Luma([255]));
        img.put_pixel(0, 7, Luma([200]));
        let mut encoder = RasterEncoder::new(&img, None);
        assert_eq!(encoder.encode_column(0), &[0b1000_0001]);
    }

    #[test]
    fn test_threshold() {
        let mut img = GrayImage::new(1, 8);
        img.put_pixel(0, 0, Luma([127]));
        img.put_pixel(0, 1, Luma([128]));
        let mut encoder = RasterEncoder::new(&img, None);
        assert_eq!(encoder.encode_column(0), &[0b0100_0000]);
    }

    #[test]
    fn test_out_of_bounds_column_is_blank() {
        let img = white(2, 16);
        let mut encoder = RasterEncoder::new(&img, None);
        assert_eq!(encoder.encode_column(2), &[0, 0]);
        assert_eq!(encoder.encode_column(u32::MAX), &[0, 0]);
    }

    #[test]
    fn test_page_margin_from_media() {
        let img = white(1, 128);
        let config = p700(4.10);
        let mut encoder = RasterEncoder::new(&img, Some(&config));
        assert_eq!(encoder.printable_window(), (29, 99));
        let line = encoder.encode_column(0).to_vec();
        assert_eq!(line.len(), 16);
        // dots 0..29 off, 29..99 on, 99..128 off
        assert_eq!(&line[..3], &[0, 0, 0]);
        assert_eq!(line[3], 0b0000_0111);
        assert_eq!(&line[4..12], &[0xFF; 8]);
        assert_eq!(line[12], 0b1110_0000);
        assert_eq!(&line[13..], &[0, 0, 0]);
    }

    #[test]
    fn test_user_margins_add_to_page_margin() {
        let img = white(1, 128);
        let config = p700(4.10);
        let mut encoder = RasterEncoder::new(&img, Some(&config));
        // 1mm = 7 dots at 180 DPI
        encoder.set_margin(1.0, 2.0);
        assert_eq!(encoder.printable_window(), (36, 85));
    }

    #[test]
    fn test_image_shorter_than_window() {
        let img = white(1, 4);
        let config = RasterEncodeConfig::new(ModelCode::PT_P700, None);
        let mut encoder = RasterEncoder::new(&img, Some(&config));
        let line = encoder.encode_column(0);
        assert_eq!(line[0], 0xF0);
        assert!(line[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_overlapping_margins_blank() {
        let img = white(1, 128);
        let config = p700(4.10);
        let mut encoder = RasterEncoder::new(&img, Some(&config));
        encoder.set_margin(20.0, 20.0);
        assert!(encoder.encode_column(0).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_huge_margins_saturate_to_blank() {
        let img = white(1, 128);
        let config = p700(4.10);
        let mut encoder = RasterEncoder::new(&img, Some(&config));
        encoder.set_margin(1.0e12, 0.0);
        assert_eq!(encoder.printable_window().0, u32::MAX);
        assert!(encoder.encode_column(0).iter().all(|&b| b == 0));

        encoder.set_margin(0.0, 1.0e12);
        assert_eq!(encoder.printable_window().1, 0);
        assert!(encoder.encode_column(0).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_unknown_media_has_no_margin() {
        let img = white(1, 128);
        let registry = MediaRegistry::new();
        let config = RasterEncodeConfig::from_registry(ModelCode::PT_P700, Media(9999), &registry);
        let mut encoder = RasterEncoder::new(&img, Some(&config));
        assert_eq!(encoder.printable_window(), (0, 128));
        assert!(encoder.encode_column(0).iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_next_counts_down() {
        let img = white(3, 8);
        let mut encoder = RasterEncoder::new(&img, None);
        let mut columns = Vec::new();
        while encoder.next_line() {
            columns.push(encoder.lines());
        }
        assert_eq!(columns, vec![2, 1, 0]);
        assert!(!encoder.next_line());
        assert!(!encoder.next_line());
    }

    #[test]
    fn test_encode_line_follows_cursor() {
        let mut img = GrayImage::new(2, 8);
        img.put_pixel(1, 0, Luma([255]));
        let mut encoder = RasterEncoder::new(&img, None);
        assert!(encoder.next_line());
        assert_eq!(encoder.encode_line(), &[0x80]);
        assert!(encoder.next_line());
        assert_eq!(encoder.encode_line(), &[0x00]);
    }

    #[test]
    fn test_transfer_order_and_framing() {
        let mut img = GrayImage::new(2, 8);
        img.put_pixel(0, 0, Luma([255]));
        img.put_pixel(1, 7, Luma([255]));
        let mut encoder = RasterEncoder::new(&img, None);
        let mut out = Vec::new();
        encoder.transfer(&mut out).unwrap();
        let g = RASTER_GRAPHICS_TRANSFER[0];
        assert_eq!(out, vec![g, 1, 0, 0x80, g, 1, 0, 0x01]);
    }

    struct FailAfter(usize);

    impl io::Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.0 == 0 {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "stalled"));
            }
            self.0 -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_transfer_stops_at_first_error() {
        let img = white(10, 8);
        let mut encoder = RasterEncoder::new(&img, None);
        let mut writer = FailAfter(3);
        assert!(encoder.transfer(&mut writer).is_err());
        assert_eq!(writer.0, 0);
    }
}
