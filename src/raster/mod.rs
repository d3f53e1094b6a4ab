//! # Raster Encoding
//!
//! - [`image`]: [`RasterImage`] pixel access trait
//! - [`encoder`]: [`RasterEncoder`], column to raster line conversion

pub mod encoder;
pub mod image;

pub use self::encoder::{LUMINANCE_THRESHOLD, RasterEncodeConfig, RasterEncoder};
pub use self::image::RasterImage;
