//! Read-only pixel access for the raster encoder.

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel};

/// Minimal image capability: dimensions and 8-bit luminance sampling.
///
/// Coordinates passed to [`luminance`](RasterImage::luminance) are always
/// inside [`dimensions`](RasterImage::dimensions).
pub trait RasterImage {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Luminance at `(x, y)`, 0 = black, 255 = white.
    fn luminance(&self, x: u32, y: u32) -> u8;
}

impl<P, C> RasterImage for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: std::ops::Deref<Target = [u8]>,
{
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn luminance(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y).to_luma()[0]
    }
}

impl RasterImage for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn luminance(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y).to_luma()[0]
    }
}

impl<T: RasterImage + ?Sized> RasterImage for &T {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn luminance(&self, x: u32, y: u32) -> u8 {
        (**self).luminance(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_gray_luminance() {
        let mut img = GrayImage::new(2, 3);
        img.put_pixel(1, 2, Luma([200]));
        assert_eq!(RasterImage::dimensions(&img), (2, 3));
        assert_eq!(img.luminance(1, 2), 200);
        assert_eq!(img.luminance(0, 0), 0);
    }

    #[test]
    fn test_rgb_luminance() {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        assert_eq!(img.luminance(0, 0), 255);
        img.put_pixel(0, 0, Rgb([0, 0, 255]));
        assert!(img.luminance(0, 0) < 128);
    }

    #[test]
    fn test_dynamic_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 2, Luma([130])));
        assert_eq!(RasterImage::dimensions(&img), (4, 2));
        assert_eq!(img.luminance(3, 1), 130);
    }
}
