//! # Unit Conversion
//!
//! Millimetre ⇄ dot conversion for a given print head resolution.
//!
//! ```text
//! dots = mm / 25.4 × dpi      (truncated toward zero)
//! mm   = dots / dpi × 25.4
//!
//! At 180 DPI:
//!   18.06mm → 128 dots (full PT-P700 head)
//!   1mm     → 7 dots
//! ```

/// Millimetres per inch
pub const MILLIMETRE_PER_INCH: f32 = 25.4;

/// Print head resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dpi(pub f32);

impl Dpi {
    /// Convert millimetres to whole dots, truncating toward zero.
    ///
    /// Negative inputs yield 0.
    ///
    /// ## Example
    ///
    /// ```
    /// use ptraster::printer::Dpi;
    ///
    /// assert_eq!(Dpi(180.0).millimetre_to_dots(25.4), 180);
    /// assert_eq!(Dpi(180.0).millimetre_to_dots(1.0), 7);
    /// ```
    #[inline]
    pub fn millimetre_to_dots(self, mm: f32) -> u32 {
        (mm / MILLIMETRE_PER_INCH * self.0) as u32
    }

    /// Convert dots to millimetres.
    #[inline]
    pub fn dots_to_millimetre(self, dots: u32) -> f32 {
        dots as f32 / self.0 * MILLIMETRE_PER_INCH
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Dpi(180.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_inch() {
        assert_eq!(Dpi(180.0).millimetre_to_dots(25.4), 180);
        assert_eq!(Dpi(360.0).millimetre_to_dots(25.4), 360);
    }

    #[test]
    fn test_truncates() {
        // 4.1mm at 180 DPI = 29.05 dots
        assert_eq!(Dpi(180.0).millimetre_to_dots(4.1), 29);
        assert_eq!(Dpi(180.0).millimetre_to_dots(0.1), 0);
    }

    #[test]
    fn test_negative_saturates() {
        assert_eq!(Dpi(180.0).millimetre_to_dots(-3.0), 0);
    }

    #[test]
    fn test_dots_to_millimetre() {
        let mm = Dpi(180.0).dots_to_millimetre(180);
        assert!((mm - 25.4).abs() < 1e-4);
    }
}
