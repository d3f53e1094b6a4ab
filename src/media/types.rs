//! Media codes carried in the status reply (bytes 10 and 11) and in the
//! print information command.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Media type byte.
///
/// Any byte read from the wire is representable; only the values accepted
/// by [`MediaType::is_valid`] may be sent in a print information command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaType(pub u8);

impl MediaType {
    /// No media installed
    pub const NO_MEDIA: Self = Self(0x00);
    /// Laminated TZe tape
    pub const LAMINATED_TAPE: Self = Self(0x01);
    /// Non-laminated TZe tape
    pub const NON_LAMINATED_TAPE: Self = Self(0x03);
    /// Heat-shrink tube
    pub const HEAT_SHRINK_TUBE: Self = Self(0x11);
    /// Tape the printer cannot use
    pub const INCOMPATIBLE_TAPE: Self = Self(0xFF);

    /// Whether this type may be embedded in a print information command.
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(
            self,
            Self::LAMINATED_TAPE | Self::NON_LAMINATED_TAPE | Self::HEAT_SHRINK_TUBE
        )
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::NO_MEDIA => "No media",
            Self::LAMINATED_TAPE => "Laminated tape",
            Self::NON_LAMINATED_TAPE => "Non-laminated tape",
            Self::HEAT_SHRINK_TUBE => "Heat-Shrink Tube",
            Self::INCOMPATIBLE_TAPE => "Incompatible tape",
            _ => return write!(f, "Unknown (0x{:02X})", self.0),
        };
        f.write_str(name)
    }
}

/// Media width in millimetres, as the printer encodes it.
///
/// 3.5mm tape is reported as 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaWidth(pub u16);

impl MediaWidth {
    pub const NO_TAPE: Self = Self(0);
    pub const W3_5: Self = Self(4);
    pub const W6: Self = Self(6);
    pub const W9: Self = Self(9);
    pub const W12: Self = Self(12);
    pub const W18: Self = Self(18);
    pub const W24: Self = Self(24);
}

impl fmt::Display for MediaWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::NO_TAPE => "No tape",
            Self::W3_5 => "3.5mm",
            Self::W6 => "6mm",
            Self::W9 => "9mm",
            Self::W12 => "12mm",
            Self::W18 => "18mm",
            Self::W24 => "24mm",
            _ => "Unknown",
        };
        f.write_str(name)
    }
}
