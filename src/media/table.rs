//! # Built-in Media Table
//!
//! Canonical media identifiers and their geometry.
//!
//! The page margin is the unprintable band on each side of the 128-dot head
//! for a given tape width. At 180 DPI:
//!
//! | Media | Print area | Page margin (each side) |
//! |-------|------------|-------------------------|
//! | TZe 3.5mm | 24 dots | 52 dots |
//! | TZe 6mm | 32 dots | 48 dots |
//! | TZe 9mm | 50 dots | 39 dots |
//! | TZe 12mm | 70 dots | 29 dots |
//! | TZe 18mm | 112 dots | 8 dots |
//! | TZe 24mm | 128 dots | 0 dots |
//! | HS 6mm | 28 dots | 50 dots |
//! | HS 9mm | 48 dots | 40 dots |
//! | HS 12mm | 66 dots | 31 dots |
//! | HS 18mm | 106 dots | 11 dots |
//! | HS 24mm | 128 dots | 0 dots |

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{MediaType, MediaWidth};

/// Canonical media identifier.
///
/// `Media::UNKNOWN` (0) is the default and the result of an unrecognized
/// type/width pair. Values outside the built-in set are free for custom
/// media registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Media(pub u16);

impl Media {
    pub const UNKNOWN: Self = Self(0);
    pub const TZE_TAPE_3_5: Self = Self(263);
    pub const TZE_TAPE_6: Self = Self(257);
    pub const TZE_TAPE_9: Self = Self(258);
    pub const TZE_TAPE_12: Self = Self(259);
    pub const TZE_TAPE_18: Self = Self(260);
    pub const TZE_TAPE_24: Self = Self(261);
    pub const HEAT_SHRINK_TUBE_6: Self = Self(415);
    pub const HEAT_SHRINK_TUBE_9: Self = Self(416);
    pub const HEAT_SHRINK_TUBE_12: Self = Self(417);
    pub const HEAT_SHRINK_TUBE_18: Self = Self(418);
    pub const HEAT_SHRINK_TUBE_24: Self = Self(419);

    /// Short CLI name for built-in media (`"tze12"`, `"hs24"`, ...).
    pub fn short_name(self) -> Option<&'static str> {
        BUILTIN
            .iter()
            .find(|entry| entry.media == self)
            .map(|entry| entry.short_name)
    }

    /// Media type and width codes a built-in media is sent as in a print
    /// information command. Tape reports as laminated.
    pub fn wire_codes(self) -> Option<(MediaType, MediaWidth)> {
        BUILTIN
            .iter()
            .find(|entry| entry.media == self)
            .map(|entry| (entry.media_type, entry.width))
    }

    /// Resolve a short CLI name or a numeric identifier.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        if let Some(entry) = BUILTIN.iter().find(|entry| entry.short_name == lower) {
            return Some(entry.media);
        }
        lower.parse::<u16>().ok().map(Self)
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short_name() {
            Some(name) => f.write_str(name),
            None if *self == Self::UNKNOWN => f.write_str("unknown"),
            None => write!(f, "custom-{}", self.0),
        }
    }
}

/// Recognize built-in media from a status reply's type and width.
///
/// Laminated and non-laminated tape share identifiers.
pub fn recognize_media(media_type: MediaType, width: MediaWidth) -> Media {
    match media_type {
        MediaType::LAMINATED_TAPE | MediaType::NON_LAMINATED_TAPE => match width {
            MediaWidth::W3_5 => Media::TZE_TAPE_3_5,
            MediaWidth::W6 => Media::TZE_TAPE_6,
            MediaWidth::W9 => Media::TZE_TAPE_9,
            MediaWidth::W12 => Media::TZE_TAPE_12,
            MediaWidth::W18 => Media::TZE_TAPE_18,
            MediaWidth::W24 => Media::TZE_TAPE_24,
            _ => Media::UNKNOWN,
        },
        MediaType::HEAT_SHRINK_TUBE => match width {
            MediaWidth::W6 => Media::HEAT_SHRINK_TUBE_6,
            MediaWidth::W9 => Media::HEAT_SHRINK_TUBE_9,
            MediaWidth::W12 => Media::HEAT_SHRINK_TUBE_12,
            MediaWidth::W18 => Media::HEAT_SHRINK_TUBE_18,
            MediaWidth::W24 => Media::HEAT_SHRINK_TUBE_24,
            _ => Media::UNKNOWN,
        },
        _ => Media::UNKNOWN,
    }
}

/// Physical geometry of a media, all lengths in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Human-readable name
    pub name: String,
    /// Nominal tape/tube width
    pub size_mm: f32,
    /// Printable width across the head
    pub print_area_mm: f32,
    /// Unprintable band on each side of the head
    pub page_margin_mm: f32,
    /// Smallest feed margin the printer accepts
    pub min_margin_mm: f32,
    /// Largest feed margin the printer accepts
    pub max_margin_mm: f32,
    /// Shortest printable label
    pub min_length_mm: f32,
    /// Longest printable label
    pub max_length_mm: f32,
}

impl MediaInfo {
    /// Sentinel returned for unregistered media. All geometry is zero.
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            size_mm: 0.0,
            print_area_mm: 0.0,
            page_margin_mm: 0.0,
            min_margin_mm: 0.0,
            max_margin_mm: 0.0,
            min_length_mm: 0.0,
            max_length_mm: 0.0,
        }
    }

    /// Whether this is the [`MediaInfo::unknown`] sentinel.
    pub fn is_unknown(&self) -> bool {
        *self == Self::unknown()
    }
}

impl Default for MediaInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

struct BuiltinMedia {
    media: Media,
    media_type: MediaType,
    width: MediaWidth,
    short_name: &'static str,
    name: &'static str,
    size_mm: f32,
    print_area_mm: f32,
    page_margin_mm: f32,
}

// Feed margin and length limits are shared by every built-in media.
const MIN_MARGIN_MM: f32 = 2.0;
const MAX_MARGIN_MM: f32 = 127.0;
const MIN_LENGTH_MM: f32 = 4.4;
const MAX_LENGTH_MM: f32 = 1000.0;

// Page margins sit a few hundredths above the dot boundary so that the
// truncating mm→dots conversion lands on the exact dot count at 180 DPI.
#[rustfmt::skip]
const BUILTIN: [BuiltinMedia; 11] = [
    BuiltinMedia { media: Media::TZE_TAPE_3_5, media_type: MediaType::LAMINATED_TAPE, width: MediaWidth::W3_5, short_name: "tze3.5", name: "3.5mm TZe tape", size_mm: 3.5, print_area_mm: 3.39, page_margin_mm: 7.34 },
    BuiltinMedia { media: Media::TZE_TAPE_6, media_type: MediaType::LAMINATED_TAPE, width: MediaWidth::W6, short_name: "tze6", name: "6mm TZe tape", size_mm: 6.0, print_area_mm: 4.52, page_margin_mm: 6.78 },
    BuiltinMedia { media: Media::TZE_TAPE_9, media_type: MediaType::LAMINATED_TAPE, width: MediaWidth::W9, short_name: "tze9", name: "9mm TZe tape", size_mm: 9.0, print_area_mm: 7.06, page_margin_mm: 5.51 },
    BuiltinMedia { media: Media::TZE_TAPE_12, media_type: MediaType::LAMINATED_TAPE, width: MediaWidth::W12, short_name: "tze12", name: "12mm TZe tape", size_mm: 12.0, print_area_mm: 9.88, page_margin_mm: 4.10 },
    BuiltinMedia { media: Media::TZE_TAPE_18, media_type: MediaType::LAMINATED_TAPE, width: MediaWidth::W18, short_name: "tze18", name: "18mm TZe tape", size_mm: 18.0, print_area_mm: 15.80, page_margin_mm: 1.13 },
    BuiltinMedia { media: Media::TZE_TAPE_24, media_type: MediaType::LAMINATED_TAPE, width: MediaWidth::W24, short_name: "tze24", name: "24mm TZe tape", size_mm: 24.0, print_area_mm: 18.06, page_margin_mm: 0.0 },
    BuiltinMedia { media: Media::HEAT_SHRINK_TUBE_6, media_type: MediaType::HEAT_SHRINK_TUBE, width: MediaWidth::W6, short_name: "hs6", name: "6mm Heat-Shrink Tube", size_mm: 6.0, print_area_mm: 3.95, page_margin_mm: 7.06 },
    BuiltinMedia { media: Media::HEAT_SHRINK_TUBE_9, media_type: MediaType::HEAT_SHRINK_TUBE, width: MediaWidth::W9, short_name: "hs9", name: "9mm Heat-Shrink Tube", size_mm: 9.0, print_area_mm: 6.77, page_margin_mm: 5.65 },
    BuiltinMedia { media: Media::HEAT_SHRINK_TUBE_12, media_type: MediaType::HEAT_SHRINK_TUBE, width: MediaWidth::W12, short_name: "hs12", name: "12mm Heat-Shrink Tube", size_mm: 12.0, print_area_mm: 9.31, page_margin_mm: 4.38 },
    BuiltinMedia { media: Media::HEAT_SHRINK_TUBE_18, media_type: MediaType::HEAT_SHRINK_TUBE, width: MediaWidth::W18, short_name: "hs18", name: "18mm Heat-Shrink Tube", size_mm: 18.0, print_area_mm: 14.96, page_margin_mm: 1.56 },
    BuiltinMedia { media: Media::HEAT_SHRINK_TUBE_24, media_type: MediaType::HEAT_SHRINK_TUBE, width: MediaWidth::W24, short_name: "hs24", name: "24mm Heat-Shrink Tube", size_mm: 24.0, print_area_mm: 18.06, page_margin_mm: 0.0 },
];

/// Every built-in media with its geometry.
pub fn builtin_media() -> Vec<(Media, MediaInfo)> {
    BUILTIN
        .iter()
        .map(|entry| {
            (
                entry.media,
                MediaInfo {
                    name: entry.name.to_string(),
                    size_mm: entry.size_mm,
                    print_area_mm: entry.print_area_mm,
                    page_margin_mm: entry.page_margin_mm,
                    min_margin_mm: MIN_MARGIN_MM,
                    max_margin_mm: MAX_MARGIN_MM,
                    min_length_mm: MIN_LENGTH_MM,
                    max_length_mm: MAX_LENGTH_MM,
                },
            )
        })
        .collect()
}
