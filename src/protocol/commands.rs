//! # Raster Command Reference
//!
//! Pure builders for every command of the P-touch raster command language.
//! Each function turns typed parameters into the exact byte sequence the
//! printer expects; validation happens here, before anything reaches a
//! transport.
//!
//! ## Command Table
//!
//! | Command | Hex |
//! |---------|-----|
//! | Invalidate | `00` (repeated) |
//! | Initialize | `1B 40` |
//! | Status information request | `1B 69 53` |
//! | Switch dynamic command mode | `1B 69 61 m` |
//! | Print information | `1B 69 7A n1..n10` |
//! | Various mode settings | `1B 69 4D m` |
//! | Advanced mode settings | `1B 69 4B m` |
//! | Specify margin amount | `1B 69 64 nL nH` |
//! | Select compression mode | `4D m` |
//! | Raster graphics transfer | `67 nL nH d1..dn` |
//! | Zero raster graphics | `5A` |
//! | Print | `0C` |
//! | Print with feeding | `1A` |
//!
//! ## Byte Order
//!
//! Multi-byte integers are **little-endian** regardless of host order:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

use crate::error::{PtrasterError, Result};
use crate::media::{MediaType, MediaWidth};

// ============================================================================
// OPCODES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

pub const INVALIDATE: u8 = 0x00;
pub const INITIALIZE: [u8; 2] = [ESC, b'@'];
pub const STATUS_INFORMATION_REQUEST: [u8; 3] = [ESC, b'i', b'S'];
pub const SWITCH_DYNAMIC_COMMAND_MODE: [u8; 3] = [ESC, b'i', b'a'];
pub const PRINT_INFORMATION: [u8; 3] = [ESC, b'i', b'z'];
pub const VARIOUS_MODE_SETTINGS: [u8; 3] = [ESC, b'i', b'M'];
pub const ADVANCED_MODE_SETTINGS: [u8; 3] = [ESC, b'i', b'K'];
pub const SPECIFY_MARGIN_AMOUNT: [u8; 3] = [ESC, b'i', b'd'];
pub const SELECT_COMPRESSION_MODE: [u8; 1] = [b'M'];
pub const RASTER_GRAPHICS_TRANSFER: [u8; 1] = [b'g'];
pub const ZERO_RASTER_GRAPHICS: [u8; 1] = [b'Z'];
pub const PRINT: [u8; 1] = [0x0C];
pub const PRINT_WITH_FEEDING: [u8; 1] = [0x1A];

/// Largest payload the 16-bit raster length field can describe.
pub const MAX_RASTER_DATA: usize = 0xFFFF;

/// Upper bound for media width and length in a print information command.
pub const MAX_MEDIA_DIMENSION: u32 = 256;

// ============================================================================
// MODE PARAMETERS
// ============================================================================

/// Command mode selected by [`switch_dynamic_command_mode`].
///
/// The printer stays in the selected mode until powered off. Raster data is
/// only understood in [`DynamicCommandMode::Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DynamicCommandMode {
    /// ESC/P (power-on default)
    #[default]
    EscP = 0,
    /// Raster mode
    Raster = 1,
    /// P-touch Template mode
    PtouchTemplate = 2,
}

/// Compression applied to raster graphics transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CompressionMode {
    #[default]
    None = 0,
    /// TIFF (PackBits)
    Tiff = 2,
}

macro_rules! flag_set {
    ($(#[$meta:meta])* $name:ident($repr:ty)) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $repr);

        impl $name {
            /// Whether every bit of `other` is set.
            #[inline]
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Whether any bit of `other` is set.
            #[inline]
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            #[inline]
            pub const fn bits(self) -> $repr {
                self.0
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl ::std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}

pub(crate) use flag_set;

flag_set! {
    /// Valid-field flags for [`print_information`].
    PrintInformationFlags(u8)
}

impl PrintInformationFlags {
    pub const NONE: Self = Self(0);
    /// Media type field is valid
    pub const KIND: Self = Self(0x02);
    /// Media width field is valid
    pub const WIDTH: Self = Self(0x04);
    /// Media length field is valid
    pub const LENGTH: Self = Self(0x08);
    /// Print quality priority (unused by tape models)
    pub const QUALITY: Self = Self(0x40);
    /// Printer recovery; always sent
    pub const RECOVER: Self = Self(0x80);
}

flag_set! {
    /// Parameter of [`various_mode_settings`].
    VariousMode(u8)
}

impl VariousMode {
    pub const NONE: Self = Self(0);
    /// Cut automatically after each label
    pub const AUTO_CUT: Self = Self(1 << 6);
    /// Mirror printing
    pub const MIRROR_PRINTING: Self = Self(1 << 7);
}

flag_set! {
    /// Parameter of [`advanced_mode_settings`].
    AdvancedMode(u8)
}

impl AdvancedMode {
    /// Feeding and cutting are not performed after the last label
    pub const CHAIN_PRINTING: Self = Self(0);
    /// Feed and cut after the last label
    pub const NO_CHAIN_PRINTING: Self = Self(1 << 3);
    /// Labels are not cut when special tape is installed
    pub const SPECIAL_TAPE: Self = Self(1 << 4);
    /// Same bit as [`AdvancedMode::SPECIAL_TAPE`]
    pub const NO_CUTTING: Self = Self(1 << 4);
    /// Keep the expansion buffer between labels
    pub const NO_BUFFER_CLEARING_WHEN_PRINTING: Self = Self(1 << 7);
}

/// Parameters of the print information command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintInformation {
    /// Which of type/width/length are valid ([`PrintInformationFlags::RECOVER`] is added automatically)
    pub flags: PrintInformationFlags,
    pub media_type: MediaType,
    pub media_width: MediaWidth,
    /// Media length in millimetres (0 for continuous tape is rejected)
    pub media_length: u32,
    /// Number of raster lines that follow
    pub raster_number: u64,
    /// `false` for the first page of a job
    pub not_starting_page: bool,
}

impl Default for PrintInformation {
    fn default() -> Self {
        Self {
            flags: PrintInformationFlags::NONE,
            media_type: MediaType::NO_MEDIA,
            media_width: MediaWidth::NO_TAPE,
            media_length: 0,
            raster_number: 0,
            not_starting_page: false,
        }
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// # Initialize (ESC @)
///
/// Resets mode settings; also cancels printing.
///
/// ```
/// use ptraster::protocol::commands;
///
/// assert_eq!(commands::initialize(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn initialize() -> Vec<u8> {
    INITIALIZE.to_vec()
}

/// # Status Information Request (ESC i S)
///
/// The printer answers with a 32-byte status packet.
#[inline]
pub fn status_information_request() -> Vec<u8> {
    STATUS_INFORMATION_REQUEST.to_vec()
}

/// # Switch Dynamic Command Mode (ESC i a m)
#[inline]
pub fn switch_dynamic_command_mode(mode: DynamicCommandMode) -> Vec<u8> {
    with_u8(&SWITCH_DYNAMIC_COMMAND_MODE, mode as u8)
}

/// # Print Information (ESC i z n1..n10)
///
/// ## Parameter Block
///
/// | Byte | Content |
/// |------|---------|
/// | n1 | flags \| 0x80 |
/// | n2 | media type (if KIND) |
/// | n3 | media width (if WIDTH) |
/// | n4 | media length (if LENGTH) |
/// | n5-n8 | raster number, u32 LE (if any of KIND/WIDTH/LENGTH) |
/// | n9 | 0 = starting page, 1 = other page |
/// | n10 | 0 (reserved) |
///
/// ## Validation
///
/// Checked in order, all before any byte is produced:
/// media type (only with KIND), width in (0, 256], length in (0, 256],
/// raster number in (0, 0xFFFFFFFF].
///
/// ## Example
///
/// ```
/// use ptraster::media::{MediaType, MediaWidth};
/// use ptraster::protocol::commands::{self, PrintInformation, PrintInformationFlags};
///
/// let cmd = commands::print_information(&PrintInformation {
///     flags: PrintInformationFlags::KIND | PrintInformationFlags::WIDTH | PrintInformationFlags::LENGTH,
///     media_type: MediaType::LAMINATED_TAPE,
///     media_width: MediaWidth::W24,
///     media_length: 50,
///     raster_number: 100,
///     not_starting_page: false,
/// })?;
/// assert_eq!(cmd, vec![0x1B, 0x69, 0x7A, 0x8E, 0x01, 24, 50, 100, 0, 0, 0, 0, 0]);
/// # Ok::<(), ptraster::PtrasterError>(())
/// ```
pub fn print_information(p: &PrintInformation) -> Result<Vec<u8>> {
    if p.flags.contains(PrintInformationFlags::KIND) && !p.media_type.is_valid() {
        return Err(PtrasterError::InvalidMediaType(p.media_type));
    }
    if p.media_width.0 == 0 || u32::from(p.media_width.0) > MAX_MEDIA_DIMENSION {
        return Err(PtrasterError::InvalidMediaWidth(p.media_width.0));
    }
    if p.media_length == 0 || p.media_length > MAX_MEDIA_DIMENSION {
        return Err(PtrasterError::InvalidMediaLength(p.media_length));
    }
    if p.raster_number == 0 || p.raster_number > u64::from(u32::MAX) {
        return Err(PtrasterError::InvalidRasterNumber(p.raster_number));
    }

    let mut block = [0u8; 10];
    block[0] = (p.flags | PrintInformationFlags::RECOVER).bits();
    if p.flags.contains(PrintInformationFlags::KIND) {
        block[1] = p.media_type.0;
    }
    // Width and length of 256 wrap to 0x00; the byte field cannot hold more.
    if p.flags.contains(PrintInformationFlags::WIDTH) {
        block[2] = p.media_width.0 as u8;
    }
    if p.flags.contains(PrintInformationFlags::LENGTH) {
        block[3] = p.media_length as u8;
    }
    let dimensions =
        PrintInformationFlags::KIND | PrintInformationFlags::WIDTH | PrintInformationFlags::LENGTH;
    if p.flags.intersects(dimensions) {
        block[4..8].copy_from_slice(&(p.raster_number as u32).to_le_bytes());
    }
    block[8] = u8::from(p.not_starting_page);
    block[9] = 0;

    let mut cmd = Vec::with_capacity(PRINT_INFORMATION.len() + block.len());
    cmd.extend_from_slice(&PRINT_INFORMATION);
    cmd.extend_from_slice(&block);
    Ok(cmd)
}

/// # Various Mode Settings (ESC i M m)
#[inline]
pub fn various_mode_settings(mode: VariousMode) -> Vec<u8> {
    with_u8(&VARIOUS_MODE_SETTINGS, mode.bits())
}

/// # Advanced Mode Settings (ESC i K m)
#[inline]
pub fn advanced_mode_settings(mode: AdvancedMode) -> Vec<u8> {
    with_u8(&ADVANCED_MODE_SETTINGS, mode.bits())
}

/// # Specify Margin Amount (ESC i d nL nH)
///
/// Feed margin in dots, 0 to 65535.
///
/// ```
/// use ptraster::protocol::commands;
///
/// assert_eq!(commands::specify_margin_amount(14)?, vec![0x1B, 0x69, 0x64, 14, 0]);
/// assert!(commands::specify_margin_amount(0x1_0000).is_err());
/// # Ok::<(), ptraster::PtrasterError>(())
/// ```
pub fn specify_margin_amount(dots: u32) -> Result<Vec<u8>> {
    let dots = u16::try_from(dots).map_err(|_| PtrasterError::MarginAmountUnacceptable(dots))?;
    Ok(with_u16(&SPECIFY_MARGIN_AMOUNT, dots))
}

/// # Select Compression Mode (M m)
///
/// Only affects subsequent raster graphics transfers.
#[inline]
pub fn select_compression_mode(mode: CompressionMode) -> Vec<u8> {
    with_u8(&SELECT_COMPRESSION_MODE, mode as u8)
}

/// # Raster Graphics Transfer (g nL nH d1..dn)
///
/// Sends one raster line. `data` is passed through untouched; with TIFF
/// compression selected it must already be compressed.
///
/// ```
/// use ptraster::protocol::commands;
///
/// let cmd = commands::raster_graphics_transfer(&[0xF0; 16])?;
/// assert_eq!(&cmd[..3], &[0x67, 16, 0]);
/// assert_eq!(cmd.len(), 3 + 16);
/// # Ok::<(), ptraster::PtrasterError>(())
/// ```
pub fn raster_graphics_transfer(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_RASTER_DATA {
        return Err(PtrasterError::DataTooLong(data.len()));
    }
    let mut cmd = Vec::with_capacity(RASTER_GRAPHICS_TRANSFER.len() + 2 + data.len());
    cmd.extend_from_slice(&RASTER_GRAPHICS_TRANSFER);
    cmd.extend_from_slice(&(data.len() as u16).to_le_bytes());
    cmd.extend_from_slice(data);
    Ok(cmd)
}

/// # Zero Raster Graphics (Z)
///
/// One blank raster line.
#[inline]
pub fn zero_raster_graphics() -> Vec<u8> {
    ZERO_RASTER_GRAPHICS.to_vec()
}

/// # Print (FF)
///
/// Ends every page except the last one.
#[inline]
pub fn print() -> Vec<u8> {
    PRINT.to_vec()
}

/// # Print with Feeding (Control-Z)
///
/// Ends the last page of a job.
#[inline]
pub fn print_with_feeding() -> Vec<u8> {
    PRINT_WITH_FEEDING.to_vec()
}

fn with_u8(opcode: &[u8], param: u8) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(opcode.len() + 1);
    cmd.extend_from_slice(opcode);
    cmd.push(param);
    cmd
}

fn with_u16(opcode: &[u8], param: u16) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(opcode.len() + 2);
    cmd.extend_from_slice(opcode);
    cmd.extend_from_slice(&param.to_le_bytes());
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn all_dimensions() -> PrintInformation {
        PrintInformation {
            flags: PrintInformationFlags::KIND
                | PrintInformationFlags::WIDTH
                | PrintInformationFlags::LENGTH,
            media_type: MediaType::LAMINATED_TAPE,
            media_width: MediaWidth::W24,
            media_length: 50,
            raster_number: 100,
            not_starting_page: false,
        }
    }

    #[test]
    fn test_fixed_commands() {
        assert_eq!(initialize(), vec![0x1B, 0x40]);
        assert_eq!(status_information_request(), vec![0x1B, 0x69, 0x53]);
        assert_eq!(zero_raster_graphics(), vec![0x5A]);
        assert_eq!(print(), vec![0x0C]);
        assert_eq!(print_with_feeding(), vec![0x1A]);
    }

    #[test]
    fn test_switch_dynamic_command_mode() {
        assert_eq!(
            switch_dynamic_command_mode(DynamicCommandMode::Raster),
            vec![0x1B, 0x69, 0x61, 0x01]
        );
        assert_eq!(
            switch_dynamic_command_mode(DynamicCommandMode::PtouchTemplate),
            vec![0x1B, 0x69, 0x61, 0x02]
        );
    }

    #[test]
    fn test_print_information_all_fields() {
        let cmd = print_information(&all_dimensions()).unwrap();
        assert_eq!(
            cmd,
            vec![0x1B, 0x69, 0x7A, 0x8E, 0x01, 0x18, 0x32, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_print_information_raster_number_le() {
        let p = PrintInformation {
            raster_number: 0x0102_0304,
            ..all_dimensions()
        };
        let cmd = print_information(&p).unwrap();
        assert_eq!(&cmd[7..11], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_print_information_masks_unflagged_fields() {
        let p = PrintInformation {
            flags: PrintInformationFlags::WIDTH,
            not_starting_page: true,
            ..all_dimensions()
        };
        let cmd = print_information(&p).unwrap();
        assert_eq!(
            cmd,
            vec![0x1B, 0x69, 0x7A, 0x84, 0x00, 0x18, 0x00, 0x64, 0x00, 0x00, 0x00, 0x01, 0x00]
        );
    }

    #[test]
    fn test_print_information_no_dimension_flags_omits_raster_number() {
        let p = PrintInformation {
            flags: PrintInformationFlags::QUALITY,
            ..all_dimensions()
        };
        let cmd = print_information(&p).unwrap();
        assert_eq!(cmd[3], 0xC0);
        assert_eq!(&cmd[4..11], &[0; 7]);
    }

    #[test]
    fn test_print_information_media_type_checked_only_with_kind() {
        let p = PrintInformation {
            media_type: MediaType::INCOMPATIBLE_TAPE,
            ..all_dimensions()
        };
        assert!(matches!(
            print_information(&p),
            Err(PtrasterError::InvalidMediaType(MediaType::INCOMPATIBLE_TAPE))
        ));

        let p = PrintInformation {
            flags: PrintInformationFlags::WIDTH,
            ..p
        };
        assert!(print_information(&p).is_ok());
    }

    #[test]
    fn test_print_information_width_bounds() {
        for width in [0, 257, 1000] {
            let p = PrintInformation {
                media_width: MediaWidth(width),
                ..all_dimensions()
            };
            assert!(matches!(
                print_information(&p),
                Err(PtrasterError::InvalidMediaWidth(w)) if w == width
            ));
        }
        let p = PrintInformation {
            media_width: MediaWidth(256),
            ..all_dimensions()
        };
        assert_eq!(print_information(&p).unwrap()[5], 0x00);
    }

    #[test]
    fn test_print_information_length_bounds() {
        for length in [0, 257] {
            let p = PrintInformation {
                media_length: length,
                ..all_dimensions()
            };
            assert!(matches!(
                print_information(&p),
                Err(PtrasterError::InvalidMediaLength(l)) if l == length
            ));
        }
    }

    #[test]
    fn test_print_information_raster_number_bounds() {
        for raster_number in [0, 0x1_0000_0000] {
            let p = PrintInformation {
                raster_number,
                ..all_dimensions()
            };
            assert!(matches!(
                print_information(&p),
                Err(PtrasterError::InvalidRasterNumber(n)) if n == raster_number
            ));
        }
        let p = PrintInformation {
            raster_number: 0xFFFF_FFFF,
            ..all_dimensions()
        };
        assert_eq!(&print_information(&p).unwrap()[7..11], &[0xFF; 4]);
    }

    #[test]
    fn test_print_information_validation_order() {
        // Bad type and bad width: type is reported first
        let p = PrintInformation {
            media_type: MediaType::NO_MEDIA,
            media_width: MediaWidth(0),
            ..all_dimensions()
        };
        assert!(matches!(
            print_information(&p),
            Err(PtrasterError::InvalidMediaType(_))
        ));
    }

    #[test]
    fn test_mode_settings() {
        assert_eq!(
            various_mode_settings(VariousMode::AUTO_CUT | VariousMode::MIRROR_PRINTING),
            vec![0x1B, 0x69, 0x4D, 0xC0]
        );
        assert_eq!(
            advanced_mode_settings(AdvancedMode::NO_CHAIN_PRINTING | AdvancedMode::NO_CUTTING),
            vec![0x1B, 0x69, 0x4B, 0x18]
        );
        assert_eq!(
            advanced_mode_settings(AdvancedMode::CHAIN_PRINTING),
            vec![0x1B, 0x69, 0x4B, 0x00]
        );
    }

    #[test]
    fn test_specify_margin_amount() {
        assert_eq!(specify_margin_amount(0).unwrap(), vec![0x1B, 0x69, 0x64, 0, 0]);
        assert_eq!(
            specify_margin_amount(0x1234).unwrap(),
            vec![0x1B, 0x69, 0x64, 0x34, 0x12]
        );
        assert_eq!(
            specify_margin_amount(0xFFFF).unwrap(),
            vec![0x1B, 0x69, 0x64, 0xFF, 0xFF]
        );
        assert!(matches!(
            specify_margin_amount(0x1_0000),
            Err(PtrasterError::MarginAmountUnacceptable(0x1_0000))
        ));
    }

    #[test]
    fn test_select_compression_mode() {
        assert_eq!(select_compression_mode(CompressionMode::None), vec![0x4D, 0x00]);
        assert_eq!(select_compression_mode(CompressionMode::Tiff), vec![0x4D, 0x02]);
    }

    #[test]
    fn test_raster_graphics_transfer() {
        assert_eq!(
            raster_graphics_transfer(&[0xAA, 0x55]).unwrap(),
            vec![0x67, 0x02, 0x00, 0xAA, 0x55]
        );
        assert_eq!(raster_graphics_transfer(&[]).unwrap(), vec![0x67, 0x00, 0x00]);
    }

    #[test]
    fn test_raster_graphics_transfer_length_limit() {
        let max = vec![0x11; 0xFFFF];
        let cmd = raster_graphics_transfer(&max).unwrap();
        assert_eq!(&cmd[..3], &[0x67, 0xFF, 0xFF]);
        assert_eq!(&cmd[3..], &max[..]);

        let too_long = vec![0; 0x1_0000];
        assert!(matches!(
            raster_graphics_transfer(&too_long),
            Err(PtrasterError::DataTooLong(0x1_0000))
        ));
    }

    #[test]
    fn test_flag_set_helpers() {
        let mode = VariousMode::AUTO_CUT;
        assert!(mode.contains(VariousMode::AUTO_CUT));
        assert!(!mode.contains(VariousMode::MIRROR_PRINTING));
        let mut mode = mode;
        mode |= VariousMode::MIRROR_PRINTING;
        assert_eq!(mode.bits(), 0xC0);
    }
}
