//! # Status Information
//!
//! Decoding of the 32-byte status packet the printer sends in reply to a
//! status information request, when printing completes, when an error
//! occurs, and on cover open/close notifications.
//!
//! ## Packet Layout
//!
//! | Offset | Field |
//! |--------|-------|
//! | 4 | Model code |
//! | 8-9 | Error information, u16 LE |
//! | 10 | Media width (mm) |
//! | 11 | Media type |
//! | 17 | Media length |
//! | 18 | Status type |
//! | 22 | Notification number |
//!
//! All other bytes are ignored.

use std::fmt;
use std::io::{Read, Write};

use serde::Serialize;

use super::builder::CommandBuilder;
use super::commands::flag_set;
use crate::error::{PtrasterError, Result};
use crate::media::{Media, MediaRegistry, MediaType, MediaWidth};
use crate::printer::ModelCode;

/// Size of a status packet in bytes.
pub const STATUS_PACKET_LEN: usize = 32;

flag_set! {
    /// Error information bitmask (bytes 8-9).
    ErrorInformation(u16)
}

impl ErrorInformation {
    pub const NO_ERROR: Self = Self(0);
    pub const NO_MEDIA: Self = Self(1 << 0);
    pub const CUTTER_JAM: Self = Self(1 << 2);
    pub const WEAK_BATTERIES: Self = Self(1 << 3);
    pub const HIGH_VOLTAGE_ADAPTER: Self = Self(1 << 6);
    pub const WRONG_MEDIA: Self = Self(1 << 8);
    pub const COVER_OPEN: Self = Self(1 << 12);
    pub const OVERHEATING: Self = Self(1 << 13);

    const NAMED: [(Self, &'static str); 7] = [
        (Self::NO_MEDIA, "No media"),
        (Self::CUTTER_JAM, "Cutter jam"),
        (Self::WEAK_BATTERIES, "Weak batteries"),
        (Self::HIGH_VOLTAGE_ADAPTER, "High-voltage adapter"),
        (Self::WRONG_MEDIA, "Wrong media"),
        (Self::COVER_OPEN, "Cover open"),
        (Self::OVERHEATING, "Overheating"),
    ];

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Names of every set error bit. Undocumented bits are reported as
    /// `"Unknown"` once.
    pub fn names(self) -> Vec<&'static str> {
        let mut names: Vec<_> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        let known = Self::NAMED.iter().fold(0u16, |acc, (flag, _)| acc | flag.0);
        if self.0 & !known != 0 {
            names.push("Unknown");
        }
        names
    }
}

impl fmt::Display for ErrorInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("No error");
        }
        f.write_str(&self.names().join(", "))
    }
}

/// Reason the status packet was sent (byte 18).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StatusType(pub u8);

impl StatusType {
    pub const REPLY_TO_STATUS_REQUEST: Self = Self(0x00);
    pub const PRINTING_COMPLETED: Self = Self(0x01);
    pub const ERROR_OCCURRED: Self = Self(0x02);
    /// Not used by tape models
    pub const EXIT_IF_MODE: Self = Self(0x03);
    pub const TURNED_OFF: Self = Self(0x04);
    pub const NOTIFICATION: Self = Self(0x05);
    pub const PHASE_CHANGE: Self = Self(0x06);
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::REPLY_TO_STATUS_REQUEST => "Reply to status request",
            Self::PRINTING_COMPLETED => "Printing completed",
            Self::ERROR_OCCURRED => "Error occurred",
            Self::EXIT_IF_MODE => "Exit IF mode",
            Self::TURNED_OFF => "Turned off",
            Self::NOTIFICATION => "Notification",
            Self::PHASE_CHANGE => "Phase change",
            Self(0x07..=0x20) => "(Not used)",
            _ => "(Reserved)",
        };
        f.write_str(name)
    }
}

/// Notification number (byte 22), meaningful when the status type is
/// [`StatusType::NOTIFICATION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NotificationNumber(pub u8);

impl NotificationNumber {
    pub const NOT_AVAILABLE: Self = Self(0x00);
    pub const COVER_OPEN: Self = Self(0x01);
    pub const COVER_CLOSED: Self = Self(0x02);
}

impl fmt::Display for NotificationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::NOT_AVAILABLE => "Not available",
            Self::COVER_OPEN => "Cover open",
            Self::COVER_CLOSED => "Cover closed",
            _ => "(Reserved)",
        };
        f.write_str(name)
    }
}

/// Decoded status packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusInformation {
    pub model: ModelCode,
    pub error_information: ErrorInformation,
    pub media_width: MediaWidth,
    pub media_type: MediaType,
    pub media_length: u8,
    pub status_type: StatusType,
    pub notification: NotificationNumber,
}

impl StatusInformation {
    /// Installed media, resolved through `registry`.
    pub fn media(&self, registry: &MediaRegistry) -> Media {
        registry.lookup(self.media_type, self.media_width)
    }

    /// Whether the printer reported any error bit.
    pub fn has_error(&self) -> bool {
        !self.error_information.is_empty()
    }
}

impl fmt::Display for StatusInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model:        {}", self.model)?;
        writeln!(f, "Status:       {}", self.status_type)?;
        writeln!(f, "Errors:       {}", self.error_information)?;
        writeln!(f, "Media type:   {}", self.media_type)?;
        writeln!(f, "Media width:  {}", self.media_width)?;
        writeln!(f, "Media length: {}", self.media_length)?;
        write!(f, "Notification: {}", self.notification)
    }
}

/// Decode a status packet.
///
/// At least [`STATUS_PACKET_LEN`] bytes are required; trailing bytes are
/// ignored.
///
/// ```
/// use ptraster::protocol::status::{self, ErrorInformation};
///
/// let mut packet = [0u8; 32];
/// packet[4] = b'g';
/// packet[8] = 0x01;
/// let info = status::read_status_information(&packet)?;
/// assert_eq!(info.error_information, ErrorInformation::NO_MEDIA);
/// # Ok::<(), ptraster::PtrasterError>(())
/// ```
pub fn read_status_information(b: &[u8]) -> Result<StatusInformation> {
    if b.len() < STATUS_PACKET_LEN {
        return Err(PtrasterError::StatusDataTooShort(b.len()));
    }
    Ok(StatusInformation {
        model: ModelCode(b[4]),
        error_information: ErrorInformation(u16::from_le_bytes([b[8], b[9]])),
        media_width: MediaWidth(u16::from(b[10])),
        media_type: MediaType(b[11]),
        media_length: b[17],
        status_type: StatusType(b[18]),
        notification: NotificationNumber(b[22]),
    })
}

/// Send a status information request and decode the reply.
///
/// Blocks until 32 bytes are read; timeouts belong to the transport.
pub fn query_status_information<T: Read + Write>(rw: &mut T) -> Result<StatusInformation> {
    CommandBuilder::new(&mut *rw).status_information_request()?;
    let mut packet = [0u8; STATUS_PACKET_LEN];
    rw.read_exact(&mut packet)?;
    let info = read_status_information(&packet)?;
    tracing::debug!(
        model = %info.model,
        status = %info.status_type,
        errors = info.error_information.bits(),
        "Received status information"
    );
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet() -> [u8; 32] {
        let mut b = [0xEEu8; 32];
        b[4] = b'g';
        b[8] = 0x01;
        b[9] = 0x10;
        b[10] = 24;
        b[11] = 0x01;
        b[17] = 0x32;
        b[18] = 0x05;
        b[22] = 0x02;
        b
    }

    #[test]
    fn test_decode_fields() {
        let info = read_status_information(&packet()).unwrap();
        assert_eq!(info.model, ModelCode::PT_P700);
        assert_eq!(
            info.error_information,
            ErrorInformation::NO_MEDIA | ErrorInformation::COVER_OPEN
        );
        assert_eq!(info.media_width, MediaWidth::W24);
        assert_eq!(info.media_type, MediaType::LAMINATED_TAPE);
        assert_eq!(info.media_length, 0x32);
        assert_eq!(info.status_type, StatusType::NOTIFICATION);
        assert_eq!(info.notification, NotificationNumber::COVER_CLOSED);
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            read_status_information(&[0; 31]),
            Err(PtrasterError::StatusDataTooShort(31))
        ));
        assert!(read_status_information(&[]).is_err());
    }

    #[test]
    fn test_longer_input_accepted() {
        let mut b = packet().to_vec();
        b.extend_from_slice(&[0xFF; 8]);
        assert_eq!(
            read_status_information(&b).unwrap(),
            read_status_information(&packet()).unwrap()
        );
    }

    #[test]
    fn test_media_from_status() {
        let info = read_status_information(&packet()).unwrap();
        assert_eq!(info.media(&MediaRegistry::new()), Media::TZE_TAPE_24);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ErrorInformation::NO_ERROR.to_string(), "No error");
        assert_eq!(
            (ErrorInformation::CUTTER_JAM | ErrorInformation::OVERHEATING).to_string(),
            "Cutter jam, Overheating"
        );
        assert_eq!(ErrorInformation(1 << 1).to_string(), "Unknown");
    }

    #[test]
    fn test_status_type_display() {
        assert_eq!(StatusType::PRINTING_COMPLETED.to_string(), "Printing completed");
        assert_eq!(StatusType(0x10).to_string(), "(Not used)");
        assert_eq!(StatusType(0x21).to_string(), "(Reserved)");
    }
}
