//! # Error Types
//!
//! This module defines error types used throughout the ptraster library.

use thiserror::Error;

use crate::media::MediaType;

/// Main error type for ptraster operations
#[derive(Debug, Error)]
pub enum PtrasterError {
    /// Media type is not one the printer accepts in a print information command
    #[error("Invalid media type: {0}")]
    InvalidMediaType(MediaType),

    /// Media width outside (0, 256]
    #[error("Invalid media width: {0}")]
    InvalidMediaWidth(u16),

    /// Media length outside (0, 256]
    #[error("Invalid media length: {0}")]
    InvalidMediaLength(u32),

    /// Raster line count outside (0, 0xFFFFFFFF]
    #[error("Invalid raster number: {0}")]
    InvalidRasterNumber(u64),

    /// Margin does not fit the 16-bit dot field
    #[error("Margin amount unacceptable: {0} dots")]
    MarginAmountUnacceptable(u32),

    /// Raster payload does not fit the 16-bit length field
    #[error("Data too long: {0} bytes (max 65535)")]
    DataTooLong(usize),

    /// Status reply shorter than 32 bytes
    #[error("Status information data too short: {0} bytes (need 32)")]
    StatusDataTooShort(usize),

    /// Transport-level errors (connection, device setup)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Image loading or preview error
    #[error("Image error: {0}")]
    Image(String),

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias with [`PtrasterError`] as the default error type.
pub type Result<T, E = PtrasterError> = std::result::Result<T, E>;
