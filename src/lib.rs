//! # ptraster - P-touch Raster Printing Library
//!
//! ptraster drives Brother P-touch tape label printers (PT-P700, PT-E500,
//! PT-H500) through their raster command language. It provides:
//!
//! - **Protocol implementation**: byte-exact command builders and a writer-backed [`CommandBuilder`](protocol::CommandBuilder)
//! - **Raster encoding**: image columns to MSB-first bit-packed raster lines with media margins
//! - **Status decoding**: the 32-byte status packet
//! - **Media geometry**: built-in and runtime-registered tape/tube definitions
//!
//! ## Quick Start
//!
//! ```no_run
//! use ptraster::{
//!     job::{JobOptions, PrintJob},
//!     media::MediaRegistry,
//!     protocol::query_status_information,
//!     transport::DeviceTransport,
//! };
//!
//! let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
//! let registry = MediaRegistry::new();
//!
//! // Find out which tape is installed
//! let status = query_status_information(&mut transport)?;
//! let media = status.media(&registry);
//!
//! let image = image::open("label.png")
//!     .map_err(|e| ptraster::PtrasterError::Image(e.to_string()))?;
//! let options = JobOptions {
//!     media_type: status.media_type,
//!     media_width: status.media_width,
//!     ..JobOptions::default()
//! };
//! PrintJob::new(&image, media, options, &registry).write_to(&mut transport)?;
//!
//! # Ok::<(), ptraster::PtrasterError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Command encoding and status decoding |
//! | [`raster`] | Image to raster line conversion |
//! | [`media`] | Media identifiers, geometry and registry |
//! | [`printer`] | Model codes and unit conversion |
//! | [`job`] | Full print job sequencing |
//! | [`config`] | JSON configuration file |
//! | [`transport`] | Character device backend |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod job;
pub mod media;
pub mod printer;
pub mod protocol;
pub mod raster;
pub mod transport;

// Re-exports for convenience
pub use error::{PtrasterError, Result};
pub use media::{Media, MediaInfo, MediaRegistry};
pub use printer::ModelCode;
pub use transport::DeviceTransport;
