//! # Media Geometry
//!
//! Tape and tube media as reported by the printer, the canonical [`Media`]
//! identifier derived from a `(MediaType, MediaWidth)` pair, and the
//! physical geometry ([`MediaInfo`]) the raster encoder needs to place
//! margins.
//!
//! ## Modules
//!
//! - [`types`]: Wire-level media type and width codes
//! - [`table`]: Built-in media identifiers and geometry
//! - [`registry`]: Runtime lookup table with custom media registration
//!
//! ## Example
//!
//! ```
//! use ptraster::media::{Media, MediaRegistry, MediaType, MediaWidth};
//!
//! let registry = MediaRegistry::new();
//! let media = registry.lookup(MediaType::LAMINATED_TAPE, MediaWidth::W12);
//! assert_eq!(media, Media::TZE_TAPE_12);
//! assert_eq!(registry.info(media).name, "12mm TZe tape");
//! ```

pub mod registry;
pub mod table;
pub mod types;

pub use registry::MediaRegistry;
pub use table::{Media, MediaInfo, recognize_media};
pub use types::{MediaType, MediaWidth};
