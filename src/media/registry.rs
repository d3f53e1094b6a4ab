//! # Media Registry
//!
//! An owned, shareable table that resolves `(MediaType, MediaWidth)` to a
//! [`Media`] and a [`Media`] to its [`MediaInfo`].
//!
//! Lookups take a shared read lock and may run concurrently; registration
//! takes the write lock. Misses never fail: an unknown pair resolves to
//! [`Media::UNKNOWN`] and an unregistered media to [`MediaInfo::unknown`].
//!
//! ```
//! use ptraster::media::{Media, MediaInfo, MediaRegistry, MediaType, MediaWidth};
//!
//! let registry = MediaRegistry::new();
//!
//! // Third-party 24mm tape reported with an odd width code
//! let custom = Media(900);
//! registry.register(custom, MediaInfo { name: "Generic 24mm".into(), ..MediaInfo::unknown() });
//! registry.register_recognition(MediaType::LAMINATED_TAPE, MediaWidth(25), custom);
//!
//! assert_eq!(registry.lookup(MediaType::LAMINATED_TAPE, MediaWidth(25)), custom);
//! assert_eq!(registry.info(custom).name, "Generic 24mm");
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::table::{Media, MediaInfo, builtin_media, recognize_media};
use super::types::{MediaType, MediaWidth};

/// Media lookup table guarded by reader-writer locks.
#[derive(Debug)]
pub struct MediaRegistry {
    geometry: RwLock<HashMap<Media, MediaInfo>>,
    recognition: RwLock<HashMap<(MediaType, MediaWidth), Media>>,
}

impl MediaRegistry {
    /// Registry preloaded with the built-in media table.
    pub fn new() -> Self {
        Self {
            geometry: RwLock::new(builtin_media().into_iter().collect()),
            recognition: RwLock::new(HashMap::new()),
        }
    }

    /// Registry with no entries at all.
    pub fn empty() -> Self {
        Self {
            geometry: RwLock::new(HashMap::new()),
            recognition: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a type/width pair. Custom recognition entries take
    /// precedence over the built-in mapping.
    pub fn lookup(&self, media_type: MediaType, width: MediaWidth) -> Media {
        if let Some(media) = read(&self.recognition).get(&(media_type, width)) {
            return *media;
        }
        recognize_media(media_type, width)
    }

    /// Geometry for `media`, or [`MediaInfo::unknown`] when unregistered.
    pub fn info(&self, media: Media) -> MediaInfo {
        read(&self.geometry)
            .get(&media)
            .cloned()
            .unwrap_or_else(MediaInfo::unknown)
    }

    /// Whether geometry is registered for `media`.
    pub fn contains(&self, media: Media) -> bool {
        read(&self.geometry).contains_key(&media)
    }

    /// Insert or replace geometry for `media`, returning the previous entry.
    pub fn register(&self, media: Media, info: MediaInfo) -> Option<MediaInfo> {
        tracing::debug!(media = %media, name = %info.name, "Registering media geometry");
        write(&self.geometry).insert(media, info)
    }

    /// Map a type/width pair to `media`, overriding built-in recognition.
    pub fn register_recognition(&self, media_type: MediaType, width: MediaWidth, media: Media) {
        tracing::debug!(
            media_type = %media_type,
            width = width.0,
            media = %media,
            "Registering media recognition"
        );
        write(&self.recognition).insert((media_type, width), media);
    }

    /// Every registered media, sorted by identifier.
    pub fn registered(&self) -> Vec<(Media, MediaInfo)> {
        let mut entries: Vec<_> = read(&self.geometry)
            .iter()
            .map(|(media, info)| (*media, info.clone()))
            .collect();
        entries.sort_by_key(|(media, _)| *media);
        entries
    }
}

impl Default for MediaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Poisoning is ignored: both tables hold plain values.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
