//! # Configuration
//!
//! Optional JSON configuration file. Every field has a default; command
//! line flags override file values.
//!
//! ```json
//! {
//!   "device": "/dev/usb/lp0",
//!   "model": "PT-P700",
//!   "auto_cut": true,
//!   "margin_dots": 14,
//!   "custom_media": [
//!     {
//!       "id": 900,
//!       "media_type": 1,
//!       "media_width": 24,
//!       "info": {
//!         "name": "Generic 24mm tape",
//!         "size_mm": 24.0,
//!         "print_area_mm": 18.0,
//!         "page_margin_mm": 0.5,
//!         "min_margin_mm": 2.0,
//!         "max_margin_mm": 127.0,
//!         "min_length_mm": 4.4,
//!         "max_length_mm": 1000.0
//!       }
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PtrasterError, Result};
use crate::job::{DEFAULT_INVALIDATE_BYTES, DEFAULT_MARGIN_DOTS};
use crate::media::{Media, MediaInfo, MediaRegistry, MediaType, MediaWidth};
use crate::printer::ModelCode;

/// Default printer device path (USB printer class device on Linux)
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// A media definition that is not in the built-in table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomMedia {
    /// Identifier, outside the built-in range
    pub id: Media,
    /// Type code the printer reports for this media
    pub media_type: MediaType,
    /// Width code the printer reports for this media
    pub media_width: MediaWidth,
    pub info: MediaInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub device: String,
    /// Model name such as `"PT-P700"`
    pub model: String,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub auto_cut: bool,
    pub mirror: bool,
    pub chain: bool,
    pub margin_dots: u32,
    pub invalidate_bytes: usize,
    pub custom_media: Vec<CustomMedia>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            model: ModelCode::default().to_string(),
            margin_left_mm: 0.0,
            margin_right_mm: 0.0,
            auto_cut: true,
            mirror: false,
            chain: false,
            margin_dots: DEFAULT_MARGIN_DOTS,
            invalidate_bytes: DEFAULT_INVALIDATE_BYTES,
            custom_media: Vec::new(),
        }
    }
}

impl Config {
    /// Read and parse a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            PtrasterError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&text)
            .map_err(|e| PtrasterError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), custom_media = config.custom_media.len(), "Loaded config");
        Ok(config)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| PtrasterError::Config(e.to_string()))?;
        config.model_code()?;
        Ok(config)
    }

    /// The configured model.
    pub fn model_code(&self) -> Result<ModelCode> {
        ModelCode::parse(&self.model)
            .ok_or_else(|| PtrasterError::Config(format!("Unknown model '{}'", self.model)))
    }

    /// Register every custom media into `registry`.
    pub fn apply(&self, registry: &MediaRegistry) {
        for custom in &self.custom_media {
            registry.register(custom.id, custom.info.clone());
            registry.register_recognition(custom.media_type, custom.media_width, custom.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "device": "/dev/rfcomm1",
        "model": "PT-E500",
        "mirror": true,
        "custom_media": [{
            "id": 900,
            "media_type": 1,
            "media_width": 25,
            "info": {
                "name": "Generic 24mm tape",
                "size_mm": 24.0,
                "print_area_mm": 18.0,
                "page_margin_mm": 0.5,
                "min_margin_mm": 2.0,
                "max_margin_mm": 127.0,
                "min_length_mm": 4.4,
                "max_length_mm": 1000.0
            }
        }]
    }"#;

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model_code().unwrap(), ModelCode::PT_P700);
    }

    #[test]
    fn test_parse_sample() {
        let config = Config::from_json(SAMPLE).unwrap();
        assert_eq!(config.device, "/dev/rfcomm1");
        assert_eq!(config.model_code().unwrap(), ModelCode::PT_E500);
        assert!(config.mirror);
        assert!(config.auto_cut);
        assert_eq!(config.custom_media.len(), 1);
        assert_eq!(config.custom_media[0].id, Media(900));
    }

    #[test]
    fn test_apply_registers_custom_media() {
        let config = Config::from_json(SAMPLE).unwrap();
        let registry = MediaRegistry::new();
        config.apply(&registry);
        let media = registry.lookup(MediaType::LAMINATED_TAPE, MediaWidth(25));
        assert_eq!(media, Media(900));
        assert_eq!(registry.info(media), config.custom_media[0].info);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let err = Config::from_json(r#"{"model": "QL-800"}"#).unwrap_err();
        assert!(matches!(err, PtrasterError::Config(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_json(r#"{"colour": "red"}"#).is_err());
    }
}
