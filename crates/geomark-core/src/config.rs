use crate::error::{GeomarkError, Result};
use crate::geo::region::RegionBounds;
use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default upload size cap: 1 GiB
pub const DEFAULT_UPLOAD_LIMIT_BYTES: u64 = 1024 * 1024 * 1024;

/// Default bucket holding uploaded location media
pub const DEFAULT_BUCKET: &str = "location-files";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Initial map viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Layered configuration for GeoMark
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub region: ConfigValue<RegionBounds>,
    pub bucket: ConfigValue<String>,
    pub upload_limit_bytes: ConfigValue<u64>,
    pub default_view: ConfigValue<MapView>,
    /// Zoom applied when focusing a freshly uploaded location
    pub focus_zoom: ConfigValue<u8>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            region: ConfigValue::new(RegionBounds::SOUTH_AFRICA, ConfigSource::Default),
            bucket: ConfigValue::new(DEFAULT_BUCKET.to_string(), ConfigSource::Default),
            upload_limit_bytes: ConfigValue::new(
                DEFAULT_UPLOAD_LIMIT_BYTES,
                ConfigSource::Default,
            ),
            default_view: ConfigValue::new(
                MapView { center: Coordinate::new(-26.106, 28.17), zoom: 13 },
                ConfigSource::Default,
            ),
            focus_zoom: ConfigValue::new(15, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeomarkError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeomarkError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(region) = file_config.region {
            self.region.update(region, ConfigSource::File);
        }
        if let Some(bucket) = file_config.bucket {
            self.bucket.update(bucket, ConfigSource::File);
        }
        if let Some(limit) = file_config.upload_limit_bytes {
            self.upload_limit_bytes.update(limit, ConfigSource::File);
        }
        if let Some(view) = file_config.default_view {
            self.default_view.update(view, ConfigSource::File);
        }
        if let Some(zoom) = file_config.focus_zoom {
            self.focus_zoom.update(zoom, ConfigSource::File);
        }

        Ok(self)
    }

    /// Apply environment variable overrides (`GEOMARK_BUCKET`,
    /// `GEOMARK_UPLOAD_LIMIT_BYTES`)
    pub fn load_from_env(mut self) -> Result<Self> {
        if let Ok(bucket) = env::var("GEOMARK_BUCKET") {
            self.bucket.update(bucket, ConfigSource::Environment);
        }

        if let Ok(limit) = env::var("GEOMARK_UPLOAD_LIMIT_BYTES") {
            let limit = limit.parse::<u64>().map_err(|e| GeomarkError::ConfigInvalid {
                key: "GEOMARK_UPLOAD_LIMIT_BYTES".to_string(),
                reason: e.to_string(),
            })?;
            self.upload_limit_bytes.update(limit, ConfigSource::Environment);
        }

        Ok(self)
    }

    /// Validate the assembled configuration
    pub fn validate(&self) -> Result<()> {
        let region = &self.region.value;
        if region.lat_min >= region.lat_max {
            return Err(GeomarkError::ConfigInvalid {
                key: "region".to_string(),
                reason: "lat_min must be below lat_max".to_string(),
            });
        }
        if region.lng_min >= region.lng_max {
            return Err(GeomarkError::ConfigInvalid {
                key: "region".to_string(),
                reason: "lng_min must be below lng_max".to_string(),
            });
        }
        if self.upload_limit_bytes.value == 0 {
            return Err(GeomarkError::ConfigInvalid {
                key: "upload_limit_bytes".to_string(),
                reason: "limit must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// TOML file representation
#[derive(Debug, Deserialize)]
struct FileConfig {
    region: Option<RegionBounds>,
    bucket: Option<String>,
    upload_limit_bytes: Option<u64>,
    default_view: Option<MapView>,
    focus_zoom: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn defaults_cover_south_africa() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.region.value, RegionBounds::SOUTH_AFRICA);
        assert_eq!(config.bucket.value, DEFAULT_BUCKET);
        assert_eq!(config.upload_limit_bytes.value, DEFAULT_UPLOAD_LIMIT_BYTES);
        config.validate().unwrap();
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bucket = "site-media"
upload_limit_bytes = 1048576

[region]
lat_min = -35.0
lat_max = -22.0
lng_min = 16.0
lng_max = 33.0
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();
        assert_eq!(config.bucket.value, "site-media");
        assert_eq!(config.bucket.source, ConfigSource::File);
        assert_eq!(config.upload_limit_bytes.value, 1_048_576);
        // Untouched values keep their defaults
        assert_eq!(config.focus_zoom.value, 15);
        assert_eq!(config.focus_zoom.source, ConfigSource::Default);
    }

    #[test]
    #[serial]
    fn environment_outranks_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bucket = \"from-file\"").unwrap();

        env::set_var("GEOMARK_BUCKET", "from-env");
        let config = LayeredConfig::with_defaults()
            .load_from_file(file.path())
            .unwrap()
            .load_from_env()
            .unwrap();
        env::remove_var("GEOMARK_BUCKET");

        assert_eq!(config.bucket.value, "from-env");
        assert_eq!(config.bucket.source, ConfigSource::Environment);
    }

    #[test]
    #[serial]
    fn malformed_env_limit_is_rejected() {
        env::set_var("GEOMARK_UPLOAD_LIMIT_BYTES", "a lot");
        let result = LayeredConfig::with_defaults().load_from_env();
        env::remove_var("GEOMARK_UPLOAD_LIMIT_BYTES");
        assert!(matches!(result, Err(GeomarkError::ConfigInvalid { .. })));
    }

    #[test]
    fn inverted_region_fails_validation() {
        let mut config = LayeredConfig::with_defaults();
        config.region.value.lat_min = 10.0;
        config.region.value.lat_max = -10.0;
        assert!(config.validate().is_err());
    }
}
