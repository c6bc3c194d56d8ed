//! Tool configuration module.
//!
//! Handles loading and validating `aquamark.toml`. Every CLI flag has a
//! configuration-supplied default, so a config file plus a bare `aquamark run`
//! is a complete invocation. The config is loaded once in `main` and passed
//! down by reference — there are no process-wide globals.
//!
//! ## Config File Location
//!
//! `aquamark.toml` in the working directory, or wherever `--config` points.
//! A missing file means stock defaults; a sparse file overrides only the
//! keys it names. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! [locations]
//! source = "Images"             # Default source directory or file
//! target = "Output"             # Default destination directory
//! watermark_file = "watermark.png"
//! filetypes = ["jpg", "jpeg", "png"]  # Extensions picked up when source is a directory
//! target_thumbnail = "Thumbs"   # Subdirectory name for thumbnails
//! target_resizes = "Resizes"    # Subdirectory name for secondary resizes
//!
//! [output]
//! size = "640x480"              # Main output size
//! thumb_size = "60x40"          # Thumbnail size
//! resize_size = "200x400"       # Secondary resize size
//! append = "_wm"                # Appended to the stem when destination is a directory
//! # default_name = "photo"      # Optional explicit output base filename
//! ```

use crate::types::Size;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `aquamark.toml`.
///
/// All fields have defaults mirroring the original tool's stock `env.cfg`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Source/destination locations and directory naming.
    pub locations: LocationsConfig,
    /// Output sizing and naming.
    pub output: OutputConfig,
}

impl ToolConfig {
    /// Load config from `path`, falling back to stock defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locations.filetypes.is_empty() {
            return Err(ConfigError::Validation(
                "locations.filetypes must not be empty".into(),
            ));
        }
        for dir in [
            &self.locations.target_thumbnail,
            &self.locations.target_resizes,
        ] {
            if dir.is_empty() || dir.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "subdirectory name '{dir}' must be a bare directory name"
                )));
            }
        }
        Ok(())
    }
}

/// Source/destination locations and the fixed derivative subdirectory names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationsConfig {
    /// Default source directory or file.
    pub source: String,
    /// Default destination directory.
    pub target: String,
    /// Default watermark image.
    pub watermark_file: String,
    /// Extensions recognized when scanning a source directory.
    pub filetypes: Vec<String>,
    /// Subdirectory name for thumbnails, created under the destination.
    pub target_thumbnail: String,
    /// Subdirectory name for secondary resizes, created under the destination.
    pub target_resizes: String,
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            source: "Images".to_string(),
            target: "Output".to_string(),
            watermark_file: "watermark.png".to_string(),
            filetypes: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            target_thumbnail: "Thumbs".to_string(),
            target_resizes: "Resizes".to_string(),
        }
    }
}

/// Output sizing and naming defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Main output size.
    pub size: Size,
    /// Thumbnail derivative size.
    pub thumb_size: Size,
    /// Secondary resize derivative size.
    pub resize_size: Size,
    /// Token appended to the filename stem when the destination is a directory.
    pub append: String,
    /// Optional explicit output base filename, overriding the source's.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_name: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            size: Size::new(640, 480),
            thumb_size: Size::new(60, 40),
            resize_size: Size::new(200, 400),
            append: "_wm".to_string(),
            default_name: None,
        }
    }
}

/// Render a documented stock config file. Backs the `gen-config` subcommand.
pub fn stock_config_toml() -> String {
    let defaults = ToolConfig::default();
    format!(
        r#"# aquamark configuration
# All keys are optional — defaults shown below.

[locations]
# Default source directory (or file) when --source is not given.
source = "{source}"
# Default destination directory when --dest is not given.
target = "{target}"
# Watermark image composited onto every main output.
watermark_file = "{watermark}"
# Extensions picked up when the source is a directory.
filetypes = [{filetypes}]
# Subdirectory (under the destination) for thumbnails.
target_thumbnail = "{thumb_dir}"
# Subdirectory (under the destination) for secondary resizes.
target_resizes = "{resize_dir}"

[output]
# Main output size.
size = "{size}"
# Thumbnail size (only used with --thumbs).
thumb_size = "{thumb_size}"
# Secondary resize size (only used with --resizes).
resize_size = "{resize_size}"
# Appended to the filename stem when the destination is a directory.
append = "{append}"
# Explicit output base filename; uncomment to override the source's name.
# default_name = "photo"
"#,
        source = defaults.locations.source,
        target = defaults.locations.target,
        watermark = defaults.locations.watermark_file,
        filetypes = defaults
            .locations
            .filetypes
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(", "),
        thumb_dir = defaults.locations.target_thumbnail,
        resize_dir = defaults.locations.target_resizes,
        size = defaults.output.size,
        thumb_size = defaults.output.thumb_size,
        resize_size = defaults.output.resize_size,
        append = defaults.output.append,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_env() {
        let config = ToolConfig::default();
        assert_eq!(config.locations.target_thumbnail, "Thumbs");
        assert_eq!(config.locations.target_resizes, "Resizes");
        assert_eq!(config.output.size, Size::new(640, 480));
        assert_eq!(config.output.append, "_wm");
        assert!(config.output.default_name.is_none());
    }

    #[test]
    fn sparse_config_keeps_defaults() {
        let config: ToolConfig = toml::from_str(
            r#"
            [output]
            size = "1024x768"
            "#,
        )
        .unwrap();
        assert_eq!(config.output.size, Size::new(1024, 768));
        assert_eq!(config.output.thumb_size, Size::new(60, 40));
        assert_eq!(config.locations.target, "Output");
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<ToolConfig, _> = toml::from_str(
            r#"
            [output]
            sizes = "640x480"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn bad_size_string_rejected() {
        let result: Result<ToolConfig, _> = toml::from_str(
            r#"
            [output]
            size = "640by480"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_filetypes_fail_validation() {
        let config: ToolConfig = toml::from_str(
            r#"
            [locations]
            filetypes = []
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn nested_subdirectory_name_fails_validation() {
        let config: ToolConfig = toml::from_str(
            r#"
            [locations]
            target_thumbnail = "a/b"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = ToolConfig::load(Path::new("/nonexistent/aquamark.toml")).unwrap();
        assert_eq!(config.locations.source, "Images");
    }

    #[test]
    fn load_reads_and_validates_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("aquamark.toml");
        fs::write(&path, "[locations]\ntarget = \"Published\"\n").unwrap();
        let config = ToolConfig::load(&path).unwrap();
        assert_eq!(config.locations.target, "Published");
    }

    #[test]
    fn stock_config_parses_back() {
        let config: ToolConfig = toml::from_str(&stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.output.size, ToolConfig::default().output.size);
    }
}
