//! Configuration file handling for hiptext.
//!
//! Loads configuration from `~/.config/hiptext/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ascii::{CharSet, DensityRamp};
use crate::color::Color;
use crate::renderer::{RenderMode, RenderOptions};

/// Configuration file structure for hiptext.
/// Loaded from ~/.config/hiptext/config.toml (or custom path via --config).
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RenderConfig {
    /// color, dual-pixel-simple, dual-pixel-searching or monochrome
    #[serde(default)]
    pub mode: Option<String>,
    /// Terminal background color name or #rrggbb
    #[serde(default)]
    pub background: Option<String>,
    /// Built-in ramp name
    #[serde(default)]
    pub charset: Option<String>,
    /// Custom ramp, sparse to dense; wins over `charset`
    #[serde(default)]
    pub chars: Option<String>,
    #[serde(default)]
    pub space: Option<char>,
    #[serde(default)]
    pub equalize: bool,
    #[serde(default)]
    pub bgprint: bool,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub stepthrough: bool,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Resolve the textual settings into renderer options.
    pub fn render_options(&self) -> Result<RenderOptions, ConfigError> {
        let render = &self.render;
        let mut options = RenderOptions::default();

        if let Some(name) = &render.mode {
            options.mode = RenderMode::from_name(name).ok_or_else(|| ConfigError::Invalid {
                key: "mode",
                message: format!("unknown mode '{}'", name),
            })?;
        }
        if let Some(bg) = &render.background {
            options.background = bg.parse::<Color>().map_err(|e| ConfigError::Invalid {
                key: "background",
                message: e.to_string(),
            })?;
        }
        if let Some(name) = &render.charset {
            let charset = CharSet::from_name(name).ok_or_else(|| ConfigError::Invalid {
                key: "charset",
                message: format!("unknown charset '{}'", name),
            })?;
            options.ramp = charset.ramp();
        }
        if let Some(chars) = &render.chars {
            options.ramp = chars.parse::<DensityRamp>().map_err(|e| ConfigError::Invalid {
                key: "chars",
                message: e.to_string(),
            })?;
        }
        if let Some(space) = render.space {
            options.space = space;
        }
        options.equalize = render.equalize;
        options.bgprint = render.bgprint;
        Ok(options)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },

    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// Write [`DEFAULT_CONFIG`] to `path`, creating parent directories.
/// Refuses to overwrite an existing file.
pub fn init(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_err)?;
    log::info!("wrote default config to {}", path.display());
    Ok(())
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("hiptext").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/hiptext/config.toml")
        })
}

/// Commented template written by `hiptext config init`.
pub const DEFAULT_CONFIG: &str = r#"# hiptext configuration

[render]
# Mode: color, dual-pixel-simple, dual-pixel-searching, monochrome
mode = "color"
# Your terminal's background color (name or #rrggbb)
background = "black"
# Built-in ramp for monochrome mode: blocks, standard, minimal
charset = "blocks"
# Custom ramp, sparse to dense (overrides charset)
# chars = " .:-=+*#%@"
# Glyph printed in color mode cells
# space = " "
# Histogram-equalize every frame
equalize = false
# Paint cells that match the background instead of leaving them blank
bgprint = false

[output]
# Width in columns (default: terminal width)
# width = 80
# Height in rows (default: keep aspect ratio)
# height = 24
# Wait for Return between movie frames
stepthrough = false
"#;
