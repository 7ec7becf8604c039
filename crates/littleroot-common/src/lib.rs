//! Configuration types shared across Littleroot crates

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "littleroot.toml";

/// Highest value of the 0..=10 volume scale
pub const MAX_VOLUME: u8 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Volume {0} is outside 0..={MAX_VOLUME}")]
    Volume(u8),

    #[error("Window scale must be at least 1")]
    Scale,

    #[error("Frame rate must be at least 1")]
    FrameRate,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Integer upscale of the 480x480 game surface
    pub scale: u32,
    pub fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { scale: 1, fps: 60 }
    }
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// 0 (silent) to 10 (full)
    pub volume: u8,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: MAX_VOLUME,
        }
    }
}

impl AudioConfig {
    /// Volume as a playback gain in 0.0..=1.0
    pub fn gain(&self) -> f32 {
        f32::from(self.volume.min(MAX_VOLUME)) / f32::from(MAX_VOLUME)
    }
}

/// One stack of the starting inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub name: String,
    pub quantity: u32,
}

/// Player settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Skip the intro and start outdoors under this name
    pub name: Option<String>,
    pub starting_inventory: Vec<ItemStack>,
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub asset_dir: PathBuf,
    pub log_level: String,
    pub window: WindowConfig,
    pub audio: AudioConfig,
    pub player: PlayerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            log_level: "debug".to_string(),
            window: WindowConfig::default(),
            audio: AudioConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.audio.volume > MAX_VOLUME {
            return Err(ConfigError::Volume(self.audio.volume));
        }
        if self.window.scale == 0 {
            return Err(ConfigError::Scale);
        }
        if self.window.fps == 0 {
            return Err(ConfigError::FrameRate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.audio.gain(), 1.0);
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::from_toml_str(
            r#"
            asset_dir = "art"

            [audio]
            volume = 5

            [[player.starting_inventory]]
            name = "Potion"
            quantity = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("art"));
        assert_eq!(config.audio.gain(), 0.5);
        assert!(config.audio.enabled);
        assert_eq!(config.window.scale, 1);
        assert_eq!(
            config.player.starting_inventory,
            vec![ItemStack {
                name: "Potion".into(),
                quantity: 3
            }]
        );
    }

    #[test]
    fn test_volume_out_of_range() {
        let err = AppConfig::from_toml_str("[audio]\nvolume = 11").unwrap_err();
        assert!(matches!(err, ConfigError::Volume(11)));
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(matches!(
            AppConfig::from_toml_str("[window]\nscale = 0"),
            Err(ConfigError::Scale)
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.log_level, "debug");
    }
}
