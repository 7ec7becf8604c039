//! Asset gate between the loader and the core.
//!
//! The player registers every image (with its pixel size) and sound by
//! name, then signals completion with [`AssetCatalog::finish_loading`].
//! Image sizes drive map borders, so reading them early is a configuration
//! error rather than a silent zero.

use std::collections::HashMap;

use crate::error::{Result, WorldError};
use crate::geometry::Point;

/// Canonical asset names used by the world data
pub mod names {
    pub const TITLE: &str = "title_screen";
    pub const INTRO: &str = "introduction_image";
    pub const TEXTBOX: &str = "textbox_image";
    pub const OUTDOOR: &str = "map_image";
    pub const CHARACTER: &str = "character_image";
    pub const CENTER: &str = "pokecenter_map";
    pub const MART: &str = "pokemart_map";
    pub const GYM: &str = "gym_map";
    pub const HOUSE: &str = "house";

    pub const INTRO_MUSIC: &str = "welcome";
    pub const TOWN_MUSIC: &str = "littleroot_theme";
    pub const CONFIRM_SOUND: &str = "a_button";
}

/// Centre and size of an image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub center: Point,
    pub width: i32,
    pub height: i32,
}

impl ImageInfo {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            center: Point::new(width / 2, height / 2),
            width,
            height,
        }
    }
}

/// Named image/sound registry, readable only after loading completes
#[derive(Debug, Default)]
pub struct AssetCatalog {
    images: HashMap<String, ImageInfo>,
    sounds: Vec<String>,
    loaded: bool,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image. Registering after completion reopens the gate,
    /// matching a second loading pass.
    pub fn add_image(&mut self, name: &str, width: i32, height: i32) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::EmptyImage {
                name: name.to_string(),
                width,
                height,
            });
        }
        self.images.insert(name.to_string(), ImageInfo::new(width, height));
        self.loaded = false;
        Ok(())
    }

    pub fn add_sound(&mut self, name: &str) {
        if !self.sounds.iter().any(|s| s == name) {
            self.sounds.push(name.to_string());
        }
        self.loaded = false;
    }

    /// The load-complete signal
    pub fn finish_loading(&mut self) {
        tracing::debug!(
            "Asset catalog ready: {} images, {} sounds",
            self.images.len(),
            self.sounds.len()
        );
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn image(&self, name: &str) -> Result<ImageInfo> {
        if !self.loaded {
            return Err(WorldError::AssetsNotLoaded(name.to_string()));
        }
        self.images
            .get(name)
            .copied()
            .ok_or_else(|| WorldError::UnknownAsset(name.to_string()))
    }

    /// Validate a sound name; returns it back for use in audio cues
    pub fn sound<'a>(&self, name: &'a str) -> Result<&'a str> {
        if !self.loaded {
            return Err(WorldError::AssetsNotLoaded(name.to_string()));
        }
        if self.sounds.iter().any(|s| s == name) {
            Ok(name)
        } else {
            Err(WorldError::UnknownAsset(name.to_string()))
        }
    }

    /// Catalog with the sizes of the shipped artwork, marked loaded.
    /// Used by tests and as the loader's fallback when files are missing.
    pub fn with_default_sizes() -> Self {
        let mut catalog = Self::new();
        for (name, w, h) in DEFAULT_IMAGE_SIZES {
            // sizes are non-zero constants
            let _ = catalog.add_image(name, *w, *h);
        }
        for name in DEFAULT_SOUNDS {
            catalog.add_sound(name);
        }
        catalog.finish_loading();
        catalog
    }
}

/// Artwork sizes: (name, width, height)
pub const DEFAULT_IMAGE_SIZES: &[(&str, i32, i32)] = &[
    (names::TITLE, 480, 480),
    (names::INTRO, 480, 480),
    (names::TEXTBOX, 460, 83),
    (names::OUTDOOR, 960, 480),
    (names::CHARACTER, 256, 256),
    (names::CENTER, 325, 295),
    (names::MART, 352, 264),
    (names::GYM, 289, 256),
    (names::HOUSE, 354, 270),
];

pub const DEFAULT_SOUNDS: &[&str] = &[names::INTRO_MUSIC, names::TOWN_MUSIC, names::CONFIRM_SOUND];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_before_loading_is_rejected() {
        let mut c = AssetCatalog::new();
        c.add_image("map_image", 480, 480).unwrap();
        assert_eq!(
            c.image("map_image"),
            Err(WorldError::AssetsNotLoaded("map_image".into()))
        );
        c.finish_loading();
        assert_eq!(c.image("map_image").unwrap().center, Point::new(240, 240));
    }

    #[test]
    fn unknown_image_is_an_error() {
        let c = AssetCatalog::with_default_sizes();
        assert!(matches!(c.image("nope"), Err(WorldError::UnknownAsset(_))));
    }

    #[test]
    fn adding_after_load_closes_gate() {
        let mut c = AssetCatalog::with_default_sizes();
        c.add_sound("extra");
        assert!(!c.is_loaded());
        assert!(c.sound("extra").is_err());
        c.finish_loading();
        assert_eq!(c.sound("extra"), Ok("extra"));
    }

    #[test]
    fn empty_image_rejected() {
        let mut c = AssetCatalog::new();
        assert!(matches!(c.add_image("x", 0, 10), Err(WorldError::EmptyImage { .. })));
    }

    #[test]
    fn centers_use_integer_halves() {
        let info = ImageInfo::new(325, 295);
        assert_eq!(info.center, Point::new(162, 147));
    }
}
