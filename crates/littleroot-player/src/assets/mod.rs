//! Asset store: artwork and audio read from the asset directory
//!
//! Images are `<name>.bmp`, sounds `<name>.ogg` or `<name>.wav`. Missing or
//! unreadable images are replaced by placeholders of the shipped artwork
//! size so the game stays playable; missing sounds stay silent.

pub mod bitmap;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use littleroot_world::assets::{DEFAULT_IMAGE_SIZES, DEFAULT_SOUNDS};
use littleroot_world::AssetCatalog;

use bitmap::DecodedBitmap;

const SOUND_EXTENSIONS: [&str; 2] = ["ogg", "wav"];

/// Loaded images and sound files, keyed by asset name
pub struct AssetStore {
    images: HashMap<String, DecodedBitmap>,
    sounds: HashMap<String, Vec<u8>>,
    /// Base path to the assets
    pub asset_dir: PathBuf,
}

impl AssetStore {
    /// Load every asset the game names from `asset_dir`
    pub fn load(asset_dir: &Path) -> Result<Self> {
        if !asset_dir.is_dir() {
            tracing::warn!(
                "Asset directory {} not found, using placeholders",
                asset_dir.display()
            );
        }

        let mut images = HashMap::new();
        for (i, (name, width, height)) in DEFAULT_IMAGE_SIZES.iter().enumerate() {
            let path = asset_dir.join(format!("{}.bmp", name));
            let bitmap = match std::fs::read(&path) {
                Ok(data) => match bitmap::decode_bmp(&data) {
                    Ok(bmp) => {
                        tracing::debug!("Loaded {} ({}x{})", path.display(), bmp.width, bmp.height);
                        bmp
                    }
                    Err(e) => {
                        tracing::warn!("Failed to decode {}: {}", path.display(), e);
                        bitmap::placeholder(*width as u32, *height as u32, placeholder_color(i))
                    }
                },
                Err(_) => {
                    tracing::debug!("Missing {}, using placeholder", path.display());
                    bitmap::placeholder(*width as u32, *height as u32, placeholder_color(i))
                }
            };
            images.insert(name.to_string(), bitmap);
        }

        let mut sounds = HashMap::new();
        for name in DEFAULT_SOUNDS {
            let found = SOUND_EXTENSIONS
                .iter()
                .map(|ext| asset_dir.join(format!("{}.{}", name, ext)))
                .find_map(|path| std::fs::read(&path).ok().map(|data| (path, data)));
            match found {
                Some((path, data)) => {
                    tracing::debug!("Loaded {} ({} bytes)", path.display(), data.len());
                    sounds.insert(name.to_string(), data);
                }
                None => tracing::debug!("No audio for '{}'", name),
            }
        }

        tracing::info!(
            "Assets: {} images, {} of {} sounds from {}",
            images.len(),
            sounds.len(),
            DEFAULT_SOUNDS.len(),
            asset_dir.display()
        );

        Ok(Self {
            images,
            sounds,
            asset_dir: asset_dir.to_path_buf(),
        })
    }

    pub fn image(&self, name: &str) -> Option<&DecodedBitmap> {
        self.images.get(name)
    }

    /// Encoded sound file bytes
    pub fn sound(&self, name: &str) -> Option<&[u8]> {
        self.sounds.get(name).map(Vec::as_slice)
    }

    /// Register every asset with the core and close the loading gate.
    /// Sounds are registered even without a file; they just play silence.
    pub fn catalog(&self) -> Result<AssetCatalog> {
        let mut catalog = AssetCatalog::new();
        for (name, bmp) in &self.images {
            catalog.add_image(name, bmp.width as i32, bmp.height as i32)?;
        }
        for name in DEFAULT_SOUNDS {
            catalog.add_sound(name);
        }
        catalog.finish_loading();
        Ok(catalog)
    }
}

fn placeholder_color(index: usize) -> [u8; 3] {
    const COLORS: [[u8; 3]; 4] = [
        [120, 180, 120],
        [180, 160, 120],
        [140, 150, 200],
        [200, 200, 200],
    ];
    COLORS[index % COLORS.len()]
}
