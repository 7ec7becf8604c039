/// Littleroot: a top-down overworld where you walk a small town, enter its
/// buildings and talk to the people inside.
///
/// Architecture:
///   assets/   BMP decoding and sound file loading
///   engine/   Window, drawing, audio and the game loop
///
/// All game rules live in the `littleroot-world` crate.

mod assets;
mod engine;

use anyhow::{Context, Result};
use clap::Parser;
use littleroot_common::{AppConfig, DEFAULT_CONFIG_FILE};
use littleroot_world::shop;
use littleroot_world::{GameSession, Inventory};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Walk around Littleroot town
#[derive(Parser, Debug)]
#[command(name = "littleroot", version, about, long_about = None)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Asset directory, overrides the config
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Window scale, overrides the config
    #[arg(short, long)]
    scale: Option<u32>,

    /// Volume 0-10, overrides the config
    #[arg(long)]
    volume: Option<u8>,

    /// Skip the intro and start outdoors under this name
    #[arg(long)]
    name: Option<String>,

    /// Disable audio
    #[arg(long)]
    mute: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.assets {
            config.asset_dir = dir.clone();
        }
        if let Some(scale) = self.scale {
            config.window.scale = scale;
        }
        if let Some(volume) = self.volume {
            config.audio.volume = volume;
        }
        if let Some(name) = &self.name {
            config.player.name = Some(name.clone());
        }
        if self.mute {
            config.audio.enabled = false;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_found = args.config.exists();
    let mut config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    args.apply(&mut config);
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("littleroot={}", config.log_level).parse()?),
        )
        .init();

    tracing::info!("Littleroot v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("{}", config_source(&args.config, config_found));

    let store = assets::AssetStore::load(&config.asset_dir)?;
    let catalog = store.catalog().context("Failed to register assets")?;

    let inventory = starting_inventory(&config);
    let session = match &config.player.name {
        Some(name) => GameSession::overworld(catalog, &name.to_uppercase(), inventory),
        None => GameSession::new(catalog, inventory),
    }
    .context("Failed to build the game world")?;

    engine::run(
        session,
        store,
        engine::EngineSettings {
            scale: config.window.scale as usize,
            fps: config.window.fps as usize,
            audio: config.audio.enabled,
            volume: config.audio.gain(),
        },
    )
}

/// Where the settings came from, logged once tracing is up
fn config_source(path: &Path, found: bool) -> String {
    if found {
        format!("Config loaded from {}", path.display())
    } else {
        format!("No config at {}, using defaults", path.display())
    }
}

/// Build the starting inventory, skipping items the mart does not know
fn starting_inventory(config: &AppConfig) -> Inventory {
    config
        .player
        .starting_inventory
        .iter()
        .filter(|stack| {
            let known = shop::item(&stack.name).is_some();
            if !known {
                tracing::warn!("Unknown starting item '{}', skipped", stack.name);
            }
            known
        })
        .map(|stack| (stack.name.clone(), stack.quantity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["littleroot", "--scale", "2", "--volume", "3", "--mute"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.window.scale, 2);
        assert_eq!(config.audio.volume, 3);
        assert!(!config.audio.enabled);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_config_source_message() {
        let path = Path::new("littleroot.toml");
        assert_eq!(config_source(path, true), "Config loaded from littleroot.toml");
        assert_eq!(
            config_source(path, false),
            "No config at littleroot.toml, using defaults"
        );
    }

    #[test]
    fn test_unknown_starting_items_dropped() {
        let config = AppConfig::from_toml_str(
            r#"
            [[player.starting_inventory]]
            name = "Potion"
            quantity = 2

            [[player.starting_inventory]]
            name = "Rare Candy"
            quantity = 1
            "#,
        )
        .unwrap();
        let inv = starting_inventory(&config);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.quantity("Potion"), 2);
    }
}
