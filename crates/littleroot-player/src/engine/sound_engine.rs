//! Sound engine: audio playback via rodio
//!
//! Carries out the core's audio cues: looping background music (restarting
//! only when the track changes) and one-shot effects, all at the configured
//! volume.

use std::io::Cursor;

use littleroot_world::AudioCue;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::AssetStore;

/// Background music plays a little under the effects
const MUSIC_GAIN: f32 = 0.6;

/// Output stream plus the music and effect channels
pub struct SoundEngine {
    /// rodio output stream (must be kept alive)
    _stream: OutputStream,
    /// Handle for creating new sinks
    handle: OutputStreamHandle,
    /// Background music loop
    bg_sink: Option<Sink>,
    /// One-shot sound effects (kept alive until finished)
    sfx_sinks: Vec<Sink>,
    /// Current background track name (to avoid restarting same track)
    current_bg: String,
    /// Master volume (0.0 to 1.0)
    volume: f32,
}

impl SoundEngine {
    /// Create a new sound engine. Returns None if audio device unavailable.
    pub fn new() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                tracing::info!("Audio output initialized");
                Some(Self {
                    _stream: stream,
                    handle,
                    bg_sink: None,
                    sfx_sinks: Vec::new(),
                    current_bg: String::new(),
                    volume: 1.0,
                })
            }
            Err(e) => {
                tracing::warn!("Failed to initialize audio: {}", e);
                None
            }
        }
    }

    pub fn play_cue(&mut self, cue: &AudioCue, assets: &AssetStore) {
        match cue {
            AudioCue::Music(name) => self.play_music(name, assets),
            AudioCue::Effect(name) => self.play_effect(name, assets),
        }
    }

    fn decode(name: &str, assets: &AssetStore) -> Option<Decoder<Cursor<Vec<u8>>>> {
        let bytes = assets.sound(name)?;
        match Decoder::new(Cursor::new(bytes.to_vec())) {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::warn!("Failed to decode sound '{}': {}", name, e);
                None
            }
        }
    }

    /// Play a one-shot sound effect
    pub fn play_effect(&mut self, name: &str, assets: &AssetStore) {
        let Some(source) = Self::decode(name, assets) else {
            tracing::debug!("Effect '{}' has no audio", name);
            return;
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                sink.append(source);
                self.sfx_sinks.push(sink);
            }
            Err(e) => tracing::warn!("Failed to create SFX sink: {}", e),
        }
    }

    /// Start a looping background track. If the same name is already
    /// playing, this is a no-op.
    pub fn play_music(&mut self, name: &str, assets: &AssetStore) {
        if name == self.current_bg {
            return;
        }
        self.stop_background();
        // remembered even when silent so a missing file is not retried
        self.current_bg = name.to_string();

        let Some(source) = Self::decode(name, assets) else {
            tracing::debug!("Music '{}' has no audio", name);
            return;
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.volume * MUSIC_GAIN);
                sink.append(source.repeat_infinite());
                self.bg_sink = Some(sink);
                tracing::debug!("Background loop: '{}'", name);
            }
            Err(e) => tracing::warn!("Failed to create BG sink: {}", e),
        }
    }

    /// Stop the background loop
    pub fn stop_background(&mut self) {
        if let Some(sink) = self.bg_sink.take() {
            sink.stop();
        }
        self.current_bg.clear();
    }

    /// Stop all sounds (background + SFX)
    pub fn stop_all(&mut self) {
        self.stop_background();
        for sink in self.sfx_sinks.drain(..) {
            sink.stop();
        }
    }

    /// Set master volume (0.0 to 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
        if let Some(bg) = &self.bg_sink {
            bg.set_volume(self.volume * MUSIC_GAIN);
        }
        for sink in &self.sfx_sinks {
            sink.set_volume(self.volume);
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Drop finished SFX sinks (called every frame from the game loop)
    pub fn gc(&mut self) {
        self.sfx_sinks.retain(|s| !s.empty());
    }
}
