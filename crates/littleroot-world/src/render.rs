//! Draw and audio requests produced by a tick.
//!
//! The core never touches pixels or speakers; it describes what should be
//! shown and heard, and the player carries it out.

use crate::geometry::{Point, Rect};

/// One thing to draw, in painter's order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawRequest {
    /// Blit `src` of a named image into `dst`
    Image {
        image: &'static str,
        src: Rect,
        dst: Rect,
    },
    /// Dialogue box with up to two lines of revealed text
    DialogueBox { lines: [Option<String>; 2] },
    /// Name being typed during name entry
    NameEntry { text: String },
    /// Inventory panel rows: (item, quantity)
    Inventory { rows: Vec<(String, u32)> },
    /// Shop panel rows: (item, price) and highlighted row
    Shop { rows: Vec<(String, u32)>, cursor: usize },
    /// Debug line with position and camera
    Hud { text: String, at: Point },
}

/// Sound requests, drained by the audio collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCue {
    /// Replace the background music (no-op if already playing)
    Music(&'static str),
    /// One-shot effect
    Effect(&'static str),
}

/// Output of one tick
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub draws: Vec<DrawRequest>,
    pub audio: Vec<AudioCue>,
}

impl Frame {
    pub fn push(&mut self, request: DrawRequest) {
        self.draws.push(request);
    }

    pub fn dialogue_lines(&self) -> Option<&[Option<String>; 2]> {
        self.draws.iter().find_map(|d| match d {
            DrawRequest::DialogueBox { lines } => Some(lines),
            _ => None,
        })
    }
}
