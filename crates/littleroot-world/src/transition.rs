//! Map transition manager.
//!
//! Interiors are only reachable from the outdoor world. Entering one saves
//! the camera and actor position; leaving restores both exactly.

use crate::actor::Actor;
use crate::geometry::Point;
use crate::map::{scroll_max, Atlas, Borders, MapId};
use crate::render::AudioCue;

/// Outdoor state saved while the actor is inside a building
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnPoint {
    pub camera: i32,
    pub position: Point,
}

/// Which map is active and the borders that go with it
#[derive(Debug, Clone)]
pub struct MapState {
    active: MapId,
    borders: Borders,
    return_point: Option<ReturnPoint>,
}

impl Default for MapState {
    fn default() -> Self {
        Self::new()
    }
}

impl MapState {
    /// Outdoors with no return point; call [`MapState::enter_map`] to place
    /// the actor.
    pub fn new() -> Self {
        Self {
            active: MapId::Outdoor,
            borders: Borders::OUTDOOR,
            return_point: None,
        }
    }

    pub fn active(&self) -> MapId {
        self.active
    }

    pub fn borders(&self) -> Borders {
        self.borders
    }

    pub fn return_point(&self) -> Option<ReturnPoint> {
        self.return_point
    }

    /// Switch to `target`, repositioning the actor and camera. Returns the
    /// cue for the new map's music.
    pub fn enter_map(
        &mut self,
        target: MapId,
        atlas: &Atlas,
        actor: &mut Actor,
        camera: &mut i32,
    ) -> AudioCue {
        let def = atlas.get(target);

        if target.is_outdoor() {
            match self.return_point.take() {
                Some(rp) => {
                    *camera = rp.camera;
                    actor.pos = rp.position;
                }
                None => {
                    *camera = scroll_max();
                    actor.pos = Actor::screen_center();
                }
            }
        } else {
            if self.active.is_outdoor() {
                self.return_point = Some(ReturnPoint {
                    camera: *camera,
                    position: actor.pos,
                });
            } else {
                tracing::warn!(
                    "Entering {} from {} (not outdoors); keeping previous return point",
                    target.label(),
                    self.active.label()
                );
            }
            actor.pos = def.entry_point();
        }

        actor.stop();
        self.active = target;
        self.borders = def.borders();
        tracing::debug!(
            "Entered {} at ({}, {}), camera {}",
            target.label(),
            actor.pos.x,
            actor.pos.y,
            camera
        );
        AudioCue::Music(def.music)
    }
}
