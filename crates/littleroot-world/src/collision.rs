//! Collision & border engine.
//!
//! Each zone is resolved on its own against the current actor/camera state.
//! Touching an edge zeroes velocity on that axis and pushes the mover one
//! pixel back out, which leaves the actor exactly one pixel below the
//! zone's lower edge when it walked up into it: the door position.

use crate::actor::Actor;
use crate::zone::{Zone, ZoneFrame};

/// Outcome of resolving one zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Not touching the zone's door (possibly blocked by its edges)
    None,
    /// Standing at the zone's door
    Door,
}

/// Clamp actor/camera against `zone` and report door contact.
pub fn resolve(zone: &Zone, actor: &mut Actor, camera: &mut i32) -> Contact {
    let b = zone.bounds;
    match zone.frame {
        ZoneFrame::World => {
            if *camera == b.left && b.spans_vertically(actor.pos.y) {
                actor.vel.x = 0;
                *camera -= 1;
            }
            if *camera == b.right && b.spans_vertically(actor.pos.y) {
                actor.vel.x = 0;
                *camera += 1;
            }
            if actor.pos.y == b.upper && b.spans_horizontally(*camera) {
                actor.vel.y = 0;
                actor.pos.y -= 1;
            }
            if actor.pos.y == b.lower && b.spans_horizontally(*camera) {
                actor.vel.y = 0;
                actor.pos.y += 1;
            }
        }
        ZoneFrame::Screen => {
            if actor.pos.x == b.left && b.spans_vertically(actor.pos.y) {
                actor.vel.x = 0;
                actor.pos.x -= 1;
            }
            if actor.pos.x == b.right && b.spans_vertically(actor.pos.y) {
                actor.vel.x = 0;
                actor.pos.x += 1;
            }
            if actor.pos.y == b.upper && b.spans_horizontally(actor.pos.x) {
                actor.vel.y = 0;
                actor.pos.y -= 1;
            }
            if actor.pos.y == b.lower && b.spans_horizontally(actor.pos.x) {
                actor.vel.y = 0;
                actor.pos.y += 1;
            }
        }
    }

    door_contact(zone, actor, *camera)
}

/// Whether the actor stands at the zone's door: one pixel off the lower
/// edge, with the transverse coordinate inside the door span.
pub fn door_contact(zone: &Zone, actor: &Actor, camera: i32) -> Contact {
    let Some(door) = zone.door() else {
        return Contact::None;
    };
    let lower = zone.bounds.lower;
    if actor.pos.y != lower + 1 && actor.pos.y != lower - 1 {
        return Contact::None;
    }
    let transverse = match zone.frame {
        ZoneFrame::World => camera,
        ZoneFrame::Screen => actor.pos.x,
    };
    if door.contains(transverse) {
        Contact::Door
    } else {
        Contact::None
    }
}

/// Edge detector over door contacts: a zone fires once when contact
/// begins and not again until the actor has left its door.
#[derive(Debug, Clone, Default)]
pub struct ContactLatch {
    touching: Vec<usize>,
    primed: bool,
}

impl ContactLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; the next update only records contacts.
    /// Called on map switches so the door just used does not fire back.
    pub fn reset(&mut self) {
        self.touching.clear();
        self.primed = false;
    }

    /// Forget that `index` is touching so it fires again on the next update
    /// while still in contact. Used for doors that were reached but not
    /// acted on.
    pub fn release(&mut self, index: usize) {
        self.touching.retain(|&i| i != index);
    }

    /// Feed this frame's contacted zone indices; returns those that just
    /// started touching.
    pub fn update(&mut self, contacts: &[usize]) -> Vec<usize> {
        let fresh = if self.primed {
            contacts
                .iter()
                .copied()
                .filter(|i| !self.touching.contains(i))
                .collect()
        } else {
            Vec::new()
        };
        self.touching.clear();
        self.touching.extend_from_slice(contacts);
        self.primed = true;
        fresh
    }
}
