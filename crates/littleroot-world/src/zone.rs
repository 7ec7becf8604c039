//! Collision zones: rectangles that block movement and may carry one action.

use crate::dialogue::DialogueScript;
use crate::error::{Result, WorldError};
use crate::map::MapId;

/// Rectangle edges. `upper <= lower` and `left <= right` after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub upper: i32,
    pub lower: i32,
    pub left: i32,
    pub right: i32,
}

impl Bounds {
    pub fn new(upper: i32, lower: i32, left: i32, right: i32) -> Result<Self> {
        if upper > lower || left > right {
            return Err(WorldError::InvalidZone {
                upper,
                lower,
                left,
                right,
            });
        }
        Ok(Self {
            upper,
            lower,
            left,
            right,
        })
    }

    pub fn spans_vertically(&self, y: i32) -> bool {
        y >= self.upper && y <= self.lower
    }

    pub fn spans_horizontally(&self, x: i32) -> bool {
        x >= self.left && x <= self.right
    }
}

/// Passable sub-range along the zone's bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorSpan {
    pub start: i32,
    pub end: i32,
}

impl DoorSpan {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(WorldError::InvalidDoorSpan { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, v: i32) -> bool {
        v >= self.start && v <= self.end
    }
}

/// Which coordinate the zone's horizontal edges are measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneFrame {
    /// Fixed on screen: the actor moves, horizontal checks use actor x
    Screen,
    /// Part of the scrolling world: horizontal checks use the camera
    World,
}

/// What touching the zone's door does. A zone carries at most one.
#[derive(Debug, Clone)]
pub enum ZoneAction {
    Obstacle,
    Exit { door: DoorSpan, target: MapId },
    Talk { door: DoorSpan, script: DialogueScript },
}

#[derive(Debug, Clone)]
pub struct Zone {
    pub name: &'static str,
    pub bounds: Bounds,
    pub frame: ZoneFrame,
    pub action: ZoneAction,
}

impl Zone {
    pub fn obstacle(name: &'static str, bounds: Bounds, frame: ZoneFrame) -> Self {
        Self {
            name,
            bounds,
            frame,
            action: ZoneAction::Obstacle,
        }
    }

    pub fn exit(
        name: &'static str,
        bounds: Bounds,
        frame: ZoneFrame,
        door: DoorSpan,
        target: MapId,
    ) -> Self {
        Self {
            name,
            bounds,
            frame,
            action: ZoneAction::Exit { door, target },
        }
    }

    pub fn talk(
        name: &'static str,
        bounds: Bounds,
        frame: ZoneFrame,
        door: DoorSpan,
        script: DialogueScript,
    ) -> Self {
        Self {
            name,
            bounds,
            frame,
            action: ZoneAction::Talk { door, script },
        }
    }

    pub fn door(&self) -> Option<DoorSpan> {
        match &self.action {
            ZoneAction::Obstacle => None,
            ZoneAction::Exit { door, .. } | ZoneAction::Talk { door, .. } => Some(*door),
        }
    }
}

/// All zones of one map. Order carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_bounds_rejected() {
        assert!(matches!(
            Bounds::new(200, 100, 0, 10),
            Err(WorldError::InvalidZone { .. })
        ));
        assert!(Bounds::new(0, 10, 20, 5).is_err());
        assert!(Bounds::new(370, 370, 203, 243).is_ok());
    }

    #[test]
    fn reversed_door_span_rejected() {
        assert_eq!(
            DoorSpan::new(593, 585),
            Err(WorldError::InvalidDoorSpan { start: 593, end: 585 })
        );
        let span = DoorSpan::new(585, 593).unwrap();
        assert!(span.contains(585) && span.contains(593));
        assert!(!span.contains(594));
    }

    #[test]
    fn obstacle_has_no_door() {
        let z = Zone::obstacle("tree", Bounds::new(0, 10, 0, 10).unwrap(), ZoneFrame::Screen);
        assert!(z.door().is_none());
    }
}
