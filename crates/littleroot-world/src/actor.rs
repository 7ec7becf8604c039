//! The player character: position, velocity, facing, walk frame, inventory.
//!
//! Movement is one pixel per frame on each axis. The actor knows nothing
//! about maps; the active map's outer borders are passed in on update.

use crate::geometry::{Point, Rect};
use crate::map::Borders;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Sprite-sheet cell size of the walking sheet (4 columns × 4 rows)
pub const SPRITE_CELL: i32 = 64;
/// The sprite is drawn at 1/1.5 of its cell size
pub const SPRITE_DRAW_SIZE: i32 = SPRITE_CELL * 2 / 3;
/// Walk cycle length
pub const WALK_FRAMES: u8 = 4;

/// Which way the actor faces. The discriminant is the sprite-sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Down = 0,
    Left = 1,
    Right = 2,
    Up = 3,
}

impl Facing {
    pub fn row(self) -> i32 {
        self as i32
    }
}

/// Per-axis velocity, each component in -1..=1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Velocity {
    pub x: i32,
    pub y: i32,
}

/// Ordered `(item name, quantity)` list carried by an actor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    entries: Vec<(String, u32)>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of an item, stacking onto an existing entry
    pub fn add(&mut self, name: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, q)) => *q = q.saturating_add(quantity),
            None => self.entries.push((name.to_string(), quantity)),
        }
    }

    pub fn quantity(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, q)| *q)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut inv = Inventory::new();
        for (name, qty) in iter {
            inv.add(&name, qty);
        }
        inv
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Actor {
    pub pos: Point,
    pub vel: Velocity,
    pub facing: Facing,
    /// Walk-cycle column, 0..WALK_FRAMES
    pub frame: u8,
    pub name: String,
    pub inventory: Inventory,
}

impl Actor {
    /// Create an actor at the screen centre. The inventory is taken by value
    /// so every actor owns its own container.
    pub fn new(name: &str, inventory: Inventory) -> Self {
        Self {
            pos: Self::screen_center(),
            vel: Velocity::default(),
            facing: Facing::Down,
            frame: 0,
            name: name.to_string(),
            inventory,
        }
    }

    pub fn screen_center() -> Point {
        Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2)
    }

    pub fn walk_down(&mut self) {
        self.facing = Facing::Down;
        self.vel.y = 1;
    }

    pub fn walk_left(&mut self) {
        self.facing = Facing::Left;
        self.vel.x = -1;
    }

    pub fn walk_right(&mut self) {
        self.facing = Facing::Right;
        self.vel.x = 1;
    }

    pub fn walk_up(&mut self) {
        self.facing = Facing::Up;
        self.vel.y = -1;
    }

    pub fn stop(&mut self) {
        self.vel = Velocity::default();
    }

    /// Advance the walk cycle by one frame
    pub fn advance_frame(&mut self) {
        self.frame = (self.frame + 1) % WALK_FRAMES;
    }

    /// Whether the actor sits on the horizontal screen centre (the
    /// one-pixel slack covers the nudge left by a border correction)
    pub fn is_centered(&self) -> bool {
        let cx = SCREEN_WIDTH / 2;
        self.pos.x == cx || self.pos.x == cx - 1
    }

    /// Keep the actor inside the map's outer borders, then apply velocity.
    ///
    /// Touching a border stops motion on that axis and pushes the actor one
    /// pixel back inside so the check does not fire again next frame.
    pub fn update(&mut self, borders: &Borders) {
        if self.pos.y == borders.upper {
            self.vel.y = 0;
            self.pos.y += 1;
        } else if self.pos.y == borders.lower {
            self.vel.y = 0;
            self.pos.y -= 1;
        }
        if self.pos.x == borders.left {
            self.vel.x = 0;
            self.pos.x += 1;
        } else if self.pos.x == borders.right {
            self.vel.x = 0;
            self.pos.x -= 1;
        }

        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y;
    }

    /// Source cell on the walking sheet for the current facing and frame
    pub fn sprite_source(&self) -> Rect {
        Rect::new(
            SPRITE_CELL * self.frame as i32,
            SPRITE_CELL * self.facing.row(),
            SPRITE_CELL,
            SPRITE_CELL,
        )
    }

    /// Destination rectangle on screen
    pub fn sprite_dest(&self) -> Rect {
        Rect::centered(self.pos, SPRITE_DRAW_SIZE, SPRITE_DRAW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn borders() -> Borders {
        Borders::OUTDOOR
    }

    #[test]
    fn new_actor_is_centered_and_still() {
        let a = Actor::new("MAY", Inventory::new());
        assert_eq!(a.pos, Point::new(240, 240));
        assert_eq!(a.vel, Velocity::default());
        assert!(a.is_centered());
    }

    #[test]
    fn inventories_are_not_shared() {
        let mut a = Actor::new("A", Inventory::new());
        let b = Actor::new("B", Inventory::new());
        a.inventory.add("Potion", 1);
        assert_eq!(a.inventory.quantity("Potion"), 1);
        assert!(b.inventory.is_empty());
    }

    #[test]
    fn inventory_stacks_by_name() {
        let mut inv = Inventory::new();
        inv.add("Potion", 2);
        inv.add("Pokeball", 5);
        inv.add("Potion", 1);
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.quantity("Potion"), 3);
        assert_eq!(inv.entries()[1], ("Pokeball".to_string(), 5));
    }

    #[test]
    fn walk_sets_facing_and_velocity() {
        let mut a = Actor::new("A", Inventory::new());
        a.walk_left();
        assert_eq!(a.facing, Facing::Left);
        assert_eq!(a.vel.x, -1);
        a.walk_up();
        assert_eq!(a.facing, Facing::Up);
        assert_eq!(a.vel, Velocity { x: -1, y: -1 });
    }

    #[test]
    fn frame_cycles_through_four() {
        let mut a = Actor::new("A", Inventory::new());
        let frames: Vec<u8> = (0..6)
            .map(|_| {
                a.advance_frame();
                a.frame
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn update_moves_by_velocity() {
        let mut a = Actor::new("A", Inventory::new());
        a.walk_down();
        a.update(&borders());
        assert_eq!(a.pos, Point::new(240, 241));
    }

    #[test]
    fn upper_border_stops_and_nudges_down() {
        let mut a = Actor::new("A", Inventory::new());
        a.pos.y = borders().upper;
        a.walk_up();
        a.update(&borders());
        assert_eq!(a.vel.y, 0);
        assert_eq!(a.pos.y, borders().upper + 1);
    }

    #[test]
    fn actor_never_passes_left_border() {
        let b = borders();
        let mut a = Actor::new("A", Inventory::new());
        a.pos.x = b.left + 3;
        for _ in 0..20 {
            a.walk_left();
            a.update(&b);
            assert!(a.pos.x >= b.left);
        }
    }

    #[test]
    fn sprite_source_follows_facing_and_frame() {
        let mut a = Actor::new("A", Inventory::new());
        a.walk_right();
        a.frame = 3;
        assert_eq!(a.sprite_source(), Rect::new(192, 128, 64, 64));
    }
}
