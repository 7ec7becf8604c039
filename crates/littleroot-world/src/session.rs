//! The tick driver: one [`GameSession`] owns every piece of mutable game
//! state and turns key events and elapsed time into [`Frame`]s.
//!
//! A session starts in the intro (professor's speech and name entry) and
//! switches to the overworld once the intro dialogue is exhausted.

use crate::actor::{Actor, Facing, Inventory};
use crate::assets::{names, AssetCatalog};
use crate::atlas::{intro_script, name_greeting, standard_atlas};
use crate::collision::{self, Contact, ContactLatch};
use crate::dialogue::{Dialogue, DialoguePhase, ScriptAction};
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::input::{Direction, Intent};
use crate::map::{scroll_max, scroll_min, Atlas, MapId};
use crate::render::{AudioCue, DrawRequest, Frame};
use crate::shop::ShopPanel;
use crate::timer::{Ticker, TEXT_PERIOD_MS, WALK_PERIOD_MS};
use crate::transition::MapState;
use crate::zone::ZoneAction;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Where the position HUD is drawn
pub const HUD_POSITION: Point = Point::new(125, 460);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Intro,
    Overworld,
}

// ---------------------------------------------------------------------------
// Overworld state
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Overworld {
    atlas: Atlas,
    actor: Actor,
    maps: MapState,
    camera: i32,
    latch: ContactLatch,
    shop: ShopPanel,
    moving_left: bool,
    moving_right: bool,
    inventory_shown: bool,
}

/// What a freshly touched door asks for
enum Trigger {
    Enter(MapId),
    Talk(Dialogue),
}

impl Overworld {
    fn new(atlas: Atlas, actor: Actor) -> Self {
        Self {
            atlas,
            actor,
            maps: MapState::new(),
            camera: 0,
            latch: ContactLatch::new(),
            shop: ShopPanel::new(),
            moving_left: false,
            moving_right: false,
            inventory_shown: false,
        }
    }

    fn enter(&mut self, target: MapId) -> AudioCue {
        let cue = self
            .maps
            .enter_map(target, &self.atlas, &mut self.actor, &mut self.camera);
        self.latch.reset();
        cue
    }

    fn actor_request(&self) -> DrawRequest {
        DrawRequest::Image {
            image: names::CHARACTER,
            src: self.actor.sprite_source(),
            dst: self.actor.sprite_dest(),
        }
    }

    /// Scroll the world while the actor stands centred outdoors, otherwise
    /// walk the actor.
    fn move_or_scroll(&mut self) {
        let scrollable = self.maps.active().is_outdoor() && self.actor.is_centered();
        if self.moving_left && scrollable && self.camera > scroll_min() {
            self.camera -= 1;
            self.actor.vel.x = 0;
            self.actor.facing = Facing::Left;
        } else if self.moving_right && scrollable && self.camera < scroll_max() {
            self.camera += 1;
            self.actor.vel.x = 0;
            self.actor.facing = Facing::Right;
        } else if self.moving_left {
            self.actor.walk_left();
        } else if self.moving_right {
            self.actor.walk_right();
        }
    }

    /// Clamp against every zone of the active map and report the first
    /// door that was just reached. Doors are only latched when `accept` is
    /// set; other doors reached in the same frame stay pending.
    fn resolve_zones(&mut self, accept: bool) -> Option<Trigger> {
        let zones = &self.atlas.get(self.maps.active()).zones;
        let mut contacts = Vec::new();
        for (i, zone) in zones.iter().enumerate() {
            if collision::resolve(zone, &mut self.actor, &mut self.camera) == Contact::Door {
                contacts.push(i);
            }
        }
        if !accept {
            return None;
        }

        let fired = self.latch.update(&contacts);
        for &pending in fired.iter().skip(1) {
            self.latch.release(pending);
        }
        let zone = fired.first().and_then(|&i| zones.get(i))?;
        tracing::debug!("Door reached: {} on {}", zone.name, self.maps.active().label());
        match &zone.action {
            ZoneAction::Obstacle => None,
            ZoneAction::Exit { target, .. } => Some(Trigger::Enter(*target)),
            ZoneAction::Talk { script, .. } => Some(Trigger::Talk(Dialogue::start(script.clone(), true))),
        }
    }

    fn hud_text(&self) -> String {
        format!(
            "Pos: ({}, {}) , Latitude: {}",
            self.actor.pos.x, self.actor.pos.y, self.camera
        )
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// All mutable game state
#[derive(Debug)]
pub struct GameSession {
    catalog: AssetCatalog,
    starting_inventory: Inventory,
    /// Name typed during the intro
    player_name: String,
    world: Option<Overworld>,
    dialogue: Option<Dialogue>,
    text_ticker: Ticker,
    walk_ticker: Ticker,
    audio: Vec<AudioCue>,
}

impl GameSession {
    /// Start at the intro. Every asset the game will need is checked now so
    /// later ticks cannot fail on a missing name.
    pub fn new(catalog: AssetCatalog, starting_inventory: Inventory) -> Result<Self> {
        for image in [names::INTRO, names::TEXTBOX, names::CHARACTER] {
            catalog.image(image)?;
        }
        let intro_music = catalog.sound(names::INTRO_MUSIC)?;
        catalog.sound(names::CONFIRM_SOUND)?;
        standard_atlas(&catalog, "")?;

        let mut text_ticker = Ticker::new(TEXT_PERIOD_MS);
        text_ticker.start();
        tracing::info!("Session started at the intro");
        Ok(Self {
            catalog,
            starting_inventory,
            player_name: String::new(),
            world: None,
            dialogue: Some(Dialogue::start(intro_script(), false)),
            text_ticker,
            walk_ticker: Ticker::new(WALK_PERIOD_MS),
            audio: vec![AudioCue::Music(intro_music)],
        })
    }

    /// Start directly in the overworld with a known player name
    pub fn overworld(catalog: AssetCatalog, name: &str, starting_inventory: Inventory) -> Result<Self> {
        let mut session = Self::new(catalog, starting_inventory)?;
        session.audio.clear();
        session.player_name = name.to_string();
        session.start_overworld(name)?;
        Ok(session)
    }

    pub fn mode(&self) -> Mode {
        if self.world.is_some() {
            Mode::Overworld
        } else {
            Mode::Intro
        }
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.world.as_ref().map(|w| &w.actor)
    }

    pub fn camera(&self) -> Option<i32> {
        self.world.as_ref().map(|w| w.camera)
    }

    pub fn active_map(&self) -> Option<MapId> {
        self.world.as_ref().map(|w| w.maps.active())
    }

    pub fn dialogue(&self) -> Option<&Dialogue> {
        self.dialogue.as_ref()
    }

    pub fn shop(&self) -> Option<&ShopPanel> {
        self.world.as_ref().map(|w| &w.shop)
    }

    fn start_overworld(&mut self, name: &str) -> Result<()> {
        let atlas = standard_atlas(&self.catalog, name)?;
        let actor = Actor::new(name, self.starting_inventory.clone());
        let mut world = Overworld::new(atlas, actor);
        let cue = world.enter(MapId::Outdoor);
        self.audio.push(cue);
        self.world = Some(world);
        self.end_dialogue();
        tracing::info!("Entering the overworld as {}", name);
        Ok(())
    }

    fn start_dialogue(&mut self, dialogue: Dialogue) {
        self.dialogue = Some(dialogue);
        self.text_ticker.start();
    }

    fn end_dialogue(&mut self) {
        self.dialogue = None;
        self.text_ticker.stop();
    }

    fn presenting(&self) -> bool {
        self.dialogue
            .as_ref()
            .is_some_and(|d| d.phase() != DialoguePhase::Exhausted)
    }

    fn perform(&mut self, actions: Vec<ScriptAction>) {
        for action in actions {
            match action {
                ScriptAction::OpenShop => {
                    if let Some(world) = &mut self.world {
                        world.shop.open();
                    }
                }
                // handled inside the dialogue
                ScriptAction::ChooseName => {}
            }
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn key_down(&mut self, intent: Intent) {
        match self.mode() {
            Mode::Intro => self.intro_key_down(intent),
            Mode::Overworld => self.overworld_key_down(intent),
        }
    }

    pub fn key_up(&mut self, intent: Intent) {
        let Some(world) = &mut self.world else {
            return;
        };
        match intent {
            Intent::Inventory => world.inventory_shown = false,
            Intent::Move(Direction::Left) => {
                world.moving_left = false;
                world.actor.vel.x = 0;
                self.walk_ticker.stop();
            }
            Intent::Move(Direction::Right) => {
                world.moving_right = false;
                world.actor.vel.x = 0;
                self.walk_ticker.stop();
            }
            Intent::Move(Direction::Up | Direction::Down) => {
                world.actor.vel.y = 0;
                self.walk_ticker.stop();
            }
            _ => {}
        }
    }

    fn intro_key_down(&mut self, intent: Intent) {
        let Some(dialogue) = &mut self.dialogue else {
            return;
        };

        if dialogue.phase() == DialoguePhase::NameEntry {
            match intent {
                Intent::Char(ch) => dialogue.type_char(ch),
                Intent::Erase => dialogue.erase_char(),
                Intent::Move(Direction::Down) => {
                    if let Some(name) = dialogue.finish_name_entry(name_greeting) {
                        self.player_name = name;
                    }
                }
                _ => {}
            }
            return;
        }

        if intent != Intent::Confirm {
            return;
        }
        self.audio.push(AudioCue::Effect(names::CONFIRM_SOUND));
        let actions = dialogue.confirm();
        let exhausted = dialogue.is_exhausted();
        self.perform(actions);

        if exhausted {
            let name = self.player_name.clone();
            if let Err(e) = self.start_overworld(&name) {
                tracing::error!("Failed to build the overworld: {}", e);
            }
        }
    }

    fn overworld_key_down(&mut self, intent: Intent) {
        // confirm drives the dialogue; any other key dismisses it and then
        // acts as usual
        if self.presenting() {
            if let Some(dialogue) = &mut self.dialogue {
                if intent == Intent::Confirm {
                    let actions = dialogue.confirm();
                    let exhausted = dialogue.is_exhausted();
                    self.perform(actions);
                    if exhausted {
                        self.end_dialogue();
                    }
                    return;
                }
                if dialogue.is_cancellable() {
                    tracing::debug!("Dialogue cancelled");
                    self.end_dialogue();
                }
            }
        }

        let Some(world) = &mut self.world else {
            return;
        };

        if world.shop.is_open() {
            match intent {
                Intent::Close => world.shop.close(),
                Intent::Move(Direction::Up) => world.shop.scroll_up(),
                Intent::Move(Direction::Down) => world.shop.scroll_down(),
                _ => {}
            }
            return;
        }

        match intent {
            Intent::Inventory => world.inventory_shown = true,
            Intent::Move(Direction::Left) => {
                world.moving_left = true;
                self.walk_ticker.start();
            }
            Intent::Move(Direction::Right) => {
                world.moving_right = true;
                self.walk_ticker.start();
            }
            Intent::Move(Direction::Up) => {
                world.actor.walk_up();
                self.walk_ticker.start();
            }
            Intent::Move(Direction::Down) => {
                world.actor.walk_down();
                self.walk_ticker.start();
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the game by `dt_ms` of wall time and describe the result
    pub fn tick(&mut self, dt_ms: u32) -> Frame {
        let mut frame = Frame::default();
        match self.mode() {
            Mode::Intro => self.tick_intro(dt_ms, &mut frame),
            Mode::Overworld => self.tick_overworld(dt_ms, &mut frame),
        }
        frame.audio.append(&mut self.audio);
        frame
    }

    fn tick_intro(&mut self, dt_ms: u32, frame: &mut Frame) {
        frame.push(DrawRequest::Image {
            image: names::INTRO,
            src: Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT),
            dst: Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT),
        });
        self.advance_dialogue(dt_ms, frame);
    }

    fn tick_overworld(&mut self, dt_ms: u32, frame: &mut Frame) {
        let presenting = self.presenting();
        let Some(world) = &mut self.world else {
            return;
        };
        let frozen = presenting || world.shop.is_open();

        let def = world.atlas.get(world.maps.active());
        frame.push(def.background_request(world.camera));

        frame.push(world.actor_request());
        if !frozen {
            world.actor.update(&world.maps.borders());
        }

        self.advance_dialogue(dt_ms, frame);

        let Some(world) = &mut self.world else {
            return;
        };
        if !frozen {
            world.move_or_scroll();
        }

        match world.resolve_zones(!presenting) {
            Some(Trigger::Enter(target)) => {
                let cue = world.enter(target);
                self.audio.push(cue);
            }
            Some(Trigger::Talk(dialogue)) => self.start_dialogue(dialogue),
            None => {}
        }

        for _ in 0..self.walk_ticker.advance(dt_ms) {
            if let Some(world) = &mut self.world {
                world.actor.advance_frame();
            }
        }

        let Some(world) = &self.world else {
            return;
        };
        if world.shop.is_open() {
            frame.push(DrawRequest::Shop {
                rows: world.shop.rows(),
                cursor: world.shop.cursor(),
            });
        } else if world.inventory_shown {
            frame.push(DrawRequest::Inventory {
                rows: world.actor.inventory.entries().to_vec(),
            });
        }
        frame.push(DrawRequest::Hud {
            text: world.hud_text(),
            at: HUD_POSITION,
        });
    }

    /// Text ticks, any actions they reach, and the dialogue box
    fn advance_dialogue(&mut self, dt_ms: u32, frame: &mut Frame) {
        let ticks = self.text_ticker.advance(dt_ms);
        let Some(dialogue) = &mut self.dialogue else {
            return;
        };
        let mut actions = Vec::new();
        for _ in 0..ticks {
            actions.extend(dialogue.tick());
        }

        if dialogue.phase() != DialoguePhase::Exhausted {
            frame.push(DrawRequest::DialogueBox {
                lines: dialogue.visible_lines(),
            });
        }
        if let Some(name) = dialogue.pending_name() {
            frame.push(DrawRequest::NameEntry {
                text: name.to_string(),
            });
        }
        self.perform(actions);
    }
}
