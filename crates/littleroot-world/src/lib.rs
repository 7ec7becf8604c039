//! littleroot-world: the overworld core.
//!
//! Navigation, collision, map transitions and dialogue for a top-down
//! scrolling world. Nothing here touches a window or a speaker; a
//! [`GameSession`] consumes [`Intent`]s and elapsed time and produces
//! [`Frame`]s of draw and audio requests for the player to carry out.

pub mod actor;
pub mod assets;
pub mod atlas;
pub mod collision;
pub mod dialogue;
pub mod error;
pub mod geometry;
pub mod input;
pub mod map;
pub mod render;
pub mod session;
pub mod shop;
pub mod timer;
pub mod transition;
pub mod zone;

pub use actor::{Actor, Facing, Inventory};
pub use assets::{names, AssetCatalog, ImageInfo};
pub use error::{Result, WorldError};
pub use geometry::{Point, Rect};
pub use input::{Direction, Intent};
pub use map::MapId;
pub use render::{AudioCue, DrawRequest, Frame};
pub use session::{GameSession, Mode};

/// Window width in pixels
pub const SCREEN_WIDTH: i32 = 480;
/// Window height in pixels
pub const SCREEN_HEIGHT: i32 = 480;
