//! Maps: ids, outer borders, backgrounds and the atlas of all maps.
//!
//! The outdoor world is one wide image scrolled horizontally by the camera
//! (the x of the source rectangle's centre). Interiors are fixed images
//! centred on screen; their walkable borders derive from the image size.

use crate::assets::ImageInfo;
use crate::geometry::{Point, Rect};
use crate::render::DrawRequest;
use crate::zone::ZoneSet;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapId {
    Outdoor,
    Center,
    Mart,
    Gym,
    House,
}

impl MapId {
    pub const ALL: [MapId; 5] = [
        MapId::Outdoor,
        MapId::Center,
        MapId::Mart,
        MapId::Gym,
        MapId::House,
    ];

    pub fn is_outdoor(self) -> bool {
        self == MapId::Outdoor
    }

    pub fn label(self) -> &'static str {
        match self {
            MapId::Outdoor => "outdoor",
            MapId::Center => "center",
            MapId::Mart => "mart",
            MapId::Gym => "gym",
            MapId::House => "house",
        }
    }
}

/// Walkable limits of the active map, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borders {
    pub upper: i32,
    pub lower: i32,
    pub left: i32,
    pub right: i32,
}

impl Borders {
    /// Outdoor limits are fixed literals
    pub const OUTDOOR: Borders = Borders {
        upper: 35,
        lower: 407,
        left: 59,
        right: 422,
    };

    /// Limits of an interior drawn centred on screen
    pub fn interior(image: &ImageInfo) -> Self {
        let (cx, cy) = (image.center.x, image.center.y);
        Self {
            upper: SCREEN_HEIGHT / 2 - cy + 80,
            lower: cy + SCREEN_HEIGHT / 2,
            left: SCREEN_WIDTH / 2 - cx + 3,
            right: SCREEN_WIDTH / 2 + cx - 3,
        }
    }
}

/// The visible window onto the outdoor world. Its width sets the scroll
/// range: the camera moves between `center.x` and `center.x + width`.
pub const OUTDOOR_VIEW: ImageInfo = ImageInfo {
    center: Point { x: SCREEN_WIDTH / 2, y: SCREEN_HEIGHT / 2 },
    width: SCREEN_WIDTH,
    height: SCREEN_HEIGHT,
};

pub fn scroll_min() -> i32 {
    OUTDOOR_VIEW.center.x
}

pub fn scroll_max() -> i32 {
    OUTDOOR_VIEW.center.x + OUTDOOR_VIEW.width
}

/// One map: background, music and collision zones
#[derive(Debug, Clone)]
pub struct MapDef {
    pub id: MapId,
    pub background: &'static str,
    pub image: ImageInfo,
    pub music: &'static str,
    pub zones: ZoneSet,
}

impl MapDef {
    pub fn borders(&self) -> Borders {
        if self.id.is_outdoor() {
            Borders::OUTDOOR
        } else {
            Borders::interior(&self.image)
        }
    }

    /// Where the actor appears when entering this interior
    pub fn entry_point(&self) -> Point {
        Point::new(SCREEN_WIDTH / 2, self.image.center.y + SCREEN_HEIGHT / 2 - 20)
    }

    /// Background draw: a camera-positioned window outdoors, the whole
    /// image centred on screen indoors.
    pub fn background_request(&self, camera: i32) -> DrawRequest {
        if self.id.is_outdoor() {
            let view = OUTDOOR_VIEW;
            DrawRequest::Image {
                image: self.background,
                src: Rect::centered(Point::new(camera, view.center.y), view.width, view.height),
                dst: Rect::new(0, 0, view.width, view.height),
            }
        } else {
            DrawRequest::Image {
                image: self.background,
                src: Rect::new(0, 0, self.image.width, self.image.height),
                dst: Rect::centered(
                    Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2),
                    self.image.width,
                    self.image.height,
                ),
            }
        }
    }
}

/// Every map of the game, one slot per id
#[derive(Debug, Clone)]
pub struct Atlas {
    pub outdoor: MapDef,
    pub center: MapDef,
    pub mart: MapDef,
    pub gym: MapDef,
    pub house: MapDef,
}

impl Atlas {
    pub fn get(&self, id: MapId) -> &MapDef {
        match id {
            MapId::Outdoor => &self.outdoor,
            MapId::Center => &self.center,
            MapId::Mart => &self.mart,
            MapId::Gym => &self.gym,
            MapId::House => &self.house,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_borders_follow_image_size() {
        let center = ImageInfo::new(325, 295);
        assert_eq!(
            Borders::interior(&center),
            Borders {
                upper: 173,
                lower: 387,
                left: 81,
                right: 399
            }
        );
    }

    #[test]
    fn scroll_range_spans_one_view() {
        assert_eq!(scroll_min(), 240);
        assert_eq!(scroll_max(), 720);
    }

    #[test]
    fn outdoor_background_follows_camera() {
        let def = MapDef {
            id: MapId::Outdoor,
            background: "map_image",
            image: ImageInfo::new(960, 480),
            music: "m",
            zones: ZoneSet::default(),
        };
        match def.background_request(720) {
            DrawRequest::Image { src, dst, .. } => {
                assert_eq!(src, Rect::new(480, 0, 480, 480));
                assert_eq!(dst, Rect::new(0, 0, 480, 480));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn interior_background_is_centered() {
        let def = MapDef {
            id: MapId::Mart,
            background: "pokemart_map",
            image: ImageInfo::new(352, 264),
            music: "m",
            zones: ZoneSet::default(),
        };
        match def.background_request(0) {
            DrawRequest::Image { src, dst, .. } => {
                assert_eq!(src, Rect::new(0, 0, 352, 264));
                assert_eq!(dst, Rect::new(64, 108, 352, 264));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(def.entry_point(), Point::new(240, 352));
    }
}
