//! World data: the zone tables of every map and the scripted lines.
//!
//! Zone coordinates are in screen pixels, except the horizontal edges of
//! `ZoneFrame::World` zones which are camera positions on the outdoor image.

use crate::assets::{names, AssetCatalog};
use crate::dialogue::{DialogueScript, ScriptAction};
use crate::error::Result;
use crate::map::{Atlas, Borders, MapDef, MapId};
use crate::zone::{Bounds, DoorSpan, Zone, ZoneFrame, ZoneSet};

const OUT: Borders = Borders::OUTDOOR;

/// The intro speech, ending in name entry
pub fn intro_script() -> DialogueScript {
    DialogueScript::lines(&[
        "hi! sorry to keep you waiting.",
        "welcome to the world of pokemon!",
        "my name is professor birch.",
        "but everyone calls me the pokemon professor.",
        "this is what we call a \"pokemon\".",
        "this world is widely inhabited by creatures known",
        "as pokemon.",
        "it is my job to research them in order to uncover",
        "their secrets.",
        "and what about you?",
        "What's your name?",
        "(Type then press the down arrow to continue)",
    ])
    .then(ScriptAction::ChooseName)
}

/// Lines that replace name entry once the player has typed a name
pub fn name_greeting(name: &str) -> Vec<String> {
    vec![
        format!("NICE TO MEET YOU {name}!"),
        "GET READY TO ENTER THE WORLD OF POKEMON!".to_string(),
    ]
}

fn bounds(upper: i32, lower: i32, left: i32, right: i32) -> Result<Bounds> {
    Bounds::new(upper, lower, left, right)
}

fn door(start: i32, end: i32) -> Result<DoorSpan> {
    DoorSpan::new(start, end)
}

fn map(catalog: &AssetCatalog, id: MapId, background: &'static str, zones: Vec<Zone>) -> Result<MapDef> {
    Ok(MapDef {
        id,
        background,
        image: catalog.image(background)?,
        music: catalog.sound(names::TOWN_MUSIC)?,
        zones: ZoneSet::new(zones),
    })
}

fn outdoor(catalog: &AssetCatalog) -> Result<MapDef> {
    use ZoneFrame::{Screen, World};
    let zones = vec![
        Zone::obstacle("four trees", bounds(OUT.upper, 138, 375, 490)?, World),
        Zone::exit("pokemon center", bounds(69, 172, 541, 658)?, World, door(585, 593)?, MapId::Center),
        Zone::exit("house", bounds(236, 348, 541, 661)?, World, door(616, 625)?, MapId::House),
        Zone::exit("gym", bounds(247, 357, 265, 410)?, Screen, door(342, 353)?, MapId::Gym),
        Zone::exit("mart", bounds(81, 178, 277, 397)?, Screen, door(321, 331)?, MapId::Mart),
        Zone::talk(
            "sign",
            bounds(196, 236, 108, 157)?,
            Screen,
            door(108, 157)?,
            DialogueScript::lines(&["Beware of the tall grass,", "it may be hiding wild pokemon!"]),
        ),
    ];
    map(catalog, MapId::Outdoor, names::OUTDOOR, zones)
}

fn center(catalog: &AssetCatalog) -> Result<MapDef> {
    let s = ZoneFrame::Screen;
    let zones = vec![
        Zone::talk(
            "counter",
            bounds(OUT.upper, 214, 103, 345)?,
            s,
            door(215, 232)?,
            DialogueScript::lines(&[
                "Welcome to the Pokemon Center!",
                "Come back when you have pokemon,",
                "and I can help them!",
            ]),
        ),
        Zone::exit("exit", bounds(370, 370, 203, 243)?, s, door(203, 243)?, MapId::Outdoor),
        Zone::talk(
            "pc",
            bounds(OUT.upper, 174, 346, 361)?,
            s,
            door(346, 361)?,
            DialogueScript::lines(&[
                "Welcome to the Pokemon Center PC.",
                "Please come back when you have pokemon.",
                "Then I can store them!",
            ]),
        ),
    ];
    map(catalog, MapId::Center, names::CENTER, zones)
}

fn mart(catalog: &AssetCatalog) -> Result<MapDef> {
    let s = ZoneFrame::Screen;
    let zones = vec![
        Zone::obstacle("table", bounds(274, 323, 87, 169)?, s),
        Zone::talk(
            "counter",
            bounds(OUT.upper, 258, OUT.left, 203)?,
            s,
            door(137, 151)?,
            DialogueScript::lines(&["What would you like to buy?"]).then(ScriptAction::OpenShop),
        ),
        Zone::exit("exit", bounds(353, 353, 221, 259)?, s, door(221, 259)?, MapId::Outdoor),
        Zone::obstacle("shelves", bounds(204, 321, 376, OUT.right)?, s),
    ];
    map(catalog, MapId::Mart, names::MART, zones)
}

fn gym(catalog: &AssetCatalog, player: &str) -> Result<MapDef> {
    let s = ZoneFrame::Screen;
    let greeting = format!("Hello {player}.");
    let zones = vec![
        Zone::exit("exit", bounds(350, 350, 200, 278)?, s, door(200, 259)?, MapId::Outdoor),
        Zone::obstacle("left stairs", bounds(OUT.upper, 230, 150, 200)?, s),
        Zone::obstacle("right stairs", bounds(OUT.upper, 230, 280, 328)?, s),
        Zone::talk(
            "norman",
            bounds(193, 196, 234, 246)?,
            s,
            door(234, 246)?,
            DialogueScript::lines(&[
                greeting.as_str(),
                "Come back when you're stronger.",
                "Then you can battle me!",
            ]),
        ),
    ];
    map(catalog, MapId::Gym, names::GYM, zones)
}

fn house(catalog: &AssetCatalog, player: &str) -> Result<MapDef> {
    let s = ZoneFrame::Screen;
    let greeting = format!("Hi {player}! I'm Ruby!");
    let zones = vec![
        Zone::exit("exit", bounds(356, 356, 221, 264)?, s, door(221, 264)?, MapId::Outdoor),
        Zone::talk(
            "ruby",
            bounds(219, 276, 213, 266)?,
            s,
            door(213, 266)?,
            DialogueScript::lines(&[greeting.as_str()]),
        ),
        Zone::obstacle("table", bounds(222, 301, 300, 378)?, s),
        Zone::obstacle("chairs", bounds(220, 300, 383, 411)?, s),
    ];
    map(catalog, MapId::House, names::HOUSE, zones)
}

/// Build every map. Fails if an image or sound is missing or the catalog
/// has not finished loading.
pub fn standard_atlas(catalog: &AssetCatalog, player: &str) -> Result<Atlas> {
    let atlas = Atlas {
        outdoor: outdoor(catalog)?,
        center: center(catalog)?,
        mart: mart(catalog)?,
        gym: gym(catalog, player)?,
        house: house(catalog, player)?,
    };
    tracing::debug!(
        "Atlas built: {} zones total",
        MapId::ALL.iter().map(|id| atlas.get(*id).zones.len()).sum::<usize>()
    );
    Ok(atlas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::Entry;
    use crate::error::WorldError;
    use crate::zone::ZoneAction;

    #[test]
    fn atlas_builds_from_default_catalog() {
        let atlas = standard_atlas(&AssetCatalog::with_default_sizes(), "MAY").unwrap();
        assert_eq!(atlas.outdoor.zones.len(), 6);
        assert_eq!(atlas.center.zones.len(), 3);
        assert_eq!(atlas.mart.zones.len(), 4);
        assert_eq!(atlas.gym.zones.len(), 4);
        assert_eq!(atlas.house.zones.len(), 4);
        for id in MapId::ALL {
            assert_eq!(atlas.get(id).id, id);
        }
    }

    #[test]
    fn atlas_requires_loaded_catalog() {
        let mut catalog = AssetCatalog::new();
        catalog.add_image(names::OUTDOOR, 960, 480).unwrap();
        assert!(matches!(
            standard_atlas(&catalog, "MAY"),
            Err(WorldError::AssetsNotLoaded(_))
        ));
    }

    #[test]
    fn every_interior_has_an_exit_home() {
        let atlas = standard_atlas(&AssetCatalog::with_default_sizes(), "MAY").unwrap();
        for id in [MapId::Center, MapId::Mart, MapId::Gym, MapId::House] {
            let exits = atlas
                .get(id)
                .zones
                .iter()
                .filter(|z| matches!(z.action, ZoneAction::Exit { target: MapId::Outdoor, .. }))
                .count();
            assert_eq!(exits, 1, "{id:?}");
        }
    }

    #[test]
    fn npc_lines_carry_player_name() {
        let atlas = standard_atlas(&AssetCatalog::with_default_sizes(), "May").unwrap();
        let norman = atlas.gym.zones.iter().find(|z| z.name == "norman").unwrap();
        match &norman.action {
            ZoneAction::Talk { script, .. } => {
                assert_eq!(script.entries()[0], Entry::Text("HELLO MAY.".into()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn intro_ends_in_name_entry() {
        let s = intro_script();
        assert_eq!(s.len(), 13);
        assert_eq!(s.entries()[12], Entry::Action(ScriptAction::ChooseName));
    }
}
