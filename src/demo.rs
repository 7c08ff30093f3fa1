//! Built-in scenarios for trying things out without a world file.
use anyhow::{bail, Result};
use engine::{Class, Effects, MobFlags, Scenario, Sex};
use world::{Dir, ExitFlags, Sector, Vnum, ZoneId};

pub const NAMES: [&str; 3] = ["village", "lair", "marsh"];

pub fn scenario(name: &str) -> Result<Scenario> {
    Ok(match name {
        "village" => village(),
        "lair" => lair(),
        "marsh" => marsh(),
        _ => bail!("Unknown demo {name:?}, try one of {}", NAMES.join(", ")),
    })
}

/// A small village with a forest trail and a cottage behind a door.
fn village() -> Scenario {
    let mut s = Scenario::default();
    let w = &mut s.world;
    w.room(3001, "The Village Square", Sector::City, &[]);
    w.room(3002, "Market Street", Sector::City, &[(Dir::West, 3001)]);
    w.room(3003, "The East Gate", Sector::City, &[(Dir::West, 3002)]);
    w.room(3004, "A Dusty Road", Sector::Road, &[(Dir::West, 3003)]);
    w.room(3005, "Edge of the Forest", Sector::Forest, &[(Dir::West, 3004)]);
    w.room(3006, "A Winding Trail", Sector::Forest, &[(Dir::South, 3005)]);
    w.room(3007, "A Quiet Glade", Sector::Forest, &[(Dir::South, 3006)]);
    w.room(
        3008,
        "A Woodcutter's Cottage",
        Sector::Structure,
        &[(Dir::West, 3007)],
    );
    w.room(3009, "The Temple", Sector::City, &[(Dir::South, 3001)]);
    w.rooms[&Vnum(3008)].zone = ZoneId(1);
    w.rooms[&Vnum(3007)].zone = ZoneId(1);
    for (vnum, dir) in [(3007, Dir::East), (3008, Dir::West)] {
        if let Some(exit) = w.rooms[&Vnum(vnum)].exits.get_mut(&dir) {
            exit.flags = ExitFlags::DOOR | ExitFlags::CLOSED;
            exit.keyword = Some("wooden door".into());
        }
    }

    let ranger = s.agent("ranger", 3001);
    ranger.name = "ranger aldis".into();
    ranger.short = "Aldis the ranger".into();
    ranger.level = 30;
    ranger.class = Class::Ranger;
    ranger.sex = Sex::Female;
    ranger.track = 75;
    ranger.hunt = 60;

    let thief = s.agent("thief", 3008);
    thief.name = "thief sneaky".into();
    thief.short = "a sneaky thief".into();
    thief.level = 12;
    thief.sex = Sex::Male;
    thief.effects = Effects::STEALTH;
    thief.concealment = 40;

    let priest = s.agent("priest", 3009);
    priest.name = "priest old".into();
    priest.short = "an old priest".into();
    priest.level = 105;
    priest.npc = true;

    s
}

/// Wolves running down a traveler on their own.
fn lair() -> Scenario {
    let mut s = Scenario::default();
    let w = &mut s.world;
    w.room(100, "A Forest Road", Sector::Road, &[]);
    w.room(101, "Among the Pines", Sector::Forest, &[(Dir::West, 100)]);
    w.room(102, "A Thicket", Sector::Forest, &[(Dir::West, 101)]);
    w.room(103, "A Rocky Slope", Sector::Hills, &[(Dir::Down, 102)]);
    w.room(104, "The Wolf Den", Sector::Cave, &[(Dir::East, 103)]);

    let traveler = s.agent("traveler", 100);
    traveler.name = "traveler weary".into();
    traveler.short = "a weary traveler".into();
    traveler.level = 5;
    traveler.sex = Sex::Nonbinary;

    for (handle, room) in [("alpha", 104), ("beta", 103)] {
        let wolf = s.agent(handle, room);
        wolf.name = "wolf grey".into();
        wolf.short = "a grey wolf".into();
        wolf.level = 15;
        wolf.npc = true;
        wolf.mob_flags = MobFlags::AGGRESSIVE;
        wolf.hunting = Some("traveler".into());
    }

    s
}

/// Trails through water and a patient hound that stays home.
fn marsh() -> Scenario {
    let mut s = Scenario::default();
    let w = &mut s.world;
    w.room(200, "A Muddy Bank", Sector::Swamp, &[]);
    w.room(201, "A Shallow Ford", Sector::Shallows, &[(Dir::West, 200)]);
    w.room(202, "Reeds", Sector::Swamp, &[(Dir::West, 201)]);
    w.room(203, "A Hermit's Hut", Sector::Structure, &[(Dir::North, 202)]);
    w.rooms[&Vnum(203)].zone = ZoneId(2);

    let hermit = s.agent("hermit", 203);
    hermit.name = "hermit".into();
    hermit.short = "the hermit".into();
    hermit.sex = Sex::Male;

    let hound = s.agent("hound", 200);
    hound.name = "hound bloodhound".into();
    hound.short = "a bloodhound".into();
    hound.level = 25;
    hound.npc = true;
    hound.mob_flags = MobFlags::STAY_ZONE | MobFlags::SLOW_TRACK;

    let scout = s.agent("scout", 201);
    scout.short = "the scout".into();
    scout.level = 8;
    scout.class = Class::Hunter;
    scout.track = 40;
    scout.hunt = 20;

    s
}
