use engine::{
    pathing::{nearest_match, Quarry},
    Entity, Msg, Runtime, Scenario, Sex, MAX_BFS_ROOMS, MOBILE_PULSE,
};
use pretty_assertions::assert_eq;
use quickcheck_macros::quickcheck;
use world::{Dir, Sector, Vnum};

fn lair() -> Scenario {
    let mut s = Scenario::default();
    s.world.room(1, "Clearing", Sector::Field, &[]);
    s.world.room(2, "Thicket", Sector::Forest, &[(Dir::West, 1)]);
    s.world.room(3, "Den", Sector::Forest, &[(Dir::West, 2)]);
    s.world.room(9, "Island", Sector::Field, &[]);

    let hero = s.agent("hero", 1);
    hero.name = "hero".into();
    hero.sex = Sex::Female;
    let wolf = s.agent("wolf", 3);
    wolf.npc = true;
    wolf.level = 20;
    wolf.short = "the grey wolf".into();
    wolf.hunting = Some("hero".into());
    s
}

fn pulse(r: &mut Runtime) {
    for _ in 0..MOBILE_PULSE {
        r.tick();
    }
}

fn said(r: &mut Runtime, e: Entity) -> Vec<String> {
    r.take_messages()
        .into_iter()
        .filter_map(|m| match m {
            Msg::Say(a, text) if a == e => Some(text),
            _ => None,
        })
        .collect()
}

#[test]
fn wolf_runs_down_prey() {
    let mut r = Runtime::new(&lair()).unwrap();
    let hero = r.agent("hero").unwrap();
    let wolf = r.agent("wolf").unwrap();
    let room = |r: &Runtime, v| r.world().lookup(Vnum(v));

    pulse(&mut r);
    assert_eq!(wolf.room(&r), room(&r, 2));
    assert!(!wolf.is_fighting(&r));

    pulse(&mut r);
    assert_eq!(wolf.room(&r), room(&r, 1));
    assert!(wolf.is_fighting(&r));
    assert!(hero.is_fighting(&r));

    let told: Vec<String> = r
        .take_messages()
        .into_iter()
        .filter_map(|m| match m {
            Msg::Tell(e, text) if e == hero => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(told, vec!["The grey wolf attacks you!".to_string()]);

    // Fighting wolves don't wander off.
    pulse(&mut r);
    assert_eq!(wolf.room(&r), room(&r, 1));
}

#[test]
fn only_moves_on_pulse() {
    let mut r = Runtime::new(&lair()).unwrap();
    let wolf = r.agent("wolf").unwrap();
    let den = wolf.room(&r);

    for _ in 0..MOBILE_PULSE - 1 {
        r.tick();
        assert_eq!(wolf.room(&r), den);
    }
    r.tick();
    assert_ne!(wolf.room(&r), den);
}

#[test]
fn prey_gone() {
    let mut r = Runtime::new(&lair()).unwrap();
    let hero = r.agent("hero").unwrap();
    let wolf = r.agent("wolf").unwrap();

    r.despawn(hero);
    pulse(&mut r);
    assert_eq!(said(&mut r, wolf), vec!["Damn!  My prey is gone!!"]);
    assert_eq!(wolf.prey(&r), None);

    pulse(&mut r);
    assert!(said(&mut r, wolf).is_empty());
}

#[test]
fn prey_out_of_reach() {
    let mut s = lair();
    s.agents["hero"].room = Vnum(9);
    let mut r = Runtime::new(&s).unwrap();
    let wolf = r.agent("wolf").unwrap();
    let den = wolf.room(&r);

    pulse(&mut r);
    assert_eq!(said(&mut r, wolf), vec!["Damn!  Lost her!"]);
    assert_eq!(wolf.prey(&r), None);
    assert_eq!(wolf.room(&r), den);
}

#[test]
fn nearest_of_many() {
    let mut s = Scenario::default();
    s.world.room(1, "Crossroads", Sector::Road, &[]);
    s.world.room(2, "North", Sector::Road, &[(Dir::South, 1)]);
    s.world.room(3, "West", Sector::Road, &[(Dir::East, 1)]);
    s.world.room(4, "Far north", Sector::Road, &[(Dir::South, 2)]);
    s.agent("seeker", 1);
    s.agent("west-orc", 3).name = "orc".into();
    s.agent("north-orc", 2).name = "orc".into();
    s.agent("far-orc", 4).name = "big orc".into();
    let r = Runtime::new(&s).unwrap();
    let seeker = r.agent("seeker").unwrap();

    // Equal distance, north comes before west.
    let hit = nearest_match(&r, seeker, Quarry::Named("orc"), 5).unwrap();
    assert_eq!(hit.agent, r.agent("north-orc"));
    assert_eq!(hit.dir, Some(Dir::North));
    assert_eq!(hit.distance, 1);

    let hit = nearest_match(&r, seeker, Quarry::Named("big"), 5).unwrap();
    assert_eq!(hit.agent, r.agent("far-orc"));
    assert_eq!(hit.dir, Some(Dir::North));
    assert_eq!(hit.distance, 2);
    assert!(nearest_match(&r, seeker, Quarry::Named("big"), 1).is_none());

    let hit = nearest_match(&r, seeker, Quarry::Myself, 0).unwrap();
    assert_eq!(hit.agent, Some(seeker));
    assert_eq!(hit.dir, None);

    let west = r.world().lookup(Vnum(3)).unwrap();
    let hit = nearest_match(&r, seeker, Quarry::Room(west), 5).unwrap();
    assert_eq!(hit.agent, None);
    assert_eq!(hit.dir, Some(Dir::West));
}

#[test]
fn search_gives_up_eventually() {
    let mut s = Scenario::default();
    s.world.room(1, "Road 1", Sector::Road, &[]);
    for i in 2..=600 {
        s.world
            .room(i, &format!("Road {i}"), Sector::Road, &[(Dir::West, i - 1)]);
    }
    s.agent("walker", 1);
    s.agent("near", 100);
    s.agent("far", MAX_BFS_ROOMS as u32 + 50);
    let r = Runtime::new(&s).unwrap();
    let walker = r.agent("walker").unwrap();

    let hit = nearest_match(&r, walker, Quarry::Named("near"), 1000).unwrap();
    assert_eq!(hit.distance, 99);
    assert!(nearest_match(&r, walker, Quarry::Named("far"), 1000).is_none());
}

#[quickcheck]
fn match_within_distance(len: u8, at: u8, max: u8) -> bool {
    let len = len as u32 % 30 + 2;
    let at = at as u32 % len + 1;
    let max = max as usize % 40;

    let mut s = Scenario::default();
    s.world.room(1, "Road 1", Sector::Road, &[]);
    for i in 2..=len {
        s.world
            .room(i, &format!("Road {i}"), Sector::Road, &[(Dir::West, i - 1)]);
    }
    s.agent("seeker", 1);
    s.agent("mark", at);
    let r = Runtime::new(&s).unwrap();
    let seeker = r.agent("seeker").unwrap();

    let actual = (at - 1) as usize;
    match nearest_match(&r, seeker, Quarry::Named("mark"), max) {
        Some(hit) => hit.distance == actual && actual <= max,
        None => actual > max,
    }
}
