//! Breadth-first searches over the room graph.
use std::collections::VecDeque;

use util::HashSet;
use world::{Dir, Exit, RoomFlags, RoomGraph, RoomIdx};

use crate::{Realm, MAX_BFS_ROOMS};

/// Result of a first step search.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Search {
    /// Shortest path starts by going `dir` and is `distance` edges long.
    Step { dir: Dir, distance: usize },
    AlreadyThere,
    NoPath,
    /// Search was called with rooms that don't exist.
    Error,
}

impl Search {
    /// Collapse programmer errors into not found, the way callers see them.
    pub fn found(self) -> Option<(Dir, usize)> {
        match self {
            Search::Step { dir, distance } => Some((dir, distance)),
            _ => None,
        }
    }
}

/// Rule for which exits a search may walk through.
///
/// The search itself takes care of exits that lead nowhere and of rooms
/// already visited, a filter only needs to judge the exit.
pub trait EdgeFilter {
    fn admits(
        &self,
        graph: &dyn RoomGraph,
        from: RoomIdx,
        dir: Dir,
        exit: &Exit,
    ) -> bool;
}

impl<F> EdgeFilter for F
where
    F: Fn(&dyn RoomGraph, RoomIdx, Dir, &Exit) -> bool,
{
    fn admits(
        &self,
        graph: &dyn RoomGraph,
        from: RoomIdx,
        dir: Dir,
        exit: &Exit,
    ) -> bool {
        self(graph, from, dir, exit)
    }
}

/// Standard edge rules for following a trail.
///
/// Hidden exits are never followed. NPCs won't path into NOTRACK rooms.
/// Closed and locked doors don't block, a trail can be sensed through a
/// shut door.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TrailRules {
    pub is_npc: bool,
}

impl TrailRules {
    pub fn new(is_npc: bool) -> Self {
        TrailRules { is_npc }
    }
}

impl EdgeFilter for TrailRules {
    fn admits(
        &self,
        graph: &dyn RoomGraph,
        _from: RoomIdx,
        _dir: Dir,
        exit: &Exit,
    ) -> bool {
        if exit.is_hidden() {
            return false;
        }
        match exit.to {
            Some(to) if self.is_npc => {
                !graph.room_flags(to).contains(RoomFlags::NOTRACK)
            }
            Some(_) => true,
            None => false,
        }
    }
}

/// Admissible exits out of a room in canonical direction order.
fn edges<'a, G: RoomGraph>(
    graph: &'a G,
    room: RoomIdx,
    filter: &'a impl EdgeFilter,
) -> impl Iterator<Item = (Dir, RoomIdx)> + 'a {
    Dir::all().filter_map(move |dir| {
        let exit = graph.exit(room, dir)?;
        let to = exit.to.filter(|&to| graph.contains(to))?;
        filter.admits(graph, room, dir, exit).then_some((dir, to))
    })
}

/// Find the first step on a shortest path from `src` to `dst`.
///
/// Ties between equally long paths go to the one whose first step comes
/// earliest in the canonical direction order.
pub fn first_step<G: RoomGraph>(
    graph: &G,
    src: RoomIdx,
    dst: RoomIdx,
    filter: &impl EdgeFilter,
) -> Search {
    if !graph.contains(src) || !graph.contains(dst) {
        log::warn!("first_step: invalid rooms {src} -> {dst}");
        return Search::Error;
    }

    if src == dst {
        return Search::AlreadyThere;
    }

    let mut seen = HashSet::default();
    seen.insert(src);

    let mut queue = VecDeque::new();
    for (dir, to) in edges(graph, src, filter) {
        if seen.insert(to) {
            queue.push_back((to, dir, 1));
        }
    }

    while let Some((room, dir, distance)) = queue.pop_front() {
        if room == dst {
            return Search::Step { dir, distance };
        }

        for (_, to) in edges(graph, room, filter) {
            if seen.insert(to) {
                queue.push_back((to, dir, distance + 1));
            }
        }
    }

    Search::NoPath
}

/// What a nearest match search is looking for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Quarry<'a> {
    /// The asker. Always found right where the asker is.
    Myself,
    /// Nearest visible agent with the keyword.
    Named(&'a str),
    /// A fixed room.
    Room(RoomIdx),
}

impl<'a> Quarry<'a> {
    /// Interpret a player-typed target name.
    pub fn parse(name: &'a str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("self") || name.eq_ignore_ascii_case("me")
        {
            Quarry::Myself
        } else {
            Quarry::Named(name)
        }
    }
}

/// Where a nearest match search found its quarry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Sighting<A> {
    /// First step toward the quarry, `None` if it's in the asker's room.
    pub dir: Option<Dir>,
    pub distance: usize,
    pub room: RoomIdx,
    /// Agent that matched, `None` for room quarries.
    pub agent: Option<A>,
}

/// Find the nearest room, no farther than `max_distance`, that satisfies
/// the quarry.
///
/// Rooms are examined in breadth-first order starting with the asker's
/// own room, and the first hit wins. Occupants must be visible to the
/// asker to match. The search gives up after examining `MAX_BFS_ROOMS`
/// rooms regardless of the distance limit.
pub fn nearest_match<R: Realm>(
    realm: &R,
    asker: R::Agent,
    quarry: Quarry,
    max_distance: usize,
) -> Option<Sighting<R::Agent>> {
    let start = realm.room_of(asker)?;
    let graph = realm.map();
    if !graph.contains(start) {
        log::warn!("nearest_match: asker is in invalid {start}");
        return None;
    }

    let rules = TrailRules::new(realm.profile(asker)?.is_npc);

    let mut seen = HashSet::default();
    seen.insert(start);
    let mut queue = VecDeque::from([(start, None, 0)]);
    let mut examined = 0;

    while let Some((room, dir, distance)) = queue.pop_front() {
        let hit = match quarry {
            Quarry::Myself => Some(Some(asker)),
            Quarry::Room(target) => (room == target).then_some(None),
            Quarry::Named(name) => realm
                .occupants(room)
                .into_iter()
                .find(|&a| realm.is_named(a, name) && realm.can_see(asker, a))
                .map(Some),
        };

        if let Some(agent) = hit {
            return Some(Sighting {
                dir,
                distance,
                room,
                agent,
            });
        }

        examined += 1;
        if examined >= MAX_BFS_ROOMS {
            log::debug!("nearest_match: gave up after {examined} rooms");
            return None;
        }

        if distance < max_distance {
            for (d, to) in edges(graph, room, &rules) {
                if seen.insert(to) {
                    queue.push_back((to, dir.or(Some(d)), distance + 1));
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod test {
    use pathfinding::prelude::bfs;
    use quickcheck_macros::quickcheck;
    use world::{ExitFlags, Sector, Vnum, World, ZoneId};

    use super::*;

    /// Build a world of `n` rooms from arbitrary edge triples.
    fn scramble(n: u8, edges: &[(u8, u8, u8)]) -> World {
        let n = (n % 12) as u32 + 1;
        let mut w = World::new();
        for i in 0..n {
            w.add_room(Vnum(i), format!("R{i}"), ZoneId(0), Sector::Field)
                .unwrap();
        }
        for &(a, d, b) in edges {
            let a = RoomIdx(a as u32 % n);
            let b = RoomIdx(b as u32 % n);
            let dir = Dir::from_index(d as usize % 6).unwrap();
            w.dig(a, dir, Exit::new(b)).unwrap();
        }
        w
    }

    fn oracle(w: &World, a: RoomIdx, b: RoomIdx) -> Option<usize> {
        bfs(
            &a,
            |&r| {
                Dir::all()
                    .filter_map(|d| w.destination(r, d))
                    .collect::<Vec<_>>()
            },
            |&r| r == b,
        )
        .map(|path| path.len() - 1)
    }

    fn corridor(len: u32) -> World {
        let mut w = World::new();
        for i in 0..len {
            let r = w
                .add_room(Vnum(i), format!("R{i}"), ZoneId(0), Sector::Road)
                .unwrap();
            if i > 0 {
                w.link(RoomIdx(i - 1), Dir::East, r).unwrap();
            }
        }
        w
    }

    #[quickcheck]
    fn shortest_distance(n: u8, edges: Vec<(u8, u8, u8)>, a: u8, b: u8) {
        let w = scramble(n, &edges);
        let a = RoomIdx(a as u32 % w.room_count() as u32);
        let b = RoomIdx(b as u32 % w.room_count() as u32);

        let rules = TrailRules::default();
        match (first_step(&w, a, b, &rules), oracle(&w, a, b)) {
            (Search::AlreadyThere, Some(0)) => {}
            (Search::Step { dir, distance }, Some(d)) => {
                assert_eq!(distance, d);
                // Going the indicated way must get one step closer.
                let next = w.destination(a, dir).unwrap();
                assert_eq!(oracle(&w, next, b), Some(d - 1));
            }
            (Search::NoPath, None) => {}
            (search, expected) => {
                panic!("{search:?} disagrees with oracle {expected:?}")
            }
        }
    }

    #[quickcheck]
    fn same_room(n: u8, edges: Vec<(u8, u8, u8)>, a: u8) -> bool {
        let w = scramble(n, &edges);
        let a = RoomIdx(a as u32 % w.room_count() as u32);
        first_step(&w, a, a, &TrailRules::default()) == Search::AlreadyThere
    }

    #[quickcheck]
    fn deterministic(n: u8, edges: Vec<(u8, u8, u8)>, a: u8, b: u8) -> bool {
        let w = scramble(n, &edges);
        let a = RoomIdx(a as u32 % w.room_count() as u32);
        let b = RoomIdx(b as u32 % w.room_count() as u32);
        let rules = TrailRules::new(true);
        first_step(&w, a, b, &rules) == first_step(&w, a, b, &rules)
    }

    #[test]
    fn invalid_rooms() {
        let w = corridor(3);
        let rules = TrailRules::default();
        assert_eq!(
            first_step(&w, RoomIdx(0), RoomIdx(7), &rules),
            Search::Error
        );
        assert_eq!(
            first_step(&w, RoomIdx(9), RoomIdx(0), &rules),
            Search::Error
        );
        assert_eq!(Search::Error.found(), None);
    }

    #[test]
    fn canonical_tie_break() {
        // Square: 0 -E- 1, 0 -S- 2, 1 -S- 3, 2 -E- 3.
        let mut w = corridor(2);
        let c = w
            .add_room(Vnum(2), "C", ZoneId(0), Sector::Road)
            .unwrap();
        let d = w
            .add_room(Vnum(3), "D", ZoneId(0), Sector::Road)
            .unwrap();
        w.link(RoomIdx(0), Dir::South, c).unwrap();
        w.link(RoomIdx(1), Dir::South, d).unwrap();
        w.link(c, Dir::East, d).unwrap();

        assert_eq!(
            first_step(&w, RoomIdx(0), d, &TrailRules::default()),
            Search::Step {
                dir: Dir::East,
                distance: 2
            }
        );
    }

    #[test]
    fn hidden_and_closed_exits() {
        let mut w = corridor(3);
        let rules = TrailRules::default();

        w.hang_door(RoomIdx(0), Dir::East, "door", ExitFlags::CLOSED)
            .unwrap();
        w.set_door(RoomIdx(0), Dir::East, ExitFlags::LOCKED, true);
        assert_eq!(
            first_step(&w, RoomIdx(0), RoomIdx(2), &rules),
            Search::Step {
                dir: Dir::East,
                distance: 2
            }
        );

        w.set_door(RoomIdx(1), Dir::East, ExitFlags::HIDDEN, true);
        assert_eq!(
            first_step(&w, RoomIdx(0), RoomIdx(2), &rules),
            Search::NoPath
        );
    }

    #[test]
    fn notrack_rooms_stop_npcs() {
        let mut w = corridor(3);
        w.set_room_flags(RoomIdx(1), RoomFlags::NOTRACK);

        assert_eq!(
            first_step(&w, RoomIdx(0), RoomIdx(2), &TrailRules::new(true)),
            Search::NoPath
        );
        assert!(first_step(&w, RoomIdx(0), RoomIdx(2), &TrailRules::new(false))
            .found()
            .is_some());
    }

    #[test]
    fn closure_filters() {
        let w = corridor(4);
        let no_east_of_one =
            |_: &dyn RoomGraph, from: RoomIdx, dir: Dir, _: &Exit| {
                !(from == RoomIdx(1) && dir == Dir::East)
            };
        assert_eq!(
            first_step(&w, RoomIdx(0), RoomIdx(3), &no_east_of_one),
            Search::NoPath
        );
        assert_eq!(
            first_step(&w, RoomIdx(3), RoomIdx(0), &no_east_of_one),
            Search::Step {
                dir: Dir::West,
                distance: 3
            }
        );
    }

    #[test]
    fn quarry_names() {
        assert_eq!(Quarry::parse("self"), Quarry::Myself);
        assert_eq!(Quarry::parse("ME"), Quarry::Myself);
        assert_eq!(Quarry::parse(" merchant "), Quarry::Named("merchant"));
    }
}
