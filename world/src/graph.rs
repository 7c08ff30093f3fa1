use anyhow::{bail, Result};
use util::HashMap;

use crate::{
    Dir, Exit, ExitFlags, Room, RoomFlags, RoomIdx, Sector, Vnum, ZoneId,
};

/// Read access to a room graph.
///
/// Searches only ever read the graph through this interface, so any world
/// store that can answer these queries can be tracked through.
pub trait RoomGraph {
    /// Number of rooms, valid indices are `0..room_count()`.
    fn room_count(&self) -> usize;

    /// Exit leading out of a room in the given direction, if any.
    fn exit(&self, room: RoomIdx, dir: Dir) -> Option<&Exit>;

    fn room_flags(&self, room: RoomIdx) -> RoomFlags;

    fn zone(&self, room: RoomIdx) -> ZoneId;

    fn sector(&self, room: RoomIdx) -> Sector;

    fn contains(&self, room: RoomIdx) -> bool {
        room.index() < self.room_count()
    }

    /// Destination of the exit in the given direction, if the exit exists
    /// and leads somewhere.
    fn destination(&self, room: RoomIdx, dir: Dir) -> Option<RoomIdx> {
        self.exit(room, dir).and_then(|e| e.to)
    }
}

/// Arena of rooms.
///
/// Rooms are never removed, so room indices handed out by the world stay
/// valid for its lifetime.
#[derive(Clone, Debug, Default)]
pub struct World {
    rooms: Vec<Room>,
    vnums: HashMap<Vnum, RoomIdx>,
}

impl World {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a new exitless room.
    pub fn add_room(
        &mut self,
        vnum: Vnum,
        name: impl Into<String>,
        zone: ZoneId,
        sector: Sector,
    ) -> Result<RoomIdx> {
        if self.vnums.contains_key(&vnum) {
            bail!("World::add_room: duplicate room {vnum}");
        }

        let idx = RoomIdx(self.rooms.len() as u32);
        self.rooms.push(Room {
            vnum,
            name: name.into(),
            zone,
            sector,
            ..Default::default()
        });
        self.vnums.insert(vnum, idx);
        Ok(idx)
    }

    pub fn room(&self, idx: RoomIdx) -> Option<&Room> {
        self.rooms.get(idx.index())
    }

    pub fn room_mut(&mut self, idx: RoomIdx) -> Option<&mut Room> {
        self.rooms.get_mut(idx.index())
    }

    pub fn lookup(&self, vnum: Vnum) -> Option<RoomIdx> {
        self.vnums.get(&vnum).copied()
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomIdx, &Room)> + '_ {
        self.rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (RoomIdx(i as u32), r))
    }

    /// Set a one-way exit, replacing any existing exit in that direction.
    pub fn dig(&mut self, from: RoomIdx, dir: Dir, exit: Exit) -> Result<()> {
        if let Some(to) = exit.to {
            if !self.contains(to) {
                bail!("World::dig: exit to nonexistent {to}");
            }
        }
        let Some(room) = self.room_mut(from) else {
            bail!("World::dig: exit from nonexistent {from}");
        };
        room.exits[dir.index()] = Some(exit);
        Ok(())
    }

    /// Connect two rooms with plain exits in both directions.
    pub fn link(&mut self, a: RoomIdx, dir: Dir, b: RoomIdx) -> Result<()> {
        self.dig(a, dir, Exit::new(b))?;
        self.dig(b, dir.reverse(), Exit::new(a))
    }

    /// Put a closed door on both sides of a two-way passage.
    pub fn hang_door(
        &mut self,
        room: RoomIdx,
        dir: Dir,
        keyword: &str,
        flags: ExitFlags,
    ) -> Result<()> {
        let Some(exit) = self.room_mut(room).and_then(|r| r.exit_mut(dir))
        else {
            bail!("World::hang_door: no exit {dir} from {room}");
        };
        exit.flags |= ExitFlags::DOOR | flags;
        exit.keyword = Some(keyword.to_string());
        let other = exit.to;

        if let Some(back) = other
            .and_then(|o| self.room_mut(o))
            .and_then(|r| r.exit_mut(dir.reverse()))
        {
            if back.to == Some(room) {
                back.flags |= ExitFlags::DOOR | flags;
                back.keyword = Some(keyword.to_string());
            }
        }
        Ok(())
    }

    /// Change door flags on both sides of a passage.
    ///
    /// Returns false if there is no exit at the given position.
    pub fn set_door(
        &mut self,
        room: RoomIdx,
        dir: Dir,
        flags: ExitFlags,
        on: bool,
    ) -> bool {
        let Some(exit) = self.room_mut(room).and_then(|r| r.exit_mut(dir))
        else {
            return false;
        };
        exit.flags.set(flags, on);
        let other = exit.to;

        if let Some(back) = other
            .and_then(|o| self.room_mut(o))
            .and_then(|r| r.exit_mut(dir.reverse()))
        {
            if back.to == Some(room) {
                back.flags.set(flags, on);
            }
        }
        true
    }

    pub fn set_room_flags(&mut self, room: RoomIdx, flags: RoomFlags) {
        if let Some(r) = self.room_mut(room) {
            r.flags = flags;
        }
    }
}

impl RoomGraph for World {
    fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn exit(&self, room: RoomIdx, dir: Dir) -> Option<&Exit> {
        self.room(room).and_then(|r| r.exit(dir))
    }

    fn room_flags(&self, room: RoomIdx) -> RoomFlags {
        self.room(room).map(|r| r.flags).unwrap_or_default()
    }

    fn zone(&self, room: RoomIdx) -> ZoneId {
        self.room(room).map(|r| r.zone).unwrap_or_default()
    }

    fn sector(&self, room: RoomIdx) -> Sector {
        self.room(room).map(|r| r.sector).unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_rooms() -> (World, RoomIdx, RoomIdx) {
        let mut w = World::new();
        let a = w
            .add_room(Vnum(1), "Hall", ZoneId(0), Sector::Structure)
            .unwrap();
        let b = w
            .add_room(Vnum(2), "Yard", ZoneId(0), Sector::Field)
            .unwrap();
        (w, a, b)
    }

    #[test]
    fn linking() {
        let (mut w, a, b) = two_rooms();
        w.link(a, Dir::East, b).unwrap();
        assert_eq!(w.destination(a, Dir::East), Some(b));
        assert_eq!(w.destination(b, Dir::West), Some(a));
        assert_eq!(w.destination(a, Dir::West), None);
        assert_eq!(w.lookup(Vnum(2)), Some(b));
        assert!(!w.contains(RoomIdx(2)));
    }

    #[test]
    fn one_way_exits() {
        let (mut w, a, b) = two_rooms();
        w.dig(a, Dir::Down, Exit::new(b)).unwrap();
        assert_eq!(w.destination(a, Dir::Down), Some(b));
        assert_eq!(w.destination(b, Dir::Up), None);
        assert!(w.dig(a, Dir::Up, Exit::new(RoomIdx(9))).is_err());
    }

    #[test]
    fn duplicate_vnum() {
        let (mut w, _, _) = two_rooms();
        assert!(w
            .add_room(Vnum(1), "Again", ZoneId(0), Sector::Field)
            .is_err());
    }

    #[test]
    fn doors_are_shared() {
        let (mut w, a, b) = two_rooms();
        w.link(a, Dir::East, b).unwrap();
        w.hang_door(a, Dir::East, "gate", ExitFlags::CLOSED).unwrap();
        assert!(w.exit(a, Dir::East).unwrap().is_closed());
        assert!(w.exit(b, Dir::West).unwrap().is_closed());
        assert_eq!(w.exit(b, Dir::West).unwrap().name(), "gate");

        assert!(w.set_door(b, Dir::West, ExitFlags::CLOSED, false));
        assert!(!w.exit(a, Dir::East).unwrap().is_closed());
        assert!(!w.set_door(b, Dir::North, ExitFlags::CLOSED, false));
    }
}
