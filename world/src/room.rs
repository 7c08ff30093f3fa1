use std::fmt;

use bitflags::bitflags;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter};

use crate::{Dir, NUM_OF_DIRS};

/// Dense runtime index of a room in the world arena.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Display, From,
)]
#[display("room {_0}")]
pub struct RoomIdx(pub u32);

impl RoomIdx {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable external room identifier used by world data files.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Display,
    From,
    Serialize,
    Deserialize,
)]
#[display("#{_0}")]
#[serde(transparent)]
pub struct Vnum(pub u32);

/// Administrative partition of the room graph.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ZoneId(pub u32);

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    StrumDisplay,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Sector {
    #[default]
    Structure,
    City,
    Field,
    Forest,
    Hills,
    Mountain,
    /// Easily passable water.
    Shallows,
    /// Water that needs a boat.
    Water,
    Underwater,
    Air,
    Road,
    Grasslands,
    Cave,
    Ruins,
    Swamp,
    Beach,
    Underdark,
    AstralPlane,
    AirPlane,
    FirePlane,
    EarthPlane,
    EtherealPlane,
    Avernus,
}

impl Sector {
    /// Surface water where trails wash out.
    pub fn is_water(self) -> bool {
        matches!(self, Sector::Shallows | Sector::Water)
    }

    /// Built-up settled terrain.
    pub fn is_town(self) -> bool {
        matches!(self, Sector::Structure | Sector::City)
    }
}

bitflags! {
    #[derive(
        Copy,
        Clone,
        Debug,
        Default,
        Eq,
        PartialEq,
        Hash,
        Serialize,
        Deserialize,
    )]
    pub struct ExitFlags: u8 {
        /// Exit has a door that can be opened and closed.
        const DOOR = 1 << 0;
        const CLOSED = 1 << 1;
        const LOCKED = 1 << 2;
        /// Exit does not show up in searches.
        const HIDDEN = 1 << 3;
    }
}

bitflags! {
    #[derive(
        Copy,
        Clone,
        Debug,
        Default,
        Eq,
        PartialEq,
        Hash,
        Serialize,
        Deserialize,
    )]
    pub struct RoomFlags: u16 {
        const DARK = 1 << 0;
        /// NPCs can't follow trails into the room.
        const NOTRACK = 1 << 1;
        const PEACEFUL = 1 << 2;
        const INDOORS = 1 << 3;
    }
}

/// Directed edge from a room.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Exit {
    /// Destination room, `None` for exits that lead nowhere.
    pub to: Option<RoomIdx>,
    pub flags: ExitFlags,
    /// Door keyword, used when narrating door handling.
    pub keyword: Option<String>,
}

impl Exit {
    pub fn new(to: RoomIdx) -> Self {
        Exit {
            to: Some(to),
            ..Default::default()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags.contains(ExitFlags::CLOSED)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ExitFlags::HIDDEN)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(ExitFlags::LOCKED)
    }

    /// Name for the exit in narration.
    pub fn name(&self) -> &str {
        match &self.keyword {
            Some(k) if !k.is_empty() => k,
            _ => "door",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Room {
    pub vnum: Vnum,
    pub name: String,
    pub zone: ZoneId,
    pub sector: Sector,
    pub flags: RoomFlags,
    pub exits: [Option<Exit>; NUM_OF_DIRS],
}

impl Room {
    pub fn exit(&self, dir: Dir) -> Option<&Exit> {
        self.exits[dir.index()].as_ref()
    }

    pub fn exit_mut(&mut self, dir: Dir) -> Option<&mut Exit> {
        self.exits[dir.index()].as_mut()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.vnum)
    }
}
