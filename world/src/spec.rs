//! Serializable world descriptions.
use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use util::IndexMap;

use crate::{Dir, Exit, ExitFlags, RoomFlags, Sector, Vnum, World, ZoneId};

/// World data as stored in files, rooms keyed by vnum and exits referring
/// to vnums.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WorldSpec {
    pub rooms: IndexMap<Vnum, RoomSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RoomSpec {
    pub name: String,
    pub zone: ZoneId,
    pub sector: Sector,
    pub flags: RoomFlags,
    pub exits: BTreeMap<Dir, ExitSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExitSpec {
    pub to: Option<Vnum>,
    pub flags: ExitFlags,
    pub keyword: Option<String>,
}

impl TryFrom<&WorldSpec> for World {
    type Error = anyhow::Error;

    fn try_from(spec: &WorldSpec) -> Result<Self> {
        let mut ret = World::new();

        // Create all rooms first so exits can point forward.
        for (&vnum, room) in &spec.rooms {
            let idx = ret.add_room(vnum, &room.name, room.zone, room.sector)?;
            ret.set_room_flags(idx, room.flags);
        }

        for (&vnum, room) in &spec.rooms {
            let Some(from) = ret.lookup(vnum) else {
                bail!("WorldSpec: room {vnum} went missing");
            };
            for (&dir, exit) in &room.exits {
                let to = match exit.to {
                    None => None,
                    Some(v) => match ret.lookup(v) {
                        Some(idx) => Some(idx),
                        None => bail!(
                            "WorldSpec: exit {dir} from {vnum} \
                             leads to unknown room {v}"
                        ),
                    },
                };
                ret.dig(
                    from,
                    dir,
                    Exit {
                        to,
                        flags: exit.flags,
                        keyword: exit.keyword.clone(),
                    },
                )?;
            }
        }

        log::debug!("WorldSpec: loaded {} rooms", spec.rooms.len());
        Ok(ret)
    }
}

impl WorldSpec {
    /// Add a room with two-way plain exits to the given neighbors.
    ///
    /// Convenience builder for hand-written maps.
    pub fn room(
        &mut self,
        vnum: u32,
        name: &str,
        sector: Sector,
        links: &[(Dir, u32)],
    ) -> &mut RoomSpec {
        for &(dir, other) in links {
            self.rooms.entry(Vnum(other)).or_default().exits.insert(
                dir.reverse(),
                ExitSpec {
                    to: Some(Vnum(vnum)),
                    ..Default::default()
                },
            );
        }

        let room = self.rooms.entry(Vnum(vnum)).or_default();
        room.name = name.to_string();
        room.sector = sector;
        for &(dir, other) in links {
            room.exits.insert(
                dir,
                ExitSpec {
                    to: Some(Vnum(other)),
                    ..Default::default()
                },
            );
        }
        room
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::RoomGraph;

    #[test]
    fn resolve_spec() {
        let mut spec = WorldSpec::default();
        spec.room(10, "Gate", Sector::City, &[]);
        spec.room(11, "Road", Sector::Road, &[(Dir::West, 10)]);
        spec.room(12, "Pond", Sector::Shallows, &[(Dir::South, 11)]);

        let w = World::try_from(&spec).unwrap();
        let gate = w.lookup(Vnum(10)).unwrap();
        let road = w.lookup(Vnum(11)).unwrap();
        let pond = w.lookup(Vnum(12)).unwrap();

        assert_eq!(w.destination(road, Dir::West), Some(gate));
        assert_eq!(w.destination(gate, Dir::East), Some(road));
        assert_eq!(w.destination(pond, Dir::South), Some(road));
        assert_eq!(w.destination(road, Dir::North), Some(pond));
        assert!(w.sector(pond).is_water());
        assert!(w.sector(gate).is_town());
        assert_eq!(w.room(road).unwrap().name, "Road");
    }

    #[test]
    fn dangling_exit() {
        let mut spec = WorldSpec::default();
        spec.room(1, "Cell", Sector::Structure, &[]).exits.insert(
            Dir::North,
            ExitSpec {
                to: Some(Vnum(99)),
                ..Default::default()
            },
        );
        assert!(World::try_from(&spec).is_err());
    }

    #[test]
    fn exit_to_nowhere() {
        let mut spec = WorldSpec::default();
        spec.room(1, "Cliff", Sector::Mountain, &[])
            .exits
            .insert(Dir::Down, ExitSpec::default());
        let w = World::try_from(&spec).unwrap();
        let cliff = w.lookup(Vnum(1)).unwrap();
        assert!(w.exit(cliff, Dir::Down).is_some());
        assert_eq!(w.destination(cliff, Dir::Down), None);
    }
}
