use std::collections::BTreeMap;

use crate::prelude::*;

/// Spatial index, used for efficiently finding the rooms of entities and
/// the entities in rooms.
///
/// Room occupants are kept in arrival order.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Placement {
    rooms: BTreeMap<Entity, RoomIdx>,
    occupants: IndexMap<RoomIdx, IndexSet<Entity>>,
}

impl Placement {
    pub fn occupants(
        &self,
        room: RoomIdx,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.occupants.get(&room).into_iter().flatten().copied()
    }

    pub fn all_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.rooms.keys().copied()
    }

    pub fn room_of(&self, e: &Entity) -> Option<RoomIdx> {
        self.rooms.get(e).copied()
    }

    pub fn remove(&mut self, e: &Entity) {
        if let Some(room) = self.rooms.remove(e) {
            if let Some(set) = self.occupants.get_mut(&room) {
                set.shift_remove(e);
            }
        }
    }

    /// Move an entity into a room, it becomes the latest arrival there.
    pub fn insert(&mut self, room: RoomIdx, e: Entity) {
        self.remove(&e);
        self.rooms.insert(e, room);
        self.occupants.entry(room).or_default().insert(e);
    }
}
