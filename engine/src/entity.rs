//! Generic entity logic.
use std::fmt;

use derive_more::Deref;
use hecs::Component;

use crate::prelude::*;

// Dummy wrapper so we can write impls for it directly instead of deriving a
// trait for hecs::Entity and writing every fn signature twice.
/// Agent identifier datatype. All the actual contents live in the ECS.
#[derive(
    Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug, Deref,
)]
pub struct Entity(pub(crate) hecs::Entity);

impl Entity {
    pub(crate) fn get<T>(&self, r: &impl AsRef<Runtime>) -> T
    where
        T: Component + Clone + Default,
    {
        let r = r.as_ref();
        r.ecs
            .get::<&T>(**self)
            .map(|c| (*c).clone())
            .unwrap_or_default()
    }

    pub(crate) fn set<T>(&self, r: &mut impl AsMut<Runtime>, val: T)
    where
        T: Component + Default + PartialEq,
    {
        let r = r.as_mut();
        if val == T::default() {
            // Remove default values, abstraction layer assumes components are
            // always present but defaulted.
            //
            // Will give an error if the component wasn't there to begin with,
            // just ignore that.
            let _ = r.ecs.remove_one::<T>(**self);
        } else if r.ecs.insert_one(**self, val).is_err() {
            log::warn!("Entity::set: {self} does not exist");
        }
    }

    /// Access and mutate a component using a closure.
    ///
    /// Use for complex components that aren't just atomic values.
    pub(crate) fn with_mut<T: Component + Clone + Default + PartialEq, U>(
        &self,
        r: &mut impl AsMut<Runtime>,
        f: impl FnOnce(&mut T) -> U,
    ) -> U {
        let r = r.as_mut();
        let mut val = self.get::<T>(r);
        let ret = f(&mut val);
        self.set(r, val);
        ret
    }

    pub fn is_alive(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().ecs.contains(**self)
    }

    pub fn room(&self, r: &impl AsRef<Runtime>) -> Option<RoomIdx> {
        r.as_ref().placement.room_of(self)
    }

    /// Put the entity in a room, without any narration.
    pub fn place(&self, r: &mut impl AsMut<Runtime>, room: RoomIdx) {
        let r = r.as_mut();
        if r.world.contains(room) {
            r.placement.insert(room, *self);
        } else {
            log::warn!("Entity::place: {self} sent to nonexistent {room}");
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.id())
    }
}
