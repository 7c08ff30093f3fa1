//! Entity logic for agents.
use util::StrExt;

use crate::{
    agent::{Effects, Profile, Skill},
    ecs::*,
    prelude::*,
    LVL_GOD, LVL_IMMORT,
};

impl Entity {
    pub fn name(&self, r: &impl AsRef<Runtime>) -> String {
        self.get::<Name>(r).0
    }

    /// Short description, falls back to the first keyword.
    pub fn short(&self, r: &impl AsRef<Runtime>) -> String {
        let short = self.get::<Short>(r).0;
        if !short.is_empty() {
            return short;
        }
        self.name(r)
            .split_whitespace()
            .next()
            .unwrap_or("someone")
            .to_string()
    }

    pub fn answers_to(&self, r: &impl AsRef<Runtime>, name: &str) -> bool {
        self.get::<Name>(r).0.has_keyword(name)
    }

    pub fn level(&self, r: &impl AsRef<Runtime>) -> i32 {
        self.get::<Level>(r).0
    }

    pub fn is_npc(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<IsNpc>(r).0
    }

    pub fn is_immortal(&self, r: &impl AsRef<Runtime>) -> bool {
        self.level(r) >= LVL_IMMORT
    }

    pub fn skill(&self, r: &impl AsRef<Runtime>, skill: Skill) -> i32 {
        let skills = self.get::<Skills>(r);
        match skill {
            Skill::Track => skills.track,
            Skill::Hunt => skills.hunt,
        }
    }

    pub fn is_fighting(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<Fighting>(r).0.is_some()
    }

    /// Whether the entity has a pursuit session going.
    pub fn is_tracking(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().pursuits.contains_key(self)
    }

    pub fn profile(&self, r: &impl AsRef<Runtime>) -> Profile {
        let skills = self.get::<Skills>(r);
        Profile {
            level: self.level(r),
            class: self.get::<Class>(r),
            sex: self.get::<Sex>(r),
            is_npc: self.is_npc(r),
            is_possessed: self.get::<Possessed>(r).0,
            mob_flags: self.get::<MobFlags>(r),
            effects: self.get::<Effects>(r),
            concealment: self.get::<Concealment>(r).0,
            stance: self.get::<Stance>(r),
            position: self.get::<Position>(r),
            is_fighting: self.is_fighting(r),
            is_casting: self.get::<Casting>(r).0,
            track_skill: skills.track,
            hunt_skill: skills.hunt,
        }
    }

    pub fn can_see(&self, r: &impl AsRef<Runtime>, other: &Entity) -> bool {
        if self == other || self.is_immortal(r) {
            return true;
        }
        let mine = self.get::<Effects>(r);
        if mine.contains(Effects::BLIND) {
            return false;
        }
        !other.get::<Effects>(r).contains(Effects::INVISIBLE)
            || mine.contains(Effects::DETECT_INVIS)
    }

    /// Walk through an exit, bringing along followers from the room left
    /// behind.
    pub fn walk(&self, r: &mut Runtime, dir: Dir) -> bool {
        let Some(here) = self.room(r) else {
            return false;
        };
        let Some(exit) = r.world.exit(here, dir) else {
            r.tell(*self, "Alas, you cannot go that way...");
            return false;
        };
        let Some(there) = exit.to else {
            r.tell(*self, "Alas, you cannot go that way...");
            return false;
        };
        if exit.is_closed() && self.level(r) < LVL_GOD {
            let door = exit.name().to_string();
            r.tell(*self, &format!("The {door} seems to be closed."));
            return false;
        }

        let me = self.short(r).capitalize();
        r.tell_room(*self, &format!("{me} leaves {dir}."));
        self.place(r, there);
        r.tell_room(*self, &format!("{me} has arrived."));
        log::trace!("{self} walked {dir} from {here} to {there}");

        let view: &Runtime = r;
        let followers: Vec<Entity> = view
            .placement
            .occupants(here)
            .filter(|e| e.get::<Following>(view).0 == Some(*self))
            .filter(|e| !e.is_fighting(view))
            .collect();
        for e in followers {
            r.tell(e, &format!("You follow {}.", self.short(r)));
            e.walk(r, dir);
        }

        true
    }

    /// Try to open the door in the given direction, return whether the
    /// exit is open afterwards.
    pub fn open_door(&self, r: &mut Runtime, dir: Dir) -> bool {
        let Some(here) = self.room(r) else {
            return false;
        };
        let Some(exit) = r.world.exit(here, dir) else {
            return false;
        };
        if !exit.is_closed() {
            return true;
        }
        let door = exit.name().to_string();
        if exit.is_locked() {
            r.tell(*self, "It seems to be locked.");
            return false;
        }

        r.world.set_door(here, dir, world::ExitFlags::CLOSED, false);
        r.tell(*self, &format!("You open the {door}."));
        let me = self.short(r).capitalize();
        r.tell_room(*self, &format!("{me} opens the {door}."));
        true
    }

    pub fn start_following(&self, r: &mut Runtime, leader: Entity) {
        if self.get::<Following>(r).0 == Some(leader) {
            return;
        }
        self.set(r, Following(Some(leader)));
        r.tell(*self, &format!("You now follow {}.", leader.short(r)));
        let me = self.short(r).capitalize();
        r.tell(leader, &format!("{me} starts following you."));
    }

    pub fn attack(&self, r: &mut Runtime, victim: Entity) {
        if self == &victim || !victim.is_alive(r) {
            return;
        }
        self.set(r, Fighting(Some(victim)));
        if !victim.is_fighting(r) {
            victim.set(r, Fighting(Some(*self)));
        }
        let me = self.short(r).capitalize();
        r.tell(victim, &format!("{me} attacks you!"));
        log::debug!("{self} attacks {victim}");
    }

    /// Use of a skill may improve it.
    pub fn practice(&self, r: &mut Runtime, skill: Skill) {
        let current = self.skill(r, skill);
        if current >= 100 || r.dice.percent() >= 20 {
            return;
        }
        self.with_mut::<Skills, _>(r, |s| match skill {
            Skill::Track => s.track += 1,
            Skill::Hunt => s.hunt += 1,
        });
        log::debug!("{self} improved {skill:?} to {}", current + 1);
    }
}
