//! NPCs going after prey on their own.
use crate::{ecs::Hunting, prelude::*};

impl Entity {
    /// Take one step toward the remembered prey, attack it when caught.
    pub(crate) fn hunt_prey(&self, r: &mut Runtime) {
        let Some(prey) = self.get::<Hunting>(r).0 else {
            return;
        };

        // Busy with other things right now.
        if self.is_fighting(r) || self.is_tracking(r) {
            return;
        }

        let (Some(here), Some(there)) = (self.room(r), prey.room(r)) else {
            r.say(*self, "Damn!  My prey is gone!!");
            self.set(r, Hunting(None));
            return;
        };

        let rules = TrailRules::new(self.is_npc(r));
        match first_step(&r.world, here, there, &rules) {
            Search::AlreadyThere => r.engage(*self, prey),
            Search::Step { dir, .. } => {
                log::trace!("{self} hunts {prey} going {dir}");
                if r.move_agent(*self, dir) && self.room(r) == prey.room(r) {
                    r.engage(*self, prey);
                }
            }
            Search::NoPath | Search::Error => {
                let him = prey.profile(r).sex.him();
                r.say(*self, &format!("Damn!  Lost {him}!"));
                self.set(r, Hunting(None));
            }
        }
    }

    /// Make the entity remember someone to hunt down.
    pub fn set_prey(&self, r: &mut Runtime, prey: Option<Entity>) {
        self.set(r, Hunting(prey));
    }

    pub fn prey(&self, r: &impl AsRef<Runtime>) -> Option<Entity> {
        self.get::<Hunting>(r).0
    }
}
