//! Player-facing pursuit commands.
use util::StrExt;

use crate::{
    agent::{Class, Effects, Skill},
    prelude::*,
};

/// Result of a pursuit command.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// A pursuit session is now running.
    Started,
    /// A pre-check turned the command down before any trail was looked for.
    Refused,
    /// The trail check turned the command down.
    Rejected(Rejection),
    /// The command switched off a running session.
    Stopped,
    /// The command was ignored without comment.
    Ignored,
}

/// Which command is running, for the parts where they talk differently.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Verb {
    Track,
    Hunt,
}

impl Runtime {
    /// Start following the trail of the nearest agent with the given name,
    /// or stop tracking if a session is already running.
    ///
    /// The trail leads to the room where the target was when the tracks
    /// were found.
    pub fn start_track(&mut self, tracker: Entity, name: &str) -> Outcome {
        if let Err(outcome) = self.precheck(tracker, Verb::Track) {
            return outcome;
        }

        let info = TrackInfo::for_track(&tracker.profile(self));
        let victim = match self.find_victim(tracker, name, info, Verb::Track) {
            Ok(victim) => victim,
            Err(outcome) => return outcome,
        };
        let Some(room) = victim.room(self) else {
            return Outcome::Refused;
        };

        self.begin(
            tracker,
            Target::Room {
                room,
                trail_of: Some(victim),
            },
            info,
            Skill::Track,
        )
    }

    /// Go after the nearest agent with the given name wherever it moves,
    /// or stop hunting if a session is already running.
    ///
    /// With `follow` the hunter starts following the victim once caught
    /// up, this takes a Hunter or an immortal.
    pub fn start_hunt(
        &mut self,
        tracker: Entity,
        name: &str,
        follow: bool,
    ) -> Outcome {
        if let Err(outcome) = self.precheck(tracker, Verb::Hunt) {
            return outcome;
        }

        if follow
            && tracker.get::<Class>(self) != Class::Hunter
            && !tracker.is_immortal(self)
        {
            self.tell(
                tracker,
                "You do not have enough skills to follow someone \
                 after hunting.",
            );
            return Outcome::Refused;
        }

        let info = TrackInfo::for_hunt(&tracker.profile(self));
        let victim = match self.find_victim(tracker, name, info, Verb::Hunt) {
            Ok(victim) => victim,
            Err(outcome) => return outcome,
        };

        self.begin(
            tracker,
            Target::Victim { victim, follow },
            info,
            Skill::Hunt,
        )
    }

    /// Follow the trail to a fixed room.
    pub fn start_track_room(&mut self, tracker: Entity, vnum: Vnum) -> Outcome {
        if let Err(outcome) = self.precheck(tracker, Verb::Track) {
            return outcome;
        }

        let Some(room) = self.world.lookup(vnum) else {
            self.tell(tracker, "There is no such place.");
            return Outcome::Refused;
        };

        let info = TrackInfo::for_track(&tracker.profile(self));
        if nearest_match(&*self, tracker, Quarry::Room(room), info.sense)
            .is_none()
        {
            self.tell(
                tracker,
                "You can not seem to find a trail leading there.",
            );
            return Outcome::Refused;
        }

        self.begin(
            tracker,
            Target::Room {
                room,
                trail_of: None,
            },
            info,
            Skill::Track,
        )
    }

    /// Checks common to all the commands, including switching off a
    /// session that's already running.
    fn precheck(&mut self, tracker: Entity, verb: Verb) -> Result<(), Outcome> {
        if !tracker.is_alive(self) {
            return Err(Outcome::Ignored);
        }
        let me = tracker.profile(self);

        if me.is_fighting {
            self.tell(tracker, "You are too busy to look for a trail.");
            return Err(Outcome::Refused);
        }

        if verb == Verb::Hunt && me.is_autonomous() {
            return Err(Outcome::Ignored);
        }

        let skill = match verb {
            Verb::Track => Skill::Track,
            Verb::Hunt => Skill::Hunt,
        };
        if me.skill(skill) <= 0 && !(verb == Verb::Track && me.is_npc) {
            self.tell(tracker, "You have no idea how.");
            return Err(Outcome::Refused);
        }

        if me.is_confused() {
            self.tell(
                tracker,
                match verb {
                    Verb::Track => "You're far too confused to track anyone!",
                    Verb::Hunt => "You're far too confused to go hunting!",
                },
            );
            return Err(Outcome::Refused);
        }

        if tracker.is_tracking(self) {
            if me.is_autonomous() {
                return Err(Outcome::Ignored);
            }
            self.cancel(tracker);
            self.tell(
                tracker,
                match verb {
                    Verb::Track => "You stop tracking.",
                    Verb::Hunt => "You stop hunting.",
                },
            );
            return Err(Outcome::Stopped);
        }

        Ok(())
    }

    /// Resolve a target name into an agent worth tracking.
    fn find_victim(
        &mut self,
        tracker: Entity,
        name: &str,
        info: TrackInfo,
        verb: Verb,
    ) -> Result<Entity, Outcome> {
        let name = name.trim();
        if name.is_empty() {
            self.tell(
                tracker,
                match verb {
                    Verb::Track => "Whom are you trying to track?",
                    Verb::Hunt => "Whom are you trying to hunt?",
                },
            );
            return Err(Outcome::Refused);
        }

        let Some(victim) =
            nearest_match(&*self, tracker, Quarry::parse(name), info.sense)
                .and_then(|s| s.agent)
        else {
            self.tell(
                tracker,
                "You can not seem to find tracks for that person.",
            );
            return Err(Outcome::Refused);
        };

        if victim == tracker {
            self.tell(tracker, "Awesome!  You've found yourself!");
            return Err(Outcome::Refused);
        }

        if !tracker.is_immortal(self) && victim.is_immortal(self) {
            self.tell(
                tracker,
                match verb {
                    Verb::Track => {
                        "You feel their touches in everything around you.  \
                         How do you expect to track a god?"
                    }
                    Verb::Hunt => {
                        "You're pretty sure you're not the predator of this \
                         relationship."
                    }
                },
            );
            return Err(Outcome::Refused);
        }

        if victim.room(self) == tracker.room(self) {
            let hes = victim.profile(self).sex.hes();
            self.tell(tracker, &format!("{hes} right here!"));
            return Err(Outcome::Refused);
        }

        if victim.get::<Effects>(self).contains(Effects::NOTRACK) {
            self.tell(
                tracker,
                "You can not seem to find tracks for that person.",
            );
            return Err(Outcome::Refused);
        }

        log::debug!(
            "{tracker} picks up the trail of {victim} ({})",
            victim.name(self).capitalize()
        );
        Ok(victim)
    }

    fn begin(
        &mut self,
        tracker: Entity,
        target: Target<Entity>,
        info: TrackInfo,
        skill: Skill,
    ) -> Outcome {
        match Pursuit::start(self, tracker, target, info) {
            Ok(pursuit) => {
                self.launch(pursuit);
                self.practice(tracker, skill);
                Outcome::Started
            }
            Err(rejection) => Outcome::Rejected(rejection),
        }
    }
}
