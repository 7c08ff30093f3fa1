//! Tick-driven pursuit sessions.
use std::fmt;

use world::{Dir, RoomGraph, RoomIdx};

use crate::{
    agent::{Class, Effects, MobFlags, Position, Profile, Sex, Stance},
    params::TrackInfo,
    pathing::{first_step, Search, TrailRules},
    Realm, LVL_GOD, SLOW_TRACK_DELAY,
};

/// What a pursuit is heading for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Target<A> {
    /// A fixed room, optionally the place where someone's trail was picked
    /// up. The pursuit also ends if it runs into that someone.
    Room { room: RoomIdx, trail_of: Option<A> },
    /// Wherever the victim currently is.
    Victim {
        victim: A,
        /// Start following the victim on arrival.
        follow: bool,
    },
}

impl<A: Copy> Target<A> {
    /// Agent whose trail is being followed, if any.
    pub fn quarry(&self) -> Option<A> {
        match self {
            Target::Room { trail_of, .. } => *trail_of,
            Target::Victim { victim, .. } => Some(*victim),
        }
    }

    /// Whether the pursuit chases a living target with no fixed end point.
    pub fn is_open_ended(&self) -> bool {
        matches!(self, Target::Victim { .. })
    }

    fn follows(&self) -> bool {
        matches!(self, Target::Victim { follow: true, .. })
    }
}

/// Reason a pursuit couldn't get started.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// Tracker stands in water and the trail washed out.
    Waves,
    /// No path, or the target is beyond sensing distance.
    NoTrail,
    /// Target is where the tracker already is.
    AlreadyHere,
    /// Target can be sensed but is this much beyond the pursuit range.
    OutOfRange { over: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Waves => write!(f, "lost in the waves"),
            Rejection::NoTrail => write!(f, "no trail found"),
            Rejection::AlreadyHere => write!(f, "already there"),
            Rejection::OutOfRange { over } => {
                write!(f, "{over} rooms out of range")
            }
        }
    }
}

/// How a pursuit session ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum End {
    Arrived,
    Lost,
    /// Couldn't get a door open.
    Obstructed,
}

/// What the scheduler should do with a session after a step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Directive {
    /// Run the session again after this many ticks.
    Again(i64),
    Finished(End),
}

/// Conditions checked every step that can make the tracker lose the trail.
///
/// Gates are checked in the order of `Gate::ALL` and the first one that
/// trips ends the session.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Gate {
    /// Trails wash out in water unless the tracker is very skilled.
    Water,
    /// Stealthy quarry may cover its tracks.
    Stealth,
    Fighting,
    /// Tracker must stay alert.
    Stance,
    /// Tracker must stay on their feet.
    Position,
    /// Zone-bound NPCs won't chase across a zone boundary.
    StayZone,
    /// Mortal rangers can't run open-ended hunts out of town.
    Town,
}

impl Gate {
    pub const ALL: [Gate; 7] = [
        Gate::Water,
        Gate::Stealth,
        Gate::Fighting,
        Gate::Stance,
        Gate::Position,
        Gate::StayZone,
        Gate::Town,
    ];

    /// Check the gate for a step, return the message the tracker gets if
    /// the trail is lost here.
    pub fn check<R: Realm>(
        self,
        realm: &mut R,
        leg: &Leg,
    ) -> Option<&'static str> {
        let me = &leg.tracker;
        let map = realm.map();
        let tripped = match self {
            Gate::Water => {
                map.sector(leg.here).is_water() && {
                    let odds = me.track_skill.saturating_sub(2).max(2);
                    realm.percent() > odds
                }
            }
            Gate::Stealth => match &leg.quarry {
                Some(q) if q.effects.contains(Effects::STEALTH) => {
                    q.concealment > realm.between(0, 500)
                }
                _ => false,
            },
            Gate::Fighting => me.is_fighting,
            Gate::Stance => me.stance < Stance::Alert,
            Gate::Position => me.position < Position::Standing,
            Gate::StayZone => {
                me.is_npc
                    && me.mob_flags.contains(MobFlags::STAY_ZONE)
                    && map.zone(leg.here)
                        != map.zone(leg.quarry_room.unwrap_or(leg.goal))
            }
            Gate::Town => {
                leg.open_ended
                    && me.class == Class::Ranger
                    && !me.is_immortal()
                    && map.sector(leg.here).is_town()
                    && !map.sector(leg.next).is_town()
            }
        };

        tripped.then_some(match self {
            Gate::Water => "The trail is lost in the churning water.",
            Gate::Stealth => "You can't seem to find any more tracks.",
            Gate::Fighting => "You give up the chase for the fight!",
            Gate::Stance => "You are too relaxed to continue tracking now.",
            Gate::Position => "You stop tracking.",
            Gate::StayZone | Gate::Town => "You lose your victim's tracks.",
        })
    }
}

/// Situation of a single pursuit step, as seen by the gates.
#[derive(Clone, Debug)]
pub struct Leg {
    pub tracker: Profile,
    /// Profile of the agent being trailed, if any.
    pub quarry: Option<Profile>,
    /// Room the trailed agent is in right now.
    pub quarry_room: Option<RoomIdx>,
    /// Tracker's room.
    pub here: RoomIdx,
    /// Room the pursuit is heading for.
    pub goal: RoomIdx,
    /// Room the next step leads to.
    pub next: RoomIdx,
    pub dir: Dir,
    pub distance: usize,
    pub open_ended: bool,
}

/// An ongoing pursuit of one tracker after one target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pursuit<A> {
    pub tracker: A,
    pub target: Target<A>,
    pub info: TrackInfo,
}

impl<A: Copy + Eq + fmt::Debug> Pursuit<A> {
    /// Check whether the target can be pursued at all and set up the
    /// session if so.
    ///
    /// The tracker is told how the check went either way. The first step
    /// should be scheduled `info.speed` ticks after a successful start.
    /// Unusable speed or range in `info` fall back to defaults.
    pub fn start<R: Realm<Agent = A>>(
        realm: &mut R,
        tracker: A,
        target: Target<A>,
        info: TrackInfo,
    ) -> Result<Self, Rejection> {
        let info = info.normalized();
        let ret = Pursuit {
            tracker,
            target,
            info,
        };

        match ret.feasibility(realm) {
            Ok(distance) => {
                log::debug!(
                    "Pursuit::start: {tracker:?} after {target:?} \
                     at distance {distance}, {info:?}"
                );
                realm.tell(tracker, "You begin to search for tracks...");
                Ok(ret)
            }
            Err(rejection) => {
                log::debug!(
                    "Pursuit::start: {tracker:?} after {target:?} \
                     rejected, {rejection}"
                );
                let msg = ret.rejection_message(realm, rejection);
                realm.tell(tracker, &msg);
                Err(rejection)
            }
        }
    }

    fn feasibility<R: Realm<Agent = A>>(
        &self,
        realm: &mut R,
    ) -> Result<usize, Rejection> {
        let Some((here, me)) = realm
            .room_of(self.tracker)
            .zip(realm.profile(self.tracker))
        else {
            return Err(Rejection::NoTrail);
        };

        if realm.map().sector(here).is_water() {
            let odds = me.track_skill.saturating_sub(5).max(15);
            if realm.percent() > odds {
                return Err(Rejection::Waves);
            }
        }

        let Some(goal) = self.goal(realm) else {
            return Err(Rejection::NoTrail);
        };

        match first_step(realm.map(), here, goal, &TrailRules::new(me.is_npc)) {
            Search::AlreadyThere => Err(Rejection::AlreadyHere),
            Search::Step { distance, .. } if distance > self.info.sense => {
                Err(Rejection::NoTrail)
            }
            Search::Step { distance, .. } if distance > self.info.range => {
                Err(Rejection::OutOfRange {
                    over: distance - self.info.range,
                })
            }
            Search::Step { distance, .. } => Ok(distance),
            Search::NoPath | Search::Error => Err(Rejection::NoTrail),
        }
    }

    fn rejection_message<R: Realm<Agent = A>>(
        &self,
        realm: &R,
        rejection: Rejection,
    ) -> String {
        match rejection {
            Rejection::Waves => {
                "All traces seem to have been lost in the waves...".into()
            }
            Rejection::NoTrail => {
                "You can not seem to find tracks for that person.".into()
            }
            Rejection::AlreadyHere => {
                "Funny, the tracks seem to end right here!".into()
            }
            Rejection::OutOfRange { over } => {
                let sex = self
                    .target
                    .quarry()
                    .and_then(|q| realm.profile(q))
                    .map_or(Sex::Neuter, |p| p.sex);
                let woodsman = realm
                    .profile(self.tracker)
                    .is_some_and(|p| p.class.is_woodsman());

                if !woodsman {
                    format!(
                        "Hmmm... You sense {}.  {} must be close.",
                        sex.him(),
                        sex.he()
                    )
                } else if over <= 5 {
                    format!(
                        "You get a very very strong sense of {}.",
                        sex.him()
                    )
                } else if over <= 10 {
                    format!(
                        "You sense {} strongly, \
                         but you cannot find any tracks.",
                        sex.him()
                    )
                } else {
                    format!("Hmmm... You only just sense {}.", sex.him())
                }
            }
        }
    }

    /// Current room the pursuit is heading for, `None` if the victim is
    /// gone.
    pub fn goal<R: Realm<Agent = A>>(&self, realm: &R) -> Option<RoomIdx> {
        match self.target {
            Target::Room { room, .. } => Some(room),
            Target::Victim { victim, .. } => realm.room_of(victim),
        }
    }

    /// Take one step toward the target.
    pub fn step<R: Realm<Agent = A>>(&mut self, realm: &mut R) -> Directive {
        let tracker = self.tracker;

        let (Some(here), Some(me)) =
            (realm.room_of(tracker), realm.profile(tracker))
        else {
            log::debug!("Pursuit::step: tracker {tracker:?} is gone");
            return Directive::Finished(End::Lost);
        };

        let (quarry, quarry_room) = match self.target.quarry() {
            Some(q) => match realm.profile(q).zip(realm.room_of(q)) {
                Some((p, room)) => (Some(p), Some(room)),
                None => return self.lose(realm, "You lose the trail."),
            },
            None => (None, None),
        };

        let Some(goal) = self.goal(realm) else {
            return self.lose(realm, "You lose the trail.");
        };

        let rules = TrailRules::new(me.is_npc);
        let (dir, distance) = match first_step(realm.map(), here, goal, &rules)
        {
            Search::AlreadyThere => return self.arrive(realm),
            Search::Step { dir, distance } => (dir, distance),
            Search::NoPath | Search::Error => {
                return self.lose(realm, "You lose the trail.");
            }
        };

        if distance > self.info.range {
            return self.lose(realm, "The trail has faded away.");
        }

        let Some(next) = realm.map().destination(here, dir) else {
            return self.lose(realm, "You lose the trail.");
        };

        let leg = Leg {
            tracker: me,
            quarry,
            quarry_room,
            here,
            goal,
            next,
            dir,
            distance,
            open_ended: self.target.is_open_ended(),
        };

        for gate in Gate::ALL {
            if let Some(msg) = gate.check(realm, &leg) {
                log::trace!("Pursuit::step: {tracker:?} stopped by {gate:?}");
                return self.lose(realm, msg);
            }
        }
        let me = leg.tracker;

        if me.is_casting {
            // Doesn't cost the tracker the trail, just this step.
            return Directive::Again(self.delay(&me));
        }

        if let Some(exit) = realm.map().exit(here, dir) {
            if exit.is_closed() && me.level < LVL_GOD {
                let door = exit.name().to_string();
                realm.tell(tracker, &format!("You try to open the {door}."));
                if !realm.open_door(tracker, dir) {
                    realm.tell(tracker, "You stop tracking.");
                    log::debug!(
                        "Pursuit::step: {tracker:?} blocked by {door} {dir}"
                    );
                    return Directive::Finished(End::Obstructed);
                }
            }
        }

        realm.tell(
            tracker,
            &format!("You find signs of a track {dir} from here!"),
        );
        if !realm.move_agent(tracker, dir) {
            return self.lose(realm, "You stop tracking.");
        }
        let name = realm.short_name(tracker);
        realm.tell_room(tracker, &format!("{name} searches for tracks."));
        log::trace!("Pursuit::step: {tracker:?} went {dir}, {distance} to go");

        let now = realm.room_of(tracker);
        let caught = self.target.quarry().and_then(|q| realm.room_of(q));
        if now == Some(goal) || (now.is_some() && now == caught) {
            return self.arrive(realm);
        }

        Directive::Again(self.delay(&me))
    }

    fn arrive<R: Realm<Agent = A>>(&self, realm: &mut R) -> Directive {
        realm.tell(self.tracker, "The tracks come to an end here!");
        if self.target.follows() {
            if let Some(victim) = self.target.quarry() {
                realm.follow(self.tracker, victim);
            }
        }
        log::debug!("Pursuit: {:?} arrived", self.tracker);
        Directive::Finished(End::Arrived)
    }

    fn lose<R: Realm<Agent = A>>(&self, realm: &mut R, msg: &str) -> Directive {
        realm.tell(self.tracker, msg);
        log::debug!("Pursuit: {:?} lost the trail: {msg}", self.tracker);
        Directive::Finished(End::Lost)
    }

    /// Ticks until the next step.
    pub fn delay(&self, me: &Profile) -> i64 {
        if me.is_slow_tracker() {
            self.info.speed + SLOW_TRACK_DELAY
        } else {
            self.info.speed
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use world::{ExitFlags, Sector, Vnum};

    use super::*;
    use crate::{ecs::Casting, prelude::*, Msg, Scenario};

    fn town_edge() -> (Runtime, Entity, Entity) {
        let mut s = Scenario::default();
        s.world.room(1, "Gate", Sector::City, &[]);
        s.world.room(2, "Road", Sector::Road, &[(Dir::West, 1)]);
        s.world.room(3, "Field", Sector::Field, &[(Dir::West, 2)]);
        let ranger = s.agent("ranger", 1);
        ranger.class = Class::Ranger;
        ranger.level = 30;
        ranger.track = 100;
        ranger.hunt = 100;
        s.agent("outlaw", 3);

        let r = Runtime::new(&s).unwrap();
        let ranger = r.agent("ranger").unwrap();
        let outlaw = r.agent("outlaw").unwrap();
        (r, ranger, outlaw)
    }

    fn ticks(r: &mut Runtime, n: usize) {
        for _ in 0..n {
            r.tick();
        }
    }

    fn last_told(r: &mut Runtime, e: Entity) -> Option<String> {
        r.take_messages()
            .into_iter()
            .filter_map(|m| match m {
                Msg::Tell(a, text) if a == e => Some(text),
                _ => None,
            })
            .last()
    }

    #[test]
    fn gate_order() {
        let mut me = Profile {
            stance: Stance::Resting,
            position: Position::Sitting,
            ..Default::default()
        };
        me.is_fighting = true;
        let leg = Leg {
            tracker: me,
            quarry: None,
            quarry_room: None,
            here: RoomIdx(0),
            goal: RoomIdx(1),
            next: RoomIdx(1),
            dir: Dir::East,
            distance: 1,
            open_ended: false,
        };

        let (mut r, _, _) = town_edge();
        let tripped: Vec<Gate> = Gate::ALL
            .into_iter()
            .filter(|g| g.check(&mut r, &leg).is_some())
            .collect();
        assert_eq!(tripped, vec![Gate::Fighting, Gate::Stance, Gate::Position]);
    }

    #[test]
    fn rangers_stay_in_town() {
        let (mut r, ranger, _) = town_edge();
        r.start_hunt(ranger, "outlaw", false);
        ticks(&mut r, 3);
        assert_eq!(r.ending(ranger), Some(End::Lost));
        assert_eq!(
            last_told(&mut r, ranger).as_deref(),
            Some("You lose your victim's tracks.")
        );

        // Following a trail to where it was found is fine.
        let (mut r, ranger, outlaw) = town_edge();
        r.start_track(ranger, "outlaw");
        ticks(&mut r, 6);
        assert_eq!(ranger.room(&r), outlaw.room(&r));
        assert_eq!(r.ending(ranger), Some(End::Arrived));
    }

    #[test]
    fn casting_pauses() {
        let (mut r, ranger, outlaw) = town_edge();
        let gate = ranger.room(&r);
        r.start_track(ranger, "outlaw");
        ranger.set(&mut r, Casting(true));

        ticks(&mut r, 9);
        assert_eq!(ranger.room(&r), gate);
        assert!(ranger.is_tracking(&r));

        ranger.set(&mut r, Casting(false));
        ticks(&mut r, 6);
        assert_eq!(ranger.room(&r), outlaw.room(&r));
    }

    #[test]
    fn must_be_alert_and_standing() {
        let (mut r, ranger, _) = town_edge();
        r.start_track(ranger, "outlaw");
        ranger.set(&mut r, Stance::Resting);
        ticks(&mut r, 3);
        assert_eq!(
            last_told(&mut r, ranger).as_deref(),
            Some("You are too relaxed to continue tracking now.")
        );

        let (mut r, ranger, _) = town_edge();
        r.start_track(ranger, "outlaw");
        ranger.set(&mut r, Position::Kneeling);
        ticks(&mut r, 3);
        assert_eq!(
            last_told(&mut r, ranger).as_deref(),
            Some("You stop tracking.")
        );
        assert_eq!(r.ending(ranger), Some(End::Lost));
    }

    #[test]
    fn gods_ignore_doors() {
        let (mut r, ranger, outlaw) = town_edge();
        ranger.set(&mut r, crate::ecs::Level(LVL_GOD));
        let road = r.world().lookup(Vnum(2)).unwrap();
        r.world_mut()
            .hang_door(
                road,
                Dir::East,
                "gate",
                ExitFlags::CLOSED | ExitFlags::LOCKED,
            )
            .unwrap();

        r.start_hunt(ranger, "outlaw", false);
        ticks(&mut r, 6);
        assert_eq!(ranger.room(&r), outlaw.room(&r));
        let told: Vec<String> = r
            .take_messages()
            .into_iter()
            .filter_map(|m| match m {
                Msg::Tell(_, text) => Some(text),
                _ => None,
            })
            .collect();
        assert!(!told.iter().any(|t| t.contains("open")));
        assert!(r.world().exit(road, Dir::East).unwrap().is_closed());
    }
}
