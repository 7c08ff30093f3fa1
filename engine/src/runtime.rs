use std::collections::BTreeMap;

use rand::SeedableRng;
use util::{GameRng, RngExt, StrExt};

use crate::{
    agent::{Profile, Skill},
    ecs::*,
    prelude::*,
    Placement, Scheduler, MOBILE_PULSE,
};

/// Source of random rolls.
#[derive(Clone, Debug)]
pub enum Dice {
    Rng(GameRng),
    /// Every roll comes out as this value, clamped to the roll's range.
    Loaded(i32),
}

impl Default for Dice {
    fn default() -> Self {
        Dice::Rng(GameRng::seed_from_u64(0xdeadbeef))
    }
}

impl Dice {
    /// Roll in `0..100`.
    pub fn percent(&mut self) -> i32 {
        match self {
            Dice::Rng(rng) => rng.percent(),
            Dice::Loaded(n) => (*n).clamp(0, 99),
        }
    }

    /// Roll in `lo..=hi`.
    pub fn between(&mut self, lo: i32, hi: i32) -> i32 {
        match self {
            Dice::Rng(rng) => rng.between(lo, hi),
            Dice::Loaded(n) => (*n).clamp(lo.min(hi), lo.max(hi)),
        }
    }
}

/// Delayed work for the runtime scheduler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub(crate) enum Task {
    /// Take the next step of an entity's pursuit.
    Pursue(Entity),
}

/// Main data container for the pursuit runtime.
pub struct Runtime {
    now: Instant,
    pub(crate) world: World,
    pub(crate) ecs: Ecs,
    pub(crate) placement: Placement,
    pub(crate) scheduler: Scheduler<Task>,
    pub(crate) pursuits: BTreeMap<Entity, Pursuit<Entity>>,
    /// How the latest pursuit of each entity ended.
    pub(crate) endings: BTreeMap<Entity, End>,
    pub(crate) dice: Dice,
    /// Scenario names of spawned agents.
    pub(crate) handles: IndexMap<String, Entity>,
    outbox: Vec<Msg>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime {
            // Start time from an above-zero value so that zero time values
            // can work as "unspecified time".
            now: Instant(3600),
            world: Default::default(),
            ecs: Default::default(),
            placement: Default::default(),
            scheduler: Default::default(),
            pursuits: Default::default(),
            endings: Default::default(),
            dice: Default::default(),
            handles: Default::default(),
            outbox: Default::default(),
        }
    }
}

impl AsRef<Runtime> for Runtime {
    fn as_ref(&self) -> &Runtime {
        self
    }
}

impl AsMut<Runtime> for Runtime {
    fn as_mut(&mut self) -> &mut Runtime {
        self
    }
}

impl Runtime {
    /// Create an empty runtime around a world.
    pub fn with_world(world: World) -> Self {
        Runtime {
            world,
            ..Default::default()
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn set_dice(&mut self, dice: Dice) {
        self.dice = dice;
    }

    pub fn spawn(&mut self, loadout: impl hecs::DynamicBundle) -> Entity {
        Entity(self.ecs.spawn(loadout))
    }

    /// Remove an entity from the game, ending anything it was doing.
    pub fn despawn(&mut self, e: Entity) {
        self.cancel(e);
        self.endings.remove(&e);
        self.placement.remove(&e);
        if self.ecs.despawn(*e).is_err() {
            log::warn!("Runtime::despawn: {e} does not exist");
        }
    }

    /// Look up an agent by the name it was given in the scenario.
    pub fn agent(&self, handle: &str) -> Option<Entity> {
        self.handles.get(handle).copied()
    }

    pub fn agents(&self) -> impl Iterator<Item = (&str, Entity)> + '_ {
        self.handles.iter().map(|(k, &e)| (k.as_str(), e))
    }

    pub fn live_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.ecs.iter()
    }

    /// Whether any pursuit sessions are still going.
    pub fn is_busy(&self) -> bool {
        !self.pursuits.is_empty()
    }

    pub fn pursuit(&self, e: Entity) -> Option<&Pursuit<Entity>> {
        self.pursuits.get(&e)
    }

    /// How the most recent pursuit of an entity ended, if it has ended.
    pub fn ending(&self, e: Entity) -> Option<End> {
        self.endings.get(&e).copied()
    }

    /// Register a started pursuit and schedule its first step.
    pub(crate) fn launch(&mut self, pursuit: Pursuit<Entity>) {
        let e = pursuit.tracker;
        self.cancel(e);
        self.endings.remove(&e);
        let first = self.now + pursuit.info.speed;
        self.pursuits.insert(e, pursuit);
        self.scheduler.schedule(first, Task::Pursue(e));
    }

    /// Stop an entity's pursuit. Returns whether there was one.
    pub fn cancel(&mut self, e: Entity) -> bool {
        let n = self.scheduler.cancel(|t| *t == Task::Pursue(e));
        let had = self.pursuits.remove(&e).is_some();
        if had {
            log::debug!(
                "Runtime::cancel: {e} stops pursuit, {n} tasks dropped"
            );
        }
        had
    }

    /// Update the runtime state by one tick.
    pub fn tick(&mut self) {
        self.now += 1;

        while let Some(task) = self.scheduler.pop_due(self.now) {
            match task {
                Task::Pursue(e) => self.run_pursuit(e),
            }
        }

        if self.now.is_pulse(MOBILE_PULSE) {
            let view: &Runtime = self;
            let hunters: Vec<Entity> = view
                .live_entities()
                .filter(|e| e.get::<Hunting>(view).0.is_some())
                .collect();
            for e in hunters {
                e.hunt_prey(self);
            }
        }
    }

    fn run_pursuit(&mut self, e: Entity) {
        let Some(mut pursuit) = self.pursuits.remove(&e) else {
            log::warn!("Runtime: stale pursuit task for {e}");
            return;
        };

        match pursuit.step(self) {
            Directive::Again(delay) => {
                self.pursuits.insert(e, pursuit);
                // Always land on a later tick or the task loop never ends.
                let next = self.now + delay.max(1);
                self.scheduler.schedule(next, Task::Pursue(e));
            }
            Directive::Finished(end) => {
                log::debug!(
                    "Runtime: {e} pursuit ended {end:?} at {}",
                    self.now
                );
                self.endings.insert(e, end);
            }
        }
    }

    /// Take all narration accumulated since the last call.
    pub fn take_messages(&mut self) -> Vec<Msg> {
        std::mem::take(&mut self.outbox)
    }

    /// Render a message for a text log.
    pub fn describe(&self, msg: &Msg) -> String {
        match msg {
            Msg::Tell(e, text) => format!("[{}] {text}", e.short(self)),
            Msg::Room { room, text, .. } => {
                let vnum = self.world.room(*room).map(|r| r.vnum);
                match vnum {
                    Some(v) => format!("({v}) {text}"),
                    None => format!("({room}) {text}"),
                }
            }
            Msg::Say(e, text) => {
                format!("{} says, '{text}'", e.short(self).capitalize())
            }
        }
    }
}

impl Realm for Runtime {
    type Agent = Entity;
    type Map = World;

    fn map(&self) -> &World {
        &self.world
    }

    fn room_of(&self, agent: Entity) -> Option<RoomIdx> {
        agent.room(self)
    }

    fn occupants(&self, room: RoomIdx) -> Vec<Entity> {
        self.placement.occupants(room).collect()
    }

    fn is_named(&self, agent: Entity, name: &str) -> bool {
        agent.answers_to(self, name)
    }

    fn can_see(&self, viewer: Entity, other: Entity) -> bool {
        viewer.can_see(self, &other)
    }

    fn profile(&self, agent: Entity) -> Option<Profile> {
        agent.is_alive(self).then(|| agent.profile(self))
    }

    fn move_agent(&mut self, agent: Entity, dir: Dir) -> bool {
        agent.walk(self, dir)
    }

    fn open_door(&mut self, agent: Entity, dir: Dir) -> bool {
        agent.open_door(self, dir)
    }

    fn follow(&mut self, follower: Entity, leader: Entity) {
        follower.start_following(self, leader);
    }

    fn engage(&mut self, attacker: Entity, victim: Entity) {
        attacker.attack(self, victim);
    }

    fn practice(&mut self, agent: Entity, skill: Skill) {
        agent.practice(self, skill);
    }

    fn tell(&mut self, agent: Entity, text: &str) {
        self.outbox.push(Msg::Tell(agent, text.to_string()));
    }

    fn tell_room(&mut self, agent: Entity, text: &str) {
        if let Some(room) = agent.room(self) {
            self.outbox.push(Msg::Room {
                room,
                except: agent,
                text: text.to_string(),
            });
        }
    }

    fn say(&mut self, agent: Entity, text: &str) {
        self.outbox.push(Msg::Say(agent, text.to_string()));
    }

    fn short_name(&self, agent: Entity) -> String {
        agent.short(self).capitalize()
    }

    fn percent(&mut self) -> i32 {
        self.dice.percent()
    }

    fn between(&mut self, lo: i32, hi: i32) -> i32 {
        self.dice.between(lo, hi)
    }
}
