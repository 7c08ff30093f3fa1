use anyhow::Context;
use serde::{Deserialize, Serialize};
use world::WorldSpec;

use crate::{
    agent::{Class, Effects, MobFlags, Position, Sex, Stance},
    ecs::*,
    prelude::*,
};

/// A world and the agents in it, as stored in files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Scenario {
    pub world: WorldSpec,
    /// Agents keyed by handle, a name used to refer to them from the
    /// outside.
    pub agents: IndexMap<String, AgentSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AgentSpec {
    /// Starting room.
    pub room: Vnum,
    /// Keywords, the handle is used if empty.
    pub name: String,
    pub short: String,
    pub level: i32,
    pub class: Class,
    pub sex: Sex,
    pub npc: bool,
    pub possessed: bool,
    pub track: i32,
    pub hunt: i32,
    pub mob_flags: MobFlags,
    pub effects: Effects,
    pub concealment: i32,
    pub stance: Stance,
    pub position: Position,
    /// Handle of the agent an NPC remembers to hunt.
    pub hunting: Option<String>,
}

impl Scenario {
    /// Add an agent, builder style.
    pub fn agent(&mut self, handle: &str, room: u32) -> &mut AgentSpec {
        let spec = self.agents.entry(handle.to_string()).or_default();
        spec.room = Vnum(room);
        spec
    }
}

impl Runtime {
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let world = World::try_from(&scenario.world)?;
        let mut ret = Runtime::with_world(world);

        for (handle, spec) in &scenario.agents {
            let Some(room) = ret.world.lookup(spec.room) else {
                bail!(
                    "Scenario: agent {handle} starts in unknown room {}",
                    spec.room
                );
            };
            let e = ret.spawn_agent(handle, spec);
            e.place(&mut ret, room);
            ret.handles.insert(handle.clone(), e);
        }

        // Hunting targets can refer to agents defined later.
        for (handle, spec) in &scenario.agents {
            if let Some(prey) = &spec.hunting {
                let prey = ret.agent(prey).with_context(|| {
                    format!("Scenario: {handle} hunts unknown agent {prey}")
                })?;
                let e = ret
                    .agent(handle)
                    .with_context(|| format!("Scenario: lost agent {handle}"))?;
                e.set_prey(&mut ret, Some(prey));
            }
        }

        log::info!(
            "Runtime::new: {} rooms, {} agents",
            ret.world.room_count(),
            ret.handles.len()
        );
        Ok(ret)
    }

    fn spawn_agent(&mut self, handle: &str, spec: &AgentSpec) -> Entity {
        let name = if spec.name.is_empty() {
            handle.to_string()
        } else {
            spec.name.clone()
        };

        let e = self.spawn((Name(name),));
        e.set(self, Short(spec.short.clone()));
        e.set(self, Level(spec.level));
        e.set(self, spec.class);
        e.set(self, spec.sex);
        e.set(self, IsNpc(spec.npc));
        e.set(self, Possessed(spec.possessed));
        e.set(
            self,
            Skills {
                track: spec.track,
                hunt: spec.hunt,
            },
        );
        e.set(self, spec.mob_flags);
        e.set(self, spec.effects);
        e.set(self, Concealment(spec.concealment));
        e.set(self, spec.stance);
        e.set(self, spec.position);
        e
    }
}
