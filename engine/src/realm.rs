//! Interface to everything the pursuit logic consumes but doesn't own.
use std::{fmt, hash::Hash};

use world::{Dir, RoomGraph, RoomIdx};

use crate::agent::{Profile, Skill};

/// Host environment for searches and pursuit sessions.
///
/// Bundles the room graph, agent queries and the collaborators that carry
/// out actions. Pursuit code never reaches past this trait, so the host
/// decides how movement, doors, messages and dice actually work.
pub trait Realm {
    type Agent: Copy + Eq + Hash + fmt::Debug;
    type Map: RoomGraph;

    fn map(&self) -> &Self::Map;

    // Agent queries

    /// Current room of an agent, `None` if the agent no longer exists.
    fn room_of(&self, agent: Self::Agent) -> Option<RoomIdx>;

    /// Agents in a room, in the order they arrived.
    fn occupants(&self, room: RoomIdx) -> Vec<Self::Agent>;

    /// Whether `name` is one of the agent's keywords.
    fn is_named(&self, agent: Self::Agent, name: &str) -> bool;

    fn can_see(&self, viewer: Self::Agent, other: Self::Agent) -> bool;

    /// Capability and status snapshot, `None` if the agent no longer
    /// exists.
    fn profile(&self, agent: Self::Agent) -> Option<Profile>;

    // Collaborators

    /// Try to move the agent one room along an exit.
    fn move_agent(&mut self, agent: Self::Agent, dir: Dir) -> bool;

    /// Try to open the door on an exit. Returns whether the exit is open
    /// afterwards.
    fn open_door(&mut self, agent: Self::Agent, dir: Dir) -> bool;

    /// Make `follower` start following `leader`.
    fn follow(&mut self, follower: Self::Agent, leader: Self::Agent);

    /// Start a fight.
    fn engage(&mut self, attacker: Self::Agent, victim: Self::Agent);

    /// Skill use notification for skill progression.
    fn practice(&mut self, agent: Self::Agent, skill: Skill);

    // Narration

    /// Message shown only to the agent.
    fn tell(&mut self, agent: Self::Agent, text: &str);

    /// Message shown to everyone in the agent's room except the agent.
    fn tell_room(&mut self, agent: Self::Agent, text: &str);

    /// Agent speaks out loud.
    fn say(&mut self, agent: Self::Agent, text: &str);

    /// Short display name of the agent.
    fn short_name(&self, agent: Self::Agent) -> String;

    // Dice

    /// Percentile roll in `0..100`.
    fn percent(&mut self) -> i32;

    /// Roll in `lo..=hi`.
    fn between(&mut self, lo: i32, hi: i32) -> i32;
}
