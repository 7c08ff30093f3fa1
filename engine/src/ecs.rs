//! Components for agents living in the runtime.

use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub use crate::agent::{Class, Effects, MobFlags, Position, Sex, Stance};

/// Space separated keywords the agent answers to.
#[derive(Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Name(pub String);

/// Short description used in narration, eg. "a grey wolf".
#[derive(Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Short(pub String);

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Level(pub i32);

/// Trained skill values, 0 to 100.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Skills {
    pub track: i32,
    pub hunt: i32,
}

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct IsNpc(pub bool);

/// NPC body currently under a player's control.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Possessed(pub bool);

/// How well the agent hides its tracks when sneaking.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Concealment(pub i32);

/// Current opponent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Fighting(pub Option<Entity>);

/// Busy with a lengthy casting.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Casting(pub bool);

/// NPC hunting memory, the agent it will go after on its own.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Hunting(pub Option<Entity>);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Following(pub Option<Entity>);

////////////////////////////////

/// Entity component system. Stores all the data of agents.
#[derive(Default, Deref, DerefMut)]
pub(crate) struct Ecs(pub(crate) hecs::World);

impl Ecs {
    pub(crate) fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        (&self.0).into_iter().map(|he| Entity(he.entity()))
    }
}
