//! Narration emitted by the runtime for display.

use crate::prelude::*;

/// A line of narration waiting in the runtime outbox.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Msg {
    /// Seen only by one agent.
    Tell(Entity, String),

    /// Seen by everyone in a room except the agent that caused it.
    Room {
        room: RoomIdx,
        except: Entity,
        text: String,
    },

    /// Agent speaks out loud in its room.
    Say(Entity, String),
}

impl Msg {
    pub fn text(&self) -> &str {
        match self {
            Msg::Tell(_, text) | Msg::Say(_, text) => text,
            Msg::Room { text, .. } => text,
        }
    }
}
