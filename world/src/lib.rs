//! Room graph datatypes.
//!
//! The world is a directed graph of rooms connected by exits in six
//! canonical directions. Rooms live in a dense arena and exits refer to
//! their destinations by arena index, so graph walks are plain bounds
//! checked lookups.

mod dir;
pub use dir::Dir;

mod room;
pub use room::{Exit, ExitFlags, Room, RoomFlags, RoomIdx, Sector, Vnum, ZoneId};

mod graph;
pub use graph::{RoomGraph, World};

mod spec;
pub use spec::{ExitSpec, RoomSpec, WorldSpec};

/// Number of exit directions in a room.
pub const NUM_OF_DIRS: usize = 6;
