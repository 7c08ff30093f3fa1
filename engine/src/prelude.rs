pub use anyhow::{bail, Result};
pub use util::{HashMap, HashSet, IndexMap, IndexSet};
pub use world::{Dir, RoomGraph, RoomIdx, Vnum, World};

pub use crate::{
    pathing::{first_step, nearest_match, Quarry, Search, TrailRules},
    pursuit::{Directive, End, Pursuit, Rejection, Target},
    Entity, Instant, Msg, Outcome, Profile, Realm, Runtime, TrackInfo,
};
