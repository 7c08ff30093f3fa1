//! Pursuit logic: trail searches, tracking sessions and their host runtime.

/// Safety cap on rooms a nearest match search examines, no matter how far
/// the caller wants to look.
pub const MAX_BFS_ROOMS: usize = 500;

/// Extra ticks between steps for NPCs flagged as slow trackers.
pub const SLOW_TRACK_DELAY: i64 = 20;

/// Ticks between NPC hunting moves.
pub const MOBILE_PULSE: i64 = 10;

/// Lowest immortal level.
pub const LVL_IMMORT: i32 = 100;

/// Level from which closed doors stop mattering.
pub const LVL_GOD: i32 = 101;

/// Speed used when a pursuit is started with a non-positive one.
pub const DEFAULT_SPEED: i64 = 5;

/// Range used when a pursuit is started with a non-positive one.
pub const DEFAULT_RANGE: usize = 5;

mod agent;
pub use agent::{
    Class, Effects, MobFlags, Position, Profile, Sex, Skill, Stance,
};

mod ai;

mod command;
pub use command::Outcome;

pub mod ecs;

mod entity;
pub use entity::Entity;

mod msg;
pub use msg::Msg;

mod mob;

mod params;
pub use params::TrackInfo;

pub mod pathing;

mod placement;
pub use placement::Placement;

pub mod prelude;

pub mod pursuit;

mod realm;
pub use realm::Realm;

mod runtime;
pub use runtime::{Dice, Runtime};

mod scheduler;
pub use scheduler::Scheduler;

mod time;
pub use time::Instant;

mod worldfile;
pub use worldfile::{AgentSpec, Scenario};
