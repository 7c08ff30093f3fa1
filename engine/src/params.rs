use crate::{
    agent::{Profile, Skill},
    DEFAULT_RANGE, DEFAULT_SPEED,
};

/// Pace and reach of a pursuit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TrackInfo {
    /// Ticks between steps.
    pub speed: i64,
    /// Farthest distance a trail can be detected at.
    pub sense: usize,
    /// Farthest distance an ongoing pursuit will keep going.
    pub range: usize,
}

impl Default for TrackInfo {
    fn default() -> Self {
        TrackInfo {
            speed: DEFAULT_SPEED,
            sense: DEFAULT_RANGE,
            range: DEFAULT_RANGE,
        }
    }
}

impl TrackInfo {
    /// Parameters for following a trail with the track skill.
    pub fn for_track(who: &Profile) -> Self {
        let skill = effective_skill(who, Skill::Track);

        let mut speed = pace(skill);
        let mut sense = (skill / 3).max(1);
        let mut range = (skill / 4).max(1);

        if who.class.is_woodsman() {
            range += 8;
            sense = range + 4;
        }

        if who.is_autonomous() {
            speed /= 2;
            range = range.saturating_mul(130) / 100;
        }

        TrackInfo::new(speed, sense, range)
    }

    /// Parameters for hunting down a named target.
    ///
    /// Hunting reads the trail with the track skill, the hunt skill only
    /// decides whether the agent can hunt at all.
    pub fn for_hunt(who: &Profile) -> Self {
        let skill = who.skill(Skill::Track);
        let reach = (skill / 3).max(1);
        TrackInfo::new(pace(skill), reach, reach)
    }

    /// Build parameters from raw values.
    ///
    /// Non-positive speed or range are replaced with defaults.
    pub fn new(speed: i32, sense: i32, range: i32) -> Self {
        TrackInfo {
            speed: speed as i64,
            sense: sense.max(0) as usize,
            range: range.max(0) as usize,
        }
        .normalized()
    }

    /// Replace unusable speed or range with defaults.
    pub fn normalized(self) -> Self {
        TrackInfo {
            speed: if self.speed <= 0 {
                DEFAULT_SPEED
            } else {
                self.speed
            },
            range: if self.range == 0 {
                DEFAULT_RANGE
            } else {
                self.range
            },
            ..self
        }
    }
}

/// NPCs get to use their level in place of a poor track skill.
fn effective_skill(who: &Profile, skill: Skill) -> i32 {
    if who.is_npc {
        who.level.max(who.skill(skill))
    } else {
        who.skill(skill)
    }
}

fn pace(skill: i32) -> i32 {
    (101i32.saturating_sub(skill) / 2).clamp(3, 20)
}
