//! Vocabulary for describing agents to the pursuit logic.
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::LVL_IMMORT;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Class {
    Sorcerer,
    Cleric,
    Thief,
    Warrior,
    Paladin,
    AntiPaladin,
    Ranger,
    Druid,
    Shaman,
    Assassin,
    Mercenary,
    Necromancer,
    Conjurer,
    Monk,
    Berserker,
    Priest,
    Diabolist,
    Mystic,
    Rogue,
    Bard,
    Pyromancer,
    Cryomancer,
    Illusionist,
    Hunter,
    #[default]
    Layman,
}

impl Class {
    /// Classes trained to read a trail from far away.
    pub fn is_woodsman(self) -> bool {
        matches!(self, Class::Ranger | Class::Hunter)
    }
}

#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
    #[default]
    Neuter,
    Male,
    Female,
    Nonbinary,
}

impl Sex {
    /// Objective pronoun.
    pub fn him(self) -> &'static str {
        match self {
            Sex::Neuter => "it",
            Sex::Male => "him",
            Sex::Female => "her",
            Sex::Nonbinary => "them",
        }
    }

    /// Subjective pronoun, capitalized for sentence starts.
    pub fn he(self) -> &'static str {
        match self {
            Sex::Neuter => "It",
            Sex::Male => "He",
            Sex::Female => "She",
            Sex::Nonbinary => "They",
        }
    }

    /// Contracted "is" for the subjective pronoun.
    pub fn hes(self) -> &'static str {
        match self {
            Sex::Neuter => "It's",
            Sex::Male => "He's",
            Sex::Female => "She's",
            Sex::Nonbinary => "They're",
        }
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Skill {
    Track,
    Hunt,
}

/// State of consciousness, ordered from worst to most active.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Stance {
    Dead,
    Mortal,
    Incapacitated,
    Stunned,
    Sleeping,
    Resting,
    #[default]
    Alert,
    Fighting,
}

/// Bodily posture, ordered from lowest to highest.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Prone,
    Sitting,
    Kneeling,
    #[default]
    Standing,
    Flying,
}

bitflags! {
    /// Behavior flags for NPCs.
    #[derive(
        Copy,
        Clone,
        Debug,
        Default,
        Eq,
        PartialEq,
        Hash,
        Serialize,
        Deserialize,
    )]
    pub struct MobFlags: u32 {
        /// Never leaves its home zone, not even in pursuit.
        const STAY_ZONE = 1 << 0;
        /// Tracks at a crawl.
        const SLOW_TRACK = 1 << 1;
        const AGGRESSIVE = 1 << 2;
    }
}

bitflags! {
    /// Ongoing effects on an agent.
    #[derive(
        Copy,
        Clone,
        Debug,
        Default,
        Eq,
        PartialEq,
        Hash,
        Serialize,
        Deserialize,
    )]
    pub struct Effects: u32 {
        /// Moves quietly, trail may vanish depending on concealment.
        const STEALTH = 1 << 0;
        /// Leaves no trail at all.
        const NOTRACK = 1 << 1;
        const CONFUSION = 1 << 2;
        const INVISIBLE = 1 << 3;
        const DETECT_INVIS = 1 << 4;
        const BLIND = 1 << 5;
    }
}

/// Snapshot of everything the pursuit rules want to know about an agent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Profile {
    pub level: i32,
    pub class: Class,
    pub sex: Sex,
    pub is_npc: bool,
    /// NPC body controlled by a player.
    pub is_possessed: bool,
    pub mob_flags: MobFlags,
    pub effects: Effects,
    pub concealment: i32,
    pub stance: Stance,
    pub position: Position,
    pub is_fighting: bool,
    /// In the middle of a lengthy casting.
    pub is_casting: bool,
    pub track_skill: i32,
    pub hunt_skill: i32,
}

impl Profile {
    pub fn skill(&self, skill: Skill) -> i32 {
        match skill {
            Skill::Track => self.track_skill,
            Skill::Hunt => self.hunt_skill,
        }
    }

    pub fn is_immortal(&self) -> bool {
        self.level >= LVL_IMMORT
    }

    /// NPC running on its own without a player at the controls.
    pub fn is_autonomous(&self) -> bool {
        self.is_npc && !self.is_possessed
    }

    pub fn is_confused(&self) -> bool {
        self.effects.contains(Effects::CONFUSION)
    }

    pub fn is_slow_tracker(&self) -> bool {
        self.is_npc && self.mob_flags.contains(MobFlags::SLOW_TRACK)
    }
}
