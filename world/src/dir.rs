use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::NUM_OF_DIRS;

/// Exit direction.
///
/// Declaration order is the canonical search order. Graph searches expand
/// exits in this order, so ties between equally short paths always resolve
/// the same way.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl Dir {
    /// Iterate directions in canonical order.
    pub fn all() -> impl Iterator<Item = Dir> {
        Dir::iter()
    }

    pub fn reverse(self) -> Dir {
        use Dir::*;
        match self {
            North => South,
            East => West,
            South => North,
            West => East,
            Up => Down,
            Down => Up,
        }
    }

    /// Position of the direction in an exit table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Dir> {
        (i < NUM_OF_DIRS).then(|| Dir::iter().nth(i)).flatten()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn canonical_order() {
        let dirs: Vec<Dir> = Dir::all().collect();
        assert_eq!(dirs.len(), NUM_OF_DIRS);
        for (i, d) in dirs.iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(Dir::from_index(i), Some(*d));
            assert_eq!(d.reverse().reverse(), *d);
        }
        assert_eq!(Dir::from_index(NUM_OF_DIRS), None);
    }

    #[test]
    fn names() {
        assert_eq!(Dir::North.to_string(), "north");
        assert_eq!("UP".parse::<Dir>().unwrap(), Dir::Up);
        assert!("sideways".parse::<Dir>().is_err());
    }
}
