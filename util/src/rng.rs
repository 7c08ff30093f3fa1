use std::{fmt, hash::Hash};
use std::{hash::Hasher, str::FromStr};

use anyhow::bail;
use derive_more::Deref;
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Construct a throwaway random number generator seeded by a noise value.
///
/// Good for short-term use in immutable contexts given a varying source of
/// noise like a room index.
pub fn srng(seed: &(impl Hash + ?Sized)) -> XorShiftRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    XorShiftRng::seed_from_u64(h.finish())
}

/// Strings that are normalized to be case, whitespace and punctuation
/// insensitive. Use as RNG seeds so that trivial transcription errors like an
/// added space can't mess up the seed.
///
/// ```
/// # use util::{Logos, srng};
/// use rand::prelude::*;
///
/// assert_eq!(
///   srng(&Logos::new("pAss Word")).gen_range(0..1000),
///   srng(&Logos::new("password")).gen_range(0..1000));
///
/// assert_ne!(
///   srng(&Logos::new("pAss Word 123")).gen_range(0..1000),
///   srng(&Logos::new("password")).gen_range(0..1000));
/// ```
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Deref,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Logos(String);

impl fmt::Display for Logos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromIterator<char> for Logos {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        const MAX_LEN: usize = 64;

        Logos(
            iter.into_iter()
                .map(|c| c.to_ascii_uppercase())
                .filter(char::is_ascii_alphanumeric)
                .take(MAX_LEN)
                .collect(),
        )
    }
}

impl Logos {
    /// Construct a new logos, stripping out punctuation, whitespace,
    /// character case and non-ASCII characters from the input.
    pub fn new(s: impl AsRef<str>) -> Self {
        s.as_ref().chars().collect()
    }

    /// Generate a random logos of `len` characters.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Logos {
        const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl FromStr for Logos {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            bail!("not a valid logos")
        } else {
            Ok(Logos(s.into()))
        }
    }
}

pub trait RngExt {
    /// Roll a percentile value in `0..100`.
    fn percent(&mut self) -> i32;

    /// Roll a value in the inclusive range `lo..=hi`.
    ///
    /// Swapped bounds are tolerated and roll the same range.
    fn between(&mut self, lo: i32, hi: i32) -> i32;
}

impl<T: Rng + ?Sized> RngExt for T {
    fn percent(&mut self) -> i32 {
        self.gen_range(0..100)
    }

    fn between(&mut self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        self.gen_range(lo..=hi)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn logos_normalization() {
        assert_eq!(
            Logos::new("squeamish ossifrage").as_str(),
            "SQUEAMISHOSSIFRAGE"
        );
        assert_eq!(Logos::new("!@#'").as_str(), "");
        assert!("lowercase".parse::<Logos>().is_err());
        assert!("ABC123".parse::<Logos>().is_ok());
    }

    #[test]
    fn seeding_is_stable() {
        let mut a = srng(&Logos::new("seed"));
        let mut b = srng(&Logos::new("S E E D"));
        for _ in 0..10 {
            assert_eq!(a.percent(), b.percent());
        }
    }

    #[quickcheck]
    fn between_stays_in_range(seed: u64, lo: i16, hi: i16) -> bool {
        let mut rng = srng(&seed);
        let x = rng.between(lo as i32, hi as i32);
        x >= (lo.min(hi) as i32) && x <= (lo.max(hi) as i32)
    }

    #[quickcheck]
    fn percent_range(seed: u64) -> bool {
        let mut rng = srng(&seed);
        (0..32).all(|_| (0..100).contains(&rng.percent()))
    }
}
