use std::fmt::Display;
use std::iter::FusedIterator;
use std::ops::RangeInclusive;

mod config;
pub mod runner;

pub use config::{Config, DEFAULT_MAX_MULTIPLIER};

/// Set of decimal digits, one bit per digit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct DigitSet {
    bits: u16,
}

impl DigitSet {
    pub const EMPTY: DigitSet = DigitSet { bits: 0 };
    pub const ALL: DigitSet = DigitSet {
        bits: (1u16 << 10) - 1,
    };

    /// Digits of the base 10 representation of `n`. Zero has the single digit 0.
    pub fn of(mut n: u128) -> Self {
        let mut s = Self::EMPTY;
        loop {
            s.add((n % 10) as u8);
            n /= 10;
            if n == 0 {
                break;
            }
        }
        s
    }

    /// Panics for values that are not a single decimal digit.
    pub fn add(&mut self, digit: u8) {
        assert!(digit < 10, "Digit must be smaller than 10, got {digit}");
        self.bits |= 1 << digit;
    }

    pub fn contains(&self, digit: u8) -> bool {
        digit < 10 && self.bits & (1 << digit) != 0
    }

    pub fn union(self, other: DigitSet) -> DigitSet {
        DigitSet {
            bits: self.bits | other.bits,
        }
    }

    pub fn is_superset(&self, other: &DigitSet) -> bool {
        self.bits & other.bits == other.bits
    }

    pub fn is_complete(&self) -> bool {
        *self == Self::ALL
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Digits in ascending order.
    pub fn digits(&self) -> impl Iterator<Item = u8> {
        let mut bits = self.bits;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let tz = bits.trailing_zeros();
                bits &= !(1 << tz);
                Some(tz as u8)
            }
        })
    }
}

impl Display for DigitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, digit) in self.digits().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{digit}")?;
        }
        write!(f, "}}")
    }
}

/// One multiple visited by a [`Scan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub multiplier: u32,
    pub product: u128,
    /// Union of the digits of every product up to and including this one.
    pub seen: DigitSet,
}

impl Step {
    pub fn is_covering(&self) -> bool {
        self.seen.is_complete()
    }
}

/// Lazily walks `number * 1`, `number * 2`, ... up to `number * max_multiplier`,
/// accumulating the digits seen so far. Stopping at full coverage is up to the consumer.
#[derive(Clone, Debug)]
pub struct Scan {
    number: u64,
    multipliers: RangeInclusive<u32>,
    seen: DigitSet,
}

impl Scan {
    pub fn new(number: u64, max_multiplier: u32) -> Self {
        Scan {
            number,
            multipliers: 1..=max_multiplier,
            seen: DigitSet::EMPTY,
        }
    }
}

impl Iterator for Scan {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let multiplier = self.multipliers.next()?;
        let product = u128::from(self.number) * u128::from(multiplier);
        self.seen = self.seen.union(DigitSet::of(product));

        Some(Step {
            multiplier,
            product,
            seen: self.seen,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.multipliers.size_hint()
    }
}

impl FusedIterator for Scan {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Zero never covers anything.
    Insomnia,
    Found {
        multiplier: u32,
        product: u128,
    },
    NotFound {
        max_multiplier: u32,
    },
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Insomnia => write!(f, "INSOMNIA"),
            Outcome::Found { product, .. } => write!(f, "{product}"),
            Outcome::NotFound { .. } => write!(f, "NOT FOUND"),
        }
    }
}

/// Finds the first multiple of `number` at which all ten digits have been seen.
pub fn count_sheep(number: u64, config: &Config) -> Outcome {
    if number == 0 {
        return Outcome::Insomnia;
    }

    let max_multiplier = config.max_multiplier();
    config
        .scan(number)
        .find(Step::is_covering)
        .map_or(
            Outcome::NotFound { max_multiplier },
            |step| Outcome::Found {
                multiplier: step.multiplier,
                product: step.product,
            },
        )
}
