//! Rules module for life-like cellular automata.
//!
//! A rule is written in B/S notation (e.g. `B3/S23`) and encoded into two
//! 9-slot activation tables indexed by the weighted live-neighbor count.

pub mod presets;

use std::fmt;
use thiserror::Error;

/// Number of slots in every table handed to the step kernel (counts 0..=8).
pub const TABLE_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule notation must have exactly two segments separated by '/', got {0}")]
    SegmentCount(usize),
    #[error("neighbor count {0} is outside 0..=8")]
    DigitOutOfRange(u32),
    #[error("unexpected character {0:?} in rule notation")]
    InvalidCharacter(char),
}

/// A set of neighbor counts, one bit per count 0..=8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CountSet(u16);

impl CountSet {
    pub fn from_digits(digits: &[u8]) -> Result<Self, RuleError> {
        let mut set = CountSet::default();
        for &d in digits {
            if d as usize >= TABLE_LEN {
                return Err(RuleError::DigitOutOfRange(d as u32));
            }
            // Setting a bit twice is a no-op, so duplicates need no special case.
            set.0 |= 1 << d;
        }
        Ok(set)
    }

    fn parse(segment: &str) -> Result<Self, RuleError> {
        let mut digits = Vec::with_capacity(segment.len());
        for c in segment.chars() {
            let d = c.to_digit(10).ok_or(RuleError::InvalidCharacter(c))?;
            if d as usize >= TABLE_LEN {
                return Err(RuleError::DigitOutOfRange(d));
            }
            digits.push(d as u8);
        }
        Self::from_digits(&digits)
    }

    pub fn contains(&self, count: usize) -> bool {
        count < TABLE_LEN && self.0 & (1 << count) != 0
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        (0..TABLE_LEN).filter(move |&n| self.contains(n))
    }

    /// 0/1 activation table in the layout the step kernel reads.
    pub fn table(&self) -> [f32; TABLE_LEN] {
        let mut table = [0.0; TABLE_LEN];
        for n in self.counts() {
            table[n] = 1.0;
        }
        table
    }
}

/// Strips an optional leading `B`/`S` marker from a notation segment.
fn strip_marker(segment: &str, marker: char) -> &str {
    let segment = segment.trim();
    segment
        .strip_prefix(marker)
        .or_else(|| segment.strip_prefix(marker.to_ascii_lowercase()))
        .unwrap_or(segment)
}

/// Birth/survival rule. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    birth: CountSet,
    survive: CountSet,
    name: Option<String>,
}

impl Rule {
    /// Parses `B<digits>/S<digits>`. The `B` and `S` markers are optional.
    pub fn parse(notation: &str, name: Option<&str>) -> Result<Self, RuleError> {
        let segments: Vec<&str> = notation.split('/').collect();
        if segments.len() != 2 {
            return Err(RuleError::SegmentCount(segments.len()));
        }

        Ok(Self {
            birth: CountSet::parse(strip_marker(segments[0], 'B'))?,
            survive: CountSet::parse(strip_marker(segments[1], 'S'))?,
            name: name.map(str::to_owned),
        })
    }

    pub fn from_digits(birth: &[u8], survive: &[u8], name: Option<&str>) -> Result<Self, RuleError> {
        Ok(Self {
            birth: CountSet::from_digits(birth)?,
            survive: CountSet::from_digits(survive)?,
            name: name.map(str::to_owned),
        })
    }

    pub fn birth(&self) -> CountSet {
        self.birth
    }

    pub fn survive(&self) -> CountSet {
        self.survive
    }

    pub fn birth_table(&self) -> [f32; TABLE_LEN] {
        self.birth.table()
    }

    pub fn survive_table(&self) -> [f32; TABLE_LEN] {
        self.survive.table()
    }

    /// Canonical notation with digits in ascending order, e.g. `B36/S23`.
    pub fn notation(&self) -> String {
        let digits = |set: CountSet| set.counts().map(|n| n.to_string()).collect::<String>();
        format!("B{}/S{}", digits(self.birth), digits(self.survive))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} - {}", self.notation(), name),
            None => f.write_str(&self.notation()),
        }
    }
}
