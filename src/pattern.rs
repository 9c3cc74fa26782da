use std::collections::BTreeSet;

/// Relative (dx, dy) offsets stamped together as one seeding unit.
///
/// The set is never empty: [`PatternSet::toggle`] refuses to remove the last
/// offset, so `len()` is always a valid divisor when spreading stamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    offsets: BTreeSet<(i32, i32)>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self { offsets: BTreeSet::from([(0, 0)]) }
    }
}

impl PatternSet {
    /// Adds the offset if absent, removes it if present. Returns `false`
    /// when the call was refused because it would empty the set.
    pub fn toggle(&mut self, dx: i32, dy: i32) -> bool {
        if self.offsets.contains(&(dx, dy)) {
            if self.offsets.len() == 1 {
                return false;
            }
            self.offsets.remove(&(dx, dy));
        } else {
            self.offsets.insert((dx, dy));
        }
        true
    }

    /// Back to the single-cell stamp.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        self.offsets.contains(&(dx, dy))
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets.iter().copied()
    }
}
