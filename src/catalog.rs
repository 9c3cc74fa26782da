//! Ordered, non-empty preset lists with a wrapping selection cursor.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one entry")]
    Empty,
}

/// Wraps `index + delta` into `0..len` with floor-mod semantics, so that
/// `cycle(0, -1, 5) == 4`.
pub fn cycle(index: usize, delta: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    let len = len as isize;
    (index as isize % len + delta.rem_euclid(len)).rem_euclid(len) as usize
}

/// A fixed list of entries with exactly one selected. The cursor is private
/// and only moves through [`cycle`], so it always points at an entry.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T> Catalog<T> {
    pub fn new(entries: Vec<T>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries, cursor: 0 })
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Moves the selection by `delta` entries and returns the new current one.
    pub fn cycle(&mut self, delta: isize) -> &T {
        self.cursor = cycle(self.cursor, delta, self.entries.len());
        self.current()
    }
}
