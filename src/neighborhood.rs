use std::fmt;
use thiserror::Error;

use crate::rules::TABLE_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NeighborhoodError {
    #[error("neighborhood kernel needs 9 weights, got {0}")]
    WrongLength(usize),
}

/// 3x3 weighting kernel applied when counting live neighbors.
///
/// Weights are row-major with the top row (dy = +1) first and the center
/// cell at index 4. Any value is accepted; the step kernel treats them as
/// multipliers.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    name: String,
    weights: [f32; TABLE_LEN],
}

impl Neighborhood {
    pub fn new(name: impl Into<String>, weights: [f32; TABLE_LEN]) -> Self {
        Self { name: name.into(), weights }
    }

    pub fn from_slice(name: impl Into<String>, weights: &[f32]) -> Result<Self, NeighborhoodError> {
        let weights: [f32; TABLE_LEN] = weights
            .try_into()
            .map_err(|_| NeighborhoodError::WrongLength(weights.len()))?;
        Ok(Self::new(name, weights))
    }

    /// All eight surrounding cells.
    pub fn moore() -> Self {
        Self::new("Moore", [1., 1., 1., 1., 0., 1., 1., 1., 1.])
    }

    /// The four orthogonal cells.
    pub fn von_neumann() -> Self {
        Self::new("Von Neumann", [0., 1., 0., 1., 0., 1., 0., 1., 0.])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weights(&self) -> [f32; TABLE_LEN] {
        self.weights
    }

    /// Weight for the neighbor at offset (dx, dy), each in -1..=1.
    #[cfg(test)]
    pub fn weight_at(&self, dx: i32, dy: i32) -> f32 {
        self.weights[((1 - dy) * 3 + (dx + 1)) as usize]
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_must_have_nine_weights() {
        assert_eq!(
            Neighborhood::from_slice("short", &[1.0; 8]),
            Err(NeighborhoodError::WrongLength(8))
        );
        assert!(Neighborhood::from_slice("ok", &[0.5; 9]).is_ok());
    }

    #[test]
    fn accepts_negative_and_large_weights() {
        let hood = Neighborhood::from_slice("odd", &[-1., 2., 0., 0., 1., 0., 3.5, 0., 0.]).unwrap();
        assert_eq!(hood.weights()[0], -1.0);
        assert_eq!(hood.weight_at(0, 0), 1.0);
    }

    #[test]
    fn weight_lookup_is_row_major_top_first() {
        let hood = Neighborhood::new("idx", [0., 1., 2., 3., 4., 5., 6., 7., 8.]);
        assert_eq!(hood.weight_at(-1, 1), 0.);
        assert_eq!(hood.weight_at(1, 1), 2.);
        assert_eq!(hood.weight_at(0, 0), 4.);
        assert_eq!(hood.weight_at(-1, -1), 6.);
    }

    #[test]
    fn von_neumann_skips_diagonals() {
        let hood = Neighborhood::von_neumann();
        assert_eq!(hood.weight_at(1, 1), 0.0);
        assert_eq!(hood.weight_at(0, 1), 1.0);
        assert_eq!(hood.to_string(), "Von Neumann");
    }
}
