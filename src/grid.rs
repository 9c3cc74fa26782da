//! Host-side cell buffer used to seed the simulation.

use bytemuck::{Pod, Zeroable};
use rand::Rng;

use crate::config::VIEWPORT_DOWNSCALE;
use crate::pattern::PatternSet;

/// RGBA8 cell state. Alpha carries liveness; RGB is the display color.
/// Packs into one `u32` per cell on the GPU.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct CellColor(pub [u8; 4]);

impl CellColor {
    pub const CLEAR: Self = Self([0, 0, 0, 0]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);

    pub fn is_alive(&self) -> bool {
        self.0[3] > 127
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mut out = [0u8; 4];
        for (i, o) in out.iter_mut().enumerate() {
            let (a, b) = (self.0[i] as f32, other.0[i] as f32);
            *o = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
        }
        Self(out)
    }

    pub fn to_f32(self) -> [f32; 4] {
        self.0.map(|c| c as f32 / 255.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Grid for a viewport, downscaled on each axis and never zero-sized.
    pub fn from_viewport(width: u32, height: u32) -> Self {
        Self {
            width: (width / VIEWPORT_DOWNSCALE).max(1),
            height: (height / VIEWPORT_DOWNSCALE).max(1),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Linear index for in-bounds coordinates, `None` otherwise.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

/// How a grid is repopulated after clearing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seed {
    Empty,
    Center,
    Random { density: f64 },
}

pub struct GridBuffer {
    size: GridSize,
    cells: Vec<CellColor>,
}

impl GridBuffer {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![CellColor::CLEAR; size.cell_count()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cells(&self) -> &[CellColor] {
        &self.cells
    }

    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<CellColor> {
        self.size.index(x, y).map(|i| self.cells[i])
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Discards all contents and reallocates, empty, at `size`.
    pub fn resize(&mut self, size: GridSize) {
        *self = Self::new(size);
    }

    /// Sets every cell from its linear index.
    pub fn fill_with(&mut self, mut cell: impl FnMut(usize) -> CellColor) {
        for (i, c) in self.cells.iter_mut().enumerate() {
            *c = cell(i);
        }
    }

    pub fn clear(&mut self) {
        self.fill_with(|_| CellColor::CLEAR);
    }

    /// Sets every offset of `pattern` around (cx, cy). Offsets landing
    /// outside the grid are skipped.
    pub fn stamp_at(&mut self, cx: i32, cy: i32, pattern: &PatternSet, color: CellColor) {
        for (dx, dy) in pattern.iter() {
            let (Some(x), Some(y)) = (cx.checked_add(dx), cy.checked_add(dy)) else {
                continue;
            };
            if let Some(i) = self.size.index(x, y) {
                self.cells[i] = color;
            }
        }
    }

    pub fn spawn_center(&mut self, pattern: &PatternSet, color: CellColor) {
        self.clear();
        let (cx, cy) = (self.size.width / 2, self.size.height / 2);
        self.stamp_at(cx as i32, cy as i32, pattern, color);
    }

    /// Clears, then drops `round(cells * density / |pattern|)` stamps at
    /// uniformly random positions. Positions may repeat.
    pub fn spawn_random<R: Rng + ?Sized>(
        &mut self,
        density: f64,
        pattern: &PatternSet,
        color: CellColor,
        rng: &mut R,
    ) -> usize {
        self.clear();
        let stamps = (self.size.cell_count() as f64 * density / pattern.len() as f64).round() as usize;
        for _ in 0..stamps {
            let x = rng.random_range(0..self.size.width);
            let y = rng.random_range(0..self.size.height);
            self.stamp_at(x as i32, y as i32, pattern, color);
        }
        stamps
    }

    /// Clears and applies `seed`.
    pub fn reseed<R: Rng + ?Sized>(&mut self, seed: Seed, pattern: &PatternSet, color: CellColor, rng: &mut R) {
        match seed {
            Seed::Empty => self.clear(),
            Seed::Center => self.spawn_center(pattern, color),
            Seed::Random { density } => {
                self.spawn_random(density, pattern, color, rng);
            }
        }
    }
}
