//! The step-kernel boundary: everything a single generation needs is passed
//! by value in [`StepParams`], and buffers are addressed by [`Slot`].

use bytemuck::{Pod, Zeroable};

use crate::grid::{CellColor, GridSize};
use crate::neighborhood::Neighborhood;
use crate::rules::{Rule, TABLE_LEN};

/// Alpha written for cells that die while the decoy flag is set.
pub const DECOY_ALPHA: u8 = 64;

/// One of the two ping-pong buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }
}

/// Per-step parameters, laid out to match the WGSL `StepParams` struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StepParams {
    pub width: u32,
    pub height: u32,
    pub decoy: u32,
    pub _padding: u32,
    pub foreground: [f32; 4],
    pub birth: [f32; TABLE_LEN],
    pub survive: [f32; TABLE_LEN],
    pub weights: [f32; TABLE_LEN],
    pub _padding2: f32,
}

impl StepParams {
    pub fn new(
        size: GridSize,
        rule: &Rule,
        neighborhood: &Neighborhood,
        foreground: CellColor,
        decoy: bool,
    ) -> Self {
        Self {
            width: size.width,
            height: size.height,
            decoy: decoy as u32,
            _padding: 0,
            foreground: foreground.to_f32(),
            birth: rule.birth_table(),
            survive: rule.survive_table(),
            weights: neighborhood.weights(),
            _padding2: 0.0,
        }
    }
}

/// Executes generations over a pair of cell buffers.
pub trait StepKernel {
    /// Reallocates both slots, empty, at `size`.
    fn resize(&mut self, size: GridSize);

    /// Replaces the contents of `slot` with `cells`.
    fn upload(&mut self, slot: Slot, cells: &[CellColor]);

    /// Reads `source` and writes the next generation into `source.other()`.
    fn step(&mut self, source: Slot, params: &StepParams);
}

/// Computes the next state of one cell. Shared by the CPU kernel and
/// mirrored by `shaders/step.wgsl`.
pub fn next_cell(cell: CellColor, weighted_count: f32, params: &StepParams) -> CellColor {
    let count = weighted_count.round().clamp(0.0, (TABLE_LEN - 1) as f32) as usize;
    let alive = cell.is_alive();
    let table = if alive { &params.survive } else { &params.birth };

    if table[count] > 0.5 {
        if alive {
            cell
        } else {
            let [r, g, b, _] = params.foreground;
            let to_u8 = |f: f32| (f.clamp(0.0, 1.0) * 255.0).round() as u8;
            CellColor([to_u8(r), to_u8(g), to_u8(b), 255])
        }
    } else if alive && params.decoy != 0 {
        let [r, g, b, _] = cell.0;
        CellColor([r, g, b, DECOY_ALPHA])
    } else if alive {
        CellColor::CLEAR
    } else {
        cell
    }
}

/// Reference implementation on the CPU with toroidal wrapping.
pub struct CpuKernel {
    size: GridSize,
    slots: [Vec<CellColor>; 2],
}

impl CpuKernel {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            slots: [vec![CellColor::CLEAR; size.cell_count()], vec![CellColor::CLEAR; size.cell_count()]],
        }
    }

    pub fn cells(&self, slot: Slot) -> &[CellColor] {
        &self.slots[slot.index()]
    }

    fn weighted_count(&self, cells: &[CellColor], x: u32, y: u32, weights: &[f32; TABLE_LEN]) -> f32 {
        let (w, h) = (self.size.width, self.size.height);
        let mut sum = 0.0;
        for row in 0..3u32 {
            for col in 0..3u32 {
                let weight = weights[(row * 3 + col) as usize];
                if weight == 0.0 {
                    continue;
                }
                // Row 0 of the kernel is dy = +1.
                let nx = (x + w + col - 1) % w;
                let ny = (y + h + 1 - row) % h;
                if cells[(ny * w + nx) as usize].is_alive() {
                    sum += weight;
                }
            }
        }
        sum
    }
}

impl StepKernel for CpuKernel {
    fn resize(&mut self, size: GridSize) {
        *self = Self::new(size);
    }

    fn upload(&mut self, slot: Slot, cells: &[CellColor]) {
        let dst = &mut self.slots[slot.index()];
        dst.clear();
        dst.extend_from_slice(cells);
        dst.resize(self.size.cell_count(), CellColor::CLEAR);
    }

    fn step(&mut self, source: Slot, params: &StepParams) {
        let input = std::mem::take(&mut self.slots[source.index()]);
        let mut output = std::mem::take(&mut self.slots[source.other().index()]);
        output.resize(input.len(), CellColor::CLEAR);

        for y in 0..self.size.height {
            for x in 0..self.size.width {
                let i = (y * self.size.width + x) as usize;
                let count = self.weighted_count(&input, x, y, &params.weights);
                output[i] = next_cell(input[i], count, params);
            }
        }

        self.slots[source.index()] = input;
        self.slots[source.other().index()] = output;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(size: GridSize, notation: &str, hood: Neighborhood, decoy: bool) -> StepParams {
        let rule = Rule::parse(notation, None).unwrap();
        StepParams::new(size, &rule, &hood, CellColor::WHITE, decoy)
    }

    fn live(kernel: &CpuKernel, slot: Slot) -> Vec<(u32, u32)> {
        let w = kernel.size.width;
        kernel
            .cells(slot)
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| (i as u32 % w, i as u32 / w))
            .collect()
    }

    fn seed(kernel: &mut CpuKernel, slot: Slot, cells: &[(u32, u32)]) {
        let size = kernel.size;
        let mut buf = vec![CellColor::CLEAR; size.cell_count()];
        for &(x, y) in cells {
            buf[(y * size.width + x) as usize] = CellColor::WHITE;
        }
        kernel.upload(slot, &buf);
    }

    #[test]
    fn params_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<StepParams>(), 144);
    }

    #[test]
    fn slots_alternate() {
        assert_eq!(Slot::A.other(), Slot::B);
        assert_eq!(Slot::B.other().index(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let size = GridSize::new(5, 5);
        let mut kernel = CpuKernel::new(size);
        let p = params(size, "B3/S23", Neighborhood::moore(), false);
        seed(&mut kernel, Slot::A, &[(1, 2), (2, 2), (3, 2)]);

        kernel.step(Slot::A, &p);
        assert_eq!(live(&kernel, Slot::B), vec![(2, 1), (2, 2), (2, 3)]);

        kernel.step(Slot::B, &p);
        assert_eq!(live(&kernel, Slot::A), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn neighbors_wrap_around_edges() {
        let size = GridSize::new(4, 4);
        let mut kernel = CpuKernel::new(size);
        // Birth on exactly one neighbor: the corner cell seeds all 8 wrapped neighbors.
        let p = params(size, "B1/S", Neighborhood::moore(), false);
        seed(&mut kernel, Slot::A, &[(0, 0)]);

        kernel.step(Slot::A, &p);
        let born = live(&kernel, Slot::B);
        assert_eq!(born.len(), 8);
        assert!(born.contains(&(3, 3)));
        assert!(!born.contains(&(0, 0)));
    }

    #[test]
    fn von_neumann_ignores_diagonals() {
        let size = GridSize::new(5, 5);
        let mut kernel = CpuKernel::new(size);
        let p = params(size, "B1/S", Neighborhood::von_neumann(), false);
        seed(&mut kernel, Slot::A, &[(2, 2)]);

        kernel.step(Slot::A, &p);
        assert_eq!(live(&kernel, Slot::B), vec![(2, 1), (1, 2), (3, 2), (2, 3)]);
    }

    #[test]
    fn decoy_leaves_dead_trace() {
        let size = GridSize::new(3, 3);
        let mut kernel = CpuKernel::new(size);
        let p = params(size, "B/S", Neighborhood::moore(), true);
        seed(&mut kernel, Slot::A, &[(1, 1)]);

        kernel.step(Slot::A, &p);
        let cell = kernel.cells(Slot::B)[4];
        assert!(!cell.is_alive());
        assert_eq!(cell, CellColor([255, 255, 255, DECOY_ALPHA]));
    }

    #[test]
    fn births_take_foreground_color() {
        let rule = Rule::parse("B0/S", None).unwrap();
        let red = CellColor([255, 0, 0, 255]);
        let p = StepParams::new(GridSize::new(1, 1), &rule, &Neighborhood::moore(), red, false);
        assert_eq!(next_cell(CellColor::CLEAR, 0.0, &p), red);
    }
}
