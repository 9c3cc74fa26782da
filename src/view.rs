use crate::config::{DEFAULT_SCALE, MAX_SCALE, PAN_RESET_WINDOW};

/// Pan/zoom state for drawing the grid.
///
/// Pointer positions are in y-up host coordinates; `offset` is in y-down
/// screen pixels, hence the inverted vertical axis in [`continue_pan`].
///
/// [`continue_pan`]: ViewTransform::continue_pan
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    offset: [f32; 2],
    scale: u32,
    last_pan_start: Option<f32>,
    pan_origin: [f32; 2],
    pointer_origin: [f32; 2],
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl ViewTransform {
    pub fn new(scale: u32) -> Self {
        Self {
            offset: [0.0, 0.0],
            scale: scale.clamp(1, MAX_SCALE),
            last_pan_start: None,
            pan_origin: [0.0, 0.0],
            pointer_origin: [0.0, 0.0],
        }
    }

    pub fn offset(&self) -> [f32; 2] {
        self.offset
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Starts a drag. A second start within [`PAN_RESET_WINDOW`] seconds
    /// recenters the view first.
    pub fn begin_pan(&mut self, pointer: [f32; 2], now: f32) {
        if let Some(last) = self.last_pan_start {
            if now - last < PAN_RESET_WINDOW {
                self.offset = [0.0, 0.0];
            }
        }
        self.last_pan_start = Some(now);
        self.pan_origin = self.offset;
        self.pointer_origin = pointer;
    }

    pub fn continue_pan(&mut self, pointer: [f32; 2]) {
        self.offset = [
            self.pan_origin[0] + (pointer[0] - self.pointer_origin[0]),
            self.pan_origin[1] - (pointer[1] - self.pointer_origin[1]),
        ];
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * 2).min(MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / 2).max(1);
    }

    /// Top-left corner of the drawn grid, in y-down screen pixels.
    pub fn grid_origin(&self, screen: [f32; 2], grid: [f32; 2]) -> [f32; 2] {
        let scale = self.scale as f32;
        [
            screen[0] / 2.0 + self.offset[0] - grid[0] * scale / 2.0,
            screen[1] / 2.0 + self.offset[1] - grid[1] * scale / 2.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_moves_offset_with_inverted_y() {
        let mut view = ViewTransform::default();
        view.begin_pan([10.0, 10.0], 0.0);
        view.continue_pan([15.0, 30.0]);
        assert_eq!(view.offset(), [5.0, -20.0]);

        // A later drag continues from the current offset.
        view.begin_pan([0.0, 0.0], 5.0);
        view.continue_pan([1.0, 1.0]);
        assert_eq!(view.offset(), [6.0, -21.0]);
    }

    #[test]
    fn quick_second_pan_resets_offset() {
        let mut view = ViewTransform::default();
        view.begin_pan([0.0, 0.0], 1.0);
        view.continue_pan([40.0, -40.0]);
        assert_eq!(view.offset(), [40.0, 40.0]);

        view.begin_pan([40.0, -40.0], 1.4);
        assert_eq!(view.offset(), [0.0, 0.0]);
    }

    #[test]
    fn slow_second_pan_keeps_offset() {
        let mut view = ViewTransform::default();
        view.begin_pan([0.0, 0.0], 1.0);
        view.continue_pan([3.0, 0.0]);
        view.begin_pan([3.0, 0.0], 2.0);
        assert_eq!(view.offset(), [3.0, 0.0]);
    }

    #[test]
    fn zoom_out_floors_at_one() {
        let mut view = ViewTransform::new(2);
        for _ in 0..3 {
            view.zoom_out();
        }
        assert_eq!(view.scale(), 1);

        view.zoom_in();
        view.zoom_in();
        assert_eq!(view.scale(), 4);
    }

    #[test]
    fn zoom_stays_on_powers_of_two_at_the_cap() {
        let mut view = ViewTransform::new(2);
        for _ in 0..40 {
            view.zoom_in();
        }
        assert_eq!(view.scale(), MAX_SCALE);

        view.zoom_out();
        assert_eq!(view.scale(), MAX_SCALE / 2);
        assert!(view.scale().is_power_of_two());
    }

    #[test]
    fn grid_is_centered_without_offset() {
        let view = ViewTransform::new(2);
        assert_eq!(view.grid_origin([800.0, 600.0], [400.0, 300.0]), [0.0, 0.0]);
        assert_eq!(view.grid_origin([800.0, 600.0], [100.0, 100.0]), [300.0, 200.0]);
    }
}
