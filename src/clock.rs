use crate::config::{MAX_SPEED, MIN_SPEED, STEP_INTERVAL};
use crate::kernel::{Slot, StepKernel, StepParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Paused,
}

/// Gates simulation steps on accumulated, speed-scaled time and tracks which
/// ping-pong slot currently holds the displayed generation.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    accumulated: f32,
    speed: f32,
    state: ClockState,
    front: Slot,
    generation: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SimulationClock {
    pub fn new(speed: f32) -> Self {
        Self {
            accumulated: 0.0,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            state: ClockState::Running,
            front: Slot::A,
            generation: 0,
        }
    }

    /// Slot holding the current generation. Uploads and rendering use it.
    pub fn front(&self) -> Slot {
        self.front
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            ClockState::Running => ClockState::Paused,
            ClockState::Paused => ClockState::Running,
        };
    }

    pub fn speed_up(&mut self) {
        self.speed = (self.speed * 2.0).min(MAX_SPEED);
    }

    pub fn slow_down(&mut self) {
        self.speed = (self.speed / 2.0).max(MIN_SPEED);
    }

    /// Advances time by `delta_time` seconds. When a step is due, runs the
    /// kernel on the front slot, swaps roles, and drops any excess time.
    /// Returns whether a step ran.
    pub fn tick<K: StepKernel + ?Sized>(&mut self, delta_time: f32, kernel: &mut K, params: &StepParams) -> bool {
        if self.is_paused() {
            return false;
        }

        self.accumulated += delta_time * self.speed;
        if self.accumulated <= STEP_INTERVAL {
            return false;
        }

        kernel.step(self.front, params);
        self.front = self.front.other();
        self.accumulated = 0.0;
        self.generation += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellColor, GridSize};

    #[derive(Default)]
    struct RecordingKernel {
        steps: Vec<Slot>,
    }

    impl StepKernel for RecordingKernel {
        fn resize(&mut self, _size: GridSize) {}
        fn upload(&mut self, _slot: Slot, _cells: &[CellColor]) {}
        fn step(&mut self, source: Slot, _params: &StepParams) {
            self.steps.push(source);
        }
    }

    fn params() -> StepParams {
        bytemuck::Zeroable::zeroed()
    }

    #[test]
    fn single_large_tick_fires_once_and_resets() {
        let mut clock = SimulationClock::new(1.0);
        let mut kernel = RecordingKernel::default();

        assert!(clock.tick(0.06, &mut kernel, &params()));
        assert_eq!(kernel.steps, vec![Slot::A]);
        assert_eq!(clock.accumulated(), 0.0);
        assert_eq!(clock.front(), Slot::B);
    }

    #[test]
    fn small_ticks_accumulate() {
        let mut clock = SimulationClock::new(1.0);
        let mut kernel = RecordingKernel::default();

        assert!(!clock.tick(0.02, &mut kernel, &params()));
        assert!(!clock.tick(0.02, &mut kernel, &params()));
        assert!(clock.tick(0.02, &mut kernel, &params()));
        assert_eq!(kernel.steps.len(), 1);
    }

    #[test]
    fn excess_time_is_dropped() {
        let mut clock = SimulationClock::new(1.0);
        let mut kernel = RecordingKernel::default();

        clock.tick(10.0, &mut kernel, &params());
        assert!(!clock.tick(0.01, &mut kernel, &params()));
        assert_eq!(kernel.steps.len(), 1);
    }

    #[test]
    fn swaps_slots_every_step() {
        let mut clock = SimulationClock::new(4.0);
        let mut kernel = RecordingKernel::default();
        for _ in 0..3 {
            clock.tick(0.02, &mut kernel, &params());
        }
        assert_eq!(kernel.steps, vec![Slot::A, Slot::B, Slot::A]);
        assert_eq!(clock.front(), Slot::B);
        assert_eq!(clock.generation(), 3);
    }

    #[test]
    fn paused_clock_does_not_accumulate() {
        let mut clock = SimulationClock::new(1.0);
        let mut kernel = RecordingKernel::default();
        clock.toggle_pause();

        assert!(!clock.tick(1.0, &mut kernel, &params()));
        assert_eq!(clock.accumulated(), 0.0);

        clock.toggle_pause();
        assert_eq!(clock.state(), ClockState::Running);
        assert!(!clock.tick(0.01, &mut kernel, &params()));
    }

    #[test]
    fn speed_stays_positive_and_bounded() {
        let mut clock = SimulationClock::new(1.0);
        for _ in 0..200 {
            clock.slow_down();
        }
        assert_eq!(clock.speed(), MIN_SPEED);
        for _ in 0..200 {
            clock.speed_up();
        }
        assert_eq!(clock.speed(), MAX_SPEED);
    }
}
