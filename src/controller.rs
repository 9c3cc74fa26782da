//! Binds discrete input actions to state changes and drives the per-frame
//! update.

use rand::{rngs::StdRng, SeedableRng};

use crate::catalog::Catalog;
use crate::clock::SimulationClock;
use crate::config::{Config, SPAWN_DENSITIES};
use crate::grid::{CellColor, GridBuffer, GridSize, Seed};
use crate::kernel::{StepKernel, StepParams};
use crate::neighborhood::Neighborhood;
use crate::pattern::PatternSet;
use crate::rules::presets::{builtin_neighborhoods, builtin_rules};
use crate::rules::{Rule, RuleError};
use crate::theme::{hsv_to_rgb, Theme};
use crate::view::ViewTransform;

/// One discrete user input. Each maps to exactly one mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    ToggleUi,
    ToggleDarkMode,
    ToggleRainbow,
    ToggleDecoy,
    TogglePause,
    ResetPattern,
    TogglePatternCell { dx: i32, dy: i32 },
    /// Numbered spawn keys: 0 stamps the center, 1..=4 spawn at random.
    Spawn(usize),
    CycleRule(isize),
    CycleNeighborhood(isize),
    SpeedUp,
    SlowDown,
    ZoomIn,
    ZoomOut,
    BeginPan { pointer: [f32; 2] },
    ContinuePan { pointer: [f32; 2] },
}

impl Action {
    pub fn seed(spawn: usize) -> Option<Seed> {
        match spawn {
            0 => Some(Seed::Center),
            n => SPAWN_DENSITIES.get(n - 1).map(|&density| Seed::Random { density }),
        }
    }
}

pub struct InteractionController {
    pub rules: Catalog<Rule>,
    pub neighborhoods: Catalog<Neighborhood>,
    pub pattern: PatternSet,
    pub grid: GridBuffer,
    pub clock: SimulationClock,
    pub view: ViewTransform,
    pub show_ui: bool,
    pub dark_mode: bool,
    pub rainbow: bool,
    pub decoy: bool,
    theme: Theme,
    rng: StdRng,
    now: f32,
}

impl InteractionController {
    pub fn new(config: &Config, size: GridSize) -> Result<Self, RuleError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            rules: builtin_rules()?,
            neighborhoods: builtin_neighborhoods(),
            pattern: PatternSet::default(),
            grid: GridBuffer::new(size),
            clock: SimulationClock::new(config.initial_speed),
            view: ViewTransform::new(config.initial_scale),
            show_ui: true,
            dark_mode: true,
            rainbow: false,
            decoy: false,
            theme: Theme::new(true),
            rng,
            now: 0.0,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Seconds since start, advanced by [`update`](Self::update).
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Color for stamps and new births: the theme foreground, or a hue
    /// cycling once per second in rainbow mode.
    pub fn foreground(&self) -> CellColor {
        if self.rainbow {
            hsv_to_rgb(self.now % 1.0, 1.0, 1.0)
        } else {
            self.theme.foreground
        }
    }

    pub fn step_params(&self) -> StepParams {
        StepParams::new(
            self.grid.size(),
            self.rules.current(),
            self.neighborhoods.current(),
            self.foreground(),
            self.decoy,
        )
    }

    /// Clears the grid, applies `seed` and hands the result to the kernel
    /// as the current generation.
    pub fn reseed<K: StepKernel + ?Sized>(&mut self, seed: Seed, kernel: &mut K) {
        let color = self.foreground();
        self.grid.reseed(seed, &self.pattern, color, &mut self.rng);
        kernel.upload(self.clock.front(), self.grid.cells());
        log::info!("Seeded grid ({:?}): {} live cells", seed, self.grid.live_count());
    }

    /// Reallocates the grid for a new size. The fresh buffers are empty;
    /// reseeding is left to the caller. Returns whether anything changed.
    pub fn resize<K: StepKernel + ?Sized>(&mut self, size: GridSize, kernel: &mut K) -> bool {
        if size == self.grid.size() {
            return false;
        }
        self.grid.resize(size);
        kernel.resize(size);
        log::info!("Grid reallocated at {}x{}", size.width, size.height);
        true
    }

    pub fn apply<K: StepKernel + ?Sized>(&mut self, action: Action, kernel: &mut K) {
        match action {
            Action::ToggleUi => self.show_ui ^= true,
            Action::ToggleDarkMode => {
                self.dark_mode ^= true;
                self.theme = Theme::new(self.dark_mode);
                // Existing cells carry the old foreground color.
                self.reseed(Seed::Empty, kernel);
            }
            Action::ToggleRainbow => self.rainbow ^= true,
            Action::ToggleDecoy => self.decoy ^= true,
            Action::TogglePause => self.clock.toggle_pause(),
            Action::ResetPattern => self.pattern.reset(),
            Action::TogglePatternCell { dx, dy } => {
                if !self.pattern.toggle(dx, dy) {
                    log::debug!("Kept last stamp offset ({}, {})", dx, dy);
                }
            }
            Action::Spawn(n) => match Action::seed(n) {
                Some(seed) => self.reseed(seed, kernel),
                None => log::warn!("No spawn bound to slot {}", n),
            },
            Action::CycleRule(delta) => {
                let rule = self.rules.cycle(delta);
                log::info!("Rule: {}", rule);
            }
            Action::CycleNeighborhood(delta) => {
                let hood = self.neighborhoods.cycle(delta);
                log::info!("Neighborhood: {}", hood);
            }
            Action::SpeedUp => self.clock.speed_up(),
            Action::SlowDown => self.clock.slow_down(),
            Action::ZoomIn => self.view.zoom_in(),
            Action::ZoomOut => self.view.zoom_out(),
            Action::BeginPan { pointer } => self.view.begin_pan(pointer, self.now),
            Action::ContinuePan { pointer } => self.view.continue_pan(pointer),
        }
    }

    /// Advances the frame clock and steps the simulation when due.
    pub fn update<K: StepKernel + ?Sized>(&mut self, delta_time: f32, kernel: &mut K) -> bool {
        self.now += delta_time;
        let params = self.step_params();
        self.clock.tick(delta_time, kernel, &params)
    }

    /// Overlay text, one line per binding.
    pub fn status_lines(&self) -> Vec<String> {
        let on_off = |flag: bool| if flag { "on" } else { "off" };
        vec![
            "[Z] toggle UI".to_string(),
            String::new(),
            format!("[X] toggle dark mode: {}", on_off(self.dark_mode)),
            format!("[C] toggle rainbow mode: {}", on_off(self.rainbow)),
            format!("[V] toggle decoy: {}", on_off(self.decoy)),
            String::new(),
            format!(
                "[←] [→] rule: {} ({}/{})",
                self.rules.current(),
                self.rules.index() + 1,
                self.rules.len()
            ),
            String::new(),
            format!("[↓] [↑] speed: {}x", self.clock.speed()),
            format!(
                "[SPACE] toggle pause{}",
                if self.clock.is_paused() { " (paused)" } else { "" }
            ),
            format!("generation: {}", self.clock.generation()),
            String::new(),
            format!(
                "[N] neighborhood: {} ({}/{})",
                self.neighborhoods.current(),
                self.neighborhoods.index() + 1,
                self.neighborhoods.len()
            ),
            String::new(),
            "[RMB] pan, twice to reset".to_string(),
            format!("[SCROLL WHEEL] zoom: {}x", self.view.scale()),
            String::new(),
            "[1] [2] [3] [4] [5] spawn".to_string(),
            "Spawn pattern, [R] to reset:".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{CpuKernel, Slot};

    fn setup() -> (InteractionController, CpuKernel) {
        let config = Config { seed: Some(9), ..Config::default() };
        let size = GridSize::new(32, 24);
        (InteractionController::new(&config, size).unwrap(), CpuKernel::new(size))
    }

    #[test]
    fn spawn_center_uploads_to_front_slot() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::Spawn(0), &mut kernel);

        let live: Vec<_> = kernel.cells(Slot::A).iter().filter(|c| c.is_alive()).collect();
        assert_eq!(live, vec![&CellColor::WHITE]);
        assert_eq!(ctl.grid.get(16, 12), Some(CellColor::WHITE));
    }

    #[test]
    fn rule_cycling_wraps_both_ways() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::CycleRule(-1), &mut kernel);
        assert_eq!(ctl.rules.current().to_string(), "B3678/S135678 - Castles");
        ctl.apply(Action::CycleRule(1), &mut kernel);
        assert_eq!(ctl.rules.index(), 0);
    }

    #[test]
    fn neighborhood_feeds_step_params() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::CycleNeighborhood(1), &mut kernel);
        assert_eq!(ctl.step_params().weights, Neighborhood::von_neumann().weights());
        ctl.apply(Action::ToggleDecoy, &mut kernel);
        assert_eq!(ctl.step_params().decoy, 1);
    }

    #[test]
    fn theme_toggle_recolors_and_clears() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::Spawn(4), &mut kernel);
        assert!(ctl.grid.live_count() > 0);

        ctl.apply(Action::ToggleDarkMode, &mut kernel);
        assert_eq!(ctl.theme().foreground, CellColor::BLACK);
        assert_eq!(ctl.grid.live_count(), 0);
        assert!(kernel.cells(Slot::A).iter().all(|c| !c.is_alive()));
    }

    #[test]
    fn pause_stops_generations() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::TogglePause, &mut kernel);
        assert!(!ctl.update(1.0, &mut kernel));
        ctl.apply(Action::TogglePause, &mut kernel);
        assert!(ctl.update(0.06, &mut kernel));
        assert_eq!(ctl.clock.front(), Slot::B);
    }

    #[test]
    fn double_pan_uses_controller_time() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::BeginPan { pointer: [0.0, 0.0] }, &mut kernel);
        ctl.apply(Action::ContinuePan { pointer: [5.0, 5.0] }, &mut kernel);
        ctl.update(0.2, &mut kernel);
        ctl.apply(Action::BeginPan { pointer: [5.0, 5.0] }, &mut kernel);
        assert_eq!(ctl.view.offset(), [0.0, 0.0]);
    }

    #[test]
    fn pattern_edits_affect_next_spawn() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::TogglePatternCell { dx: 1, dy: 0 }, &mut kernel);
        ctl.apply(Action::Spawn(0), &mut kernel);
        assert_eq!(ctl.grid.live_count(), 2);

        ctl.apply(Action::ResetPattern, &mut kernel);
        ctl.apply(Action::Spawn(0), &mut kernel);
        assert_eq!(ctl.grid.live_count(), 1);
    }

    #[test]
    fn resize_to_same_size_is_noop() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::Spawn(0), &mut kernel);
        assert!(!ctl.resize(GridSize::new(32, 24), &mut kernel));
        assert_eq!(ctl.grid.live_count(), 1);

        assert!(ctl.resize(GridSize::new(10, 10), &mut kernel));
        assert_eq!(ctl.grid.live_count(), 0);
        assert_eq!(kernel.cells(Slot::A).len(), 100);
    }

    #[test]
    fn rainbow_changes_foreground_over_time() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::ToggleRainbow, &mut kernel);
        ctl.clock.toggle_pause();
        let first = ctl.foreground();
        ctl.update(0.5, &mut kernel);
        assert_ne!(first, ctl.foreground());
    }

    #[test]
    fn unknown_spawn_slot_is_ignored() {
        let (mut ctl, mut kernel) = setup();
        ctl.apply(Action::Spawn(0), &mut kernel);
        ctl.apply(Action::Spawn(9), &mut kernel);
        assert_eq!(ctl.grid.live_count(), 1);
    }

    #[test]
    fn status_lists_current_selection() {
        let (ctl, _) = setup();
        let lines = ctl.status_lines();
        assert!(lines.contains(&"[←] [→] rule: B3/S23 - Life (1/22)".to_string()));
        assert!(lines.contains(&"[N] neighborhood: Moore (1/2)".to_string()));
        assert!(lines.contains(&"[SCROLL WHEEL] zoom: 2x".to_string()));
    }

    #[test]
    fn status_counts_generations() {
        let (mut ctl, mut kernel) = setup();
        assert!(ctl.status_lines().contains(&"generation: 0".to_string()));
        ctl.update(0.06, &mut kernel);
        ctl.update(0.06, &mut kernel);
        assert!(ctl.status_lines().contains(&"generation: 2".to_string()));
    }
}
