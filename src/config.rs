//! Tunables. Constants cover fixed behavior; [`Config`] holds the few values
//! worth overriding at launch.

/// Accumulated (speed-scaled) seconds before a simulation step fires.
pub const STEP_INTERVAL: f32 = 0.05;
/// Two pan starts closer together than this reset the view offset.
pub const PAN_RESET_WINDOW: f32 = 0.5;
/// The grid is this many times smaller than the viewport on each axis.
pub const VIEWPORT_DOWNSCALE: u32 = 2;
/// Stamp editor spans -R..=R on both axes.
pub const SPAWN_PATTERN_RADIUS: i32 = 4;
/// Densities for the numbered random-spawn keys 2..=5.
pub const SPAWN_DENSITIES: [f64; 4] = [0.0001, 0.001, 0.01, 0.1];

pub const MIN_SPEED: f32 = 1.0 / 1024.0;
pub const MAX_SPEED: f32 = 1024.0;

pub const DEFAULT_SCALE: u32 = 2;
/// Zoom stops doubling here. Must be a power of two.
pub const MAX_SCALE: u32 = 64;
/// Trackpad pixel deltas per wheel notch.
pub const PIXELS_PER_SCROLL_LINE: f64 = 20.0;

const SEED_VAR: &str = "GPU_AUTOMATON_SEED";
const SCALE_VAR: &str = "GPU_AUTOMATON_SCALE";
const SPEED_VAR: &str = "GPU_AUTOMATON_SPEED";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Fixed RNG seed for reproducible random spawns; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub initial_scale: u32,
    pub initial_speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            initial_scale: DEFAULT_SCALE,
            initial_speed: 1.0,
        }
    }
}

impl Config {
    /// Defaults overridden by any well-formed `GPU_AUTOMATON_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(SEED_VAR) {
            match raw.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => log::warn!("Ignoring {}={:?}: not an unsigned integer", SEED_VAR, raw),
            }
        }
        if let Some(raw) = lookup(SCALE_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(scale) if scale.is_power_of_two() && scale <= MAX_SCALE => config.initial_scale = scale,
                _ => log::warn!("Ignoring {}={:?}: expected a power of two up to {}", SCALE_VAR, raw, MAX_SCALE),
            }
        }
        if let Some(raw) = lookup(SPEED_VAR) {
            match raw.trim().parse::<f32>() {
                Ok(speed) if speed.is_finite() && speed > 0.0 => {
                    config.initial_speed = speed.clamp(MIN_SPEED, MAX_SPEED)
                }
                _ => log::warn!("Ignoring {}={:?}: expected a positive number", SPEED_VAR, raw),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (SEED_VAR, "42"),
            (SCALE_VAR, "4"),
            (SPEED_VAR, "0.5"),
        ]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.initial_scale, 4);
        assert_eq!(config.initial_speed, 0.5);
    }

    #[test]
    fn scale_must_be_a_capped_power_of_two() {
        for raw in ["100000", "3"] {
            let config = Config::from_lookup(lookup(&[(SCALE_VAR, raw)]));
            assert_eq!(config.initial_scale, DEFAULT_SCALE);
        }
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            (SEED_VAR, "-3"),
            (SCALE_VAR, "0"),
            (SPEED_VAR, "NaN"),
        ]));
        assert_eq!(config, Config::default());
    }
}
