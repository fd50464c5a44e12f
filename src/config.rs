use std::time::Duration;

use crate::logging::LogLevel;

const DEFAULT_TYPING_DELAY_MS: u64 = 300;
const DEFAULT_EXIT_DELAY_MS: u64 = 1_000;
const DEFAULT_TRANSITION_DURATION_MS: u64 = 900;
const DEFAULT_FLIP_DURATION_MS: u64 = 700;
const DEFAULT_DOCK_STAGGER: f64 = 0.08;
const DEFAULT_PROXIMITY_THRESHOLD: f64 = 0.1;
const DEFAULT_MAX_INTERACTION_DISTANCE: f64 = 14.0;
const DEFAULT_PARTICLE_COUNT: usize = 50;
const DEFAULT_PARTICLE_SEED: u64 = 7;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const TYPING_DELAY_MS_BOUNDS: (u64, u64) = (0, 5_000);
const EXIT_DELAY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const TRANSITION_DURATION_MS_BOUNDS: (u64, u64) = (50, 10_000);
const FLIP_DURATION_MS_BOUNDS: (u64, u64) = (50, 10_000);
const DOCK_STAGGER_BOUNDS: (f64, f64) = (0.0, 0.15);
const PROXIMITY_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 0.99);
const MAX_INTERACTION_DISTANCE_BOUNDS: (f64, f64) = (1.0, 100.0);
const PARTICLE_COUNT_BOUNDS: (usize, usize) = (1, 2_000);

/// Tunables for the terminal, the social overlay and the background scene.
///
/// Every value has a default and an accepted range. Anything missing,
/// unparsable or out of range silently falls back to the default, so a
/// misconfigured page still renders.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub typing_delay: Duration,
    pub exit_delay: Duration,
    pub transition_duration: Duration,
    pub flip_duration: Duration,
    pub dock_stagger: f64,
    pub proximity_threshold: f64,
    pub max_interaction_distance: f64,
    pub particle_count: usize,
    pub particle_seed: u64,
    pub log_level: LogLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            exit_delay: Duration::from_millis(DEFAULT_EXIT_DELAY_MS),
            transition_duration: Duration::from_millis(DEFAULT_TRANSITION_DURATION_MS),
            flip_duration: Duration::from_millis(DEFAULT_FLIP_DURATION_MS),
            dock_stagger: DEFAULT_DOCK_STAGGER,
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            max_interaction_distance: DEFAULT_MAX_INTERACTION_DISTANCE,
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_seed: DEFAULT_PARTICLE_SEED,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl RuntimeConfig {
    /// Builds a config from a key lookup such as the `data-*` attributes of
    /// the mount element. Keys are kebab-case without the `data-` prefix.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let typing_delay_ms = parse_u64_with_bounds(
            &lookup,
            "typing-delay-ms",
            DEFAULT_TYPING_DELAY_MS,
            TYPING_DELAY_MS_BOUNDS,
        );
        let exit_delay_ms = parse_u64_with_bounds(
            &lookup,
            "exit-delay-ms",
            DEFAULT_EXIT_DELAY_MS,
            EXIT_DELAY_MS_BOUNDS,
        );
        let transition_duration_ms = parse_u64_with_bounds(
            &lookup,
            "transition-duration-ms",
            DEFAULT_TRANSITION_DURATION_MS,
            TRANSITION_DURATION_MS_BOUNDS,
        );
        let flip_duration_ms = parse_u64_with_bounds(
            &lookup,
            "flip-duration-ms",
            DEFAULT_FLIP_DURATION_MS,
            FLIP_DURATION_MS_BOUNDS,
        );
        let dock_stagger =
            parse_f64_with_bounds(&lookup, "dock-stagger", DEFAULT_DOCK_STAGGER, DOCK_STAGGER_BOUNDS);
        let proximity_threshold = parse_f64_with_bounds(
            &lookup,
            "proximity-threshold",
            DEFAULT_PROXIMITY_THRESHOLD,
            PROXIMITY_THRESHOLD_BOUNDS,
        );
        let max_interaction_distance = parse_f64_with_bounds(
            &lookup,
            "max-interaction-distance",
            DEFAULT_MAX_INTERACTION_DISTANCE,
            MAX_INTERACTION_DISTANCE_BOUNDS,
        );
        let particle_count = parse_usize_with_bounds(
            &lookup,
            "particle-count",
            DEFAULT_PARTICLE_COUNT,
            PARTICLE_COUNT_BOUNDS,
        );
        let particle_seed = parse_non_empty_string(&lookup, "particle-seed")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PARTICLE_SEED);
        let log_level = parse_non_empty_string(&lookup, "log-level")
            .and_then(|value| LogLevel::from_str(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            typing_delay: Duration::from_millis(typing_delay_ms),
            exit_delay: Duration::from_millis(exit_delay_ms),
            transition_duration: Duration::from_millis(transition_duration_ms),
            flip_duration: Duration::from_millis(flip_duration_ms),
            dock_stagger,
            proximity_threshold,
            max_interaction_distance,
            particle_count,
            particle_seed,
            log_level,
        }
    }
}

fn parse_non_empty_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64_with_bounds<F>(lookup: &F, name: &str, default: u64, bounds: (u64, u64)) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_usize_with_bounds<F>(lookup: &F, name: &str, default: usize, bounds: (usize, usize)) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds<F>(lookup: &F, name: &str, default: f64, bounds: (f64, f64)) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn in_range_values_are_applied() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            ("typing-delay-ms", " 120 "),
            ("transition-duration-ms", "400"),
            ("dock-stagger", "0.05"),
            ("particle-count", "200"),
            ("log-level", "DEBUG"),
        ]));

        assert_eq!(config.typing_delay, Duration::from_millis(120));
        assert_eq!(config.transition_duration, Duration::from_millis(400));
        assert_eq!(config.dock_stagger, 0.05);
        assert_eq!(config.particle_count, 200);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_range_and_garbage_fall_back() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            ("typing-delay-ms", "999999"),
            ("flip-duration-ms", "fast"),
            ("proximity-threshold", "1.5"),
            ("max-interaction-distance", "NaN"),
            ("particle-count", "0"),
            ("log-level", "verbose"),
        ]));

        let defaults = RuntimeConfig::default();
        assert_eq!(config.typing_delay, defaults.typing_delay);
        assert_eq!(config.flip_duration, defaults.flip_duration);
        assert_eq!(config.proximity_threshold, defaults.proximity_threshold);
        assert_eq!(config.max_interaction_distance, defaults.max_interaction_distance);
        assert_eq!(config.particle_count, defaults.particle_count);
        assert_eq!(config.log_level, defaults.log_level);
    }
}
