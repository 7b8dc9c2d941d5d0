use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Sizing rules for the layout fitter, in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub standard_cell_size: f64,
    pub min_cell_size: f64,
    pub cell_size_step: f64,
    pub cell_gap: f64,
    /// Relative change in container width or height that triggers a refit.
    pub resize_threshold: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            standard_cell_size: 80.0,
            min_cell_size: 30.0,
            cell_size_step: 5.0,
            cell_gap: 8.0,
            resize_threshold: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub pair_count: usize,
    pub hint_limit: u32,
    pub shuffle_limit: u32,
    pub max_auto_shuffles: u32,
    pub animation_delay: Duration,
    pub layout: LayoutConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: 12,
            hint_limit: 3,
            shuffle_limit: 3,
            max_auto_shuffles: 20,
            animation_delay: Duration::from_millis(300),
            layout: LayoutConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        override_from_env("PAIR_COUNT", &mut config.pair_count);
        override_from_env("HINT_LIMIT", &mut config.hint_limit);
        override_from_env("SHUFFLE_LIMIT", &mut config.shuffle_limit);
        override_from_env("MAX_AUTO_SHUFFLES", &mut config.max_auto_shuffles);

        if let Ok(delay) = env::var("ANIMATION_DELAY_MS") {
            if let Ok(millis) = delay.parse::<u64>() {
                config.animation_delay = Duration::from_millis(millis);
            }
        }

        let layout = &mut config.layout;
        override_from_env_if("STANDARD_CELL_SIZE", &mut layout.standard_cell_size, |v| *v > 0.0);
        override_from_env_if("MIN_CELL_SIZE", &mut layout.min_cell_size, |v| *v > 0.0);
        override_from_env_if("CELL_SIZE_STEP", &mut layout.cell_size_step, |v| *v > 0.0);
        override_from_env_if("CELL_GAP", &mut layout.cell_gap, |v| *v >= 0.0);
        override_from_env_if("RESIZE_THRESHOLD", &mut layout.resize_threshold, |v| *v >= 0.0);

        config
    }
}

/// Replaces `field` when `key` is set and parses; anything else keeps the default.
fn override_from_env<T: FromStr>(key: &str, field: &mut T) {
    override_from_env_if(key, field, |_| true);
}

/// Like [`override_from_env`], but values failing `valid` are ignored too.
fn override_from_env_if<T, F>(key: &str, field: &mut T, valid: F)
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    if let Ok(raw) = env::var(key) {
        match raw.trim().parse::<T>() {
            Ok(value) if valid(&value) => *field = value,
            _ => warn!("Ignoring invalid {}={:?}", key, raw),
        }
    }
}
