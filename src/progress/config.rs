use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ConfigError;

/// Construction-time settings for a `ProgressController`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Enter `Loading` as soon as the controller is created
    pub auto_start: bool,
    /// Amount added to the progress value on every tick
    pub increment_step: u8,
    /// Period of the tick timer in milliseconds
    pub tick_interval_ms: u64,
    /// Wait between pausing at the threshold and completing, in milliseconds
    pub completion_delay_ms: u64,
    /// Progress value at which ticking halts
    pub initial_threshold: u8,
    /// When true, completion follows automatically `completion_delay_ms` after
    /// the threshold is reached and `done()` is ignored. When false, only
    /// `done()` completes the controller.
    #[serde(alias = "manual_completion")]
    pub auto_complete: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            auto_start: true,
            increment_step: 10,
            tick_interval_ms: 500,
            completion_delay_ms: 3000,
            initial_threshold: 70,
            auto_complete: true,
        }
    }
}

impl ProgressConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// Number of ticks from a fresh start until the controller pauses at the
    /// initial threshold. A zero threshold still takes one tick to pause.
    pub fn ticks_to_threshold(&self) -> u32 {
        if self.increment_step == 0 {
            return 0;
        }
        let threshold = u32::from(self.initial_threshold.min(crate::progress::MAX_PROGRESS));
        threshold.div_ceil(u32::from(self.increment_step)).max(1)
    }

    /// Validate settings that would stall the tick timer
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.increment_step == 0 {
            return Err(ConfigError::Invalid(
                "increment_step must be greater than zero".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
