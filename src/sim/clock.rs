//! Countdown timer and score
//!
//! The run ends when the clock reaches zero. Game over happens exactly once;
//! afterwards the display is frozen.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;

/// Clock tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Seconds on the clock at the start of a run
    pub duration: f32,
    /// Points per bonus
    pub score_multiplier: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            duration: GAME_DURATION,
            score_multiplier: SCORE_MULTIPLIER,
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<(), SetupError> {
        if !self.duration.is_finite() {
            return Err(SetupError::InvalidConfig("clock duration must be finite"));
        }
        Ok(())
    }
}

/// Clock state for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameClockState {
    pub elapsed_seconds: f32,
    pub bonus_count: u32,
    pub is_game_over: bool,
    /// Score at the moment the clock ran out
    pub final_score: Option<u32>,
}

/// What the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockDisplay {
    /// Seconds left, never negative
    pub remaining_seconds: f32,
    /// `mm:ss`
    pub timer_label: String,
    pub score: u32,
    pub game_over: bool,
}

/// Format seconds as `mm:ss` (floored, clamped at zero)
pub fn format_time(seconds: f32) -> String {
    let s = seconds.max(0.0).floor() as u32;
    format!("{:02}:{:02}", s / 60, s % 60)
}

/// Update the clock. Returns the display and whether the caller should stop
/// its update loop (true on the game-over transition only).
pub fn tick_clock(
    state: &mut GameClockState,
    config: &ClockConfig,
    elapsed_seconds: f32,
    bonus_count: u32,
) -> (ClockDisplay, bool) {
    if state.is_game_over {
        return (frozen_display(state, config), false);
    }

    state.elapsed_seconds = elapsed_seconds;
    state.bonus_count = bonus_count;
    let score = bonus_count.saturating_mul(config.score_multiplier);
    let remaining = config.duration - elapsed_seconds;

    if remaining <= 0.0 {
        state.is_game_over = true;
        state.final_score = Some(score);
        log::info!("Time up: {} bonuses, score {}", bonus_count, score);
        return (frozen_display(state, config), true);
    }

    let display = ClockDisplay {
        remaining_seconds: remaining,
        timer_label: format_time(remaining),
        score,
        game_over: false,
    };
    (display, false)
}

fn frozen_display(state: &GameClockState, config: &ClockConfig) -> ClockDisplay {
    ClockDisplay {
        remaining_seconds: 0.0,
        timer_label: format_time(0.0),
        score: state
            .final_score
            .unwrap_or_else(|| state.bonus_count.saturating_mul(config.score_multiplier)),
        game_over: true,
    }
}
